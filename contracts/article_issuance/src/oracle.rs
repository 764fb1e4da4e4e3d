//! # Randomness oracle
//!
//! The oracle is an external contract. Issuance only depends on one call into
//! it and one call back out of it:
//!
//! 1. `request_random_words(...)` returns a request id immediately. That id is
//!    the correlation token for the purchase.
//! 2. Some ledgers later the oracle invokes this contract's `fulfill` with the
//!    same id and the random words.
//!
//! Nothing here waits for the callback; the pending request table in
//! [`storage`](crate::storage) carries the state across the gap.

use soroban_sdk::{contractclient, Address, BytesN, Env};

use crate::types::IssuanceConfig;

#[contractclient(name = "RandomnessOracleClient")]
pub trait RandomnessOracle {
    /// Queue a randomness request whose answer is delivered to `consumer`.
    fn request_random_words(
        env: Env,
        consumer: Address,
        key_hash: BytesN<32>,
        subscription_id: u64,
        request_confirmations: u32,
        callback_gas_limit: u32,
        num_words: u32,
    ) -> u64;
}

/// Submit a request shaped by `config` on behalf of this contract.
pub fn submit(env: &Env, config: &IssuanceConfig) -> u64 {
    RandomnessOracleClient::new(env, &config.oracle).request_random_words(
        &env.current_contract_address(),
        &config.key_hash,
        &config.subscription_id,
        &config.request_confirmations,
        &config.callback_gas_limit,
        &config.num_words,
    )
}

/// Reduce a random word to a variant index in `0..variants`.
///
/// `variants` is never zero for a stored article.
pub fn select_variant(word: u64, variants: u32) -> u32 {
    (word % u64::from(variants.max(1))) as u32
}

#[cfg(test)]
mod tests {
    use super::select_variant;

    #[test]
    fn variant_is_word_modulo_count() {
        assert_eq!(select_variant(0, 4), 0);
        assert_eq!(select_variant(7, 4), 3);
        assert_eq!(select_variant(u64::MAX, 10), 5);
    }

    #[test]
    fn single_variant_always_zero() {
        assert_eq!(select_variant(123_456_789, 1), 0);
    }
}
