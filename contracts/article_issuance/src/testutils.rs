//! In-process stand-in for the randomness oracle.
//!
//! `MockRandomnessOracle` answers `request_random_words` with sequential ids
//! starting at 1 and remembers which consumer asked. A test then plays the
//! oracle's later delivery with [`MockRandomnessOracle::fulfill_random_words`]
//! (words derived from the request id) or
//! [`MockRandomnessOracle::fulfill_with_words`] (words chosen by the test).
//!
//! Delivery goes through `try_fulfill`, so a rejected callback is reported as
//! `false` instead of aborting the oracle's own invocation. Requests are kept
//! after delivery, which lets tests replay a callback.

use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Bytes, BytesN, Env, Vec};

use crate::ArticleIssuanceClient;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MockRequest {
    pub consumer: Address,
    pub num_words: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum MockKey {
    Nonce,
    Request(u64),
}

#[contract]
pub struct MockRandomnessOracle;

#[contractimpl]
impl MockRandomnessOracle {
    pub fn request_random_words(
        env: Env,
        consumer: Address,
        _key_hash: BytesN<32>,
        _subscription_id: u64,
        _request_confirmations: u32,
        _callback_gas_limit: u32,
        num_words: u32,
    ) -> u64 {
        let request_id = env
            .storage()
            .instance()
            .get::<_, u64>(&MockKey::Nonce)
            .unwrap_or(0)
            + 1;
        env.storage().instance().set(&MockKey::Nonce, &request_id);
        env.storage().persistent().set(
            &MockKey::Request(request_id),
            &MockRequest {
                consumer,
                num_words,
            },
        );
        request_id
    }

    /// Deliver words derived from `sha256(request_id)`.
    pub fn fulfill_random_words(env: Env, request_id: u64) -> bool {
        let request = Self::load(&env, request_id);
        let words = derive_words(&env, request_id, request.num_words);
        Self::deliver(&env, &request, request_id, words)
    }

    /// Deliver caller-chosen words.
    pub fn fulfill_with_words(env: Env, request_id: u64, words: Vec<u64>) -> bool {
        let request = Self::load(&env, request_id);
        Self::deliver(&env, &request, request_id, words)
    }

    pub fn last_request_id(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&MockKey::Nonce)
            .unwrap_or(0)
    }

    fn load(env: &Env, request_id: u64) -> MockRequest {
        env.storage()
            .persistent()
            .get(&MockKey::Request(request_id))
            .expect("nonexistent request")
    }

    fn deliver(env: &Env, request: &MockRequest, request_id: u64, words: Vec<u64>) -> bool {
        let consumer = ArticleIssuanceClient::new(env, &request.consumer);
        let delivered = matches!(
            consumer.try_fulfill(&env.current_contract_address(), &request_id, &words),
            Ok(Ok(_))
        );
        if !delivered {
            log!(env, "consumer rejected fulfillment", request_id);
        }
        delivered
    }
}

/// `num_words` pseudo-random words, the i-th taken from `sha256(request_id ++ i)`.
pub fn derive_words(env: &Env, request_id: u64, num_words: u32) -> Vec<u64> {
    let mut words = Vec::new(env);
    for i in 0..num_words {
        let mut seed = Bytes::from_array(env, &request_id.to_be_bytes());
        seed.extend_from_array(&i.to_be_bytes());
        let digest: BytesN<32> = env.crypto().sha256(&seed).into();
        let bytes = digest.to_array();
        let mut head = [0u8; 8];
        head.copy_from_slice(&bytes[..8]);
        words.push_back(u64::from_be_bytes(head));
    }
    words
}
