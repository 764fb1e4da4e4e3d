//! # Article Issuance Contract
//!
//! A Soroban contract that sells one collectible record per article per user.
//! The record's variant is decided by an external randomness oracle, so every
//! purchase runs in two phases:
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`ArticleIssuance::init`]                             |
//! | Catalogue    | `publish`, `publish_with_variants`, `get_article`     |
//! | Purchase     | [`ArticleIssuance::request_purchase`]                 |
//! | Fulfillment  | [`ArticleIssuance::fulfill`] (oracle only)            |
//! | Ownership    | `transfer`, `record_for`, `uri_for`, `owner_of`, ...  |
//! | Treasury     | `withdraw`, `treasury_balance`                        |
//! | Admin        | `admin`, `transfer_admin`, `role_of`                  |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`]. Storage access lives in [`storage`].
//! The oracle seam lives in [`oracle`]. Every entry point validates all of its
//! inputs before the first write, so a returned error never leaves partial
//! state behind.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env, String, Vec};

pub mod access;
pub mod events;
pub mod oracle;
mod storage;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use access::Role;
pub use types::{Article, IssuanceConfig, PendingRequest, Record, RequestStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    ArticleNotFound = 4,
    InsufficientFunds = 5,
    AlreadyOwned = 6,
    SupplyExhausted = 7,
    RequestPending = 8,
    UnknownRequest = 9,
    NotFound = 10,
    NothingToWithdraw = 11,
    InvalidConfig = 12,
    InvalidVariants = 13,
    InvalidRandomness = 14,
    CorrelationConflict = 15,
    Overflow = 16,
}

#[contract]
pub struct ArticleIssuance;

#[contractimpl]
impl ArticleIssuance {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Store the admin and the immutable issuance configuration.
    ///
    /// Must be called exactly once after deployment; `admin` must sign.
    pub fn init(env: Env, admin: Address, config: IssuanceConfig) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if config.num_words != 1
            || config.mint_price <= 0
            || config.max_supply == 0
            || config.default_variants == 0
        {
            return Err(Error::InvalidConfig);
        }
        access::init_admin(&env, &admin)?;
        storage::set_config(&env, &config);
        Ok(())
    }

    pub fn config(env: Env) -> Result<IssuanceConfig, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    pub fn admin(env: Env) -> Result<Address, Error> {
        access::get_admin(&env)
    }

    /// Hand admin rights to `new_admin`. Both parties must sign.
    pub fn transfer_admin(env: Env, current: Address, new_admin: Address) -> Result<(), Error> {
        access::transfer_admin(&env, &current, &new_admin)
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        access::role_of(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Article registry
    // ─────────────────────────────────────────────────────────

    /// Publish an article with the configured default variant count.
    pub fn publish(env: Env, caller: Address, uri: String) -> Result<u64, Error> {
        access::require_admin(&env, &caller)?;
        let variants = storage::get_config(&env)?.default_variants;
        Self::store_article(&env, uri, variants)
    }

    /// Publish an article whose records draw from `variants` variants.
    pub fn publish_with_variants(
        env: Env,
        caller: Address,
        uri: String,
        variants: u32,
    ) -> Result<u64, Error> {
        access::require_admin(&env, &caller)?;
        if variants == 0 {
            return Err(Error::InvalidVariants);
        }
        Self::store_article(&env, uri, variants)
    }

    pub fn get_article(env: Env, article_id: u64) -> Result<Article, Error> {
        storage::load_article(&env, article_id)
    }

    pub fn article_count(env: Env) -> u64 {
        storage::article_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Issuance
    // ─────────────────────────────────────────────────────────

    /// Pay for a record of `article_id` and queue the randomness request.
    ///
    /// The whole `payment` is kept, even above the price. Returns the oracle
    /// request id; the record itself appears only once the oracle calls
    /// [`ArticleIssuance::fulfill`].
    pub fn request_purchase(
        env: Env,
        requester: Address,
        article_id: u64,
        payment: i128,
    ) -> Result<u64, Error> {
        requester.require_auth();
        let config = storage::get_config(&env)?;

        storage::load_article(&env, article_id)?;
        if payment < config.mint_price {
            return Err(Error::InsufficientFunds);
        }
        if storage::owned_token(&env, article_id, &requester).is_some() {
            return Err(Error::AlreadyOwned);
        }
        if storage::pending_for(&env, article_id, &requester).is_some() {
            return Err(Error::RequestPending);
        }
        // Pending requests reserve supply so every admitted one can mint.
        let reserved = storage::total_supply(&env)
            .saturating_add(u64::from(storage::pending_count(&env)));
        if reserved >= config.max_supply {
            return Err(Error::SupplyExhausted);
        }

        token::Client::new(&env, &config.payment_token).transfer(
            &requester,
            &env.current_contract_address(),
            &payment,
        );
        storage::credit_treasury(&env, payment)?;

        let request_id = oracle::submit(&env, &config);
        if storage::has_pending(&env, request_id) {
            return Err(Error::CorrelationConflict);
        }
        let request = PendingRequest {
            request_id,
            article_id,
            requester: requester.clone(),
            paid: payment,
        };
        storage::save_pending(&env, &request)?;

        events::emit_purchase_requested(&env, request_id, article_id, requester);
        Ok(request_id)
    }

    /// Oracle callback: turn the pending request `request_id` into a record.
    ///
    /// Each request id is honoured once; replays fail with `UnknownRequest`.
    pub fn fulfill(
        env: Env,
        oracle: Address,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<u64, Error> {
        access::require_oracle(&env, &oracle)?;

        let request = match storage::load_pending(&env, request_id) {
            Some(request) => request,
            None => {
                log!(&env, "fulfill for unknown request", request_id);
                return Err(Error::UnknownRequest);
            }
        };
        let dna = random_words.first().ok_or(Error::InvalidRandomness)?;
        let article = storage::load_article(&env, request.article_id)?;
        if storage::owned_token(&env, article.id, &request.requester).is_some() {
            log!(&env, "fulfill for a pair that already holds a record", request_id);
            return Err(Error::AlreadyOwned);
        }

        let token_id = storage::next_token_id(&env)?;
        let record = Record {
            token_id,
            article_id: article.id,
            owner: request.requester.clone(),
            uri: article.uri,
            variant: oracle::select_variant(dna, article.variants),
            dna,
        };
        storage::save_new_record(&env, &record)?;
        storage::remove_pending(&env, &request);

        events::emit_minted(&env, token_id, request.requester, article.id);
        Ok(token_id)
    }

    pub fn request_status(env: Env, article_id: u64, user: Address) -> RequestStatus {
        if let Some(token_id) = storage::owned_token(&env, article_id, &user) {
            return RequestStatus::Fulfilled(token_id);
        }
        match storage::pending_for(&env, article_id, &user) {
            Some(request_id) => RequestStatus::Pending(request_id),
            None => RequestStatus::NoRequest,
        }
    }

    pub fn pending_request(env: Env, request_id: u64) -> Option<PendingRequest> {
        storage::load_pending(&env, request_id)
    }

    pub fn pending_count(env: Env) -> u32 {
        storage::pending_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────

    /// Token id `user` holds for `article_id`; `NotFound` when none.
    pub fn record_for(env: Env, article_id: u64, user: Address) -> Result<u64, Error> {
        storage::owned_token(&env, article_id, &user).ok_or(Error::NotFound)
    }

    pub fn uri_for(env: Env, token_id: u64) -> Result<String, Error> {
        Ok(storage::load_record(&env, token_id)?.uri)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        Ok(storage::load_record(&env, token_id)?.owner)
    }

    pub fn get_record(env: Env, token_id: u64) -> Result<Record, Error> {
        storage::load_record(&env, token_id)
    }

    pub fn balance_of(env: Env, user: Address) -> u64 {
        storage::holdings(&env, &user)
    }

    pub fn total_supply(env: Env) -> u64 {
        storage::total_supply(&env)
    }

    /// Move `token_id` from `from` to `to`. `from` must sign and own it.
    ///
    /// `to` may not already hold, or be waiting on, a record of the same
    /// article.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();
        let mut record = storage::load_record(&env, token_id)?;
        if record.owner != from {
            return Err(Error::Unauthorized);
        }

        if from != to {
            if storage::owned_token(&env, record.article_id, &to).is_some() {
                return Err(Error::AlreadyOwned);
            }
            if storage::pending_for(&env, record.article_id, &to).is_some() {
                return Err(Error::RequestPending);
            }
            storage::reassign_record(&env, &mut record, &to)?;
        }

        events::emit_transferred(&env, token_id, from, to);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Treasury
    // ─────────────────────────────────────────────────────────

    /// Send the whole treasury to the admin and return the amount.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        access::require_admin(&env, &caller)?;
        let config = storage::get_config(&env)?;

        let amount = storage::drain_treasury(&env);
        if amount == 0 {
            return Err(Error::NothingToWithdraw);
        }
        token::Client::new(&env, &config.payment_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        events::emit_withdrawn(&env, caller, amount);
        Ok(amount)
    }

    pub fn treasury_balance(env: Env) -> i128 {
        storage::treasury_balance(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn store_article(env: &Env, uri: String, variants: u32) -> Result<u64, Error> {
        let id = storage::next_article_id(env)?;
        let article = Article {
            id,
            uri: uri.clone(),
            variants,
        };
        storage::save_article(env, &article);
        events::emit_article_published(env, id, uri);
        Ok(id)
    }
}
