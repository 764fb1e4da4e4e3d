//! # Types
//!
//! Shared data structures used across all modules of the issuance contract.
//!
//! ## Two-phase issuance
//!
//! A purchase is admitted and paid for in one call, then materialised into a
//! [`Record`] in a later call made by the randomness oracle. In between, the
//! purchase lives as a [`PendingRequest`] keyed by the oracle's request id.
//!
//! For a fixed `(article_id, user)` pair the lifecycle is forward-only:
//!
//! ```text
//! NoRequest ──► Pending(request_id) ──► Fulfilled(token_id)
//! ```
//!
//! There is no transition back to `NoRequest`: pending requests have no expiry and
//! no refund path.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Construction-time configuration, written once by `init` and never mutated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuanceConfig {
    /// Randomness oracle contract; the only identity allowed to call `fulfill`.
    pub oracle: Address,
    /// Token contract used for purchase payments and withdrawals.
    pub payment_token: Address,
    /// Oracle key hash forwarded with every randomness request.
    pub key_hash: BytesN<32>,
    /// Oracle subscription the requests are billed to.
    pub subscription_id: u64,
    /// Confirmation depth the oracle waits before answering.
    pub request_confirmations: u32,
    /// Resource budget granted to the fulfillment callback.
    pub callback_gas_limit: u32,
    /// Random values per request. Always 1.
    pub num_words: u32,
    /// Fixed purchase price, in payment token units.
    pub mint_price: i128,
    /// Upper bound on records ever issued, pending requests included.
    pub max_supply: u64,
    /// Variant count given to articles published without an explicit one.
    pub default_variants: u32,
}

/// A published catalogue entry. Immutable once created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Article {
    /// Sequential id, starting at 1.
    pub id: u64,
    /// Opaque reference to off-chain metadata.
    pub uri: String,
    /// Number of variants a random word is reduced over.
    pub variants: u32,
}

/// A paid purchase awaiting its randomness callback.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRequest {
    pub request_id: u64,
    pub article_id: u64,
    pub requester: Address,
    /// Full amount captured at admission.
    pub paid: i128,
}

/// The minted collectible.
///
/// Only `owner` ever changes, and only through `transfer`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Sequential id, starting at 1, unique across all articles.
    pub token_id: u64,
    pub article_id: u64,
    pub owner: Address,
    /// Copied from the article at mint time.
    pub uri: String,
    /// `dna % article.variants`.
    pub variant: u32,
    /// Raw random word delivered by the oracle.
    pub dna: u64,
}

/// Where a user stands for one article.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestStatus {
    /// No request and no record.
    NoRequest,
    /// Paid, waiting on the oracle. Carries the request id.
    Pending(u64),
    /// Holds a record. Carries the token id.
    Fulfilled(u64),
}
