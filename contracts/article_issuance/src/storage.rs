//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type             | Description                          |
//! |-----------------|------------------|--------------------------------------|
//! | `Config`        | `IssuanceConfig` | Immutable construction parameters    |
//! | `ArticleCount`  | `u64`            | Last assigned article id             |
//! | `TokenCount`    | `u64`            | Last assigned token id               |
//! | `PendingCount`  | `u32`            | Requests admitted but not fulfilled  |
//! | `Treasury`      | `i128`           | Payments received minus withdrawals  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type             | Description                    |
//! |-------------------------|------------------|--------------------------------|
//! | `Article(id)`           | `Article`        | Catalogue entry                |
//! | `Pending(request_id)`   | `PendingRequest` | Correlation table              |
//! | `PendingFor(art, user)` | `u64`            | Request id awaited by a user   |
//! | `Record(token_id)`      | `Record`         | Minted collectible             |
//! | `Owned(art, user)`      | `u64`            | Ownership index                |
//! | `Holdings(user)`        | `u64`            | Records currently held by user |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Helpers never enforce business rules; `lib.rs` validates first and only
//! then calls the mutating helpers here.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Article, IssuanceConfig, PendingRequest, Record};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    ArticleCount,
    TokenCount,
    PendingCount,
    Treasury,
    Article(u64),
    Pending(u64),
    PendingFor(u64, Address),
    Record(u64),
    Owned(u64, Address),
    Holdings(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn instance_counter(env: &Env, key: &DataKey) -> u64 {
    bump_instance(env);
    env.storage().instance().get(key).unwrap_or(0)
}

/// Read the counter behind `key`, store `current + 1` and return it.
fn next_id(env: &Env, key: &DataKey) -> Result<u64, Error> {
    let next = instance_counter(env, key)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    env.storage().instance().set(key, &next);
    Ok(next)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &IssuanceConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Result<IssuanceConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read a persistent entry, extending its TTL only when it exists.
fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// ─────────────────────────────────────────────────────────
// Article registry
// ─────────────────────────────────────────────────────────

pub fn next_article_id(env: &Env) -> Result<u64, Error> {
    next_id(env, &DataKey::ArticleCount)
}

pub fn article_count(env: &Env) -> u64 {
    instance_counter(env, &DataKey::ArticleCount)
}

pub fn save_article(env: &Env, article: &Article) {
    write_persistent(env, &DataKey::Article(article.id), article);
}

pub fn load_article(env: &Env, id: u64) -> Result<Article, Error> {
    read_persistent(env, &DataKey::Article(id)).ok_or(Error::ArticleNotFound)
}

// ─────────────────────────────────────────────────────────
// Pending requests
// ─────────────────────────────────────────────────────────

pub fn pending_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PendingCount)
        .unwrap_or(0)
}

fn set_pending_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PendingCount, &count);
}

pub fn has_pending(env: &Env, request_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Pending(request_id))
}

pub fn load_pending(env: &Env, request_id: u64) -> Option<PendingRequest> {
    read_persistent(env, &DataKey::Pending(request_id))
}

pub fn pending_for(env: &Env, article_id: u64, user: &Address) -> Option<u64> {
    read_persistent(env, &DataKey::PendingFor(article_id, user.clone()))
}

/// Store a pending request together with its `(article, requester)` index entry.
pub fn save_pending(env: &Env, request: &PendingRequest) -> Result<(), Error> {
    let count = pending_count(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    write_persistent(env, &DataKey::Pending(request.request_id), request);
    write_persistent(
        env,
        &DataKey::PendingFor(request.article_id, request.requester.clone()),
        &request.request_id,
    );
    set_pending_count(env, count);
    Ok(())
}

/// Remove a consumed pending request and its index entry.
pub fn remove_pending(env: &Env, request: &PendingRequest) {
    env.storage()
        .persistent()
        .remove(&DataKey::Pending(request.request_id));
    env.storage().persistent().remove(&DataKey::PendingFor(
        request.article_id,
        request.requester.clone(),
    ));
    set_pending_count(env, pending_count(env).saturating_sub(1));
}

// ─────────────────────────────────────────────────────────
// Ownership
// ─────────────────────────────────────────────────────────

pub fn next_token_id(env: &Env) -> Result<u64, Error> {
    next_id(env, &DataKey::TokenCount)
}

/// Number of records minted so far; also the last assigned token id.
pub fn total_supply(env: &Env) -> u64 {
    instance_counter(env, &DataKey::TokenCount)
}

pub fn load_record(env: &Env, token_id: u64) -> Result<Record, Error> {
    read_persistent(env, &DataKey::Record(token_id)).ok_or(Error::NotFound)
}

pub fn owned_token(env: &Env, article_id: u64, user: &Address) -> Option<u64> {
    read_persistent(env, &DataKey::Owned(article_id, user.clone()))
}

pub fn holdings(env: &Env, user: &Address) -> u64 {
    read_persistent(env, &DataKey::Holdings(user.clone())).unwrap_or(0)
}

fn set_holdings(env: &Env, user: &Address, count: u64) {
    let key = DataKey::Holdings(user.clone());
    if count == 0 {
        env.storage().persistent().remove(&key);
    } else {
        write_persistent(env, &key, &count);
    }
}

/// Persist a freshly minted record and index it under its owner.
pub fn save_new_record(env: &Env, record: &Record) -> Result<(), Error> {
    let held = holdings(env, &record.owner)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    write_persistent(env, &DataKey::Record(record.token_id), record);
    write_persistent(
        env,
        &DataKey::Owned(record.article_id, record.owner.clone()),
        &record.token_id,
    );
    set_holdings(env, &record.owner, held);
    Ok(())
}

/// Move `record` to `to`, rewriting the ownership index for both parties.
///
/// `record.owner` must still hold the previous owner when called.
pub fn reassign_record(env: &Env, record: &mut Record, to: &Address) -> Result<(), Error> {
    let from = record.owner.clone();
    let to_held = holdings(env, to).checked_add(1).ok_or(Error::Overflow)?;
    let from_held = holdings(env, &from).saturating_sub(1);

    env.storage()
        .persistent()
        .remove(&DataKey::Owned(record.article_id, from.clone()));
    set_holdings(env, &from, from_held);

    record.owner = to.clone();
    write_persistent(env, &DataKey::Record(record.token_id), record);
    write_persistent(
        env,
        &DataKey::Owned(record.article_id, to.clone()),
        &record.token_id,
    );
    set_holdings(env, to, to_held);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Treasury
// ─────────────────────────────────────────────────────────

pub fn treasury_balance(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Treasury)
        .unwrap_or(0)
}

/// Credit `amount` to the treasury and return the new balance.
pub fn credit_treasury(env: &Env, amount: i128) -> Result<i128, Error> {
    let balance = treasury_balance(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::Treasury, &balance);
    Ok(balance)
}

/// Zero the treasury and return what it held.
pub fn drain_treasury(env: &Env) -> i128 {
    let balance = treasury_balance(env);
    if balance != 0 {
        env.storage().instance().set(&DataKey::Treasury, &0i128);
    }
    balance
}
