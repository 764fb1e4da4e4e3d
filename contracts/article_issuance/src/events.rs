//! Typed event payloads. Topics are `(symbol, key)` so indexers can filter by
//! article, request or token without decoding the data.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArticlePublished {
    pub article_id: u64,
    pub uri: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseRequested {
    pub request_id: u64,
    pub article_id: u64,
    pub requester: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Minted {
    pub token_id: u64,
    pub requester: Address,
    pub article_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transferred {
    pub token_id: u64,
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub admin: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminSet {
    pub previous: Option<Address>,
    pub admin: Address,
}

pub fn emit_article_published(env: &Env, article_id: u64, uri: String) {
    let topics = (symbol_short!("published"), article_id);
    env.events()
        .publish(topics, ArticlePublished { article_id, uri });
}

pub fn emit_purchase_requested(env: &Env, request_id: u64, article_id: u64, requester: Address) {
    let topics = (symbol_short!("requested"), request_id);
    let data = PurchaseRequested {
        request_id,
        article_id,
        requester,
    };
    env.events().publish(topics, data);
}

pub fn emit_minted(env: &Env, token_id: u64, requester: Address, article_id: u64) {
    let topics = (symbol_short!("minted"), token_id);
    let data = Minted {
        token_id,
        requester,
        article_id,
    };
    env.events().publish(topics, data);
}

pub fn emit_transferred(env: &Env, token_id: u64, from: Address, to: Address) {
    let topics = (symbol_short!("transfer"), token_id);
    env.events()
        .publish(topics, Transferred { token_id, from, to });
}

pub fn emit_withdrawn(env: &Env, admin: Address, amount: i128) {
    let topics = (symbol_short!("withdrawn"), admin.clone());
    env.events().publish(topics, Withdrawn { admin, amount });
}

pub fn emit_admin_set(env: &Env, previous: Option<Address>, admin: Address) {
    let topics = (symbol_short!("admin_set"), admin.clone());
    env.events().publish(topics, AdminSet { previous, admin });
}
