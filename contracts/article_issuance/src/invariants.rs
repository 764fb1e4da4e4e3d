#![allow(dead_code)]

extern crate std;

use std::collections::BTreeSet;
use std::vec::Vec;

use soroban_sdk::Address;

use crate::types::{Article, Record};

/// INV-1: every record points at a published article.
pub fn assert_article_exists(record: &Record, article_count: u64) {
    assert!(
        record.article_id >= 1 && record.article_id <= article_count,
        "INV-1 violated: record {} references unknown article {}",
        record.token_id,
        record.article_id
    );
}

/// INV-2: an owner holds at most one record per article.
pub fn assert_one_record_per_pair(records: &[Record]) {
    let mut seen: BTreeSet<(u64, Address)> = BTreeSet::new();
    for record in records {
        assert!(
            seen.insert((record.article_id, record.owner.clone())),
            "INV-2 violated: owner holds a second record {} for article {}",
            record.token_id,
            record.article_id
        );
    }
}

/// INV-3: token ids are 1..=n with no gaps.
pub fn assert_dense_token_ids(records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        assert_eq!(
            record.token_id,
            i as u64 + 1,
            "INV-3 violated: expected token id {}, got {}",
            i + 1,
            record.token_id
        );
    }
}

/// INV-4: treasury equals payments minus withdrawals and is never negative.
pub fn assert_treasury_balance(balance: i128, paid: i128, withdrawn: i128) {
    assert_eq!(
        balance,
        paid - withdrawn,
        "INV-4 violated: treasury {} != paid {} - withdrawn {}",
        balance,
        paid,
        withdrawn
    );
    assert!(balance >= 0, "INV-4 violated: negative treasury {}", balance);
}

/// INV-5: a record's variant is within its article's range and its uri is
/// the article's.
pub fn assert_record_matches_article(record: &Record, article: &Article) {
    assert_eq!(record.article_id, article.id);
    assert!(
        record.variant < article.variants,
        "INV-5 violated: variant {} out of range for {} variants",
        record.variant,
        article.variants
    );
    assert_eq!(
        record.uri, article.uri,
        "INV-5 violated: record {} uri differs from its article",
        record.token_id
    );
}

/// Run every per-record invariant plus the collection-wide ones.
pub fn assert_all_record_invariants(records: &[Record], articles: &[Article]) {
    let count = articles.len() as u64;
    for record in records {
        assert_article_exists(record, count);
        assert_record_matches_article(record, &articles[(record.article_id - 1) as usize]);
    }
    assert_dense_token_ids(records);
    assert_one_record_per_pair(records);
}
