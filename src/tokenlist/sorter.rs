//! Deterministic ordering of the token list

use std::cmp::Ordering;

use crate::types::Token;

fn compare_tokens(a: &Token, b: &Token) -> Ordering {
    b.pairs
        .len()
        .cmp(&a.pairs.len())
        .then_with(|| a.address.cmp(&b.address))
}

/// Most-paired tokens first, ties broken by address; pairs by base asset id
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by(compare_tokens);

    for token in tokens.iter_mut() {
        token.pairs.sort_by(|a, b| a.base.cmp(&b.base));
    }
}

pub fn count_total_pairs(tokens: &[Token]) -> usize {
    tokens.iter().map(|token| token.pairs.len()).sum()
}
