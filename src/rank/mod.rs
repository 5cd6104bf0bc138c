// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranker: from a candidate row's name tokens to a lexicographic key.
//!
//! Ordering is tiered, and the tiers are impermeable: exact scenarios first,
//! then the whole-word fuzzy family, then the prefix fallback, then
//! add/outside. Within a tier the key elements grade damage (substitution
//! classes, matra noise, unmatched suffix), and every key ends in the row's
//! serial number so the total order is deterministic down to the last row.
//!
//! All state is request-scoped. The query is prepared once
//! ([`context::RankQuery`]), each scoring worker owns a
//! [`context::RankContext`] of scratch buffers, and the shared tables ride
//! behind references.

pub mod context;
pub mod exact;
pub mod key;
pub mod multi;
pub mod word;

pub use context::{QueryWord, RankContext, RankQuery};
pub use key::RankKey;

use serde::Serialize;

/// Which name field produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Voter,
    Relative,
}

/// A ranked field: the key plus a compact explanation of how it matched.
#[derive(Debug, Clone)]
pub struct Scored {
    pub key: RankKey,
    pub why: String,
}

/// Rank one field of a candidate row. `None` disqualifies the row for this
/// field only.
///
/// Exact scenarios always win when they fire (their keys lead with the
/// exact mode element), so the fuzzy families only run when no exact
/// scenario matched. Under `exact_only` the fuzzy families are suppressed
/// entirely.
pub fn rank_field(
    cx: &mut RankContext<'_>,
    q: &RankQuery,
    tokens: &[&str],
    serial: u64,
    exact_only: bool,
) -> Option<Scored> {
    if let Some(hit) = exact::rank_exact(q, tokens, serial) {
        return Some(hit);
    }
    if exact_only {
        return None;
    }
    multi::rank_typo(cx, q, tokens, serial)
}
