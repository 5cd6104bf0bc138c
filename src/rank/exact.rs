// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact-match scenarios and the target enumeration they share with the
//! one-word fuzzy path.
//!
//! A candidate name offers more surfaces than its tokens: a query typed
//! without a space should still hit a two-token name, and vice versa. So a
//! token list yields *targets*: every token, every adjacent-pair
//! concatenation, and the full concatenation. Target kinds rank
//! TOKEN < JOIN2 < FULLJOIN: the less gluing we had to do, the better the
//! match.

use super::context::RankQuery;
use super::key::RankKey;
use super::Scored;

/// Target kinds in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Token,
    Join2,
    FullJoin,
}

impl TargetKind {
    #[inline]
    pub fn rank(self) -> u64 {
        match self {
            TargetKind::Token => 0,
            TargetKind::Join2 => 1,
            TargetKind::FullJoin => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Token => "token",
            TargetKind::Join2 => "join2",
            TargetKind::FullJoin => "fulljoin",
        }
    }
}

/// Visit every target of a token list: each token, each adjacent-pair
/// concatenation, and (for two or more tokens) the full concatenation.
///
/// `visit(kind, pos, span, text)`: `pos` is the first token consumed,
/// `span` how many.
pub fn visit_targets(tokens: &[&str], mut visit: impl FnMut(TargetKind, usize, usize, &str)) {
    for (i, token) in tokens.iter().enumerate() {
        visit(TargetKind::Token, i, 1, token);
    }
    if tokens.len() < 2 {
        return;
    }
    let mut buf = String::new();
    for i in 0..tokens.len() - 1 {
        buf.clear();
        buf.push_str(tokens[i]);
        buf.push_str(tokens[i + 1]);
        visit(TargetKind::Join2, i, 2, &buf);
    }
    buf.clear();
    for token in tokens {
        buf.push_str(token);
    }
    visit(TargetKind::FullJoin, 0, tokens.len(), &buf);
}

/// Trailing tokens left after a target match.
#[inline]
fn suffix_after(total: usize, pos: usize, span: usize) -> u64 {
    (total - (pos + span).min(total)) as u64
}

/// Rank a candidate's token list under the exact scenarios.
///
/// Single-word queries match any target by string equality (scenario 0,
/// best target wins by kind, then position, then span) and additionally the
/// first token (scenario 1, suffix-counted). The scenario-1 emission is
/// redundant when a position-0 token target already matched, but the min
/// fold keeps the better key, so it stays for fidelity with the stored
/// posting lists' expectations.
///
/// Multi-word queries match when the candidate's leading tokens equal the
/// query elementwise (scenario 10).
pub fn rank_exact(q: &RankQuery, tokens: &[&str], serial: u64) -> Option<Scored> {
    if tokens.is_empty() {
        return None;
    }
    let total = tokens.len() as u64;

    if q.len() == 1 {
        let needle = q.words[0].strict.as_str();
        let mut best: Option<(RankKey, TargetKind, usize)> = None;
        visit_targets(tokens, |kind, pos, span, text| {
            if text != needle {
                return;
            }
            let key = RankKey::exact(
                0,
                kind.rank(),
                pos as u64,
                suffix_after(tokens.len(), pos, span),
                total,
                serial,
            );
            if best.map_or(true, |(k, _, _)| key < k) {
                best = Some((key, kind, pos));
            }
        });

        if tokens[0] == needle {
            let key = RankKey::exact(1, 0, 0, total - 1, total, serial);
            if best.map_or(true, |(k, _, _)| key < k) {
                best = Some((key, TargetKind::Token, 0));
            }
        }

        return best.map(|(key, kind, pos)| Scored {
            key,
            why: format!("exact:{}@{}", kind.label(), pos),
        });
    }

    // Multi-word: leading tokens must equal the query elementwise.
    if tokens.len() < q.len() {
        return None;
    }
    let matches = q
        .words
        .iter()
        .zip(tokens.iter())
        .all(|(qw, t)| qw.strict == **t);
    if !matches {
        return None;
    }
    let suffix = (tokens.len() - q.len()) as u64;
    Some(Scored {
        key: RankKey::exact(10, 0, 0, suffix, total, serial),
        why: format!("exact:words+{}", suffix),
    })
}
