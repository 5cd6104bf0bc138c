// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fuzzy families: whole-word, prefix fallback, add/outside.
//!
//! Multi-word queries align word-for-word against the candidate's leading
//! tokens and try the families in fidelity order; the first family in which
//! every word passes produces the key. One-word queries instead sweep the
//! candidate's TOKEN/JOIN2/FULLJOIN targets, since a one-word query deserves to
//! hit anywhere in the name, taking the minimum key across targets, with
//! the add/outside sweep as the fallback when no target passes whole-word.
//!
//! Position matters everywhere: the first word of a query is the one the
//! searcher is most sure about. The typing buckets place first-word damage
//! below later-word damage, the prefix family doubles first-word sums, and
//! the add/outside family doubles first-word additions.

use super::context::{RankContext, RankQuery};
use super::exact::visit_targets;
use super::key::RankKey;
use super::word::{compare_add_outside, compare_full, compare_prefix};
use super::Scored;

/// Fold one word's damage into a single number.
///
/// Weights keep the three tallies in disjoint decimal ranges: a consonant
/// mismatch always outweighs any pile of type or matra differences.
#[inline]
fn severity(con: u32, bucket: u32, matra: u32) -> u64 {
    con as u64 * 1_000_000 + bucket as u64 * 10_000 + matra as u64
}

/// Map a per-word consonant-mismatch profile to a typing bucket.
///
/// Twelve profiles across the word-count shapes, each a small integer with
/// lower = better. A clean first word reads as "the searcher knows the
/// name"; damage there is graver than the same damage later.
fn typing_bucket(cons: &[u32]) -> u64 {
    match cons.len() {
        0 | 1 => 0,
        2 => match (cons[0] > 0, cons[1] > 0) {
            (false, false) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (true, true) => 3,
        },
        _ => {
            let first = cons[0];
            let rest: u32 = cons[1..].iter().sum();
            match (first, rest) {
                (0, 0) => 0,
                (0, 1) => 1,
                (0, 2) => 2,
                (0, _) => 3,
                (1, 0) => 4,
                (_, 0) => 5,
                _ => 6,
            }
        }
    }
}

#[inline]
fn suffix_after(total: usize, pos: usize, span: usize) -> u64 {
    (total - (pos + span).min(total)) as u64
}

/// Rank a candidate under the fuzzy families. `None` disqualifies the row
/// for this field.
pub fn rank_typo(
    cx: &mut RankContext<'_>,
    q: &RankQuery,
    tokens: &[&str],
    serial: u64,
) -> Option<Scored> {
    if tokens.is_empty() || q.is_empty() {
        return None;
    }
    if q.len() == 1 {
        rank_one_word(cx, q, tokens, serial)
    } else {
        rank_multi_word(cx, q, tokens, serial)
    }
}

/// One-word query: sweep all targets with the whole-word comparison, fall
/// back to the add/outside sweep.
fn rank_one_word(
    cx: &mut RankContext<'_>,
    q: &RankQuery,
    tokens: &[&str],
    serial: u64,
) -> Option<Scored> {
    let qw = &q.words[0];
    let total = tokens.len() as u64;

    let mut best: Option<Scored> = None;
    visit_targets(tokens, |kind, pos, span, text| {
        let Some(cmp) = compare_full(cx, qw, text, true) else {
            return;
        };
        let key = RankKey::full(
            typing_bucket(&[cmp.con]),
            severity(cmp.con, cmp.bucket, cmp.matra),
            suffix_after(tokens.len(), pos, span),
            total,
            serial,
        );
        if best.as_ref().map_or(true, |b| key < b.key) {
            best = Some(Scored {
                key,
                why: format!("full:{}@{} b{}", kind.label(), pos, cmp.bucket),
            });
        }
    });
    if best.is_some() {
        return best;
    }

    visit_targets(tokens, |kind, pos, span, text| {
        let Some(cmp) = compare_add_outside(cx, qw, text, None) else {
            return;
        };
        let key = RankKey::add_outside(
            cmp.outside as u64,
            cmp.additions as u64,
            cmp.bucket as u64,
            cmp.matra as u64,
            suffix_after(tokens.len(), pos, span),
            total,
            serial,
        );
        if best.as_ref().map_or(true, |b| key < b.key) {
            best = Some(Scored {
                key,
                why: format!("extend:{}@{} +{} o{}", kind.label(), pos, cmp.additions, cmp.outside),
            });
        }
    });
    best
}

/// Multi-word query: word-by-word against the candidate's leading tokens,
/// families in fidelity order.
fn rank_multi_word(
    cx: &mut RankContext<'_>,
    q: &RankQuery,
    tokens: &[&str],
    serial: u64,
) -> Option<Scored> {
    let k = q.len();
    if tokens.len() < k {
        return None;
    }
    let total = tokens.len() as u64;
    let suffix = (tokens.len() - k) as u64;

    // Whole-word family.
    let mut cons: Vec<u32> = Vec::with_capacity(k);
    let mut sev_sum = 0u64;
    let mut all_full = true;
    for (qw, token) in q.words.iter().zip(tokens.iter()) {
        match compare_full(cx, qw, token, true) {
            Some(cmp) => {
                sev_sum += severity(cmp.con, cmp.bucket, cmp.matra);
                cons.push(cmp.con);
            }
            None => {
                all_full = false;
                break;
            }
        }
    }
    if all_full {
        let total_con: u32 = cons.iter().sum();
        let within_caps = if k == 2 {
            total_con <= cx.cfg.max_con_total_2w
        } else {
            total_con <= cx.cfg.max_con_total_3plus_w
        };
        if within_caps {
            let bucket = typing_bucket(&cons);
            return Some(Scored {
                key: RankKey::full(bucket, sev_sum, suffix, total, serial),
                why: format!("full:words b{} sev{}", bucket, sev_sum),
            });
        }
    }

    // Prefix-fallback family. Each word passes whole-word (no extra) or the
    // prefix comparison; the first word's sums are doubled.
    let mut subs_sum = 0u64;
    let mut type_sum = 0u64;
    let mut matra_sum = 0u64;
    let mut extra_sum = 0u64;
    let mut all_pf = true;
    for (i, (qw, token)) in q.words.iter().zip(tokens.iter()).enumerate() {
        let weight = if i == 0 { 2u64 } else { 1 };
        if let Some(cmp) = compare_full(cx, qw, token, true) {
            subs_sum += weight * cmp.con as u64;
            type_sum += weight * cmp.bucket as u64;
            matra_sum += weight * cmp.matra as u64;
        } else if let Some(cmp) = compare_prefix(cx, qw, token) {
            subs_sum += weight * cmp.subs as u64;
            type_sum += weight * cmp.bucket as u64;
            matra_sum += weight * cmp.matra as u64;
            extra_sum += weight * cmp.extra as u64;
        } else {
            all_pf = false;
            break;
        }
    }
    if all_pf {
        extra_sum *= cx.cfg.pf_global_extra_multiplier;
        return Some(Scored {
            key: RankKey::prefix(subs_sum, type_sum, matra_sum, extra_sum, suffix, total, serial),
            why: format!("prefix:s{} x{}", subs_sum, extra_sum),
        });
    }

    // Add/outside family: any word failing disqualifies the row. First-word
    // additions are capped and doubled.
    let mut outside_sum = 0u64;
    let mut add_sum = 0u64;
    let mut type_sum = 0u64;
    let mut matra_sum = 0u64;
    for (i, (qw, token)) in q.words.iter().zip(tokens.iter()).enumerate() {
        let cap = if i == 0 {
            Some(cx.cfg.add_first_word_max_add_in_multi)
        } else {
            None
        };
        let cmp = compare_add_outside(cx, qw, token, cap)?;
        let add_weight = if i == 0 { 2u64 } else { 1 };
        outside_sum += cmp.outside as u64;
        add_sum += add_weight * cmp.additions as u64;
        type_sum += cmp.bucket as u64;
        matra_sum += cmp.matra as u64;
    }
    Some(Scored {
        key: RankKey::add_outside(outside_sum, add_sum, type_sum, matra_sum, suffix, total, serial),
        why: format!("extend:words +{} o{}", add_sum, outside_sum),
    })
}
