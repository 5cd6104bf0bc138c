// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-level comparison: one query word against one candidate word.
//!
//! Three comparators of decreasing fidelity. The full comparison demands
//! equal entity counts and classifies every mismatch through the
//! substitution relations. The prefix comparison tolerates a short unseen
//! suffix on the candidate (the typist stopped early). The add/outside
//! comparison tolerates arbitrary candidate extension and a budget of
//! unclassifiable substitutions, the last resort before disqualification.
//!
//! All three share the same mismatch policy: equal entities are free,
//! matra-like entities count against the matra tally (cheap), consonant
//! substitutions must classify into a phonetic or visual relation and count
//! against the consonant tally (expensive). The absolute-difference of
//! combining-mark counts folds into the matra tally, so अंसार vs असार is a
//! matra-grade mismatch, not a free pass.

use crate::normalize::{count_marks_token, strip_marks_token_into};
use crate::subst::SubstType;

use super::context::{QueryWord, RankContext};

/// Per-class substitution tally and the type bucket derived from it.
#[derive(Debug, Default, Clone, Copy)]
struct TierTally {
    phon: u32,
    v0: u32,
    v1: u32,
    v2: u32,
}

impl TierTally {
    /// Record one substitution. Returns false for `Other`.
    #[inline]
    fn add(&mut self, ty: SubstType) -> bool {
        match ty {
            SubstType::Exact => debug_assert!(false, "equal entities reach the tally"),
            SubstType::Phonetic => self.phon += 1,
            SubstType::VisualP0 => self.v0 += 1,
            SubstType::VisualP1 => self.v1 += 1,
            SubstType::VisualP2 => self.v2 += 1,
            SubstType::Other => return false,
        }
        true
    }

    /// The type bucket: 0 phonetic-only (or clean), 1–3 a single visual
    /// tier, 4 mixed visual tiers. Phonetic use never demotes a bucket.
    fn bucket(&self) -> u32 {
        let tiers = (self.v0 > 0) as u32 + (self.v1 > 0) as u32 + (self.v2 > 0) as u32;
        match tiers {
            0 => 0,
            1 if self.v0 > 0 => 1,
            1 if self.v1 > 0 => 2,
            1 => 3,
            _ => 4,
        }
    }
}

/// Result of the full (equal-length) comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullCmp {
    pub con: u32,
    pub matra: u32,
    pub bucket: u32,
}

/// Result of the prefix comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixCmp {
    pub subs: u32,
    pub matra: u32,
    pub bucket: u32,
    pub extra: u32,
}

/// Result of the add/outside comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutsideCmp {
    pub additions: u32,
    pub inside: u32,
    pub outside: u32,
    pub matra: u32,
    pub bucket: u32,
}

/// Segment the candidate word into the context scratch buffers.
fn segment_candidate(cx: &mut RankContext<'_>, cand: &str) {
    let RankContext {
        lex,
        cand_buf,
        cand_ents,
        ..
    } = cx;
    strip_marks_token_into(cand, cand_buf);
    lex.segment_into(cand_buf, cand_ents);
}

/// Word-by-word comparison with no inserts or deletes.
///
/// Fails on entity-count mismatch, on any `Other` substitution, on any
/// substitution at all when `allow_subs` is false, and past the per-word
/// consonant cap.
pub fn compare_full(
    cx: &mut RankContext<'_>,
    qw: &QueryWord,
    cand: &str,
    allow_subs: bool,
) -> Option<FullCmp> {
    let marks_diff = qw.marks.abs_diff(count_marks_token(cand));
    segment_candidate(cx, cand);
    if qw.ents.len() != cx.cand_ents.len() {
        return None;
    }

    let mut con = 0u32;
    let mut matra = 0u32;
    let mut tally = TierTally::default();
    for (a, b) in qw.ents.iter().zip(cx.cand_ents.iter()) {
        if a.text(&qw.stripped) == b.text(&cx.cand_buf) {
            continue;
        }
        if a.matra_like || b.matra_like {
            matra += 1;
            continue;
        }
        if !allow_subs {
            return None;
        }
        let ty = cx.lex.subst_type(a, &qw.stripped, b, &cx.cand_buf);
        if !tally.add(ty) {
            return None;
        }
        con += 1;
    }
    matra += marks_diff;

    if con > cx.cfg.max_con_per_word {
        return None;
    }
    Some(FullCmp {
        con,
        matra,
        bucket: tally.bucket(),
    })
}

/// Prefix comparison for 2- and 3-entity query words.
///
/// The candidate may run up to two entities past the query; substitutions in
/// the aligned prefix are capped at one (2-entity words) or two (3-entity).
pub fn compare_prefix(cx: &mut RankContext<'_>, qw: &QueryWord, cand: &str) -> Option<PrefixCmp> {
    let q_len = qw.ents.len();
    if q_len != 2 && q_len != 3 {
        return None;
    }
    let marks_diff = qw.marks.abs_diff(count_marks_token(cand));
    segment_candidate(cx, cand);
    let c_len = cx.cand_ents.len();
    if c_len < q_len {
        return None;
    }
    let extra = (c_len - q_len) as u32;
    if extra > cx.cfg.pf_max_extra_suffix_per_word {
        return None;
    }

    let mut subs = 0u32;
    let mut matra = 0u32;
    let mut tally = TierTally::default();
    for (a, b) in qw.ents.iter().zip(cx.cand_ents.iter()) {
        if a.text(&qw.stripped) == b.text(&cx.cand_buf) {
            continue;
        }
        if a.matra_like || b.matra_like {
            matra += 1;
            continue;
        }
        let ty = cx.lex.subst_type(a, &qw.stripped, b, &cx.cand_buf);
        if !tally.add(ty) {
            return None;
        }
        subs += 1;
    }
    matra += marks_diff;

    let cap = if q_len == 2 {
        cx.cfg.pf_max_subs_for_2w
    } else {
        cx.cfg.pf_max_subs_for_3w
    };
    if subs > cap {
        return None;
    }
    Some(PrefixCmp {
        subs,
        matra,
        bucket: tally.bucket(),
        extra,
    })
}

/// Additions-and-outside comparison, the lowest-fidelity family.
///
/// The candidate may extend past the query (`max_additions` caps the first
/// word of a multi-word query; `None` is unlimited). Substitutions outside
/// every relation are admitted under a budget that grows with query-word
/// length.
pub fn compare_add_outside(
    cx: &mut RankContext<'_>,
    qw: &QueryWord,
    cand: &str,
    max_additions: Option<u32>,
) -> Option<AddOutsideCmp> {
    let marks_diff = qw.marks.abs_diff(count_marks_token(cand));
    segment_candidate(cx, cand);
    let q_len = qw.ents.len();
    let c_len = cx.cand_ents.len();
    if c_len < q_len {
        return None;
    }
    let additions = (c_len - q_len) as u32;
    if let Some(cap) = max_additions {
        if additions > cap {
            return None;
        }
    }

    let mut inside = 0u32;
    let mut outside = 0u32;
    let mut matra = 0u32;
    let mut tally = TierTally::default();
    for (a, b) in qw.ents.iter().zip(cx.cand_ents.iter()) {
        if a.text(&qw.stripped) == b.text(&cx.cand_buf) {
            continue;
        }
        if a.matra_like || b.matra_like {
            matra += 1;
            continue;
        }
        let ty = cx.lex.subst_type(a, &qw.stripped, b, &cx.cand_buf);
        if tally.add(ty) {
            inside += 1;
        } else {
            outside += 1;
        }
    }
    matra += marks_diff;

    if outside > cx.cfg.outside_caps_by_q_len.cap(q_len) {
        return None;
    }
    Some(AddOutsideCmp {
        additions,
        inside,
        outside,
        matra,
        bucket: tally.bucket(),
    })
}
