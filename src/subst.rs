// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The curated substitution relations: phonetic and visual confusability.
//!
//! Four relations over entities, in decreasing strength: `Phonetic` (sounds
//! the same to a roll clerk), then three descending tiers of visual
//! confusability mined from OCR damage in the rolls. Each relation is a list
//! of groups; two entities are related iff some group contains both. The
//! relations are fixed at build time: membership was curated from the
//! confusion-mining pass over the production rolls, and the posting lists
//! assume it, so changing a group means rebuilding the loose index.
//!
//! Group members are written in natural spelling (क्ष, not कष); the lexicon
//! strips combining marks when it interns them, so the tables stay readable
//! while the runtime works on mark-stripped text.

use serde::{Deserialize, Serialize};

/// How one entity may substitute for another, strongest first.
///
/// `Exact` and `Other` are the two poles: identical, and unrelated. The
/// derived `Ord` follows declaration order, so `min` picks the strongest
/// classification when a pair appears in more than one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubstType {
    Exact,
    Phonetic,
    VisualP0,
    VisualP1,
    VisualP2,
    Other,
}

impl SubstType {
    /// True for the four classes a fuzzy comparison may consume.
    #[inline]
    pub fn is_substitutable(self) -> bool {
        !matches!(self, SubstType::Other)
    }
}

/// Phonetically interchangeable groups: aspiration pairs, the dental/
/// retroflex cluster, sibilants, and the vowel pairs the exact fold does not
/// already collapse at entity level.
pub const PHONETIC_GROUPS: &[&[&str]] = &[
    &["क", "ख"],
    &["ग", "घ"],
    &["च", "छ"],
    &["ज", "झ"],
    &["ट", "ठ"],
    &["ड", "ढ", "द", "ध", "त", "थ"],
    &["न", "ण"],
    &["प", "फ"],
    &["ब", "भ", "व"],
    &["स", "श", "ष"],
    &["ल", "ळ"],
    &["य", "ए"],
    // conjunct variants that alternate freely in rural spellings
    &["ज्ञ", "ग्य"],
    &["क्ष", "छ"],
    // independent vowel pairs
    &["अ", "आ"],
    &["इ", "ई"],
    &["उ", "ऊ"],
    &["ए", "ऐ"],
    &["ओ", "औ"],
];

/// Strongest visual-confusability tier: glyph pairs OCR swaps constantly.
pub const VISUAL_P0_GROUPS: &[&[&str]] = &[
    &["ब", "व"],
    &["घ", "ध"],
    &["भ", "म"],
    &["म", "ल"],
    &["ख", "रव"],
];

/// Middle tier: confusions needing degraded print.
pub const VISUAL_P1_GROUPS: &[&[&str]] = &[
    &["त", "न"],
    &["थ", "य"],
    &["ष", "प"],
    &["क", "फ"],
    &["क्ष", "त्र"],
];

/// Weakest tier: rare confusions kept because they still beat `Other`.
pub const VISUAL_P2_GROUPS: &[&[&str]] = &[
    &["च", "ज"],
    &["ड", "ङ"],
    &["द", "ढ", "ह"],
];

/// The canonical loose-fold groups. The first member of each group is the
/// representative the loose normal form collapses to.
pub const LOOSE_FOLD_GROUPS: &[&[&str]] = &[
    &["क", "र", "ख"],
    &["द", "ढ", "ह"],
    &["ब", "व"],
    &["घ", "ध"],
];

/// Independent vowels interned into the entity vocabulary.
pub const INDEPENDENT_VOWELS: &[&str] = &[
    "अ", "आ", "इ", "ई", "उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ", "ए", "ऐ", "ओ", "औ",
];

/// Devanagari digits; serial fragments show up inside OCR'd name cells.
pub const NUMERALS: &[&str] = &["०", "१", "२", "३", "४", "५", "६", "७", "८", "९"];
