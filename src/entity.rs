// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Entity segmentation: splitting a word into its units of comparison.
//!
//! The ranker never compares codepoints directly. It compares *entities*:
//! maximal substrings drawn from a curated vocabulary: every token that
//! appears in a substitution group, the independent vowels, and the digits.
//! Multi-codepoint entries (रव, the mark-stripped conjuncts) are what let a
//! two-glyph OCR smear classify as a single substitution instead of two
//! unrelated mismatches.
//!
//! Segmentation is greedy longest-match, left to right, over mark-stripped
//! text. A codepoint no vocabulary entry covers becomes a singleton entity,
//! so segmentation is total: the concatenation of `segment(s)` is always `s`
//! again. Singletons outside the vocabulary can still compare `Exact` (equal
//! strings) but classify as `Other` against anything else.
//!
//! The table is built once at startup and shared by reference across
//! requests; nothing here mutates after construction.

use std::collections::HashMap;

use crate::normalize::{is_matra, strip_marks};
use crate::subst::{
    SubstType, INDEPENDENT_VOWELS, NUMERALS, PHONETIC_GROUPS, VISUAL_P0_GROUPS, VISUAL_P1_GROUPS,
    VISUAL_P2_GROUPS,
};

/// Sentinel id for entities outside the vocabulary.
pub const NO_ENTITY: u32 = u32::MAX;

/// One entity of a segmented word: a byte range plus its classification.
///
/// Ranges index the word the segmenter was handed; the segmenter allocates
/// nothing per entity, callers reuse the output vector across rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub start: u32,
    pub end: u32,
    /// Vocabulary id, or [`NO_ENTITY`] for singleton leftovers.
    pub id: u32,
    /// True for a single-codepoint dependent vowel sign.
    pub matra_like: bool,
}

impl EntityRef {
    /// The entity's text within its source word.
    #[inline]
    pub fn text<'a>(&self, word: &'a str) -> &'a str {
        &word[self.start as usize..self.end as usize]
    }
}

/// The process-wide entity vocabulary and substitution classification.
#[derive(Debug)]
pub struct Lexicon {
    /// Interned entities, mark-stripped.
    vocab: Vec<Box<str>>,
    /// First codepoint → vocabulary ids, longest entity first.
    by_first: HashMap<char, Vec<u32>>,
    /// Symmetric pair classification, strongest relation wins.
    pair_types: HashMap<(u32, u32), SubstType>,
}

impl Lexicon {
    /// Build the lexicon from the curated group tables.
    pub fn new() -> Self {
        let mut lex = Lexicon {
            vocab: Vec::new(),
            by_first: HashMap::new(),
            pair_types: HashMap::new(),
        };
        let mut ids: HashMap<String, u32> = HashMap::new();

        let intern = |lex: &mut Lexicon, ids: &mut HashMap<String, u32>, raw: &str| -> u32 {
            let stripped = strip_marks(raw);
            debug_assert!(!stripped.is_empty(), "group member stripped to nothing");
            if let Some(&id) = ids.get(&stripped) {
                return id;
            }
            let id = lex.vocab.len() as u32;
            ids.insert(stripped.clone(), id);
            lex.vocab.push(stripped.into_boxed_str());
            id
        };

        for vowel in INDEPENDENT_VOWELS {
            intern(&mut lex, &mut ids, vowel);
        }
        for digit in NUMERALS {
            intern(&mut lex, &mut ids, digit);
        }

        // Weakest relation first so stronger classifications overwrite.
        let tiers: [(&[&[&str]], SubstType); 4] = [
            (VISUAL_P2_GROUPS, SubstType::VisualP2),
            (VISUAL_P1_GROUPS, SubstType::VisualP1),
            (VISUAL_P0_GROUPS, SubstType::VisualP0),
            (PHONETIC_GROUPS, SubstType::Phonetic),
        ];
        for (groups, ty) in tiers {
            for group in groups {
                let members: Vec<u32> = group
                    .iter()
                    .map(|m| intern(&mut lex, &mut ids, m))
                    .collect();
                for (i, &a) in members.iter().enumerate() {
                    for &b in &members[i + 1..] {
                        if a == b {
                            continue;
                        }
                        lex.pair_types.insert((a, b), ty);
                        lex.pair_types.insert((b, a), ty);
                    }
                }
            }
        }

        for (id, entity) in lex.vocab.iter().enumerate() {
            let first = entity.chars().next().expect("non-empty entity");
            lex.by_first.entry(first).or_default().push(id as u32);
        }
        for bucket in lex.by_first.values_mut() {
            let vocab = &lex.vocab;
            bucket.sort_by(|&a, &b| {
                let (la, lb) = (
                    vocab[a as usize].chars().count(),
                    vocab[b as usize].chars().count(),
                );
                lb.cmp(&la).then_with(|| vocab[a as usize].cmp(&vocab[b as usize]))
            });
        }

        lex
    }

    /// Number of interned entities.
    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Segment a mark-stripped word into entities, reusing `out`.
    ///
    /// Greedy longest match; anything uncovered becomes a singleton.
    pub fn segment_into(&self, word: &str, out: &mut Vec<EntityRef>) {
        out.clear();
        let mut pos = 0;
        while pos < word.len() {
            let rest = &word[pos..];
            let first = rest.chars().next().expect("pos on char boundary");
            let mut matched = None;
            if let Some(candidates) = self.by_first.get(&first) {
                for &id in candidates {
                    let entity = &*self.vocab[id as usize];
                    if rest.starts_with(entity) {
                        matched = Some((id, entity.len()));
                        break;
                    }
                }
            }
            let (id, len, matra_like) = match matched {
                Some((id, len)) => (id, len, false),
                None => (NO_ENTITY, first.len_utf8(), is_matra(first)),
            };
            out.push(EntityRef {
                start: pos as u32,
                end: (pos + len) as u32,
                id,
                matra_like,
            });
            pos += len;
        }
    }

    /// Convenience wrapper allocating a fresh vector.
    pub fn segment(&self, word: &str) -> Vec<EntityRef> {
        let mut out = Vec::new();
        self.segment_into(word, &mut out);
        out
    }

    /// Classify a substitution between two segmented entities.
    ///
    /// Equal text is `Exact` whether or not the entities are interned;
    /// everything else consults the pair table.
    pub fn subst_type(&self, a: &EntityRef, a_word: &str, b: &EntityRef, b_word: &str) -> SubstType {
        if a.text(a_word) == b.text(b_word) {
            return SubstType::Exact;
        }
        if a.id == NO_ENTITY || b.id == NO_ENTITY {
            return SubstType::Other;
        }
        self.pair_types
            .get(&(a.id, b.id))
            .copied()
            .unwrap_or(SubstType::Other)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
