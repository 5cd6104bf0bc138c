// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request-scoped ranking state: the prepared query and reusable scratch.
//!
//! The query side of every comparison is identical across thousands of
//! candidate rows, so it is segmented exactly once per request. The
//! candidate side reuses the context's scratch buffers; the scoring loop
//! must not allocate per entity, and with these buffers it allocates at most
//! one string per row field.

use crate::config::SearchConfig;
use crate::entity::{EntityRef, Lexicon};
use crate::normalize::{count_marks_token, norm_strict, strip_marks_token_into};

/// One query word, pre-normalized and pre-segmented.
#[derive(Debug, Clone)]
pub struct QueryWord {
    /// Strict form of the word (marks intact): the exact-equality alphabet.
    pub strict: String,
    /// Mark-stripped form: the entity-comparison alphabet.
    pub stripped: String,
    /// Entity segmentation of `stripped`.
    pub ents: Vec<EntityRef>,
    /// Combining-mark count of `strict`.
    pub marks: u32,
}

/// The whole prepared query.
#[derive(Debug, Clone)]
pub struct RankQuery {
    pub words: Vec<QueryWord>,
}

impl RankQuery {
    /// Normalize, tokenize and segment a raw query. `None` when the query
    /// normalizes to nothing.
    pub fn prepare(lex: &Lexicon, query: &str) -> Option<Self> {
        let strict = norm_strict(query);
        if strict.is_empty() {
            return None;
        }
        let words = strict
            .split_whitespace()
            .map(|w| {
                let mut stripped = String::new();
                strip_marks_token_into(w, &mut stripped);
                let ents = lex.segment(&stripped);
                QueryWord {
                    strict: w.to_string(),
                    marks: count_marks_token(w),
                    stripped,
                    ents,
                }
            })
            .collect::<Vec<_>>();
        Some(Self { words })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Mutable per-worker scratch plus the shared immutable tables.
pub struct RankContext<'a> {
    pub lex: &'a Lexicon,
    pub cfg: &'a SearchConfig,
    /// Mark-stripped candidate word under comparison.
    pub(crate) cand_buf: String,
    /// Segmentation of `cand_buf`.
    pub(crate) cand_ents: Vec<EntityRef>,
}

impl<'a> RankContext<'a> {
    pub fn new(lex: &'a Lexicon, cfg: &'a SearchConfig) -> Self {
        Self {
            lex,
            cfg,
            cand_buf: String::with_capacity(64),
            cand_ents: Vec::with_capacity(16),
        }
    }
}
