// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix-key generation: how a query (or an indexed name) becomes posting
//! keys.
//!
//! Each index family stores row ids under short codepoint prefixes: strict
//! at 3, exact and loose at 2. Short prefixes keep the families selective
//! without assuming the typist finished the word.
//!
//! Join variants absorb whitespace damage: "रामकुमार" typed for "राम कुमार",
//! or the reverse. For n tokens we emit every adjacent-pair merge plus the
//! full concatenation. Intermediate contiguous spans are deliberately NOT
//! enumerated; the posting lists were built without them, and both sides
//! must agree. For four or more tokens the pair merges are additionally
//! collapsed to spaceless strings before prefixing.

use std::collections::HashSet;

use crate::config::SearchConfig;
use crate::normalize::{norm_exact, norm_loose_with, norm_strict, tokenize, LooseFold};
use crate::store::IndexFamily;

/// The three normal forms an index family can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormForm {
    Strict,
    Exact,
    Loose,
}

impl IndexFamily {
    /// The normal form this family is keyed by.
    #[inline]
    pub fn form(self) -> NormForm {
        match self {
            IndexFamily::StrictVoter | IndexFamily::StrictRelative => NormForm::Strict,
            IndexFamily::ExactVoter | IndexFamily::ExactRelative => NormForm::Exact,
            IndexFamily::LooseVoter | IndexFamily::LooseRelative => NormForm::Loose,
        }
    }
}

/// First `p` codepoints of `s` (the whole string when shorter).
fn prefix(s: &str, p: usize) -> &str {
    match s.char_indices().nth(p) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Keys for one token list at one resolution: token prefixes, adjacent-pair
/// merge prefixes, the full concatenation, deduplicated in emission order.
fn build_form_keys(tokens: &[String], p: usize) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |keys: &mut Vec<String>, key: &str| {
        if !key.is_empty() && seen.insert(key.to_string()) {
            keys.push(key.to_string());
        }
    };

    for token in tokens {
        push(&mut keys, prefix(token, p));
    }

    let n = tokens.len();
    if n >= 2 {
        for i in 0..n - 1 {
            let mut parts: Vec<&str> = Vec::with_capacity(n - 1);
            let merged = format!("{}{}", tokens[i], tokens[i + 1]);
            parts.extend(tokens[..i].iter().map(|t| t.as_str()));
            parts.push(&merged);
            parts.extend(tokens[i + 2..].iter().map(|t| t.as_str()));
            let variant = parts.join(" ");
            push(&mut keys, prefix(&variant, p));
            if n >= 4 {
                let collapsed = variant.replace(' ', "");
                push(&mut keys, prefix(&collapsed, p));
            }
        }
        let full: String = tokens.concat();
        push(&mut keys, prefix(&full, p));
    }

    keys
}

/// The three key families derived from one query string.
#[derive(Debug, Clone, Default)]
pub struct KeyPlan {
    pub strict: Vec<String>,
    pub exact: Vec<String>,
    pub loose: Vec<String>,
}

impl KeyPlan {
    /// Build all three families for a query.
    pub fn build(s: &str, cfg: &SearchConfig, fold: &LooseFold) -> Self {
        Self {
            strict: build_form_keys(&tokenize(norm_strict, s), cfg.prefix_len_strict),
            exact: build_form_keys(&tokenize(norm_exact, s), cfg.prefix_len_exact),
            loose: build_form_keys(
                &tokenize(|t| norm_loose_with(t, fold), s),
                cfg.prefix_len_loose,
            ),
        }
    }

    /// The key list for a given form.
    #[inline]
    pub fn for_form(&self, form: NormForm) -> &[String] {
        match form {
            NormForm::Strict => &self.strict,
            NormForm::Exact => &self.exact,
            NormForm::Loose => &self.loose,
        }
    }

    /// Keys for indexing one name into one family (offline-builder side).
    pub fn for_family(
        name: &str,
        family: IndexFamily,
        cfg: &SearchConfig,
        fold: &LooseFold,
    ) -> Vec<String> {
        match family.form() {
            NormForm::Strict => {
                build_form_keys(&tokenize(norm_strict, name), cfg.prefix_len_strict)
            }
            NormForm::Exact => build_form_keys(&tokenize(norm_exact, name), cfg.prefix_len_exact),
            NormForm::Loose => build_form_keys(
                &tokenize(|t| norm_loose_with(t, fold), name),
                cfg.prefix_len_loose,
            ),
        }
    }
}
