// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String normalization: the three parallel forms every name passes through.
//!
//! OCR'd Devanagari is messy in layers, and each layer gets its own normal
//! form. `strict` fixes whitespace and punctuation damage only. `exact` folds
//! the vowel system down to seven buckets and drops the combining marks, so
//! "कुमार" and "कूमार" collide. `loose` additionally folds consonants that
//! OCR confuses for one another, so "वाला" and "बाला" collide too.
//!
//! Each form is the key alphabet of one posting-list index family, which is
//! why all three are computed both at index-build time and at query time:
//! the two sides must agree byte-for-byte or nothing matches.
//!
//! All functions here are pure and idempotent: `norm_strict(norm_strict(s))`
//! equals `norm_strict(s)`, and likewise for the other forms.

use unicode_normalization::UnicodeNormalization;

/// The punctuation class replaced by spaces in the strict form.
///
/// This is the exact set the offline roll loader strips, so query-side and
/// index-side tokenization stay aligned.
const PUNCT: &[char] = &[
    '.', ',', ';', ':', '|', '/', '\\', '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '`',
    '~', '!', '@', '#', '$', '%', '^', '&', '*', '_', '+', '=', '?', '-',
];

/// The five combining marks stripped before entity comparison.
///
/// Candrabindu, anusvara, visarga, nukta, virama. Matras are NOT in this set;
/// they survive stripping and are compared as matra-like entities.
#[inline]
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0901}' | '\u{0902}' | '\u{0903}' | '\u{093C}' | '\u{094D}'
    )
}

/// Dependent vowel signs (matras). Single-codepoint entities of this class
/// are counted as matra mismatches, never consonant mismatches.
#[inline]
pub fn is_matra(c: char) -> bool {
    matches!(
        c,
        '\u{093E}' // ा
        | '\u{093F}' // ि
        | '\u{0940}' // ी
        | '\u{0941}' // ु
        | '\u{0942}' // ू
        | '\u{0943}' // ृ
        | '\u{0944}' // ॄ
        | '\u{0945}' // ॅ
        | '\u{0947}' // े
        | '\u{0948}' // ै
        | '\u{0949}' // ॉ
        | '\u{094B}' // ो
        | '\u{094C}' // ौ
        | '\u{0962}' // ॢ
        | '\u{0963}' // ॣ
    )
}

/// Map an independent vowel or matra to its 7-symbol bucket.
///
/// The buckets collapse the short/long distinction and unify a matra with
/// its independent form, because OCR and typists disagree about both.
#[inline]
pub fn vowel_bucket(c: char) -> Option<char> {
    Some(match c {
        'अ' | 'आ' | 'ा' | 'ॉ' => 'A',
        'इ' | 'ई' | 'ि' | 'ी' => 'I',
        'उ' | 'ऊ' | 'ु' | 'ू' => 'U',
        'ए' | 'ऐ' | 'े' | 'ै' | 'ॅ' => 'E',
        'ओ' | 'औ' | 'ो' | 'ौ' => 'O',
        'ऋ' | 'ॠ' | 'ृ' | 'ॄ' => 'R',
        'ऌ' | 'ॡ' | '\u{0962}' | '\u{0963}' => 'L',
        _ => return None,
    })
}

/// Whitespace-collapse and punctuation-strip. The identity-preserving form.
///
/// NBSP becomes a regular space, the punctuation class becomes spaces, runs
/// of whitespace collapse to one space, and the result is NFC so precomposed
/// and decomposed inputs compare equal.
pub fn norm_strict(s: &str) -> String {
    let replaced: String = s
        .nfc()
        .map(|c| {
            if c == '\u{00A0}' || PUNCT.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove the five combining marks from a strict-normalized string.
///
/// Runs NFD first so nukta-precomposed consonants (क़, ज़, ...) decompose and
/// shed their nukta like everything else, then collapses spaces again.
pub fn strip_marks(s: &str) -> String {
    let stripped: String = norm_strict(s)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count combining marks in the strict form of `s`.
pub fn count_marks(s: &str) -> u32 {
    norm_strict(s)
        .nfd()
        .filter(|c| is_combining_mark(*c))
        .count() as u32
}

/// Mark count of a single already-strict token. No allocation.
#[inline]
pub(crate) fn count_marks_token(token: &str) -> u32 {
    token.nfd().filter(|c| is_combining_mark(*c)).count() as u32
}

/// Strip marks from a single already-strict token into a scratch buffer.
#[inline]
pub(crate) fn strip_marks_token_into(token: &str, out: &mut String) {
    out.clear();
    out.extend(token.nfd().filter(|c| !is_combining_mark(*c)));
}

/// The exact form: marks stripped, vowels folded to their bucket symbol.
pub fn norm_exact(s: &str) -> String {
    strip_marks(s)
        .chars()
        .map(|c| vowel_bucket(c).unwrap_or(c))
        .collect()
}

/// A fold over visually confusable consonant groups, fixed at startup.
///
/// Each group collapses to its first member. The canonical groups live in
/// [`crate::subst::LOOSE_FOLD_GROUPS`]; alternates can be supplied through
/// configuration, but index and query sides must be built from the same set.
#[derive(Debug, Clone)]
pub struct LooseFold {
    map: std::collections::HashMap<char, char>,
}

impl LooseFold {
    /// Build a fold from group lists. The first entry of each group is the
    /// representative the rest collapse to.
    pub fn from_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> Self {
        let mut map = std::collections::HashMap::new();
        for group in groups {
            let mut chars = group.iter().filter_map(|m| m.as_ref().chars().next());
            let Some(rep) = chars.next() else { continue };
            for member in group.iter() {
                let mut it = member.as_ref().chars();
                if let (Some(c), None) = (it.next(), it.next()) {
                    map.insert(c, rep);
                }
            }
        }
        Self { map }
    }

    #[inline]
    fn fold(&self, c: char) -> char {
        *self.map.get(&c).unwrap_or(&c)
    }
}

impl Default for LooseFold {
    fn default() -> Self {
        let groups: Vec<Vec<&str>> = crate::subst::LOOSE_FOLD_GROUPS
            .iter()
            .map(|g| g.to_vec())
            .collect();
        Self::from_groups(&groups)
    }
}

/// The loose form: exact form, then the रव→ख digraph rewrite, then the
/// confusable-consonant fold.
///
/// The rewrite runs first: ख and र share a fold group, so rewriting first
/// lands रव, ख and र on the same representative. Folding first would turn र
/// into the representative and the digraph would never be seen.
pub fn norm_loose(s: &str) -> String {
    norm_loose_with(s, &LooseFold::default())
}

/// [`norm_loose`] with an explicit fold table (for configured group sets).
pub fn norm_loose_with(s: &str, fold: &LooseFold) -> String {
    let exact = norm_exact(s);
    let rewritten = exact.replace("रव", "ख");
    rewritten.chars().map(|c| fold.fold(c)).collect()
}

/// Apply a normalizer and split on whitespace. Empty input yields no tokens.
pub fn tokenize<F: Fn(&str) -> String>(norm: F, s: &str) -> Vec<String> {
    norm(s)
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}
