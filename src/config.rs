// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration: every tunable cap and resolution in one place.
//!
//! Defaults are the production values the posting lists were built against.
//! The prefix lengths in particular are index resolutions, not preferences:
//! change them and the key families stop lining up with the stored keys.

use serde::{Deserialize, Serialize};

/// Which name field(s) a request scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Voter,
    Relative,
    #[default]
    Anywhere,
}

/// Outside-substitution caps for the add/outside family, by query-word
/// entity length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutsideCaps {
    pub upto_2: u32,
    pub exactly_3: u32,
    pub upto_8: u32,
    pub longer: u32,
}

impl Default for OutsideCaps {
    fn default() -> Self {
        Self {
            upto_2: 0,
            exactly_3: 1,
            upto_8: 2,
            longer: 3,
        }
    }
}

impl OutsideCaps {
    /// Cap for a query word of `q_len` entities.
    #[inline]
    pub fn cap(&self, q_len: usize) -> u32 {
        match q_len {
            0..=2 => self.upto_2,
            3 => self.exactly_3,
            4..=8 => self.upto_8,
            _ => self.longer,
        }
    }
}

/// All engine knobs. `Default` is the production configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Key-builder resolutions per index family.
    pub prefix_len_strict: usize,
    pub prefix_len_exact: usize,
    pub prefix_len_loose: usize,

    /// Consonant-mismatch caps for the full comparison.
    pub max_con_per_word: u32,
    pub max_con_total_2w: u32,
    pub max_con_total_3plus_w: u32,

    /// Prefix-fallback policy.
    pub pf_max_subs_for_2w: u32,
    pub pf_max_subs_for_3w: u32,
    pub pf_max_extra_suffix_per_word: u32,
    pub pf_global_extra_multiplier: u64,

    /// First-word addition cap in multi-word add/outside matching.
    pub add_first_word_max_add_in_multi: u32,

    /// Outside-substitution caps by query-word length.
    pub outside_caps_by_q_len: OutsideCaps,

    /// Loose-fold groups; first member of each group is the representative.
    /// Must match the set the loose posting lists were built with.
    pub loose_groups: Vec<Vec<String>>,

    /// Keys beyond this count are silently dropped from a lookup.
    pub max_keys_per_lookup: usize,
    /// Multi-key lookups are chunked to this many bound parameters.
    pub max_params_per_call: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prefix_len_strict: 3,
            prefix_len_exact: 2,
            prefix_len_loose: 2,
            max_con_per_word: 4,
            max_con_total_2w: 5,
            max_con_total_3plus_w: 7,
            pf_max_subs_for_2w: 1,
            pf_max_subs_for_3w: 2,
            pf_max_extra_suffix_per_word: 2,
            pf_global_extra_multiplier: 2,
            add_first_word_max_add_in_multi: 2,
            outside_caps_by_q_len: OutsideCaps::default(),
            loose_groups: crate::subst::LOOSE_FOLD_GROUPS
                .iter()
                .map(|g| g.iter().map(|m| m.to_string()).collect())
                .collect(),
            max_keys_per_lookup: 200,
            max_params_per_call: 900,
        }
    }
}

impl SearchConfig {
    /// Build the loose fold table for this configuration.
    pub fn loose_fold(&self) -> crate::normalize::LooseFold {
        crate::normalize::LooseFold::from_groups(&self.loose_groups)
    }
}
