// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranking key: a short tuple of numbers under strict lexicographic
//! order, lower is better.
//!
//! The key is bucketed, not scored. The leading elements encode mode and
//! family (exact scenarios before any fuzzy family, whole-word fuzzy before
//! prefix fallback before add/outside), and no amount of goodness in a later
//! element can cross those boundaries: a clean exact match beats the best
//! fuzzy match, always. The trailing elements are deterministic tiebreakers,
//! ending with the row's serial number.
//!
//! Keys from different families have different lengths, but they diverge at
//! the mode/family elements before length could matter, so plain slice
//! comparison is correct.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// Mode element values.
const MODE_EXACT: u64 = 0;
const MODE_TYPO: u64 = 1;

/// Family element values within the fuzzy mode.
const FAMILY_FULL: u64 = 0;
const FAMILY_PREFIX: u64 = 1;
const FAMILY_ADD_OUTSIDE: u64 = 2;

/// A ranking key. At most nine elements, fixed storage, no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    len: u8,
    vals: [u64; 9],
}

impl RankKey {
    fn from_slice(slice: &[u64]) -> Self {
        debug_assert!(slice.len() <= 9);
        let mut vals = [0u64; 9];
        vals[..slice.len()].copy_from_slice(slice);
        Self {
            len: slice.len() as u8,
            vals,
        }
    }

    /// `[0, scenario, kindRank, pos, suffixCount, totalWords, serial]`
    pub fn exact(scenario: u64, kind: u64, pos: u64, suffix: u64, total: u64, serial: u64) -> Self {
        Self::from_slice(&[MODE_EXACT, scenario, kind, pos, suffix, total, serial])
    }

    /// `[1, 0, bucket, severitySum, suffixCount, totalWords, serial]`
    pub fn full(bucket: u64, severity: u64, suffix: u64, total: u64, serial: u64) -> Self {
        Self::from_slice(&[MODE_TYPO, FAMILY_FULL, bucket, severity, suffix, total, serial])
    }

    /// `[1, 1, subsSum, typeSum, matraSum, extraSum, suffixCount, totalWords, serial]`
    #[allow(clippy::too_many_arguments)]
    pub fn prefix(
        subs: u64,
        types: u64,
        matras: u64,
        extras: u64,
        suffix: u64,
        total: u64,
        serial: u64,
    ) -> Self {
        Self::from_slice(&[
            MODE_TYPO,
            FAMILY_PREFIX,
            subs,
            types,
            matras,
            extras,
            suffix,
            total,
            serial,
        ])
    }

    /// `[1, 2, outsideTotal, addTotal, typeSum, matraSum, suffixCount, totalWords, serial]`
    #[allow(clippy::too_many_arguments)]
    pub fn add_outside(
        outside: u64,
        additions: u64,
        types: u64,
        matras: u64,
        suffix: u64,
        total: u64,
        serial: u64,
    ) -> Self {
        Self::from_slice(&[
            MODE_TYPO,
            FAMILY_ADD_OUTSIDE,
            outside,
            additions,
            types,
            matras,
            suffix,
            total,
            serial,
        ])
    }

    /// The key as a slice, for comparison and serialization.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.vals[..self.len as usize]
    }

    /// True when this key came from an exact scenario.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.vals[0] == MODE_EXACT
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Serialize for RankKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}
