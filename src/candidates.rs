// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate generation: the union of six posting-list lookups.
//!
//! For each index family in scope, every key of the matching family is
//! looked up and each decoded row id accumulates a per-family hit counter.
//! A row that matched *every* key queried against a family gets that
//! family's `and_hit` bit, the downstream consumer's signal that the row
//! covered the whole query, not just one token of it.
//!
//! Candidate generation is recall-oriented: union semantics, no ranking.
//! Precision is the ranker's job, so the only filtering here is the key cap
//! (selectivity over completeness past 200 keys) and dropping blobs that
//! fail to decode.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Scope, SearchConfig};
use crate::error::StoreError;
use crate::keys::KeyPlan;
use crate::postings::decode_row_ids;
use crate::store::{AcId, IndexFamily, IndexStore, RowId, ALL_FAMILIES};

/// How many decode failures get logged with context per generation pass.
const DECODE_LOG_SAMPLE: u32 = 3;

/// Per-row hit metadata: one counter and one all-keys bit per index family,
/// indexed by [`IndexFamily::slot`]. Families not queried stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMeta {
    pub hits: [u16; 6],
    pub and_hit: [bool; 6],
}

/// The candidate set for one AC: row ids with merge metadata.
#[derive(Debug, Default)]
pub struct CandidateSet {
    pub rows: HashMap<RowId, CandidateMeta>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in ascending order, for deterministic downstream fetches.
    pub fn sorted_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.rows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Run the candidate lookups for one AC.
///
/// Strict and exact families always run for the scoped field(s); the loose
/// families run only when `exact_only` is false. Key lists are capped and
/// chunked per configuration; a blob that decodes to nothing loses that
/// key's contribution and the pass continues.
pub fn generate<I: IndexStore + ?Sized>(
    store: &I,
    ac: AcId,
    plan: &KeyPlan,
    scope: Scope,
    exact_only: bool,
    cfg: &SearchConfig,
) -> Result<CandidateSet, StoreError> {
    let mut set = CandidateSet::default();
    let mut decode_failures = 0u32;

    for family in ALL_FAMILIES {
        if !family.in_scope(scope) {
            continue;
        }
        if exact_only && family.is_loose() {
            continue;
        }
        let keys = plan.for_form(family.form());
        if keys.is_empty() {
            continue;
        }
        let keys = if keys.len() > cfg.max_keys_per_lookup {
            debug!(
                family = ?family,
                dropped = keys.len() - cfg.max_keys_per_lookup,
                "key list over the lookup cap; excess keys dropped"
            );
            &keys[..cfg.max_keys_per_lookup]
        } else {
            keys
        };

        let slot = family.slot();
        for chunk in keys.chunks(cfg.max_params_per_call.max(1)) {
            let rows = store.lookup(family, ac, chunk)?;
            for posting in rows {
                let ids = match decode_row_ids(&posting.row_ids, posting.n) {
                    Ok(ids) => ids,
                    Err(err) => {
                        decode_failures += 1;
                        if decode_failures <= DECODE_LOG_SAMPLE {
                            warn!(
                                family = ?family,
                                ac = ac.0,
                                key = %posting.key,
                                blob_len = posting.row_ids.len(),
                                n = posting.n,
                                %err,
                                "undecodable posting blob; dropping key contribution"
                            );
                        }
                        continue;
                    }
                };
                for id in ids {
                    let meta = set.rows.entry(RowId(id)).or_default();
                    meta.hits[slot] = meta.hits[slot].saturating_add(1);
                }
            }
        }

        let keys_queried = keys.len() as u16;
        for meta in set.rows.values_mut() {
            if meta.hits[slot] > 0 {
                meta.and_hit[slot] = meta.hits[slot] == keys_queried;
            }
        }
    }

    if decode_failures > DECODE_LOG_SAMPLE {
        warn!(
            ac = ac.0,
            total = decode_failures,
            "further undecodable posting blobs suppressed"
        );
    }
    Ok(set)
}
