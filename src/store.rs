// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Store seams: the two interfaces the engine consumes, plus in-memory
//! implementations used by tests and the CLI fixture loader.
//!
//! The engine is deliberately storage-agnostic. Posting lists and rows live
//! wherever the deployment put them (SQLite shards, parquet-backed caches);
//! the core only ever asks two questions: "which row ids sit under these
//! keys?" and "give me the score fields for these row ids". Both stores are
//! read-only from the engine's point of view; rebuilds happen offline.

use std::collections::{BTreeMap, HashMap, HashSet};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::{Scope, SearchConfig};
use crate::error::StoreError;
use crate::keys::KeyPlan;
use crate::normalize::LooseFold;

/// Assembly Constituency number: the partition unit queries fan out over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct AcId(pub u32);

/// Row identifier within an AC partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RowId(pub u64);

/// The six posting-list index families: one per normal form and name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexFamily {
    StrictVoter,
    StrictRelative,
    ExactVoter,
    ExactRelative,
    LooseVoter,
    LooseRelative,
}

/// All six families, in counter order.
pub const ALL_FAMILIES: [IndexFamily; 6] = [
    IndexFamily::StrictVoter,
    IndexFamily::StrictRelative,
    IndexFamily::ExactVoter,
    IndexFamily::ExactRelative,
    IndexFamily::LooseVoter,
    IndexFamily::LooseRelative,
];

impl IndexFamily {
    /// Stable slot in the per-row hit-counter arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            IndexFamily::StrictVoter => 0,
            IndexFamily::StrictRelative => 1,
            IndexFamily::ExactVoter => 2,
            IndexFamily::ExactRelative => 3,
            IndexFamily::LooseVoter => 4,
            IndexFamily::LooseRelative => 5,
        }
    }

    /// True for the three voter-name families.
    #[inline]
    pub fn is_voter(self) -> bool {
        matches!(
            self,
            IndexFamily::StrictVoter | IndexFamily::ExactVoter | IndexFamily::LooseVoter
        )
    }

    /// True for the two loose families (suppressed under exact-only).
    #[inline]
    pub fn is_loose(self) -> bool {
        matches!(self, IndexFamily::LooseVoter | IndexFamily::LooseRelative)
    }

    /// Does this family participate in a request with the given scope?
    #[inline]
    pub fn in_scope(self, scope: Scope) -> bool {
        match scope {
            Scope::Voter => self.is_voter(),
            Scope::Relative => !self.is_voter(),
            Scope::Anywhere => true,
        }
    }
}

/// One posting-list row as returned by an index store: the key that matched,
/// the opaque row-id blob, and the companion count column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingRow {
    pub key: String,
    pub row_ids: Vec<u8>,
    pub n: u64,
}

/// The fixed score-mode row record. Display-mode rows carry the full UI
/// column set and never enter the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub row_id: RowId,
    pub voter_name_raw: String,
    pub relative_name_raw: String,
    pub voter_name_norm: String,
    pub relative_name_norm: String,
    pub serial_no: u64,
}

/// Posting-list access. Implementations return one `PostingRow` per key that
/// exists in the given family and AC; absent keys simply produce no row.
pub trait IndexStore: Sync {
    fn lookup(
        &self,
        family: IndexFamily,
        ac: AcId,
        keys: &[String],
    ) -> Result<Vec<PostingRow>, StoreError>;
}

/// Row access in score mode.
pub trait RowStore: Sync {
    fn fetch_score_rows(&self, ac: AcId, row_ids: &[RowId]) -> Result<Vec<ScoreRow>, StoreError>;
}

// ============================================================================
// IN-MEMORY STORES
// ============================================================================

/// In-memory posting lists, keyed (family, ac) → key → sorted row ids.
///
/// Blobs are materialized lazily per encoding so tests can exercise every
/// decoder path against identical logical content.
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    postings: HashMap<(IndexFamily, AcId), BTreeMap<String, Vec<u64>>>,
    known_acs: HashSet<AcId>,
    encoding: BlobEncoding,
}

/// How the in-memory store materializes blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobEncoding {
    #[default]
    PackedU32,
    PackedU64,
    Varint,
    DeltaVarint,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: BlobEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Append a row id under a key. Ids are kept sorted and deduplicated.
    pub fn insert(&mut self, family: IndexFamily, ac: AcId, key: &str, row_id: RowId) {
        self.known_acs.insert(ac);
        let ids = self
            .postings
            .entry((family, ac))
            .or_default()
            .entry(key.to_string())
            .or_default();
        match ids.binary_search(&row_id.0) {
            Ok(_) => {}
            Err(pos) => ids.insert(pos, row_id.0),
        }
    }

    fn encode(&self, ids: &[u64]) -> (Vec<u8>, u64) {
        let mut blob = Vec::new();
        match self.encoding {
            BlobEncoding::PackedU32 => {
                for &id in ids {
                    blob.extend_from_slice(&(id as u32).to_le_bytes());
                }
            }
            BlobEncoding::PackedU64 => {
                for &id in ids {
                    blob.extend_from_slice(&id.to_le_bytes());
                }
            }
            BlobEncoding::Varint => {
                for &id in ids {
                    crate::postings::encode_varint(id, &mut blob);
                }
            }
            BlobEncoding::DeltaVarint => {
                let mut prev = 0u64;
                for &id in ids {
                    crate::postings::encode_varint(id - prev, &mut blob);
                    prev = id;
                }
            }
        }
        (blob, ids.len() as u64)
    }
}

impl IndexStore for MemoryIndexStore {
    fn lookup(
        &self,
        family: IndexFamily,
        ac: AcId,
        keys: &[String],
    ) -> Result<Vec<PostingRow>, StoreError> {
        if !self.known_acs.contains(&ac) {
            return Err(StoreError::permanent(format!("unknown ac {}", ac.0)));
        }
        let Some(map) = self.postings.get(&(family, ac)) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for key in keys {
            if let Some(ids) = map.get(key) {
                let (row_ids, n) = self.encode(ids);
                out.push(PostingRow {
                    key: key.clone(),
                    row_ids,
                    n,
                });
            }
        }
        Ok(out)
    }
}

/// In-memory score rows per AC.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    rows: HashMap<AcId, HashMap<RowId, ScoreRow>>,
    known_acs: Vec<AcId>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ac: AcId, row: ScoreRow) {
        if !self.known_acs.contains(&ac) {
            self.known_acs.push(ac);
        }
        self.rows.entry(ac).or_default().insert(row.row_id, row);
    }
}

impl RowStore for MemoryRowStore {
    fn fetch_score_rows(&self, ac: AcId, row_ids: &[RowId]) -> Result<Vec<ScoreRow>, StoreError> {
        let Some(rows) = self.rows.get(&ac) else {
            return Err(StoreError::permanent(format!("unknown ac {}", ac.0)));
        };
        Ok(row_ids
            .iter()
            .filter_map(|id| rows.get(id).cloned())
            .collect())
    }
}

// ============================================================================
// OFFLINE-STYLE INDEX BUILDER
// ============================================================================

/// Builds both in-memory stores from score rows with the same key builder
/// the query side uses, so fixtures exercise the real key geometry.
pub struct FixtureBuilder {
    cfg: SearchConfig,
    fold: LooseFold,
    index: MemoryIndexStore,
    rows: MemoryRowStore,
}

impl FixtureBuilder {
    pub fn new(cfg: SearchConfig) -> Self {
        let fold = cfg.loose_fold();
        Self {
            cfg,
            fold,
            index: MemoryIndexStore::new(),
            rows: MemoryRowStore::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: BlobEncoding) -> Self {
        self.index.encoding = encoding;
        self
    }

    /// Index one row into all six families and store it.
    pub fn add_row(&mut self, ac: AcId, row: ScoreRow) {
        for family in ALL_FAMILIES {
            let name = if family.is_voter() {
                &row.voter_name_norm
            } else {
                &row.relative_name_norm
            };
            let plan = KeyPlan::for_family(name, family, &self.cfg, &self.fold);
            for key in plan {
                self.index.insert(family, ac, &key, row.row_id);
            }
        }
        self.rows.insert(ac, row);
    }

    pub fn finish(self) -> (MemoryIndexStore, MemoryRowStore) {
        (self.index, self.rows)
    }
}

/// A store wrapper that fails lookups until reset; used to exercise the
/// transient/permanent error paths without a real backend.
pub struct FailingIndexStore<S> {
    inner: S,
    failure: RwLock<Option<StoreError>>,
}

impl<S> FailingIndexStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failure: RwLock::new(None),
        }
    }

    pub fn fail_with(&self, err: StoreError) {
        *self.failure.write() = Some(err);
    }

    pub fn clear(&self) {
        *self.failure.write() = None;
    }
}

impl<S: IndexStore> IndexStore for FailingIndexStore<S> {
    fn lookup(
        &self,
        family: IndexFamily,
        ac: AcId,
        keys: &[String],
    ) -> Result<Vec<PostingRow>, StoreError> {
        if let Some(err) = self.failure.read().clone() {
            return Err(err);
        }
        self.inner.lookup(family, ac, keys)
    }
}
