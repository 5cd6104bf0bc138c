//! Grapheme-aware fuzzy search over Devanagari electoral-roll names.
//!
//! Given a human-typed query, find the best-matching voter and relative
//! records across tens of millions of rows partitioned by Assembly
//! Constituency, tolerating OCR damage, phonetic variants, visual glyph
//! confusions, and plain typing mistakes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ normalize.rs │──▶│   keys.rs   │──▶│ candidates.rs│──▶ row ids
//! │ strict/exact │   │ prefix keys │   │ 6-index union│
//! │ /loose forms │   │ + joins     │   │ + hit meta   │
//! └──────────────┘   └─────────────┘   └──────────────┘
//!        │                                     │
//!        ▼                                     ▼
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  entity.rs   │──▶│   rank/     │◀──│  engine.rs   │──▶ sorted hits
//! │ segmentation │   │ exact→fuzzy │   │ per-AC fanout│
//! │ + subst sets │   │ lex. keys   │   │ merge, cancel│
//! └──────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! The pipeline is deterministic: for a fixed query, configuration and
//! store snapshot, the output order is bit-identical across runs. Ranking
//! is bucketed, not scored: an exact match beats any fuzzy match, a
//! whole-word fuzzy match beats any prefix fallback, and no numeric damage
//! total can cross those boundaries.
//!
//! # Usage
//!
//! ```ignore
//! use khoj::{CancelToken, SearchEngine, SearchRequest, AcId};
//!
//! let engine = SearchEngine::new(index_store, row_store);
//! let req = SearchRequest::new("राम कुमार", vec![AcId(1), AcId(2)]);
//! let res = engine.search(&req, &CancelToken::new())?;
//! for hit in res.hits {
//!     println!("{:?} {:?} {}", hit.row_id, hit.field, hit.why);
//! }
//! ```

// Module declarations
pub mod cancel;
pub mod candidates;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod keys;
pub mod normalize;
pub mod postings;
pub mod rank;
pub mod store;
pub mod subst;
pub mod testing;

// Re-exports for the public API
pub use cancel::CancelToken;
pub use candidates::{generate, CandidateMeta, CandidateSet};
pub use config::{OutsideCaps, Scope, SearchConfig};
pub use engine::{
    AcFailure, Phase, Progress, SearchEngine, SearchHit, SearchRequest, SearchResponse,
};
pub use entity::{EntityRef, Lexicon};
pub use error::{DecodeError, SearchError, StoreError, StoreErrorKind};
pub use keys::{KeyPlan, NormForm};
pub use normalize::{
    count_marks, norm_exact, norm_loose, norm_strict, strip_marks, tokenize, LooseFold,
};
pub use postings::decode_row_ids;
pub use rank::{MatchField, RankContext, RankKey, RankQuery};
pub use store::{
    AcId, BlobEncoding, FailingIndexStore, FixtureBuilder, IndexFamily, IndexStore,
    MemoryIndexStore, MemoryRowStore, PostingRow, RowId, RowStore, ScoreRow, ALL_FAMILIES,
};
pub use subst::SubstType;
