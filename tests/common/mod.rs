//! Shared helpers for the integration and property suites.

#![allow(dead_code)]

use khoj::testing::{sample_roster, stores_with_rows};
use khoj::{
    AcId, BlobEncoding, CancelToken, MatchField, RowId, Scope, SearchConfig, SearchEngine,
    SearchRequest, SearchResponse,
};

pub type MemEngine = SearchEngine<khoj::MemoryIndexStore, khoj::MemoryRowStore>;

/// The canonical two-AC roster under a given blob encoding.
pub fn roster_engine(encoding: BlobEncoding) -> MemEngine {
    let cfg = SearchConfig::default();
    let (index, rows) = stores_with_rows(&sample_roster(), &cfg, encoding);
    SearchEngine::with_config(index, rows, cfg)
}

/// Run one query over both roster ACs.
pub fn run(engine: &MemEngine, query: &str, scope: Scope, exact_only: bool) -> SearchResponse {
    let req = SearchRequest {
        query: query.to_string(),
        scope,
        exact_only,
        acs: vec![AcId(1), AcId(2)],
        limit: None,
    };
    engine.search(&req, &CancelToken::new()).unwrap()
}

/// Flatten a response to a comparable shape.
pub fn shape(res: &SearchResponse) -> Vec<(u32, u64, MatchField, Vec<u64>)> {
    res.hits
        .iter()
        .map(|h| (h.ac.0, h.row_id.0, h.field, h.key.as_slice().to_vec()))
        .collect()
}

/// The key for one row in a response, if present.
pub fn key_of(res: &SearchResponse, row: u64) -> Option<Vec<u64>> {
    res.hits
        .iter()
        .find(|h| h.row_id == RowId(row))
        .map(|h| h.key.as_slice().to_vec())
}
