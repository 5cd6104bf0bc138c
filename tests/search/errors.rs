//! Failure semantics: transient aborts, permanent degrades, cancellation
//! flags.

use khoj::testing::{row, stores_with_rows};
use khoj::{
    AcId, BlobEncoding, CancelToken, FailingIndexStore, MemoryIndexStore, MemoryRowStore, Phase,
    Scope, SearchConfig, SearchEngine, SearchError, SearchRequest, StoreError,
};

fn request(query: &str, acs: Vec<u32>) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        scope: Scope::Anywhere,
        exact_only: false,
        acs: acs.into_iter().map(AcId).collect(),
        limit: None,
    }
}

fn failing_engine() -> SearchEngine<FailingIndexStore<MemoryIndexStore>, MemoryRowStore> {
    let cfg = SearchConfig::default();
    let rows = vec![(1, vec![row(1, 10, "राम", "शिव")])];
    let (index, row_store) = stores_with_rows(&rows, &cfg, BlobEncoding::PackedU32);
    SearchEngine::with_config(FailingIndexStore::new(index), row_store, cfg)
}

#[test]
fn transient_store_failure_aborts_the_request_as_retriable() {
    let engine = failing_engine();
    engine
        .index_store()
        .fail_with(StoreError::transient("connection reset"));
    let err = engine
        .search(&request("राम", vec![1]), &CancelToken::new())
        .unwrap_err();
    match err {
        SearchError::Store(e) => assert!(e.is_retryable()),
    }
}

#[test]
fn recovery_after_a_transient_failure_needs_no_new_engine() {
    let engine = failing_engine();
    engine
        .index_store()
        .fail_with(StoreError::transient("timeout"));
    assert!(engine
        .search(&request("राम", vec![1]), &CancelToken::new())
        .is_err());

    engine.index_store().clear();
    let res = engine
        .search(&request("राम", vec![1]), &CancelToken::new())
        .unwrap();
    assert_eq!(res.hits.len(), 1);
}

#[test]
fn permanent_failure_keeps_other_acs_alive() {
    let cfg = SearchConfig::default();
    let rows = vec![(1, vec![row(1, 10, "राम", "शिव")])];
    let (index, row_store) = stores_with_rows(&rows, &cfg, BlobEncoding::PackedU32);
    let engine = SearchEngine::with_config(index, row_store, cfg);

    // AC 7 was never loaded: a permanent, per-AC failure
    let res = engine
        .search(&request("राम", vec![1, 7]), &CancelToken::new())
        .unwrap();
    assert_eq!(res.hits.len(), 1);
    assert_eq!(res.ac_failures.len(), 1);
    assert_eq!(res.ac_failures[0].ac, AcId(7));
    assert!(!res.cancelled);
}

#[test]
fn pre_cancelled_request_is_empty_and_flagged() {
    let engine = failing_engine();
    let cancel = CancelToken::new();
    cancel.cancel();
    let res = engine.search(&request("राम", vec![1]), &cancel).unwrap();
    assert!(res.cancelled);
    assert!(res.hits.is_empty());
    assert!(res.ac_failures.is_empty());
}

#[test]
fn progress_reports_plan_then_per_ac_scores() {
    let cfg = SearchConfig::default();
    let rows = vec![
        (1, vec![row(1, 10, "राम", "शिव")]),
        (2, vec![row(2, 20, "राम कुमार", "मोहन")]),
    ];
    let (index, row_store) = stores_with_rows(&rows, &cfg, BlobEncoding::PackedU32);
    let engine = SearchEngine::with_config(index, row_store, cfg);

    let samples = parking_lot::Mutex::new(Vec::new());
    engine
        .search_with_progress(&request("राम", vec![1, 2]), &CancelToken::new(), &|p| {
            samples.lock().push(p);
        })
        .unwrap();
    let samples = samples.into_inner();

    assert_eq!(samples[0].phase, Phase::Plan);
    assert_eq!(samples.last().unwrap().phase, Phase::Merge);
    let score_samples: Vec<_> = samples.iter().filter(|p| p.phase == Phase::Score).collect();
    assert_eq!(score_samples.len(), 2);
    assert_eq!(score_samples.last().unwrap().done, 2);
}
