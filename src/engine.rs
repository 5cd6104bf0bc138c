// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: per-AC fan-out, scoring, and the final merge.
//!
//! One request owns one pass through the pipeline. The query is normalized
//! and key-planned once; the AC list fans out on the rayon pool; each AC
//! independently generates candidates, fetches score rows, and ranks them;
//! a sequential reduction sorts the union by ranking key. For a fixed input
//! and store snapshot the output order is bit-identical across runs: the
//! comparator ends in (key, ac, row id) and nothing in the pipeline depends
//! on thread interleaving.
//!
//! Store failures split per the error taxonomy: transient failures abort
//! the request as retriable; permanent ones (an unknown AC, say) are
//! recorded against that AC and the rest of the request completes.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::candidates::{generate, CandidateMeta};
use crate::config::{Scope, SearchConfig};
use crate::entity::Lexicon;
use crate::error::{SearchError, StoreError};
use crate::keys::KeyPlan;
use crate::normalize::{norm_strict, LooseFold};
use crate::rank::{rank_field, MatchField, RankContext, RankKey, RankQuery, Scored};
use crate::store::{AcId, IndexStore, RowId, RowStore, ScoreRow};

/// One search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub scope: Scope,
    pub exact_only: bool,
    /// The ACs to fan out over.
    pub acs: Vec<AcId>,
    /// Keep only the best `limit` hits after the merge.
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, acs: Vec<AcId>) -> Self {
        Self {
            query: query.into(),
            scope: Scope::default(),
            exact_only: false,
            acs,
            limit: None,
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub ac: AcId,
    pub row_id: RowId,
    pub serial_no: u64,
    pub field: MatchField,
    pub key: RankKey,
    pub why: String,
    pub meta: CandidateMeta,
}

/// An AC that failed permanently while the rest of the request proceeded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcFailure {
    pub ac: AcId,
    pub error: String,
}

/// The merged response.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    pub ac_failures: Vec<AcFailure>,
    pub cancelled: bool,
}

/// Pipeline phases reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Plan,
    Score,
    Merge,
}

/// A progress sample: phase, ACs done out of total, cumulative candidates.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub phase: Phase,
    pub done: usize,
    pub total: usize,
    pub candidates: usize,
}

/// The engine: two store seams, the shared tables, and the configuration.
pub struct SearchEngine<I, R> {
    index: I,
    rows: R,
    lex: Arc<Lexicon>,
    fold: LooseFold,
    cfg: SearchConfig,
}

enum AcOutcome {
    Done(Vec<SearchHit>),
    Failed(AcId, StoreError),
    Cancelled,
}

impl<I: IndexStore, R: RowStore> SearchEngine<I, R> {
    pub fn new(index: I, rows: R) -> Self {
        Self::with_config(index, rows, SearchConfig::default())
    }

    pub fn with_config(index: I, rows: R, cfg: SearchConfig) -> Self {
        let fold = cfg.loose_fold();
        Self {
            index,
            rows,
            lex: Arc::new(Lexicon::new()),
            fold,
            cfg,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Access the index store.
    pub fn index_store(&self) -> &I {
        &self.index
    }

    /// Access the row store.
    pub fn row_store(&self) -> &R {
        &self.rows
    }

    /// Run a search without progress reporting.
    pub fn search(
        &self,
        req: &SearchRequest,
        cancel: &CancelToken,
    ) -> Result<SearchResponse, SearchError> {
        self.search_with_progress(req, cancel, &|_| {})
    }

    /// Run a search, sampling progress through `progress`.
    ///
    /// The callback is invoked from worker threads under a sink-side lock;
    /// keep it cheap (bump a bar, post a message).
    pub fn search_with_progress(
        &self,
        req: &SearchRequest,
        cancel: &CancelToken,
        progress: &(dyn Fn(Progress) + Sync),
    ) -> Result<SearchResponse, SearchError> {
        let Some(rank_query) = RankQuery::prepare(&self.lex, &req.query) else {
            return Ok(SearchResponse::default());
        };
        let plan = KeyPlan::build(&req.query, &self.cfg, &self.fold);
        let total = req.acs.len();
        debug!(
            query = %req.query,
            acs = total,
            scope = ?req.scope,
            exact_only = req.exact_only,
            strict_keys = plan.strict.len(),
            exact_keys = plan.exact.len(),
            loose_keys = plan.loose.len(),
            "search planned"
        );

        let sink = Mutex::new((0usize, 0usize)); // (acs done, candidates seen)
        progress(Progress {
            phase: Phase::Plan,
            done: 0,
            total,
            candidates: 0,
        });

        let outcomes: Vec<AcOutcome> = req
            .acs
            .par_iter()
            .map(|&ac| {
                if cancel.is_cancelled() {
                    return AcOutcome::Cancelled;
                }
                match self.run_ac(ac, req, &rank_query, &plan, cancel) {
                    Ok(Some((hits, candidates))) => {
                        let mut guard = sink.lock();
                        guard.0 += 1;
                        guard.1 += candidates;
                        progress(Progress {
                            phase: Phase::Score,
                            done: guard.0,
                            total,
                            candidates: guard.1,
                        });
                        AcOutcome::Done(hits)
                    }
                    Ok(None) => AcOutcome::Cancelled,
                    Err(err) => AcOutcome::Failed(ac, err),
                }
            })
            .collect();

        let mut hits = Vec::new();
        let mut ac_failures = Vec::new();
        let mut cancelled = cancel.is_cancelled();
        for outcome in outcomes {
            match outcome {
                AcOutcome::Done(mut ac_hits) => hits.append(&mut ac_hits),
                AcOutcome::Cancelled => cancelled = true,
                AcOutcome::Failed(ac, err) => {
                    if err.is_retryable() {
                        return Err(SearchError::Store(err));
                    }
                    ac_failures.push(AcFailure {
                        ac,
                        error: err.to_string(),
                    });
                }
            }
        }

        if cancelled {
            return Ok(SearchResponse {
                hits: Vec::new(),
                ac_failures: Vec::new(),
                cancelled: true,
            });
        }

        progress(Progress {
            phase: Phase::Merge,
            done: total,
            total,
            candidates: sink.lock().1,
        });
        hits.sort_unstable_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| a.ac.cmp(&b.ac))
                .then_with(|| a.row_id.cmp(&b.row_id))
        });
        if let Some(limit) = req.limit {
            hits.truncate(limit);
        }
        Ok(SearchResponse {
            hits,
            ac_failures,
            cancelled: false,
        })
    }

    /// Candidate generation, row fetch, and scoring for one AC. Returns the
    /// hits plus the candidate count for progress reporting.
    ///
    /// `Ok(None)` means cancellation was observed mid-AC.
    fn run_ac(
        &self,
        ac: AcId,
        req: &SearchRequest,
        rank_query: &RankQuery,
        plan: &KeyPlan,
        cancel: &CancelToken,
    ) -> Result<Option<(Vec<SearchHit>, usize)>, StoreError> {
        let candidates = generate(&self.index, ac, plan, req.scope, req.exact_only, &self.cfg)?;
        if candidates.is_empty() {
            return Ok(Some((Vec::new(), 0)));
        }
        if cancel.is_cancelled() {
            return Ok(None);
        }

        let ids = candidates.sorted_ids();
        let mut rows: Vec<ScoreRow> = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(self.cfg.max_params_per_call.max(1)) {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            rows.extend(self.rows.fetch_score_rows(ac, chunk)?);
        }

        let hits: Vec<Option<SearchHit>> = rows
            .par_iter()
            .map_init(
                || RankContext::new(&self.lex, &self.cfg),
                |cx, row| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let meta = candidates
                        .rows
                        .get(&row.row_id)
                        .copied()
                        .unwrap_or_default();
                    self.score_row(cx, rank_query, req, ac, row, meta)
                },
            )
            .collect();

        if cancel.is_cancelled() {
            return Ok(None);
        }
        Ok(Some((
            hits.into_iter().flatten().collect(),
            candidates.len(),
        )))
    }

    /// Rank the in-scope field(s) of one row; keep the better field.
    fn score_row(
        &self,
        cx: &mut RankContext<'_>,
        rank_query: &RankQuery,
        req: &SearchRequest,
        ac: AcId,
        row: &ScoreRow,
        meta: CandidateMeta,
    ) -> Option<SearchHit> {
        let mut best: Option<(MatchField, Scored)> = None;

        if req.scope != Scope::Relative {
            if let Some(scored) = self.rank_one_field(
                cx,
                rank_query,
                &row.voter_name_norm,
                &row.voter_name_raw,
                row.serial_no,
                req.exact_only,
            ) {
                best = Some((MatchField::Voter, scored));
            }
        }
        if req.scope != Scope::Voter {
            if let Some(scored) = self.rank_one_field(
                cx,
                rank_query,
                &row.relative_name_norm,
                &row.relative_name_raw,
                row.serial_no,
                req.exact_only,
            ) {
                // ties go to the voter field
                let better = match &best {
                    Some((_, held)) => scored.key < held.key,
                    None => true,
                };
                if better {
                    best = Some((MatchField::Relative, scored));
                }
            }
        }

        best.map(|(field, scored)| SearchHit {
            ac,
            row_id: row.row_id,
            serial_no: row.serial_no,
            field,
            key: scored.key,
            why: scored.why,
            meta,
        })
    }

    fn rank_one_field(
        &self,
        cx: &mut RankContext<'_>,
        rank_query: &RankQuery,
        norm: &str,
        raw: &str,
        serial: u64,
        exact_only: bool,
    ) -> Option<Scored> {
        // Stored norms are strict-normalized by the loader; fall back to
        // normalizing the raw field when a norm is missing.
        let source: Cow<'_, str> = if norm.is_empty() && !raw.is_empty() {
            Cow::Owned(norm_strict(raw))
        } else {
            Cow::Borrowed(norm)
        };
        let tokens: Vec<&str> = source.split_whitespace().collect();
        rank_field(cx, rank_query, &tokens, serial, exact_only)
    }
}
