//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixture builders so tests and the CLI loader
//! exercise the same index geometry.

#![doc(hidden)]

use crate::config::SearchConfig;
use crate::engine::SearchEngine;
use crate::store::{
    AcId, BlobEncoding, FixtureBuilder, MemoryIndexStore, MemoryRowStore, RowId, ScoreRow,
};

/// Build a score row from raw names; norms are derived with the strict
/// normalizer the way the offline loader derives them.
pub fn row(id: u64, serial: u64, voter: &str, relative: &str) -> ScoreRow {
    ScoreRow {
        row_id: RowId(id),
        voter_name_raw: voter.to_string(),
        relative_name_raw: relative.to_string(),
        voter_name_norm: crate::normalize::norm_strict(voter),
        relative_name_norm: crate::normalize::norm_strict(relative),
        serial_no: serial,
    }
}

/// Build in-memory stores from (ac, rows) pairs under a configuration.
pub fn stores_with_rows(
    acs: &[(u32, Vec<ScoreRow>)],
    cfg: &SearchConfig,
    encoding: BlobEncoding,
) -> (MemoryIndexStore, MemoryRowStore) {
    let mut builder = FixtureBuilder::new(cfg.clone()).with_encoding(encoding);
    for (ac, rows) in acs {
        for row in rows {
            builder.add_row(AcId(*ac), row.clone());
        }
    }
    builder.finish()
}

/// A ready engine over in-memory stores with the default configuration.
pub fn engine_with_rows(
    acs: &[(u32, Vec<ScoreRow>)],
) -> SearchEngine<MemoryIndexStore, MemoryRowStore> {
    let cfg = SearchConfig::default();
    let (index, rows) = stores_with_rows(acs, &cfg, BlobEncoding::PackedU32);
    SearchEngine::with_config(index, rows, cfg)
}

/// A small roster of realistic rows spread over two ACs.
pub fn sample_roster() -> Vec<(u32, Vec<ScoreRow>)> {
    vec![
        (
            1,
            vec![
                row(1, 101, "राम कुमार", "श्याम लाल"),
                row(2, 102, "राम", "मोहन सिंह"),
                row(3, 103, "रामलाल शर्मा", "देवी प्रसाद"),
                row(4, 104, "वाला देवी", "राम कुमार"),
                row(5, 105, "ईसिडोर तिर्की", "पौलुस तिर्की"),
            ],
        ),
        (
            2,
            vec![
                row(6, 201, "राम कुमार सिंह", "बाला प्रसाद"),
                row(7, 202, "कमल किशोर", "कलम सिंह"),
                row(8, 203, "सीता देवी", "राम अवतार"),
            ],
        ),
    ]
}
