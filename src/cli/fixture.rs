// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixture loading: a directory of JSON roll data becomes in-memory stores.
//!
//! Layout mirrors the production data tree: a `manifest.json` naming the
//! state and its ACs, and one `rows.json` per AC directory holding score
//! rows. Posting lists are built on load with the same key builder the
//! query side uses.
//!
//! ```text
//! fixture/
//!   manifest.json          { "stateCode": "S27", "acs": [ ... ] }
//!   ac=01/rows.json        [ { "rowId": 1, "voterNameRaw": ... }, ... ]
//!   ac=02/rows.json
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use khoj::{AcId, FixtureBuilder, MemoryIndexStore, MemoryRowStore, ScoreRow, SearchConfig};

/// One AC entry in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAc {
    pub ac_no: u32,
    #[serde(default)]
    pub row_count: u64,
    /// Directory holding this AC's files, relative to the fixture root.
    pub path: String,
}

/// The fixture manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub state_code: String,
    pub acs: Vec<ManifestAc>,
}

/// A loaded fixture: manifest plus ready stores.
pub struct Fixture {
    pub manifest: Manifest,
    pub index: MemoryIndexStore,
    pub rows: MemoryRowStore,
}

/// Load a fixture directory, building posting lists as we go.
pub fn load(dir: &Path, cfg: &SearchConfig) -> Result<Fixture, String> {
    let manifest_path = dir.join("manifest.json");
    let manifest_text = fs::read_to_string(&manifest_path)
        .map_err(|e| format!("cannot read {}: {}", manifest_path.display(), e))?;
    let manifest: Manifest = serde_json::from_str(&manifest_text)
        .map_err(|e| format!("bad manifest {}: {}", manifest_path.display(), e))?;

    let mut builder = FixtureBuilder::new(cfg.clone());
    for ac in &manifest.acs {
        let rows_path = dir.join(&ac.path).join("rows.json");
        let rows_text = fs::read_to_string(&rows_path)
            .map_err(|e| format!("cannot read {}: {}", rows_path.display(), e))?;
        let rows: Vec<ScoreRow> = serde_json::from_str(&rows_text)
            .map_err(|e| format!("bad rows file {}: {}", rows_path.display(), e))?;
        for row in rows {
            builder.add_row(AcId(ac.ac_no), row);
        }
    }
    let (index, rows) = builder.finish();
    Ok(Fixture {
        manifest,
        index,
        rows,
    })
}
