// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Khoj CLI: load a roll fixture and search it.
//!
//! ```bash
//! # Run a query against a fixture directory
//! khoj search ./fixtures/s27 "राम कुमार" --scope voter --limit 10
//!
//! # Exact scenarios only (no fuzzy families, no loose index)
//! khoj search ./fixtures/s27 "राम" --exact-only
//!
//! # Show what a fixture contains
//! khoj inspect ./fixtures/s27
//! ```

use std::path::Path;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use khoj::{
    CancelToken, Phase, Scope, SearchConfig, SearchEngine, SearchRequest,
};

mod cli;
use cli::fixture;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    match args.command {
        Commands::Search {
            fixture,
            query,
            scope,
            exact_only,
            limit,
            acs,
            json,
        } => {
            if let Err(e) = run_search(&fixture, &query, &scope, exact_only, limit, &acs, json) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Inspect { fixture } => {
            if let Err(e) = run_inspect(&fixture) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_scope(scope: &str) -> Result<Scope, String> {
    match scope {
        "voter" => Ok(Scope::Voter),
        "relative" => Ok(Scope::Relative),
        "anywhere" => Ok(Scope::Anywhere),
        other => Err(format!(
            "unknown scope '{}' (expected voter, relative, anywhere)",
            other
        )),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_search(
    fixture_dir: &str,
    query: &str,
    scope: &str,
    exact_only: bool,
    limit: usize,
    acs: &[u32],
    json: bool,
) -> Result<(), String> {
    let scope = parse_scope(scope)?;
    let cfg = SearchConfig::default();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading fixture...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let loaded = fixture::load(Path::new(fixture_dir), &cfg)?;
    let all_acs: Vec<u32> = loaded.manifest.acs.iter().map(|a| a.ac_no).collect();
    let request_acs: Vec<khoj::AcId> = if acs.is_empty() {
        all_acs.iter().copied().map(khoj::AcId).collect()
    } else {
        acs.iter().copied().map(khoj::AcId).collect()
    };
    pb.finish_with_message(format!(
        "Loaded {} ({} ACs)",
        loaded.manifest.state_code,
        all_acs.len()
    ));

    let engine = SearchEngine::with_config(loaded.index, loaded.rows, cfg);
    let req = SearchRequest {
        query: query.to_string(),
        scope,
        exact_only,
        acs: request_acs,
        limit: Some(limit),
    };

    let bar = ProgressBar::new(req.acs.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.cyan/blue} {pos}/{len} ACs  {msg}")
            .unwrap(),
    );
    let started = std::time::Instant::now();
    let res = engine
        .search_with_progress(&req, &CancelToken::new(), &|p| {
            if p.phase == Phase::Score {
                bar.set_position(p.done as u64);
                bar.set_message(format!("{} hits", p.candidates));
            }
        })
        .map_err(|e| e.to_string())?;
    bar.finish_and_clear();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&res).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    println!(
        "{} hit(s) in {:.1?}{}",
        res.hits.len(),
        started.elapsed(),
        if res.cancelled { " (cancelled)" } else { "" }
    );
    for (i, hit) in res.hits.iter().enumerate() {
        println!(
            "{:>3}. ac={:<3} serial={:<6} row={:<8} {:?}  {}",
            i + 1,
            hit.ac.0,
            hit.serial_no,
            hit.row_id.0,
            hit.field,
            hit.why
        );
    }
    for failure in &res.ac_failures {
        eprintln!("warning: ac {} failed: {}", failure.ac.0, failure.error);
    }
    Ok(())
}

fn run_inspect(fixture_dir: &str) -> Result<(), String> {
    let cfg = SearchConfig::default();
    let loaded = fixture::load(Path::new(fixture_dir), &cfg)?;
    println!("state: {}", loaded.manifest.state_code);
    println!("acs:   {}", loaded.manifest.acs.len());
    for ac in &loaded.manifest.acs {
        println!("  ac={:<3} rows={:<8} path={}", ac.ac_no, ac.row_count, ac.path);
    }
    Ok(())
}
