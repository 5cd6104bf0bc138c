// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the khoj command-line interface.

pub mod fixture;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "khoj",
    about = "Fuzzy Devanagari name search over roll fixtures",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a fixture directory and run a query against it
    Search {
        /// Fixture directory (holds manifest.json and per-AC row files)
        fixture: String,
        /// The query, Devanagari or romanized-as-typed
        query: String,
        /// Which name field(s) to score
        #[arg(long, default_value = "anywhere")]
        scope: String,
        /// Suppress the loose index and the fuzzy families
        #[arg(long)]
        exact_only: bool,
        /// Keep only the best N hits
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Restrict to specific ACs (repeatable); default is every AC in
        /// the manifest
        #[arg(long = "ac")]
        acs: Vec<u32>,
        /// Emit the response as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show what a fixture directory contains
    Inspect {
        /// Fixture directory
        fixture: String,
    },
}
