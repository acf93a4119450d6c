//! Append-only persistence sink for match logs
//!
//! One JSON document per completed run, appended as a single line together
//! with its creation timestamp. Runs are never rewritten or deleted.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use dilemma_engine::MatchRecord;

pub struct MatchStore {
    path: PathBuf,
}

#[derive(Serialize)]
struct StoredRun<'a> {
    created_at: String,
    matches: &'a [MatchRecord],
}

impl MatchStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one run's full match log
    pub fn append_run(&self, matches: &[MatchRecord]) -> Result<()> {
        let run = StoredRun {
            created_at: Utc::now().to_rfc3339(),
            matches,
        };
        let line = serde_json::to_string(&run).context("serializing match log")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening match store {}", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("appending to match store {}", self.path.display()))?;

        Ok(())
    }
}
