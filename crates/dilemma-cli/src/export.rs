//! Result-file export sink
//!
//! Writes the ranked top-K list to a timestamped JSON file under the results
//! directory, creating the directory on first use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use dilemma_engine::RankedAgent;

/// Write the ranking to `<dir>/results-<YYYY-MM-DD>-<unix-millis>.json`
///
/// Returns the path written.
pub fn write_results(dir: &Path, ranking: &[RankedAgent]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating results directory {}", dir.display()))?;

    let now = Utc::now();
    let path = dir.join(format!(
        "results-{}-{}.json",
        now.format("%Y-%m-%d"),
        now.timestamp_millis()
    ));

    let body = serde_json::to_string_pretty(ranking).context("serializing ranking")?;
    fs::write(&path, body).with_context(|| format!("writing results file {}", path.display()))?;

    Ok(path)
}
