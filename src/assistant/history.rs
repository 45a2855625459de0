//! Question history: an append-only JSONL log of assistant questions.
//!
//! Default location: `~/.stockdash/ask-history.jsonl` (`logging.history_path`).
//! Writes are best-effort; reading skips malformed lines.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::view::html;

/// Longest answer excerpt kept per entry, in characters.
const EXCERPT_CHARS: usize = 200;

/// One line of the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    /// `"answered"` or `"failed"`.
    pub outcome: String,
    /// First characters of the plain-text answer.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub answer_excerpt: Option<String>,
    /// Error category (`network`, `server`, `decode`) for failed questions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_kind: Option<String>,
    pub latency_ms: u64,
}

impl HistoryEntry {
    pub fn answered(question: &str, answer_html: &str, latency_ms: u64) -> Self {
        let text = html::to_text(answer_html);
        Self {
            timestamp: Utc::now(),
            question: question.to_string(),
            outcome: "answered".to_string(),
            answer_excerpt: Some(text.chars().take(EXCERPT_CHARS).collect()),
            error_kind: None,
            latency_ms,
        }
    }

    pub fn failed(question: &str, error: &FetchError, latency_ms: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            question: question.to_string(),
            outcome: "failed".to_string(),
            answer_excerpt: None,
            error_kind: Some(error.kind().to_string()),
            latency_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Append `entry` to the log at `path`. Failures are logged and ignored.
pub fn append(path: &Path, entry: &HistoryEntry) {
    if let Err(e) = try_append(path, entry) {
        tracing::debug!(path = %path.display(), error = %e, "could not write question history");
    }
}

fn try_append(path: &Path, entry: &HistoryEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read every entry, oldest first. Missing file ⇒ empty.
pub fn read_all(path: &Path) -> Vec<HistoryEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<HistoryEntry>(&line).ok())
        .collect()
}

/// The `limit` most recent entries, newest first.
pub fn recent(path: &Path, limit: usize) -> Vec<HistoryEntry> {
    let mut entries = read_all(path);
    entries.reverse();
    entries.truncate(limit);
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
