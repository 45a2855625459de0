//! Questions to the server-side assistant.
//!
//! Blank questions are refused before any request is made. Every question
//! that is sent is appended to the history log (see [`history`]).

pub mod history;

use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use crate::api::{FetchError, StatsSource};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Send `question` and return the answer HTML.
///
/// When `history_path` is set the exchange is recorded there, successful or
/// not. History writes never fail the question.
pub fn ask<S: StatsSource + ?Sized>(
    source: &S,
    question: &str,
    history_path: Option<&Path>,
) -> Result<String, AskError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::EmptyQuestion);
    }

    let started = Instant::now();
    let result = source.ask(question);
    let latency_ms = started.elapsed().as_millis() as u64;

    if let Some(path) = history_path {
        let entry = match &result {
            Ok(answer) => history::HistoryEntry::answered(question, answer, latency_ms),
            Err(error) => history::HistoryEntry::failed(question, error, latency_ms),
        };
        history::append(path, &entry);
    }

    Ok(result?)
}
