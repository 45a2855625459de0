//! Fetch error taxonomy.

use thiserror::Error;

/// Why a request to the statistics API did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never completed: connection refused, DNS, timeout.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with an `error` field or a non-success status.
    #[error("server error: {0}")]
    Server(String),

    /// The body was not the JSON shape we expected.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short label used in inline widget messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Server(_) => "server",
            Self::Decode(_) => "decode",
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
