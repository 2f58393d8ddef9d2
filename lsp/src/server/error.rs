use std::fmt;

use rexx_core::Cancelled;
use tower_lsp::lsp_types::Url;

/// Why a document query produced no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The URI was never opened or has been closed.
    UnknownDocument(Url),
    /// The text changed while the analysis or query was running.
    Cancelled,
    /// The analysis task panicked or the worker pool went away.
    Worker(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::UnknownDocument(uri) => write!(f, "unknown document {}", uri),
            AnalysisError::Cancelled => f.write_str("analysis cancelled"),
            AnalysisError::Worker(msg) => write!(f, "analysis worker failed: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<Cancelled> for AnalysisError {
    fn from(_: Cancelled) -> Self {
        AnalysisError::Cancelled
    }
}
