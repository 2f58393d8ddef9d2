//! Language services for REXX: an async document store and the completion,
//! outline and diagnostics queries answered from it.
//!
//! The transport is left to the embedder. Domain results convert to
//! `lsp_types` through [`protocol`].

pub mod analyzer;
pub mod protocol;
mod server;

pub use server::{
    AnalysisError, CONFIG_SECTION, DiagnosticsPublisher, DocumentStore, ServerConfig, init_tracing,
};
