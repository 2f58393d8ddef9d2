use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use futures::future::{BoxFuture, Shared};
use ropey::Rope;
use rexx_core::{CancelToken, Model};
use tokio::sync::Semaphore;
use tokio::task::AbortHandle;
use tower_lsp::lsp_types::Url;

use super::analysis::DiagnosticsPublisher;
use super::config::ServerConfig;
use super::error::AnalysisError;

pub(crate) type ModelFuture = Shared<BoxFuture<'static, Result<Arc<Model>, AnalysisError>>>;

/// One scheduled analysis of one document version.
#[derive(Clone)]
pub(crate) struct AnalysisHandle {
    pub(crate) cancel: CancelToken,
    pub(crate) abort: AbortHandle,
    pub(crate) model: ModelFuture,
}

impl AnalysisHandle {
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
        self.abort.abort();
    }
}

/// In-memory representation of an open REXX document.
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
    pub(crate) analysis: Option<AnalysisHandle>,
}

impl Document {
    pub(crate) fn new(text: &str, version: i32) -> Self {
        Self {
            content: Rope::from_str(text),
            version,
            analysis: None,
        }
    }

    /// Drop the current analysis and tell it to stop.
    pub(crate) fn invalidate(&mut self) {
        if let Some(handle) = self.analysis.take() {
            handle.cancel();
        }
    }
}

/// Open documents keyed by URI, plus the pool their analyses run on.
///
/// Every mutation goes through the map's entry guard, so a reader sees either
/// the old text with its analysis or the new text with none.
pub struct DocumentStore {
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) config: Mutex<ServerConfig>,
    pub(crate) compute_limiter: Mutex<Arc<Semaphore>>,
    pub(crate) publisher: Option<Arc<dyn DiagnosticsPublisher>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::with_config(ServerConfig::default())
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let permits = config.max_concurrent.max(1);
        Self {
            documents: Arc::new(DashMap::new()),
            config: Mutex::new(config),
            compute_limiter: Mutex::new(Arc::new(Semaphore::new(permits))),
            publisher: None,
        }
    }

    /// Push diagnostics to `publisher` after opens, edits and closes.
    pub fn with_publisher(mut self, publisher: Arc<dyn DiagnosticsPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn config(&self) -> ServerConfig {
        self.config.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    pub(crate) fn limiter(&self) -> Arc<Semaphore> {
        match self.compute_limiter.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Arc::new(Semaphore::new(1)),
        }
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn version(&self, uri: &Url) -> Option<i32> {
        self.documents.get(uri).map(|doc| doc.version)
    }

    pub fn text(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.content.to_string())
    }
}
