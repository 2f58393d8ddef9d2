use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use futures::FutureExt;
use ropey::Rope;
use rexx_core::{CancelToken, Model, parse_with_cancel};
use tokio::sync::Semaphore;
use tokio::task;
use tokio::time::{Duration, sleep};
use tower_lsp::lsp_types::Url;
use tracing::{debug, warn};

use super::error::AnalysisError;
use super::state::{AnalysisHandle, Document, DocumentStore, ModelFuture};
use crate::analyzer::{
    CompletionItem, Diagnostic, Position, SymbolEntry, complete, diagnostics as model_diagnostics, symbols,
};

/// Receives diagnostics whenever a document's analysis settles.
///
/// An empty list clears earlier diagnostics for the URI. Called from tokio
/// tasks, so implementations must not block.
pub trait DiagnosticsPublisher: Send + Sync {
    fn publish(&self, uri: Url, version: Option<i32>, diagnostics: Vec<Diagnostic>);
}

/// Start analysing `content` on the blocking pool.
///
/// Cancelling the returned handle aborts a task still waiting for a worker
/// permit and makes a running parse return early.
fn spawn_analysis(uri: &Url, content: Rope, version: i32, limiter: Arc<Semaphore>) -> AnalysisHandle {
    let cancel = CancelToken::new();
    let task = tokio::spawn(run_analysis(uri.to_string(), content, version, limiter, cancel.clone()));
    let abort = task.abort_handle();
    let model: ModelFuture = async move {
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(AnalysisError::Cancelled),
            Err(e) => Err(AnalysisError::Worker(e.to_string())),
        }
    }
    .boxed()
    .shared();

    AnalysisHandle { cancel, abort, model }
}

async fn run_analysis(
    uri: String,
    content: Rope,
    version: i32,
    limiter: Arc<Semaphore>,
    cancel: CancelToken,
) -> Result<Arc<Model>, AnalysisError> {
    let _permit = limiter
        .acquire_owned()
        .await
        .map_err(|e| AnalysisError::Worker(e.to_string()))?;
    cancel.check()?;

    let started = Instant::now();
    let parse_uri = uri.clone();
    let parsed = task::spawn_blocking(move || {
        let text = content.to_string();
        parse_with_cancel(&parse_uri, &text, &cancel)
    })
    .await
    .map_err(|e| AnalysisError::Worker(e.to_string()))?;

    match parsed {
        Ok(model) => {
            debug!(uri = %uri, version, elapsed_ms = started.elapsed().as_millis() as u64, "analysis ready");
            Ok(Arc::new(model))
        }
        Err(cancelled) => {
            debug!(uri = %uri, version, "analysis cancelled");
            Err(cancelled.into())
        }
    }
}

impl Document {
    /// The pending or finished analysis of the current text, started on demand.
    pub(crate) fn ensure_analysis(&mut self, uri: &Url, limiter: &Arc<Semaphore>) -> &AnalysisHandle {
        let (content, version) = (self.content.clone(), self.version);
        self.analysis
            .get_or_insert_with(|| spawn_analysis(uri, content, version, limiter.clone()))
    }
}

async fn current_model(
    documents: &DashMap<Url, Document>,
    uri: &Url,
    limiter: &Arc<Semaphore>,
) -> Result<Arc<Model>, AnalysisError> {
    let future = {
        let mut doc = documents
            .get_mut(uri)
            .ok_or_else(|| AnalysisError::UnknownDocument(uri.clone()))?;
        doc.ensure_analysis(uri, limiter).model.clone()
    };
    let model = future.await?;
    // the text may have changed while we waited
    model.cancel_token().check()?;
    Ok(model)
}

impl DocumentStore {
    /// Track a newly opened document and start analysing it right away.
    pub async fn open(&self, uri: Url, version: i32, text: &str) {
        let mut doc = Document::new(text, version);
        doc.ensure_analysis(&uri, &self.limiter());
        if let Some(mut previous) = self.documents.insert(uri.clone(), doc) {
            previous.invalidate();
        }
        debug!(uri = %uri, version, "document opened");

        let delay = self.config().diagnostics_open_delay_ms;
        self.schedule_diagnostics(uri, version, delay);
    }

    /// Replace the whole text. The next query triggers a fresh analysis.
    pub async fn change(&self, uri: &Url, version: i32, text: &str) {
        {
            let Some(mut doc) = self.documents.get_mut(uri) else {
                warn!(uri = %uri, version, "change for unknown document ignored");
                return;
            };
            doc.content = Rope::from_str(text);
            doc.version = version;
            doc.invalidate();
        }
        debug!(uri = %uri, version, "document changed");

        let delay = self.config().diagnostics_change_delay_ms;
        self.schedule_diagnostics(uri.clone(), version, delay);
    }

    /// Forget the document and clear its diagnostics.
    pub async fn close(&self, uri: &Url) {
        if let Some((_, mut doc)) = self.documents.remove(uri) {
            doc.invalidate();
            debug!(uri = %uri, "document closed");
        }
        if let Some(publisher) = &self.publisher {
            publisher.publish(uri.clone(), None, Vec::new());
        }
    }

    /// Model of the current text, waiting for the analysis if it is still running.
    pub async fn get_model(&self, uri: &Url) -> Result<Arc<Model>, AnalysisError> {
        current_model(&self.documents, uri, &self.limiter()).await
    }

    pub async fn completion(&self, uri: &Url, position: Position) -> Result<Vec<CompletionItem>, AnalysisError> {
        let model = self.get_model(uri).await?;
        let matching = self.config().completion_matching;
        Ok(complete(&model, position, matching)?)
    }

    pub async fn document_symbols(&self, uri: &Url) -> Result<Vec<SymbolEntry>, AnalysisError> {
        let model = self.get_model(uri).await?;
        Ok(symbols(&model)?)
    }

    pub async fn diagnostics(&self, uri: &Url) -> Result<Vec<Diagnostic>, AnalysisError> {
        let model = self.get_model(uri).await?;
        Ok(model_diagnostics(&model))
    }

    /// Publish diagnostics for `scheduled_version` once it has been stable for `delay_ms`.
    fn schedule_diagnostics(&self, uri: Url, scheduled_version: i32, delay_ms: u64) {
        let Some(publisher) = self.publisher.clone() else {
            return;
        };
        let documents = self.documents.clone();
        let limiter = self.limiter();

        tokio::spawn(async move {
            if delay_ms > 0 {
                sleep(Duration::from_millis(delay_ms)).await;
            }
            let current_version = || documents.get(&uri).map(|doc| doc.version);
            if current_version() != Some(scheduled_version) {
                return;
            }

            match current_model(&documents, &uri, &limiter).await {
                Ok(model) => {
                    if current_version() == Some(scheduled_version) {
                        publisher.publish(uri.clone(), Some(scheduled_version), model_diagnostics(&model));
                    }
                }
                Err(AnalysisError::Cancelled) | Err(AnalysisError::UnknownDocument(_)) => {
                    debug!(uri = %uri, version = scheduled_version, "diagnostics skipped for stale document");
                }
                Err(err) => warn!(uri = %uri, error = %err, "diagnostics failed"),
            }
        });
    }
}
