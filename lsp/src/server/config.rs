use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::info;

use super::state::DocumentStore;
use crate::analyzer::CompletionMatching;

/// Client settings section read by [`DocumentStore::apply_settings`].
pub const CONFIG_SECTION: &str = "rexx.lsp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub completion_matching: CompletionMatching,
    /// Upper bound on analyses running at once.
    pub max_concurrent: usize,
    pub diagnostics_open_delay_ms: u64,
    pub diagnostics_change_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            completion_matching: CompletionMatching::CaseInsensitive,
            max_concurrent: 2,
            diagnostics_open_delay_ms: 150,
            diagnostics_change_delay_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RexxLspConfigSection {
    #[serde(default)]
    completion: CompletionConfig,
    #[serde(default)]
    performance: PerformanceConfig,
    #[serde(default)]
    diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompletionConfig {
    #[serde(default)]
    matching: Option<CompletionMatching>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PerformanceConfig {
    #[serde(default)]
    max_concurrent: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DiagnosticsConfig {
    #[serde(default)]
    open_delay_ms: Option<u64>,
    #[serde(default)]
    change_delay_ms: Option<u64>,
}

impl ServerConfig {
    /// Defaults overridden by the `rexx.lsp` settings value.
    pub fn from_settings(value: serde_json::Value) -> Result<Self> {
        let mut config = Self::default();
        config.merge(value)?;
        Ok(config)
    }

    fn merge(&mut self, value: serde_json::Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        let section: RexxLspConfigSection =
            serde_json::from_value(value).with_context(|| format!("invalid `{}` settings", CONFIG_SECTION))?;

        if let Some(matching) = section.completion.matching {
            self.completion_matching = matching;
        }
        if let Some(v) = section.performance.max_concurrent.filter(|v| *v > 0) {
            self.max_concurrent = v;
        }
        if let Some(v) = section.diagnostics.open_delay_ms {
            self.diagnostics_open_delay_ms = v;
        }
        if let Some(v) = section.diagnostics.change_delay_ms {
            self.diagnostics_change_delay_ms = v;
        }
        Ok(())
    }
}

impl DocumentStore {
    /// Apply a fresh settings value and resize the worker pool to match.
    pub fn apply_settings(&self, value: serde_json::Value) -> Result<()> {
        let mut updated = self.config();
        updated.merge(value)?;

        let permits = updated.max_concurrent.max(1);
        if let Ok(mut guard) = self.config.lock() {
            *guard = updated.clone();
        }
        if let Ok(mut sem_arc) = self.compute_limiter.lock() {
            *sem_arc = Arc::new(Semaphore::new(permits));
        }
        info!(
            matching = ?updated.completion_matching,
            max_concurrent = permits,
            "configuration reloaded"
        );
        Ok(())
    }
}
