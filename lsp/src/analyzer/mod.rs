//! Query services over a parsed [`Model`](rexx_core::Model).
//!
//! Everything here is synchronous and side-effect free. Each service checks
//! the model's cancel token so a query against a superseded text stops early.

mod completions;
mod diagnostics;
mod symbols;

pub use completions::{COMPLETION_TRIGGER_CHARACTERS, CompletionMatching, complete};
pub use diagnostics::diagnostics;
pub use symbols::symbols;

pub use rexx_core::token::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Variable,
    Label,
    Function,
    Keyword,
}

impl CompletionKind {
    pub fn describe(self) -> &'static str {
        match self {
            CompletionKind::Variable => "Variable",
            CompletionKind::Label => "Label",
            CompletionKind::Function => "Function",
            CompletionKind::Keyword => "Keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    pub kind: CompletionKind,
    /// Text the insertion replaces; zero-width when nothing was typed yet.
    pub replace_range: Span,
    pub detail: String,
}

impl CompletionItem {
    pub(crate) fn new(kind: CompletionKind, text: &str, replace_range: Span) -> Self {
        Self {
            label: text.to_string(),
            insert_text: text.to_string(),
            kind,
            replace_range,
            detail: format!("{} {}", kind.describe(), text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    File,
    Method,
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Span,
    pub message: String,
    pub severity: Severity,
    /// Text of the offending token.
    pub source_text: String,
}
