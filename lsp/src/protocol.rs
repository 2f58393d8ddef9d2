//! Conversions from the domain results to `lsp_types` DTOs.
//!
//! Positions line up one to one: both sides count UTF-16 code units.

use tower_lsp::lsp_types as lsp;
use tower_lsp::lsp_types::Url;

use crate::analyzer::{
    COMPLETION_TRIGGER_CHARACTERS, CompletionItem, CompletionKind, Diagnostic, Position, Severity, Span,
    SymbolEntry, SymbolKind,
};
use crate::server::CONFIG_SECTION;

pub fn position(pos: lsp::Position) -> Position {
    Position::new(pos.line, pos.character)
}

pub fn lsp_position(pos: Position) -> lsp::Position {
    lsp::Position::new(pos.line, pos.column)
}

pub fn lsp_range(span: Span) -> lsp::Range {
    lsp::Range::new(lsp_position(span.start), lsp_position(span.end))
}

fn completion_kind(kind: CompletionKind) -> lsp::CompletionItemKind {
    match kind {
        CompletionKind::Variable => lsp::CompletionItemKind::VARIABLE,
        CompletionKind::Label => lsp::CompletionItemKind::METHOD,
        CompletionKind::Function => lsp::CompletionItemKind::FUNCTION,
        CompletionKind::Keyword => lsp::CompletionItemKind::KEYWORD,
    }
}

pub fn completion_item(item: &CompletionItem) -> lsp::CompletionItem {
    lsp::CompletionItem {
        label: item.label.clone(),
        kind: Some(completion_kind(item.kind)),
        detail: Some(item.detail.clone()),
        insert_text: Some(item.insert_text.clone()),
        text_edit: Some(lsp::CompletionTextEdit::Edit(lsp::TextEdit::new(
            lsp_range(item.replace_range),
            item.insert_text.clone(),
        ))),
        ..Default::default()
    }
}

/// Items depend on the typed prefix, so the client must ask again as it changes.
pub fn completion_list(items: &[CompletionItem]) -> lsp::CompletionResponse {
    lsp::CompletionResponse::List(lsp::CompletionList {
        is_incomplete: true,
        items: items.iter().map(completion_item).collect(),
    })
}

pub fn completion_options() -> lsp::CompletionOptions {
    lsp::CompletionOptions {
        trigger_characters: Some(COMPLETION_TRIGGER_CHARACTERS.clone()),
        ..Default::default()
    }
}

#[allow(deprecated)]
pub fn symbol_information(uri: &Url, entry: &SymbolEntry) -> lsp::SymbolInformation {
    let kind = match entry.kind {
        SymbolKind::File => lsp::SymbolKind::FILE,
        SymbolKind::Method => lsp::SymbolKind::METHOD,
    };
    lsp::SymbolInformation {
        name: entry.name.clone(),
        kind,
        tags: None,
        deprecated: None,
        location: lsp::Location::new(uri.clone(), lsp_range(entry.range)),
        container_name: None,
    }
}

pub fn document_symbols(uri: &Url, entries: &[SymbolEntry]) -> lsp::DocumentSymbolResponse {
    lsp::DocumentSymbolResponse::Flat(entries.iter().map(|e| symbol_information(uri, e)).collect())
}

pub fn diagnostic(diag: &Diagnostic) -> lsp::Diagnostic {
    let severity = match diag.severity {
        Severity::Error => lsp::DiagnosticSeverity::ERROR,
    };
    lsp::Diagnostic {
        range: lsp_range(diag.range),
        severity: Some(severity),
        source: Some(diag.source_text.clone()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

pub fn publish_diagnostics_params(
    uri: Url,
    version: Option<i32>,
    diagnostics: &[Diagnostic],
) -> lsp::PublishDiagnosticsParams {
    lsp::PublishDiagnosticsParams::new(uri, diagnostics.iter().map(diagnostic).collect(), version)
}

/// Request for the `rexx.lsp` settings section.
pub fn configuration_item() -> lsp::ConfigurationItem {
    lsp::ConfigurationItem {
        scope_uri: None,
        section: Some(CONFIG_SECTION.to_string()),
    }
}
