use rexx_core::{Cancelled, Model};

use super::{Span, SymbolEntry, SymbolKind};

/// Document outline: the file itself, then one entry per label.
pub fn symbols(model: &Model) -> Result<Vec<SymbolEntry>, Cancelled> {
    let cancel = model.cancel_token();
    let mut entries = Vec::with_capacity(model.labels().len() + 1);
    entries.push(SymbolEntry {
        name: model.file_name().to_string(),
        kind: SymbolKind::File,
        range: Span::default(),
    });
    for label in model.labels() {
        cancel.check()?;
        entries.push(SymbolEntry {
            name: label.text.clone(),
            kind: SymbolKind::Method,
            range: label.span(),
        });
    }
    Ok(entries)
}
