use std::collections::HashSet;

use once_cell::sync::Lazy;
use rexx_core::token::{FUNCTIONS, KEYWORDS, Token};
use rexx_core::{Cancelled, Model};
use serde::Deserialize;

use super::{CompletionItem, CompletionKind, Position, Span};

/// `_`, `$`, `.` and every ASCII letter.
pub static COMPLETION_TRIGGER_CHARACTERS: Lazy<Vec<String>> = Lazy::new(|| {
    ['_', '$', '.']
        .into_iter()
        .chain('a'..='z')
        .chain('A'..='Z')
        .map(String::from)
        .collect()
});

/// How typed text is matched against candidate names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionMatching {
    /// Exact prefix; a candidate equal to the typed text is not offered.
    CaseSensitive,
    /// Prefix ignoring case; exact matches stay in the list.
    #[default]
    CaseInsensitive,
}

struct Matcher<'a> {
    prefix: &'a str,
    lower: String,
    mode: CompletionMatching,
}

impl<'a> Matcher<'a> {
    fn new(prefix: &'a str, mode: CompletionMatching) -> Self {
        Self {
            prefix,
            lower: prefix.to_lowercase(),
            mode,
        }
    }

    fn matches(&self, candidate: &str) -> bool {
        match self.mode {
            CompletionMatching::CaseSensitive => candidate.starts_with(self.prefix) && candidate != self.prefix,
            CompletionMatching::CaseInsensitive => candidate.to_lowercase().starts_with(&self.lower),
        }
    }
}

/// Completion items for `position`: variables, labels, functions, keywords.
pub fn complete(
    model: &Model,
    position: Position,
    matching: CompletionMatching,
) -> Result<Vec<CompletionItem>, Cancelled> {
    let cancel = model.cancel_token();
    let Some(anchor) = anchor_token(model, position) else {
        return Ok(Vec::new());
    };
    if anchor.kind.is_comment() {
        return Ok(Vec::new());
    }

    // After whitespace or `(` nothing has been typed yet.
    let open = anchor.kind.is_whitespace_like();
    let (prefix, range) = if open {
        ("", Span::single(position))
    } else {
        (anchor.text.as_str(), anchor.span())
    };
    let matcher = Matcher::new(prefix, matching);
    let prefix_len = prefix.chars().count();
    let mut items = Vec::new();

    let mut emitted = HashSet::new();
    for variable in model.variables() {
        cancel.check()?;
        if !open && !matcher.matches(&variable.text) {
            continue;
        }
        for name in stem_expansions(&variable.text, prefix_len) {
            if emitted.insert(name) {
                items.push(CompletionItem::new(CompletionKind::Variable, name, range));
            }
        }
    }

    for label in model.labels() {
        cancel.check()?;
        if open || matcher.matches(&label.text) {
            items.push(CompletionItem::new(CompletionKind::Label, &label.text, range));
        }
    }

    if !prefix.is_empty() {
        for (kind, table) in [(CompletionKind::Function, FUNCTIONS), (CompletionKind::Keyword, KEYWORDS)] {
            for name in table {
                cancel.check()?;
                if matcher.matches(name) {
                    items.push(CompletionItem::new(kind, name, range));
                }
            }
        }
    }

    Ok(items)
}

fn anchor_token(model: &Model, position: Position) -> Option<&Token> {
    let mut index = model.locate_prev_token(position.line, position.column)?;
    let token = model.token(index)?;
    if token.kind.is_whitespace_like() && token.start() == position {
        index = index.saturating_sub(1);
    }
    model.token(index)
}

/// `stem.1.name` offers `stem.`, `stem.1.` and `stem.1.name`, keeping only
/// the ones longer than what was typed.
fn stem_expansions(name: &str, prefix_len: usize) -> Vec<&str> {
    let mut parts: Vec<&str> = name
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .map(|(i, _)| &name[..=i])
        .collect();
    if !name.ends_with('.') {
        parts.push(name);
    }
    parts.retain(|part| part.chars().count() > prefix_len);
    parts
}
