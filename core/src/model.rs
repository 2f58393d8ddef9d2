use std::cmp::Ordering;

use crate::analyze::Symbols;
use crate::cancel::CancelToken;
use crate::token::{SyntaxError, Token, TokenKind};

const UNNAMED: &str = "not parsed";

/// Immutable result of parsing one version of a document.
///
/// Holds the gapless token list together with the symbols derived from it.
/// A new text version always produces a new `Model`.
#[derive(Debug, Clone)]
pub struct Model {
    uri: String,
    tokens: Vec<Token>,
    variables: Vec<Token>,
    labels: Vec<Token>,
    errors: Vec<SyntaxError>,
    cancel_token: CancelToken,
}

impl Model {
    pub fn builder(uri: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(uri)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Assignment and PARSE targets, unique and sorted ignoring case.
    pub fn variables(&self) -> &[Token] {
        &self.variables
    }

    /// Label definitions, unique and sorted ignoring case.
    pub fn labels(&self) -> &[Token] {
        &self.labels
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Token of the analysis that produced this model. Set once the text changes.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel_token
    }

    /// The source text, rebuilt from the tokens.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Last path segment of the document URI.
    pub fn file_name(&self) -> &str {
        let path = self.uri.strip_prefix("file://").unwrap_or(&self.uri);
        match path.rsplit(['/', '\\']).next() {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED,
        }
    }

    /// Index of the token covering (`line`, `column`).
    ///
    /// Falls back to the last token when nothing covers the position, and
    /// returns `None` only when the document is empty.
    pub fn locate_token(&self, line: u32, column: u32) -> Option<usize> {
        let last = self.tokens.len().checked_sub(1)?;
        let probe = Token::synthetic(line, column);
        let found = self.tokens.binary_search_by(|token| compare_position(token, &probe));
        Some(found.unwrap_or(last))
    }

    /// Token a completion at (`line`, `column`) should extend.
    ///
    /// Comments and strings are returned as located. Otherwise the lookup
    /// steps back one token, unless the located token is the last one and
    /// is not whitespace.
    pub fn locate_prev_token(&self, line: u32, column: u32) -> Option<usize> {
        let index = self.locate_token(line, column)?;
        let token = &self.tokens[index];
        if token.kind.is_comment() || token.kind.is_string() {
            return Some(index);
        }
        let is_last = index + 1 == self.tokens.len();
        if is_last && token.kind != TokenKind::Whitespace {
            return Some(index);
        }
        Some(index.saturating_sub(1))
    }
}

// A token equals the probe when the probe falls inside it on the same line.
fn compare_position(token: &Token, probe: &Token) -> Ordering {
    if token.contains(probe.line, probe.column) {
        Ordering::Equal
    } else if token.line == probe.line {
        token.column.cmp(&probe.column)
    } else {
        token.line.cmp(&probe.line)
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    uri: String,
    tokens: Vec<Token>,
    symbols: Symbols,
    cancel_token: Option<CancelToken>,
}

impl ModelBuilder {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn cancel_token(mut self, cancel_token: CancelToken) -> Self {
        self.cancel_token = Some(cancel_token);
        self
    }

    pub fn build(self) -> Model {
        Model {
            uri: self.uri,
            tokens: self.tokens,
            variables: self.symbols.variables,
            labels: self.symbols.labels,
            errors: self.symbols.errors,
            cancel_token: self.cancel_token.unwrap_or_default(),
        }
    }
}

