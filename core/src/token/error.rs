use std::fmt;

use super::Token;

/// Zero-based line/column pair. Columns count UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn single(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Recoverable problems found while scanning or analyzing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnmatchedEndComment,
    UnclosedComment,
    UnclosedString,
    IllegalChar,
    UnmatchedDo,
    UnmatchedEnd,
}

impl ErrorKind {
    /// User-facing diagnostic text.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UnmatchedEndComment => "Unmatched end-of-comment punctuation",
            ErrorKind::UnclosedComment => "Unclosed comment",
            ErrorKind::UnclosedString => "Unclosed string",
            ErrorKind::IllegalChar => "Illegal character",
            ErrorKind::UnmatchedDo => "Unmatched do keyword",
            ErrorKind::UnmatchedEnd => "Unmatched end keyword",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// An error anchored at the token that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub token: Token,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, token: Token) -> Self {
        Self { kind, token }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    pub fn span(&self) -> Span {
        self.token.span()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span())
    }
}

impl std::error::Error for SyntaxError {}
