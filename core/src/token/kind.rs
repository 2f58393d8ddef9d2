use std::fmt;

use super::{Position, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Zero-length probe used by position lookups; never produced by the lexer.
    Synthetic,
    Comment,         // /* ... */
    CommentUnclosed, // /* ... <eof>
    Whitespace,
    Comma,           // ,
    Colon,           // :
    Semicolon,       // ;
    LeftParen,       // (
    RightParen,      // )
    Dot,             // .
    Plus,            // +
    Minus,           // -
    Multi,           // *
    Divide,          // /
    DivideInteger,   // //
    DivideRemainder, // %
    Eq,              // =
    Ne,              // ^= <> >< \=
    Lt,              // <
    Le,              // <=
    Gt,              // >
    Ge,              // >=
    StrictEq,        // ==
    StrictNe,        // ^== \==
    StrictLt,        // <<
    StrictLe,        // <<=
    StrictGt,        // >>
    StrictGe,        // >>=
    And,             // &
    Or,              // ! |
    Not,             // ^ \
    Concat,          // !! ||
    SquoteString,
    SquoteStringUnclosed,
    DquoteString,
    DquoteStringUnclosed,
    Number,
    Identifier,
    Keyword,
    Function,
    /// Illegal character or stray `*/`, kept so the stream stays gapless.
    Invalid,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::CommentUnclosed)
    }

    pub fn is_string(self) -> bool {
        matches!(
            self,
            TokenKind::SquoteString
                | TokenKind::SquoteStringUnclosed
                | TokenKind::DquoteString
                | TokenKind::DquoteStringUnclosed
        )
    }

    /// Tokens after which completion offers every known symbol.
    pub fn is_whitespace_like(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::LeftParen)
    }

    /// Tokens the symbol analyzer never sees.
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace || self.is_comment()
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Synthetic => "SYNTHETIC",
            TokenKind::Comment => "COMMENT",
            TokenKind::CommentUnclosed => "COMMENT_UNCLOSED",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LeftParen => "LEFT_PARENTHESIS",
            TokenKind::RightParen => "RIGHT_PARENTHESIS",
            TokenKind::Dot => "DOT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multi => "MULTI",
            TokenKind::Divide => "DIVIDE",
            TokenKind::DivideInteger => "DIVIDE_INTEGER",
            TokenKind::DivideRemainder => "DIVIDE_REMAINDER",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::StrictEq => "STRICT_EQ",
            TokenKind::StrictNe => "STRICT_NE",
            TokenKind::StrictLt => "STRICT_LT",
            TokenKind::StrictLe => "STRICT_LE",
            TokenKind::StrictGt => "STRICT_GT",
            TokenKind::StrictGe => "STRICT_GE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Concat => "CONCAT",
            TokenKind::SquoteString => "SQUOTE_STRING",
            TokenKind::SquoteStringUnclosed => "SQUOTE_STRING_UNCLOSED",
            TokenKind::DquoteString => "DQUOTE_STRING",
            TokenKind::DquoteStringUnclosed => "DQUOTE_STRING_UNCLOSED",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Function => "FUNCTION",
            TokenKind::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A slice of source text. Offsets and columns count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub char_begin: usize,
    pub char_end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32, char_begin: usize) -> Self {
        let text = text.into();
        let char_end = char_begin + text.encode_utf16().count();
        Self {
            kind,
            text,
            line,
            column,
            char_begin,
            char_end,
        }
    }

    pub fn synthetic(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Synthetic, "", line, column, 0)
    }

    pub fn len(&self) -> usize {
        self.char_end - self.char_begin
    }

    pub fn is_empty(&self) -> bool {
        self.char_end == self.char_begin
    }

    pub fn start(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Position just past the token, following any line breaks inside it.
    pub fn end_position(&self) -> Position {
        let mut line = self.line;
        let mut column = self.column;
        let mut chars = self.text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' if chars.peek() == Some(&'\n') => {}
                '\r' | '\n' => {
                    line += 1;
                    column = 0;
                }
                _ => column += c.len_utf16() as u32,
            }
        }
        Position::new(line, column)
    }

    pub fn span(&self) -> Span {
        Span::new(self.start(), self.end_position())
    }

    /// Whether (`line`, `column`) lies inside this token on its first line.
    pub fn contains(&self, line: u32, column: u32) -> bool {
        self.line == line && self.column <= column && (column as usize) < self.column as usize + self.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.text.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t");
        write!(
            f,
            "Token({}:({}:{}):({}:{}):\"{}\")",
            self.kind, self.line, self.column, self.char_begin, self.char_end, escaped
        )
    }
}
