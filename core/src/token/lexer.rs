use super::{ErrorKind, SyntaxError, Token, TokenKind, classify};

const ASCII_WHITESPACE: u8 = 1 << 0;
const ASCII_DIGIT: u8 = 1 << 1;
const ASCII_SYMBOL_START: u8 = 1 << 2;
const ASCII_SYMBOL_CONT: u8 = 1 << 3;

const fn build_ascii_class() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        if matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
            table[i] |= ASCII_WHITESPACE;
        }
        if c.is_ascii_digit() {
            table[i] |= ASCII_DIGIT | ASCII_SYMBOL_CONT;
        }
        if c.is_ascii_alphabetic() || matches!(c, b'_' | b'$' | b'#' | b'@') {
            table[i] |= ASCII_SYMBOL_START | ASCII_SYMBOL_CONT;
        }
        if c == b'.' {
            table[i] |= ASCII_SYMBOL_CONT;
        }
        i += 1;
    }
    table
}

const ASCII_CLASS: [u8; 128] = build_ascii_class();

#[inline]
fn is_space_char(c: char) -> bool {
    if c.is_ascii() {
        ASCII_CLASS[c as usize] & ASCII_WHITESPACE != 0
    } else {
        c.is_whitespace()
    }
}

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii() && ASCII_CLASS[c as usize] & ASCII_DIGIT != 0
}

#[inline]
fn is_symbol_start(c: char) -> bool {
    if c.is_ascii() {
        ASCII_CLASS[c as usize] & ASCII_SYMBOL_START != 0
    } else {
        c == '§' || c.is_alphabetic()
    }
}

#[inline]
fn is_symbol_continue(c: char) -> bool {
    if c.is_ascii() {
        ASCII_CLASS[c as usize] & ASCII_SYMBOL_CONT != 0
    } else {
        c == '§' || c.is_alphanumeric()
    }
}

/// Longest spellings first so matching is greedy.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("^==", TokenKind::StrictNe),
    ("\\==", TokenKind::StrictNe),
    ("<<=", TokenKind::StrictLe),
    (">>=", TokenKind::StrictGe),
    ("==", TokenKind::StrictEq),
    ("^=", TokenKind::Ne),
    ("\\=", TokenKind::Ne),
    ("<>", TokenKind::Ne),
    ("><", TokenKind::Ne),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("<<", TokenKind::StrictLt),
    (">>", TokenKind::StrictGt),
    ("//", TokenKind::DivideInteger),
    ("!!", TokenKind::Concat),
    ("||", TokenKind::Concat),
    ("=", TokenKind::Eq),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Multi),
    ("/", TokenKind::Divide),
    ("%", TokenKind::DivideRemainder),
    ("&", TokenKind::And),
    ("!", TokenKind::Or),
    ("|", TokenKind::Or),
    ("^", TokenKind::Not),
    ("\\", TokenKind::Not),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    (";", TokenKind::Semicolon),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    (".", TokenKind::Dot),
];

#[derive(Debug, Clone, Copy)]
struct Mark {
    idx: usize,
    line: u32,
    column: u32,
    offset: usize,
}

/// Single-pass REXX scanner.
///
/// Every character of the input ends up in exactly one token, so the
/// concatenated token texts always reproduce the source. Malformed input is
/// reported through [`Lexer::take_errors`] and never stops the scan.
pub struct Lexer {
    chars: Vec<char>,
    idx: usize,
    line: u32,
    column: u32,
    // UTF-16 offset of `idx`
    offset: usize,
    errors: Vec<SyntaxError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            idx: 0,
            line: 0,
            column: 0,
            offset: 0,
            errors: Vec::new(),
        }
    }

    /// Drain the errors collected so far.
    pub fn take_errors(&mut self) -> Vec<SyntaxError> {
        std::mem::take(&mut self.errors)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let c = self.peek(0)?;
        let start = self.mark();

        let kind = if is_space_char(c) {
            while self.peek(0).is_some_and(is_space_char) {
                self.advance_char();
            }
            TokenKind::Whitespace
        } else if c == '/' && self.peek(1) == Some('*') {
            return Some(self.scan_comment(start));
        } else if c == '*' && self.peek(1) == Some('/') {
            self.advance_n(2);
            return Some(self.emit_error(start, TokenKind::Invalid, ErrorKind::UnmatchedEndComment));
        } else if c == '\'' || c == '"' {
            return Some(self.scan_string(start, c));
        } else if is_digit(c) || (c == '.' && self.peek(1).is_some_and(is_digit)) {
            self.scan_number();
            TokenKind::Number
        } else if is_symbol_start(c) {
            while self.peek(0).is_some_and(is_symbol_continue) {
                self.advance_char();
            }
            classify(&self.text_from(&start))
        } else if let Some(kind) = self.scan_operator() {
            kind
        } else {
            self.advance_char();
            return Some(self.emit_error(start, TokenKind::Invalid, ErrorKind::IllegalChar));
        };

        Some(self.emit(start, kind))
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.idx + ahead).copied()
    }

    fn mark(&self) -> Mark {
        Mark {
            idx: self.idx,
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    fn advance_char(&mut self) {
        let Some(c) = self.peek(0) else {
            return;
        };
        match c {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            '\r' if self.peek(1) == Some('\n') => self.column += 1,
            '\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += c.len_utf16() as u32,
        }
        self.offset += c.len_utf16();
        self.idx += 1;
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance_char();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    fn text_from(&self, start: &Mark) -> String {
        self.chars[start.idx..self.idx].iter().collect()
    }

    fn emit(&self, start: Mark, kind: TokenKind) -> Token {
        Token {
            kind,
            text: self.text_from(&start),
            line: start.line,
            column: start.column,
            char_begin: start.offset,
            char_end: self.offset,
        }
    }

    fn emit_error(&mut self, start: Mark, kind: TokenKind, error: ErrorKind) -> Token {
        let token = self.emit(start, kind);
        self.errors.push(SyntaxError::new(error, token.clone()));
        token
    }

    /// Comments nest: `/* a /* b */ c */` is one token.
    fn scan_comment(&mut self, start: Mark) -> Token {
        self.advance_n(2);
        let mut depth = 1usize;
        while let Some(c) = self.peek(0) {
            if c == '/' && self.peek(1) == Some('*') {
                self.advance_n(2);
                depth += 1;
            } else if c == '*' && self.peek(1) == Some('/') {
                self.advance_n(2);
                depth -= 1;
                if depth == 0 {
                    return self.emit(start, TokenKind::Comment);
                }
            } else {
                self.advance_char();
            }
        }
        self.emit_error(start, TokenKind::CommentUnclosed, ErrorKind::UnclosedComment)
    }

    /// A doubled quote inside the literal is an escaped quote. Strings never span lines.
    fn scan_string(&mut self, start: Mark, quote: char) -> Token {
        let (closed, unclosed) = if quote == '\'' {
            (TokenKind::SquoteString, TokenKind::SquoteStringUnclosed)
        } else {
            (TokenKind::DquoteString, TokenKind::DquoteStringUnclosed)
        };

        self.advance_char();
        loop {
            match self.peek(0) {
                None | Some('\r' | '\n') => {
                    return self.emit_error(start, unclosed, ErrorKind::UnclosedString);
                }
                Some(c) if c == quote => {
                    self.advance_char();
                    if self.peek(0) == Some(quote) {
                        self.advance_char();
                    } else {
                        return self.emit(start, closed);
                    }
                }
                Some(_) => self.advance_char(),
            }
        }
    }

    fn scan_number(&mut self) {
        while self.peek(0).is_some_and(is_digit) {
            self.advance_char();
        }
        if self.peek(0) == Some('.') {
            self.advance_char();
            while self.peek(0).is_some_and(is_digit) {
                self.advance_char();
            }
        }
        if matches!(self.peek(0), Some('e' | 'E')) {
            let signed = matches!(self.peek(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek(digit_at).is_some_and(is_digit) {
                self.advance_n(digit_at);
                while self.peek(0).is_some_and(is_digit) {
                    self.advance_char();
                }
            }
        }
        // constant symbols such as `3rd`
        while self.peek(0).is_some_and(|c| c != '.' && is_symbol_continue(c)) {
            self.advance_char();
        }
    }

    fn scan_operator(&mut self) -> Option<TokenKind> {
        let (spelling, kind) = OPERATORS.iter().find(|(spelling, _)| self.starts_with(spelling))?;
        self.advance_n(spelling.chars().count());
        Some(*kind)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Run the lexer to completion.
pub fn tokenize(input: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    let mut lexer = Lexer::new(input);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.take_errors())
}
