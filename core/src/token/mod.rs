mod classify;
mod error;
mod kind;
mod lexer;

pub use classify::{FUNCTIONS, KEYWORDS, classify, is_function, is_keyword};
pub use error::{ErrorKind, Position, Span, SyntaxError};
pub use kind::{Token, TokenKind};
pub use lexer::{Lexer, tokenize};

#[cfg(test)]
mod token_test;
