use std::time::Instant;

use tracing::debug;

use crate::analyze::SymbolAnalyzer;
use crate::cancel::{CancelToken, Cancelled};
use crate::model::Model;
use crate::token::{Lexer, SyntaxError, Token};

/// Stateless parser handle, for callers that want an object to pass around.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn parse(&self, uri: &str, text: &str) -> Model {
        parse(uri, text)
    }

    pub fn parse_with_cancel(&self, uri: &str, text: &str, cancel: &CancelToken) -> Result<Model, Cancelled> {
        parse_with_cancel(uri, text, cancel)
    }
}

/// Parse `text` to completion.
pub fn parse(uri: &str, text: &str) -> Model {
    // nobody else holds this token, so it is never set
    parse_with_cancel(uri, text, &CancelToken::new()).unwrap_or_else(|_| Model::builder(uri).build())
}

/// Parse `text`, checking `cancel` once per token and once per symbol.
///
/// Returns [`Cancelled`] instead of a partial model when the token is set.
pub fn parse_with_cancel(uri: &str, text: &str, cancel: &CancelToken) -> Result<Model, Cancelled> {
    debug!(uri = %uri, "parse");
    let started = Instant::now();

    let mut feed = Feed {
        lexer: Lexer::new(text),
        tokens: Vec::with_capacity(text.len() / 4),
        analyzer: SymbolAnalyzer::new(),
    };

    let mut prev: Option<Token> = None;
    let (mut current, lexed_errors) = feed.next_significant(cancel)?;
    feed.analyzer.extend_errors(lexed_errors);
    while let Some(token) = current {
        let (next, lexed_errors) = feed.next_significant(cancel)?;
        feed.analyzer.handle(prev.as_ref(), &token, next.as_ref(), cancel)?;
        // errors of the lookahead come after anything `token` raised
        feed.analyzer.extend_errors(lexed_errors);
        prev = Some(token);
        current = next;
    }

    let Feed { tokens, analyzer, .. } = feed;
    let symbols = analyzer.finish(cancel)?;
    debug!(
        uri = %uri,
        tokens = tokens.len(),
        variables = symbols.variables.len(),
        labels = symbols.labels.len(),
        errors = symbols.errors.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "parsing done"
    );

    Ok(Model::builder(uri)
        .tokens(tokens)
        .symbols(symbols)
        .cancel_token(cancel.clone())
        .build())
}

struct Feed {
    lexer: Lexer,
    tokens: Vec<Token>,
    analyzer: SymbolAnalyzer,
}

impl Feed {
    /// Record every token and hand back the next one the analyzer cares about,
    /// along with the lexer errors raised on the way to it.
    fn next_significant(
        &mut self,
        cancel: &CancelToken,
    ) -> Result<(Option<Token>, Vec<SyntaxError>), Cancelled> {
        let mut errors = Vec::new();
        while let Some(token) = self.lexer.next_token() {
            cancel.check()?;
            errors.append(&mut self.lexer.take_errors());
            let significant = !token.kind.is_trivia();
            self.tokens.push(token);
            if significant {
                return Ok((self.tokens.last().cloned(), errors));
            }
        }
        Ok((None, errors))
    }
}
