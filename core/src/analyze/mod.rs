use std::collections::HashSet;

use crate::cancel::{CancelToken, Cancelled};
use crate::token::{ErrorKind, SyntaxError, Token, TokenKind};

/// Words that keep a PARSE statement open when they show up as keywords
/// and that are never template targets when they show up as identifiers.
const PARSE_SUBKEYWORDS: &[&str] = &["arg", "value", "source", "with"];

fn is_parse_subkeyword(word: &str) -> bool {
    PARSE_SUBKEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Everything the analyzer derives from one token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    pub variables: Vec<Token>,
    pub labels: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

/// Statement-aware scan over the significant tokens of a document.
///
/// Fed one (previous, current, next) window at a time. Tracks PARSE
/// templates, the DO/END block stack, assignment targets and labels.
#[derive(Debug, Default)]
pub struct SymbolAnalyzer {
    in_parse: bool,
    blocks: Vec<Token>,
    variables: Vec<Token>,
    variable_names: HashSet<String>,
    labels: Vec<Token>,
    label_names: HashSet<String>,
    errors: Vec<SyntaxError>,
}

impl SymbolAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record errors found upstream so all errors share one ordered list.
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = SyntaxError>) {
        self.errors.extend(errors);
    }

    pub fn handle(
        &mut self,
        prev: Option<&Token>,
        current: &Token,
        next: Option<&Token>,
        cancel: &CancelToken,
    ) -> Result<(), Cancelled> {
        match current.kind {
            TokenKind::Keyword => {
                cancel.check()?;
                self.on_keyword(current);
            }
            TokenKind::Identifier => {
                cancel.check()?;
                self.on_identifier(current, next);
            }
            TokenKind::Colon => {
                cancel.check()?;
                if let Some(label) = prev {
                    register(&mut self.labels, &mut self.label_names, label);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn on_keyword(&mut self, keyword: &Token) {
        let word = keyword.text.to_ascii_lowercase();
        if word == "parse" {
            self.in_parse = true;
        } else if self.in_parse && !is_parse_subkeyword(&word) {
            self.in_parse = false;
        }

        match word.as_str() {
            "do" => self.blocks.push(keyword.clone()),
            "end" => {
                if self.blocks.pop().is_none() {
                    self.errors.push(SyntaxError::new(ErrorKind::UnmatchedEnd, keyword.clone()));
                }
            }
            _ => {}
        }
    }

    fn on_identifier(&mut self, ident: &Token, next: Option<&Token>) {
        let assigned = next.is_some_and(|t| t.kind == TokenKind::Eq);
        let template_target = self.in_parse && !is_parse_subkeyword(&ident.text);
        if assigned || template_target {
            register(&mut self.variables, &mut self.variable_names, ident);
        }
    }

    /// Close open blocks and sort the symbol lists.
    pub fn finish(mut self, cancel: &CancelToken) -> Result<Symbols, Cancelled> {
        for open in self.blocks.drain(..) {
            self.errors.push(SyntaxError::new(ErrorKind::UnmatchedDo, open));
        }
        Ok(Symbols {
            variables: sorted_case_insensitive(self.variables, cancel)?,
            labels: sorted_case_insensitive(self.labels, cancel)?,
            errors: self.errors,
        })
    }
}

// First spelling wins.
fn register(into: &mut Vec<Token>, seen: &mut HashSet<String>, token: &Token) {
    if seen.insert(token.text.to_lowercase()) {
        into.push(token.clone());
    }
}

fn sorted_case_insensitive(tokens: Vec<Token>, cancel: &CancelToken) -> Result<Vec<Token>, Cancelled> {
    let mut keyed = Vec::with_capacity(tokens.len());
    for token in tokens {
        cancel.check()?;
        keyed.push((token.text.to_lowercase(), token));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, token)| token).collect())
}
