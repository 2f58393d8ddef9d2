use rexx_core::Model;
use rexx_core::token::SyntaxError;

use super::{Diagnostic, Severity};

impl From<&SyntaxError> for Diagnostic {
    fn from(error: &SyntaxError) -> Self {
        Self {
            range: error.span(),
            message: error.message().to_string(),
            severity: Severity::Error,
            source_text: error.token.text.clone(),
        }
    }
}

/// One diagnostic per model error, in the same order.
pub fn diagnostics(model: &Model) -> Vec<Diagnostic> {
    model.errors().iter().map(Diagnostic::from).collect()
}
