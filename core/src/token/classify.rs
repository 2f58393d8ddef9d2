use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::TokenKind;

/// Instruction keywords, lowercase.
pub const KEYWORDS: &[&str] = &[
    "address",
    "arg",
    "by",
    "call",
    "do",
    "drop",
    "else",
    "end",
    "exit",
    "expose",
    "for",
    "forever",
    "if",
    "interpret",
    "iterate",
    "leave",
    "nop",
    "numeric",
    "options",
    "parse",
    "procedure",
    "pull",
    "push",
    "queue",
    "return",
    "say",
    "select",
    "signal",
    "then",
    "to",
    "trace",
    "upper",
    "when",
    "while",
];

/// Built-in functions (TSO/E flavour), lowercase.
pub const FUNCTIONS: &[&str] = &[
    "abbrev",
    "abs",
    "address",
    "arg",
    "b2x",
    "bitand",
    "bitor",
    "bitxor",
    "c2d",
    "c2x",
    "center",
    "centre",
    "compare",
    "condition",
    "copies",
    "d2c",
    "d2x",
    "datatype",
    "date",
    "dbcs",
    "delstr",
    "delword",
    "digits",
    "errortext",
    "externals",
    "find",
    "form",
    "format",
    "fuzz",
    "getmsg",
    "index",
    "insert",
    "justify",
    "lastpos",
    "left",
    "length",
    "linesize",
    "listdsi",
    "max",
    "min",
    "msg",
    "mvsvar",
    "outtrap",
    "overlay",
    "pos",
    "prompt",
    "queued",
    "random",
    "reverse",
    "right",
    "setlang",
    "sign",
    "sourceline",
    "space",
    "storage",
    "strip",
    "substr",
    "subword",
    "symbol",
    "syscpus",
    "sysdsn",
    "sysvar",
    "time",
    "trace",
    "translate",
    "trapmsg",
    "trunc",
    "userid",
    "value",
    "verify",
    "word",
    "wordindex",
    "wordlength",
    "wordpos",
    "words",
    "x2b",
    "x2c",
    "x2d",
    "xrange",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());
static FUNCTION_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FUNCTIONS.iter().copied().collect());

fn lookup(set: &HashSet<&'static str>, name: &str) -> bool {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        set.contains(name.to_ascii_lowercase().as_str())
    } else {
        set.contains(name)
    }
}

pub fn is_keyword(name: &str) -> bool {
    lookup(&KEYWORD_SET, name)
}

pub fn is_function(name: &str) -> bool {
    lookup(&FUNCTION_SET, name)
}

/// Classify an identifier-shaped word. Keywords win over functions.
pub fn classify(text: &str) -> TokenKind {
    if is_keyword(text) {
        TokenKind::Keyword
    } else if is_function(text) {
        TokenKind::Function
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_lowercase_and_unique() {
        for table in [KEYWORDS, FUNCTIONS] {
            let unique: HashSet<_> = table.iter().collect();
            assert_eq!(unique.len(), table.len());
            assert!(table.iter().all(|w| w.chars().all(|c| !c.is_ascii_uppercase())));
        }
        assert_eq!(KEYWORDS.len(), 34);
        assert_eq!(FUNCTIONS.len(), 79);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("ADDRESS"), TokenKind::Keyword);
        assert_eq!(classify("Say"), TokenKind::Keyword);
        assert_eq!(classify("SubWord"), TokenKind::Function);
        assert_eq!(classify("identifier"), TokenKind::Identifier);
    }

    #[test]
    fn test_keyword_wins_over_function() {
        for name in ["address", "arg", "trace"] {
            assert!(is_function(name));
            assert_eq!(classify(name), TokenKind::Keyword);
        }
        assert_eq!(classify("value"), TokenKind::Function);
    }
}
