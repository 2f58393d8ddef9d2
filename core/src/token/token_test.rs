#[cfg(test)]
mod tests {
    use crate::token::{ErrorKind, Lexer, Position, Token, TokenKind, tokenize};

    fn significant(src: &str) -> Vec<Token> {
        let (tokens, _) = tokenize(src);
        tokens.into_iter().filter(|t| t.kind != TokenKind::Whitespace).collect()
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        significant(src).into_iter().map(|t| t.kind).collect()
    }

    fn joined(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn comment_then_crlf() {
        let (tokens, errors) = tokenize("/* comment */\r\n");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new(TokenKind::Comment, "/* comment */", 0, 0, 0));
        assert_eq!(tokens[0].char_end, 13);
        assert_eq!(tokens[1], Token::new(TokenKind::Whitespace, "\r\n", 0, 13, 13));
        assert_eq!(tokens[1].char_end, 15);
    }

    #[test]
    fn nested_comment_is_one_token() {
        let src = "/* outer /* inner */ outer */";
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, src);
    }

    #[test]
    fn multiline_comment_tracks_lines() {
        let (tokens, _) = tokenize("/* a\n b */\nx");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].end_position(), Position::new(1, 5));
        assert_eq!(tokens[1], Token::new(TokenKind::Whitespace, "\n", 1, 5, 10));
        assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "x", 2, 0, 11));
    }

    #[test]
    fn unclosed_comment_swallows_rest() {
        let (tokens, errors) = tokenize("say 1\n/* never closed\nsay 2\n");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::CommentUnclosed);
        assert_eq!(last.text, "/* never closed\nsay 2\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::UnclosedComment);
        assert_eq!(errors[0].token, *last);
    }

    #[test]
    fn stray_end_comment_is_its_own_token() {
        let (tokens, errors) = tokenize("a */ b");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Invalid,
                TokenKind::Whitespace,
                TokenKind::Identifier
            ]
        );
        assert_eq!(tokens[2].text, "*/");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::UnmatchedEndComment);
    }

    #[test]
    fn strings_keep_doubled_quotes() {
        let tokens = significant(r#"'--''--' "it's" 'say "hi"'"#);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::SquoteString);
        assert_eq!(tokens[0].text, "'--''--'");
        assert_eq!(tokens[1].kind, TokenKind::DquoteString);
        assert_eq!(tokens[2].kind, TokenKind::SquoteString);
        assert_eq!(tokens[2].text, "'say \"hi\"'");
    }

    #[test]
    fn unclosed_string_stops_at_line_end() {
        let (tokens, errors) = tokenize("x = 'abc\ny = \"string");
        let strings: Vec<_> = tokens.iter().filter(|t| t.kind.is_string()).collect();
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].kind, TokenKind::SquoteStringUnclosed);
        assert_eq!(strings[0].text, "'abc");
        assert_eq!(strings[1].kind, TokenKind::DquoteStringUnclosed);
        assert_eq!(strings[1].text, "\"string");
        assert_eq!(strings[1].line, 1);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::UnclosedString));
    }

    #[test]
    fn identifiers_and_stems() {
        let src = "myVar _my_variable_5 $global$ #misc §atsign @at stem.1.firstname stem.0 stem.";
        let tokens = significant(src);
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "myVar",
                "_my_variable_5",
                "$global$",
                "#misc",
                "§atsign",
                "@at",
                "stem.1.firstname",
                "stem.0",
                "stem."
            ]
        );
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn numbers() {
        let tokens = significant("12 3.5 .5 1e10 2E-3 3rd 7.");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["12", "3.5", ".5", "1e10", "2E-3", "3rd", "7."]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn punctuation_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds(",:;().!!"),
            vec![Comma, Colon, Semicolon, LeftParen, RightParen, Dot, Concat]
        );
        assert_eq!(
            kinds("+ - * // / %"),
            vec![Plus, Minus, Multi, DivideInteger, Divide, DivideRemainder]
        );
    }

    #[test]
    fn comparison_operators() {
        use TokenKind::*;
        assert_eq!(kinds("= ^= <> >< < <= > >="), vec![Eq, Ne, Ne, Ne, Lt, Le, Gt, Ge]);
        assert_eq!(
            kinds("== ^== << <<= >> >>="),
            vec![StrictEq, StrictNe, StrictLt, StrictLe, StrictGt, StrictGe]
        );
        assert_eq!(kinds("\\= \\== \\"), vec![Ne, StrictNe, Not]);
    }

    #[test]
    fn logical_operators() {
        use TokenKind::*;
        assert_eq!(kinds("& ! ^"), vec![And, Or, Not]);
        assert_eq!(kinds("| ||"), vec![Or, Concat]);
        assert_eq!(kinds("a||b"), vec![Identifier, Concat, Identifier]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let tokens = significant("/* rx */\nADDRESS TSO");
        assert_eq!(tokens[1], Token::new(TokenKind::Keyword, "ADDRESS", 1, 0, 9));
        assert_eq!(tokens[1].char_end, 16);
        assert_eq!(kinds("subword identifier"), vec![TokenKind::Function, TokenKind::Identifier]);
    }

    #[test]
    fn if_statement() {
        use TokenKind::*;
        assert_eq!(kinds("if a=15 then"), vec![Keyword, Identifier, Eq, Number, Keyword]);
    }

    #[test]
    fn illegal_character() {
        let (tokens, errors) = tokenize("x = {");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Invalid);
        assert_eq!(last.text, "{");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::IllegalChar);
    }

    #[test]
    fn errors_in_encounter_order() {
        let src = "x = {\n/* stray */ */\nsay \"open string\nsay 'open string\n/* comment without end\n";
        let (_, errors) = tokenize(src);
        let found: Vec<_> = errors.iter().map(|e| (e.kind, e.token.text.as_str())).collect();
        assert_eq!(found.len(), 5);
        assert_eq!(found[0], (ErrorKind::IllegalChar, "{"));
        assert_eq!(found[1], (ErrorKind::UnmatchedEndComment, "*/"));
        assert_eq!(found[2], (ErrorKind::UnclosedString, "\"open string"));
        assert_eq!(found[3], (ErrorKind::UnclosedString, "'open string"));
        assert_eq!(found[4].0, ErrorKind::UnclosedComment);
        assert!(found[4].1.starts_with("/* comment without end"));
    }

    #[test]
    fn offsets_count_utf16_units() {
        let (tokens, _) = tokenize("x = 'ü𝄞' y");
        let string = &tokens[4];
        assert_eq!(string.kind, TokenKind::SquoteString);
        assert_eq!((string.char_begin, string.char_end), (4, 9));
        let y = tokens.last().unwrap();
        assert_eq!((y.column, y.char_begin), (10, 10));
    }

    #[test]
    fn lone_cr_is_a_line_break() {
        let (tokens, _) = tokenize("a\rb\r\nc");
        let c = tokens.last().unwrap();
        assert_eq!((c.line, c.column), (2, 0));
    }

    #[test]
    fn tokens_reproduce_source() {
        let src = "/* REXX */\r\nparse arg a b\nsay 'x'||a /* c /* d */ */ */ {\n\"open\n";
        let (tokens, _) = tokenize(src);
        assert_eq!(joined(&tokens), src);
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].char_end, pair[1].char_begin);
        }
    }

    #[test]
    fn lexer_iterates_lazily() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.next_token().map(|t| t.text), Some("a".to_string()));
        assert_eq!(lexer.count(), 2);
    }

    #[test]
    fn token_display() {
        let token = Token::new(TokenKind::Whitespace, "\r\n", 0, 13, 13);
        assert_eq!(token.to_string(), "Token(WHITESPACE:(0:13):(13:15):\"\\r\\n\")");
    }
}
