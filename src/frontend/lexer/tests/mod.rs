//! Lexer 单元测试
//!
//! 测试词法分析器的分词功能
use crate::frontend::lexer::{is_line_break, tokenize, Token, TokenKind};

#[cfg(test)]
mod lexer_basic_tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("   \t\n\r\n   ").is_empty());
    }

    #[test]
    fn test_structural_symbols() {
        let tokens = tokenize("{ | }");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenGroup,
                TokenKind::BranchSeparator,
                TokenKind::CloseGroup,
            ]
        );
    }

    #[test]
    fn test_builtins_are_names() {
        let tokens = tokenize("+ - ! @");
        assert_eq!(tokens.len(), 4);
        assert!(tokens.iter().all(|t| t.is(TokenKind::Name)));
        assert_eq!(tokens[2].text, "!");
    }

    #[test]
    fn test_symbols_need_whitespace() {
        // `{+}` is a single name, not three tokens
        let tokens = tokenize("{+} a|b");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new("{+}", 1));
        assert_eq!(tokens[1].text, "a|b");
        assert!(tokens[1].is(TokenKind::Name));
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("main {\n  + +\n\n}\n");
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 2, 2, 4]);
    }
}

#[cfg(test)]
mod lexer_comment_tests {
    use super::*;

    #[test]
    fn test_full_line_comment() {
        let tokens = tokenize("# nothing here { }\nmain");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "main");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_trailing_comment() {
        let tokens = tokenize("a { + } # increments\nb { - }");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "{", "+", "}", "b", "{", "-", "}"]);
    }

    #[test]
    fn test_comment_inside_word() {
        let tokens = tokenize("foo#bar baz");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "foo");
    }
}

#[cfg(test)]
mod lexer_line_break_tests {
    use super::*;

    #[test]
    fn test_lone_carriage_return_ends_comment() {
        let tokens = tokenize("main { + } # note\rhelper { - }");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["main", "{", "+", "}", "helper", "{", "-", "}"]);
        assert_eq!(tokens[4].line, 2);
    }

    #[test]
    fn test_form_feed_and_vertical_tab_are_breaks() {
        let tokens = tokenize("a # x\x0cb # y\x0bc");
        let lines: Vec<_> = tokens.iter().map(|t| (t.text.as_str(), t.line)).collect();
        assert_eq!(lines, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_crlf_is_one_break() {
        let tokens = tokenize("a\r\nb\r\rc");
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn test_unicode_breaks() {
        let tokens = tokenize("a\u{85}b\u{2028}c\u{2029}d\x1ce\x1df\x1eg");
        let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_unit_separator_splits_words() {
        let tokens = tokenize("a\x1fb");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::new("b", 1));
    }

    #[test]
    fn test_library_across_carriage_returns() {
        let options = crate::util::config::Options::default();
        let library = crate::frontend::Library::load("main { + } # note\rhelper { - }", &options).unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["main", "helper"]);

        let err = crate::frontend::Library::load("a { + }\rb { c }", &options).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    /// QuickCheck: no token is empty or contains whitespace or a comment marker
    #[quickcheck]
    fn quickcheck_tokens_are_clean_words(source: String) -> bool {
        tokenize(&source).iter().all(|t| {
            !t.text.is_empty() && !t.text.contains(char::is_whitespace) && !t.text.contains('#')
        })
    }

    /// QuickCheck: comment-free single-line input yields one token per word
    #[quickcheck]
    fn quickcheck_word_count(source: String) -> TestResult {
        if source.contains('#') || source.contains(is_line_break) || source.contains('\x1f') {
            return TestResult::discard();
        }
        let expected = source.split_whitespace().count();
        TestResult::from_bool(tokenize(&source).len() == expected)
    }
}
