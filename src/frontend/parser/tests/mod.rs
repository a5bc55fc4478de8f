//! Parser 单元测试
//!
//! 测试语法分析、引用解析与简化


use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::{Builtin, Expr, Group, RawExpr};
use crate::frontend::parser::{
    parse_expr, parse_lib, read_expr, read_group, read_lib, resolve_group, ParseError,
};
use crate::util::config::Options;

fn raw() -> Options {
    Options::default().with_simplify(false)
}

fn names(chain: &[RawExpr]) -> Vec<String> {
    chain.iter().map(|expr| expr.to_string()).collect()
}

#[cfg(test)]
mod read_tests {
    use super::*;

    #[test]
    fn test_read_expr_empty() {
        let (group, pos) = read_expr(&[], 0).unwrap();
        assert_eq!(pos, 0);
        assert_eq!(group.branches, vec![Vec::<RawExpr>::new()]);
        assert!(group.name.is_none());
    }

    #[test]
    fn test_read_expr_branches() {
        let tokens = tokenize("a b | | c");
        let (group, pos) = read_expr(&tokens, 0).unwrap();
        assert_eq!(pos, tokens.len());
        assert_eq!(group.branches.len(), 3);
        assert_eq!(names(&group.branches[0]), vec!["a", "b"]);
        assert!(group.branches[1].is_empty());
        assert_eq!(names(&group.branches[2]), vec!["c"]);
    }

    #[test]
    fn test_read_expr_stops_at_close() {
        let tokens = tokenize("a } b");
        let (group, pos) = read_expr(&tokens, 0).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(names(&group.branches[0]), vec!["a"]);
    }

    #[test]
    fn test_read_expr_nested_group() {
        let tokens = tokenize("a { b | c } d");
        let (group, _) = read_expr(&tokens, 0).unwrap();
        let chain = &group.branches[0];
        assert_eq!(chain.len(), 3);
        match &chain[1] {
            RawExpr::Group(inner) => assert_eq!(inner.branches.len(), 2),
            other => panic!("Expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_read_group_requires_open() {
        let tokens = tokenize("a }");
        let err = read_group(&tokens, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                line: 1,
                token: "a".to_string(),
                expected: Some('{'),
            }
        );
    }

    #[test]
    fn test_read_group_unclosed() {
        let tokens = tokenize("{\n+ +");
        let err = read_group(&tokens, 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEof {
                line: Some(1),
                after: Some("{".to_string()),
                expected: '}',
            }
        );
    }

    #[test]
    fn test_read_group_past_end() {
        let tokens = tokenize("main");
        let err = read_group(&tokens, 1).unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert_eq!(
            err.to_string(),
            "Parser error in line 1: Unexpected end of file after 'main'. Expected a '{'."
        );

        let err = read_group(&[], 0).unwrap_err();
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "Parser error: Unexpected end of file. Expected a '{'.");
    }

    #[test]
    fn test_read_lib() {
        let tokens = tokenize("inc { + }\ndec { - }");
        let (definitions, pos) = read_lib(&tokens, 0, &()).unwrap();
        assert_eq!(pos, tokens.len());
        assert_eq!(definitions.keys().collect::<Vec<_>>(), vec!["inc", "dec"]);
        assert_eq!(definitions["dec"].name.as_deref(), Some("dec"));
    }

    #[test]
    fn test_read_lib_rejects_non_name() {
        let tokens = tokenize("{ + }");
        let err = read_lib(&tokens, 0, &()).unwrap_err();
        assert!(matches!(err, ParseError::ExpectedDefinition { line: 1, .. }));
    }

    #[test]
    fn test_read_lib_rejects_builtin_name() {
        let tokens = tokenize("ok { }\n! { + }");
        let err = read_lib(&tokens, 0, &()).unwrap_err();
        assert_eq!(
            err,
            ParseError::BuiltinRedefinition {
                line: 2,
                name: "!".to_string(),
            }
        );
    }

    #[test]
    fn test_read_lib_rejects_duplicate() {
        let tokens = tokenize("f { + }\n\nf { - }");
        let err = read_lib(&tokens, 0, &()).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateDefinition {
                line: 3,
                name: "f".to_string(),
            }
        );
    }
}

#[cfg(test)]
mod resolve_tests {
    use super::*;

    #[test]
    fn test_builtins_resolve() {
        let (group, _) = read_expr(&tokenize("+ - ! @"), 0).unwrap();
        let group = resolve_group(group, None).unwrap();
        let expected: Vec<Expr> = Builtin::ALL.iter().copied().map(Expr::from).collect();
        assert_eq!(group.branches, vec![expected]);
    }

    #[test]
    fn test_unchecked_names_become_references() {
        let (group, _) = read_expr(&tokenize("anything { else }"), 0).unwrap();
        let group = resolve_group(group, None).unwrap();
        assert_eq!(group.branches[0][0], Expr::function("anything"));
        assert_eq!(
            group.branches[0][1],
            Expr::Group(Group::new(vec![vec![Expr::function("else")]]))
        );
    }

    #[test]
    fn test_undefined_reference_cites_line() {
        let err = parse_expr("+\n{ - foo }", Some(&()), &raw()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UndefinedReference {
                line: 2,
                name: "foo".to_string(),
            }
        );
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_parse_expr_trailing_close() {
        let err = parse_expr("+ } -", None, &Options::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                line: 1,
                token: "}".to_string(),
                expected: None,
            }
        );
    }

    #[test]
    fn test_parse_expr_without_simplify_keeps_group() {
        let expr = parse_expr("+", None, &raw()).unwrap();
        assert_eq!(
            expr,
            Expr::Group(Group::new(vec![vec![Expr::Builtin(Builtin::Increment)]]))
        );
    }

    #[test]
    fn test_parse_expr_simplified() {
        assert_eq!(
            parse_expr("+", None, &Options::default()).unwrap(),
            Expr::Builtin(Builtin::Increment)
        );
        assert_eq!(
            parse_expr("main", None, &Options::default()).unwrap(),
            Expr::function("main")
        );
    }

    #[test]
    fn test_parse_lib_forward_references() {
        let definitions = parse_lib("a { b }\nb { a | + }", &(), &Options::default()).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions["a"].branches, vec![vec![Expr::function("b")]]);
    }

    #[test]
    fn test_parse_lib_undefined_reference() {
        let err = parse_lib("main { foo }", &(), &Options::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UndefinedReference {
                line: 1,
                name: "foo".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_lib_keeps_groups_and_names() {
        let definitions = parse_lib("id { }\ninc { + }", &(), &Options::default()).unwrap();
        assert_eq!(definitions["id"], Group::new(vec![vec![]]).named("id"));
        assert_eq!(
            definitions["inc"],
            Group::new(vec![vec![Expr::Builtin(Builtin::Increment)]]).named("inc")
        );
    }

    #[test]
    fn test_render() {
        let expr = parse_expr("a { b | } | { c d | e }", None, &raw()).unwrap();
        assert_eq!(expr.to_string(), "{ a { b | } | { c d | e } }");
    }

    #[test]
    fn test_column_of() {
        let expr = parse_expr("ab c | | d", None, &raw()).unwrap();
        let group = expr.as_group().unwrap();
        let text = group.to_string();
        assert_eq!(&text[group.column_of(0, 1)..][..1], "c");
        assert_eq!(&text[group.column_of(2, 0)..][..1], "d");
    }
}
