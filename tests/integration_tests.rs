//! Integration tests for the RecSPL front end

use std::fs;
use std::path::Path;

use recspl::frontend::{lexer, parser};
use recspl::{FrontendError, SyntaxErrorKind, SyntaxTree};

/// Helper to run the full pipeline on a source file
fn compile_file(path: &Path) -> Result<SyntaxTree, String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    recspl::compile(&source).map_err(|e| e.to_string())
}

fn fixtures(dir: &str) -> Vec<std::path::PathBuf> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "spl").unwrap_or(false))
        .collect();
    paths.sort();
    paths
}

/// Test that all valid fixtures parse into well-formed trees
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("tests/fixtures/valid");
    assert!(!paths.is_empty(), "no valid fixtures found");

    for path in paths {
        let result = compile_file(&path);
        let tree = match result {
            Ok(tree) => tree,
            Err(e) => panic!("Expected {} to parse, got: {e}", path.display()),
        };
        tree.check_integrity()
            .unwrap_or_else(|e| panic!("{}: broken tree: {e}", path.display()));

        // The frontier of the tree is exactly the token stream.
        let source = fs::read_to_string(&path).unwrap();
        let lexemes: Vec<String> = lexer::lex(&source).unwrap().into_iter().map(|t| t.lexeme).collect();
        assert_eq!(tree.frontier(tree.root_id()), lexemes, "{}", path.display());
    }
}

/// Test that invalid fixtures produce errors
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("tests/fixtures/invalid");
    assert!(!paths.is_empty(), "no invalid fixtures found");

    for path in paths {
        let result = compile_file(&path);
        assert!(
            result.is_err(),
            "Expected {} to fail, but it parsed",
            path.display()
        );
    }
}

/// The four reference scenarios
mod scenarios {
    use super::*;

    #[test]
    fn scenario_a_minimal_program() {
        let tokens = lexer::lex("main begin skip ; end").unwrap();
        let tree = parser::parse(&tokens).unwrap();

        let root = tree.root();
        assert_eq!(root.symbol, "PROG");
        let symbols: Vec<&str> = root
            .children
            .iter()
            .map(|&id| tree.node(id).unwrap().symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["main", "GLOBVARS", "ALGO", "FUNCTIONS"]);

        let globvars = tree.node(root.children[1]).unwrap();
        let functions = tree.node(root.children[3]).unwrap();
        assert!(globvars.is_inner() && globvars.children.is_empty());
        assert!(functions.is_inner() && functions.children.is_empty());

        let algo = root.children[2];
        let algo_children: Vec<&str> = tree
            .children(algo)
            .iter()
            .map(|&id| tree.node(id).unwrap().symbol.as_str())
            .collect();
        assert_eq!(algo_children, vec!["begin", "INSTRUC", "end"]);

        let instruc = tree.children(algo)[1];
        let parts: Vec<&str> = tree
            .children(instruc)
            .iter()
            .map(|&id| tree.node(id).unwrap().symbol.as_str())
            .collect();
        assert_eq!(parts, vec!["COMMAND", ";", "INSTRUC"]);
        let command = tree.children(instruc)[0];
        assert_eq!(tree.frontier(command), vec!["skip"]);
        assert!(tree.children(tree.children(instruc)[2]).is_empty());
    }

    #[test]
    fn scenario_b_lexical_failure() {
        let err = recspl::compile("###").unwrap_err();
        match err {
            FrontendError::Lexical(e) => assert_eq!(e.word, "###"),
            other => panic!("expected a lexical error, got {other:?}"),
        }
        assert!(lexer::lex("main ### end").is_err());
    }

    #[test]
    fn scenario_c_missing_start_token() {
        let tokens = lexer::lex("begin skip ; end").unwrap();
        let err = parser::parse(&tokens).unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.position, 0);
        assert_eq!(err.lexeme(), Some("begin"));
    }

    #[test]
    fn scenario_d_trailing_garbage() {
        let tokens = lexer::lex("main begin skip ; end halt").unwrap();
        let err = parser::parse(&tokens).unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.kind, SyntaxErrorKind::TrailingInput);
        assert_eq!(err.position, 5);
        assert_eq!(err.lexeme(), Some("halt"));
    }

    #[test]
    fn scenario_d_leftovers_win_over_a_deeper_failure() {
        // The trailing function header gets far before failing; the error still points at its first token.
        let tokens = lexer::lex("main begin skip ; end num F_f ( V_a , V_b , V_c ) { begin end").unwrap();
        let err = parser::parse(&tokens).unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.kind, SyntaxErrorKind::TrailingInput);
        assert_eq!(err.position, 5);
        assert_eq!(err.lexeme(), Some("num"));
        assert!(err.help.as_deref().is_some_and(|h| h.contains("position 15")), "{:?}", err.help);
    }
}

/// Behavior that spans the classifier and the parser
mod pipeline_tests {
    use super::*;
    use recspl::first::FirstSets;
    use recspl::grammar::Grammar;
    use recspl::ParseConfig;

    #[test]
    fn test_json_token_stream_parses_like_source() {
        let source = fs::read_to_string("tests/fixtures/valid/globals_and_io.spl").unwrap();
        let tokens = lexer::lex(&source).unwrap();
        let json = serde_json::to_string(&tokens).unwrap();
        let reloaded: Vec<lexer::Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parser::parse(&reloaded).unwrap().shape(),
            parser::parse(&tokens).unwrap().shape()
        );
    }

    #[test]
    fn test_xml_token_stream_parses_like_source() {
        for path in fixtures("tests/fixtures/valid") {
            let source = fs::read_to_string(&path).unwrap();
            let tokens = lexer::lex(&source).unwrap();
            let xml = lexer::xml::write_token_stream(&tokens);
            let reloaded = lexer::xml::read_token_stream(&xml).unwrap();
            assert_eq!(
                parser::parse(&reloaded).unwrap(),
                parser::parse(&tokens).unwrap(),
                "{}",
                path.display()
            );
        }
    }

    #[test]
    fn test_long_flat_programs_parse() {
        let source = format!("main num V_n , begin {}end", "V_n = add ( V_n , 1 ) ; print V_n ; ".repeat(1000));
        let tree = recspl::compile(&source).unwrap();
        assert_eq!(tree.inner_nodes().filter(|n| n.symbol == "INSTRUC").count(), 2001);
    }

    #[test]
    fn test_tokens_without_spans_are_accepted() {
        let json = r#"[
            {"id": 1, "class": "Reserved", "lexeme": "main"},
            {"id": 2, "class": "Reserved", "lexeme": "begin"},
            {"id": 3, "class": "Reserved", "lexeme": "halt"},
            {"id": 4, "class": "Reserved", "lexeme": ";"},
            {"id": 5, "class": "Reserved", "lexeme": "end"}
        ]"#;
        let tokens: Vec<lexer::Token> = serde_json::from_str(json).unwrap();
        assert!(parser::parse(&tokens).is_ok());
    }

    #[test]
    fn test_alternate_grammar_text() {
        let text = "LIST ::= VNAME MORE\nMORE ::= , VNAME MORE\n     | ε\n";
        let grammar = Grammar::parse_text(text).unwrap();
        let firsts = FirstSets::compute(&grammar).unwrap();
        let tokens = lexer::lex("V_a , V_b , V_c").unwrap();
        let tree = parser::parse_with(&grammar, &firsts, &tokens, ParseConfig::default()).unwrap();
        assert_eq!(tree.root().symbol, "LIST");
        assert_eq!(tree.leaf_nodes().count(), 5);
    }

    #[test]
    fn test_start_symbol_override() {
        let tokens = lexer::lex("begin halt ; end").unwrap();
        let (grammar, firsts) = parser::recspl_tables();
        let tree = parser::parse_with(grammar, firsts, &tokens, ParseConfig::new().with_start_symbol("ALGO")).unwrap();
        assert_eq!(tree.root().symbol, "ALGO");
    }
}
