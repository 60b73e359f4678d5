#[cfg(test)]
/// Parser unit tests.
///
/// These cover the engine's bookkeeping (ids, commit order, cursor restoration) and its failure
/// reporting. Whole-program behavior is covered by the integration tests.
mod tests {
    use super::*;
    use crate::lexer;

    fn tokens(source: &str) -> Vec<Token> {
        lexer::lex(source).unwrap()
    }

    fn syntax_err(err: ParseError) -> SyntaxError {
        match err {
            ParseError::Syntax(e) => e,
            ParseError::Grammar(e) => panic!("expected a syntax error, got {e}"),
        }
    }

    fn ids(v: &[u32]) -> Vec<NodeId> {
        v.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_minimal_program_ids_and_collections() {
        let tree = parse(&tokens("main begin skip ; end")).unwrap();

        assert_eq!(tree.root_id(), NodeId(1));
        assert_eq!(tree.len(), 12);
        assert_eq!(tree.children(NodeId(1)), ids(&[2, 3, 4, 12]).as_slice());
        assert_eq!(tree.children(NodeId(4)), ids(&[5, 6, 11]).as_slice());
        assert_eq!(tree.children(NodeId(6)), ids(&[7, 9, 10]).as_slice());
        assert_eq!(tree.children(NodeId(7)), ids(&[8]).as_slice());

        let inner: Vec<NodeId> = tree.inner_nodes().map(|n| n.id).collect();
        assert_eq!(inner, ids(&[3, 7, 10, 6, 4, 12]));
        let leaves: Vec<NodeId> = tree.leaf_nodes().map(|n| n.id).collect();
        assert_eq!(leaves, ids(&[2, 5, 8, 9, 11]));

        for (id, symbol) in [(3, "GLOBVARS"), (10, "INSTRUC"), (12, "FUNCTIONS")] {
            let node = tree.node(NodeId(id)).unwrap();
            assert_eq!(node.symbol, symbol);
            assert!(node.children.is_empty(), "{symbol} should be an epsilon node");
        }
        assert!(tree.check_integrity().is_ok());
    }

    #[test]
    fn test_abandoned_alternatives_restore_cursor_and_arena() {
        let grammar = Grammar::recspl();
        let firsts = FirstSets::compute(&grammar).unwrap();
        let toks = tokens("V_x < 5");
        let mut parser = Parser::new(&grammar, &firsts, &toks, ParseConfig::default());

        let result = parser.attempt(&Symbol::Nonterminal("ASSIGN".into()), None).unwrap();
        assert_eq!(result, None);
        assert_eq!(parser.pos, 0);
        assert!(parser.builder.nodes.is_empty());
        assert!(parser.builder.commits.is_empty());
        // `V_x < input` got as far as the `5` before failing.
        assert_eq!(parser.furthest.pos, 2);
    }

    #[test]
    fn test_backtracked_ids_stay_dense() {
        let grammar = Grammar::recspl();
        let firsts = FirstSets::compute(&grammar).unwrap();
        let config = ParseConfig::new().with_start_symbol("ASSIGN");
        let tree = parse_with(&grammar, &firsts, &tokens("V_x = 5"), config).unwrap();

        // ASSIGN, V_x, =, TERM, ATOMIC, 5: the abandoned `V_x < input` attempt left no gaps.
        assert_eq!(tree.len(), 6);
        let max = tree.leaf_nodes().chain(tree.inner_nodes()).map(|n| n.id).max();
        assert_eq!(max, Some(NodeId(6)));
        assert_eq!(tree.frontier(tree.root_id()), vec!["V_x", "=", "5"]);
    }

    #[test]
    fn test_missing_start_token() {
        let err = syntax_err(parse(&tokens("begin skip ; end")).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
        assert_eq!(err.position, 0);
        assert_eq!(err.lexeme(), Some("begin"));
        assert_eq!(err.expected, vec!["main".to_string()]);
    }

    #[test]
    fn test_error_reports_furthest_position() {
        let err = syntax_err(parse(&tokens("main begin skip end")).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
        assert_eq!(err.position, 3);
        assert_eq!(err.lexeme(), Some("end"));
        assert_eq!(err.expected, vec![";".to_string()]);
    }

    #[test]
    fn test_unexpected_end() {
        let err = syntax_err(parse(&tokens("main begin skip ;")).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEnd);
        assert_eq!(err.position, 4);
        assert!(err.token.is_none());
        assert!(err.expected.contains(&"end".to_string()));
    }

    #[test]
    fn test_trailing_input_and_prefix_parse() {
        let toks = tokens("main begin skip ; end skip");
        let err = syntax_err(parse(&toks).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::TrailingInput);
        assert_eq!(err.position, 5);
        assert_eq!(err.lexeme(), Some("skip"));

        let (grammar, firsts) = recspl_tables();
        let config = ParseConfig::new().allow_trailing_input();
        let outcome = Parser::new(grammar, firsts, &toks, config).parse_prefix().unwrap();
        assert_eq!(outcome.consumed, 5);
        assert_eq!(outcome.tree.leaf_nodes().count(), 5);
    }

    #[test]
    fn test_trailing_input_reported_at_first_leftover_token() {
        // The function declaration fails inside LOCVARS, so FUNCTIONS falls back to epsilon and the
        // declaration is left over. The error points at the leftovers; the deeper failure is only help.
        let source = "main begin skip ; end num F_f ( V_a , V_b , V_c ) { num V_x , num V_y , begin skip ; end } end";
        let err = syntax_err(parse(&tokens(source)).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::TrailingInput);
        assert_eq!(err.position, 5);
        assert_eq!(err.lexeme(), Some("num"));
        assert!(err.expected.is_empty());
        assert_eq!(
            err.help.as_deref(),
            Some("a derivation continuing here failed at position 21 (`begin`); expected `num`, `text`")
        );
    }

    #[test]
    fn test_plain_trailing_input_has_no_help() {
        let err = syntax_err(parse(&tokens("main begin skip ; end skip")).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::TrailingInput);
        assert!(err.help.is_none());
    }

    #[test]
    fn test_depth_limit_is_fatal() {
        let (grammar, firsts) = recspl_tables();
        let config = ParseConfig::new().with_max_depth(3);
        let err = parse_with(grammar, firsts, &tokens("main begin skip ; end"), config).unwrap_err();
        assert_eq!(syntax_err(err).kind, SyntaxErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_long_statement_list_does_not_count_as_nesting() {
        let source = format!("main begin {}end", "skip ; ".repeat(2000));
        let toks = tokens(&source);
        let tree = parse(&toks).unwrap();
        assert_eq!(tree.leaf_nodes().count(), toks.len());
        assert!(tree.check_integrity().is_ok());

        // PROG > ALGO > INSTRUC > COMMAND is the deepest nesting here, whatever the list length.
        let (grammar, firsts) = recspl_tables();
        let config = ParseConfig::new().with_max_depth(4);
        let tree = parse_with(grammar, firsts, &toks, config).unwrap();
        assert_eq!(tree.inner_nodes().filter(|n| n.symbol == "INSTRUC").count(), 2001);
    }

    #[test]
    fn test_failed_list_tail_backtracks_into_the_enclosing_rule() {
        // S's first alternative ends in L, which needs a closing `end`; without it S falls back to `skip halt`.
        let grammar = Grammar::from_rules(&[
            ("S", &[&["skip", "L"], &["skip", "halt"]]),
            ("L", &[&["halt", "L"], &["end"]]),
        ])
        .unwrap();
        let firsts = FirstSets::compute(&grammar).unwrap();

        let tree = parse_with(&grammar, &firsts, &tokens("skip halt"), ParseConfig::default()).unwrap();
        assert_eq!(tree.frontier(tree.root_id()), vec!["skip", "halt"]);
        assert!(tree.inner_nodes().next().is_none());
        assert_eq!(tree.leaf_nodes().map(|n| n.id).collect::<Vec<_>>(), ids(&[2, 3]));

        let tree = parse_with(&grammar, &firsts, &tokens("skip halt halt end"), ParseConfig::default()).unwrap();
        // Inner nodes commit innermost first, as a nested derivation would.
        assert_eq!(tree.inner_nodes().map(|n| n.id).collect::<Vec<_>>(), ids(&[7, 5, 3]));
    }

    #[test]
    fn test_cycle_through_final_nonterminals_is_bounded() {
        let grammar = Grammar::from_rules(&[("S", &[&["A"]]), ("A", &[&["S"], &["skip"]])]).unwrap();
        let firsts = FirstSets::compute(&grammar).unwrap();
        let err = parse_with(&grammar, &firsts, &tokens("skip"), ParseConfig::default()).unwrap_err();
        assert_eq!(syntax_err(err).kind, SyntaxErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_unknown_start_symbol() {
        let (grammar, firsts) = recspl_tables();
        let config = ParseConfig::new().with_start_symbol("NOPE");
        let err = parse_with(grammar, firsts, &tokens("skip"), config).unwrap_err();
        assert_eq!(
            err,
            ParseError::Grammar(GrammarError::UnknownStartSymbol { name: "NOPE".into() })
        );
    }

    #[test]
    fn test_first_match_wins_without_global_backtracking() {
        // A's epsilon alternative is declared first, so `halt` is never tried.
        let grammar = Grammar::from_rules(&[("S", &[&["A", "skip"]]), ("A", &[&[], &["halt"]])]).unwrap();
        let firsts = FirstSets::compute(&grammar).unwrap();

        let tree = parse_with(&grammar, &firsts, &tokens("skip"), ParseConfig::default()).unwrap();
        assert_eq!(tree.frontier(tree.root_id()), vec!["skip"]);

        let err = parse_with(&grammar, &firsts, &tokens("halt skip"), ParseConfig::default()).unwrap_err();
        let err = syntax_err(err);
        assert_eq!(err.position, 0);
        assert_eq!(err.expected, vec!["skip".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        let err = syntax_err(parse(&[]).unwrap_err());
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEnd);
        assert_eq!(err.position, 0);
        assert_eq!(err.expected, vec!["main".to_string()]);
    }
}
