#![no_main]

use libfuzzer_sys::fuzz_target;
use recspl_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the classifier
        if let Ok(tokens) = lexer::lex(s) {
            // If classification succeeds, fuzz the parser; any tree it returns must be well formed
            if let Ok(tree) = parser::parse(&tokens) {
                assert!(tree.check_integrity().is_ok());
                assert_eq!(tree.leaf_nodes().count(), tokens.len());
            }
        }
    }
});
