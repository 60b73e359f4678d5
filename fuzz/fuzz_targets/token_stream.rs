#![no_main]

use libfuzzer_sys::fuzz_target;
use recspl_syntax::lexer::xml::{read_token_stream, write_token_stream};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever reads back must survive a write/read cycle unchanged
        if let Ok(tokens) = read_token_stream(s) {
            assert_eq!(read_token_stream(&write_token_stream(&tokens)), Ok(tokens));
        }
    }
});
