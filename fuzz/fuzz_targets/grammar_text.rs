#![no_main]

use libfuzzer_sys::fuzz_target;
use recspl_syntax::{FirstSets, Grammar};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any grammar that loads must reach a FIRST-set fixed point
        if let Ok(grammar) = Grammar::parse_text(s) {
            assert!(FirstSets::compute(&grammar).is_ok());
        }
    }
});
