#![no_main]

use libfuzzer_sys::fuzz_target;
use olus::{ParseConfig, parse_with_config};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed input must still produce a tree
        for config in [ParseConfig::default(), ParseConfig::flat()] {
            let config = config.with_max_depth(64);
            if let Ok(parse) = parse_with_config(s, &config) {
                // Leaves are in source order and never overlap
                let mut end = 0;
                for token in parse.tree.tokens() {
                    assert!(token.span.start >= end);
                    end = token.span.end;
                }
                assert!(end <= s.len());
            }
        }
    }
});
