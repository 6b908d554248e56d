#![no_main]
use libfuzzer_sys::fuzz_target;

use json_tree::{parse, tokenize, tokenize_reader};

fuzz_target!(|data: &[u8]| {
    // Raw bytes go through the reader path, which must reject bad UTF-8
    // with an error rather than a panic.
    if let Ok(tokens) = tokenize_reader(data) {
        let _ = parse(&tokens);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        let tokens = tokenize(s);
        let _ = parse(&tokens);
    }
});
