#![no_main]

use cfgcheck::structure::{equivalent, expand_json, normalize_json};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Anything that decodes must be equivalent to itself and to its
        // normalized form; anything that does not must never match.
        if expand_json(text).is_ok() {
            assert!(equivalent(text, text));
            if let Ok(normalized) = normalize_json(text) {
                assert!(equivalent(text, &normalized));
            }
        } else {
            assert!(!equivalent(text, text));
        }
    }
});
