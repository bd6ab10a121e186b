#![no_main]

use cfgcheck::structure::{Decoder, YamlDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // We don't care about the result, just that it doesn't panic
        let _ = YamlDecoder::default().decode(text);
    }
});
