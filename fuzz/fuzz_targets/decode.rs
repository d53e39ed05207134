#![no_main]

use libfuzzer_sys::fuzz_target;
use typesig::{decode, decode_sequence, decode_standalone, SigType};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let factory = SigType::factory();
        let _ = decode(&factory, text, 0);
        let _ = decode_standalone(&factory, text);
        let _ = decode_sequence(&factory, text);
    }
});
