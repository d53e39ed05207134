#![no_main]

use libfuzzer_sys::fuzz_target;
use typesig::{decode_all, TypeArena};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let arena = TypeArena::new();
        let descriptors: Vec<&str> = text.split('\n').collect();
        for id in decode_all(&arena, &descriptors).into_iter().flatten() {
            let _ = arena.to_sig_type(id);
        }
        let _ = arena.undefined();
    }
});
