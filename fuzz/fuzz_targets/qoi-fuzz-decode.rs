#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

// Arbitrary bytes are not a valid qoi stream most of the time; this target
// only checks that the decoder never panics, regardless of input.
fuzz_target!(|data: &[u8]| {
    let _ = qoi::qoi_decode(Cursor::new(data), None);
});
