//! Fuzz target for per-frame tag JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the tag JSON reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scenewalk::annotation::tagged_json::from_tag_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_tag_json_slice(data);
});
