//! Fuzz target for Data Share ID parsing.
//!
//! Arbitrary strings must either parse or be rejected, never panic.

#![no_main]

use datashare_blob::ids::ShareId;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = ShareId::parse(input);
    }
});
