//! Fuzz target for dataset response decoding.

#![no_main]

use datashare_blob::model::DataSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = serde_json::from_slice::<DataSet>(data);
});
