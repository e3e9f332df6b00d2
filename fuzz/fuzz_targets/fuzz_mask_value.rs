//! Fuzz target for structural masking.
//!
//! Any JSON document must mask without panicking, masking must be
//! idempotent, and copy and in-place masking must agree.

#![no_main]

use gw_redact::{Masker, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let masker = Masker::global();
    let once = masker.mask_copy(&value, &[]);
    assert_eq!(masker.mask_copy(&once, &[]), once);

    let mut owned = value;
    masker.mask_in_place(&mut owned, &[]);
    assert_eq!(owned, once);
});
