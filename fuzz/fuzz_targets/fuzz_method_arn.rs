//! Fuzz target for method ARN parsing.

#![no_main]

use gw_common::MethodArn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(arn) = MethodArn::parse(text) {
            assert!(!arn.api_arn.contains('/'));
            assert!(!arn.method.contains('/'));
        }
    }
});
