//! Fuzz target for inbound proxy event parsing.
//!
//! Events come straight from the network. Parsing, parameter merging and
//! masked logging must never panic, and an API key header must always be
//! masked in the logged rendering.

#![no_main]

use gw_common::logging::masked_request;
use gw_common::ProxyRequest;
use gw_redact::Masker;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(request) = ProxyRequest::from_json(text) else {
        return;
    };

    let _ = request.params();
    let _ = request.source_ip();

    if let Ok(masked) = masked_request(&request, Masker::global()) {
        if request.headers.contains_key("x-api-key") {
            assert_eq!(masked["headers"]["x-api-key"], "****");
        }
    }
});
