#![no_main]

use libfuzzer_sys::fuzz_target;
use rpn_calculator::Service;
use rpn_calculator::api::rest::handlers::tokens_from_path;

fuzz_target!(|data: &[u8]| {
    // Limit input size to keep iterations fast
    if data.len() > 1024 {
        return;
    }
    if let Ok(path) = std::str::from_utf8(data) {
        // Errors are expected; panics and overflow are not
        let tokens = tokens_from_path(path);
        let _ = Service::default().evaluate(&tokens);
    }
});
