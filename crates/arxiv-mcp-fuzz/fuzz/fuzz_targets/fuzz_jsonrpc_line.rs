#![no_main]

use arxiv_mistral_mcp::server::protocol::JsonRpcRequest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A line either parses as a request or is dropped; it must never panic
    if let Ok(request) = serde_json::from_slice::<JsonRpcRequest>(data) {
        let _ = request.is_notification();
        let _ = request.params.get("name").and_then(|v| v.as_str());
    }
});
