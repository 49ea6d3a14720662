#![no_main]

use arxiv_mistral_mcp::client::parse_atom_feed;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feeds arrive as text; anything else is rejected before parsing
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_atom_feed(xml);
    }
});
