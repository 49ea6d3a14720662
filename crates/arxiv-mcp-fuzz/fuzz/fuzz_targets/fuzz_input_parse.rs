#![no_main]

use arxiv_mistral_mcp::client::normalize_id;
use arxiv_mistral_mcp::formatters::truncate_words;
use arxiv_mistral_mcp::models::{
    AnalyzePaperInput, ChatAboutPapersInput, ComparePapersInput, SearchPapersInput,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = serde_json::from_value::<SearchPapersInput>(json.clone());
        let _ = serde_json::from_value::<AnalyzePaperInput>(json.clone());
        let _ = serde_json::from_value::<ChatAboutPapersInput>(json.clone());
        let _ = serde_json::from_value::<ComparePapersInput>(json);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = normalize_id(text);

        let limit = data.len() / 2;
        let once = truncate_words(text, limit).into_owned();
        assert!(once.chars().count() <= limit || once == text);
        assert_eq!(truncate_words(&once, limit), once);
    }
});
