#![no_main]
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use toolsmith_tool::{is_valid_parameter, normalize_tool_parameters};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Text payloads go through the string branch
    let params = normalize_tool_parameters(&Value::String(text.to_string()));
    for param in &params {
        let value = serde_json::to_value(param).unwrap();
        assert!(is_valid_parameter(&value));
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        let direct = normalize_tool_parameters(&value);
        assert!(direct.iter().all(|p| !p.name.trim().is_empty()));
    }
});
