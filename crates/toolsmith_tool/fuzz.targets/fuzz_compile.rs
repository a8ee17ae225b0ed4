#![no_main]
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use toolsmith_tool::{create_tool_spec, validate_tool};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    // Compilation succeeds exactly for valid tools
    let spec = create_tool_spec(&value);
    assert_eq!(spec.is_some(), validate_tool(&value));

    if let Some(spec) = spec {
        if let Some(schema) = spec.input_json() {
            assert!(!schema.additional_properties);
            assert!(schema.required.iter().all(|name| schema.property(name).is_some()));
        }
    }
});
