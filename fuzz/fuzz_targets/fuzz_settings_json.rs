#![no_main]

use debounced_input::{FieldPath, FormSettings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as JSON into FormSettings
    // This tests for crashes, panics, and undefined behavior
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(settings) = serde_json::from_str::<FormSettings>(s) {
            // Lookups and duration conversion must not panic on any parsed value
            for path in settings.fields.keys() {
                let _ = settings.for_path(&FieldPath::from(path.as_str())).timeout();
            }
        }
    }
});
