//! Fuzz target for the Sift schema parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_schema_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sift_schema::AttributeResolver;
use sift_schema::parser::parse_schema;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        if let Ok(schema) = parse_schema(input) {
            for model in schema.models.values() {
                for name in model.columns.keys() {
                    assert!(model.resolve(&[name.as_str()]).is_some());
                }
            }
        }
    }
});
