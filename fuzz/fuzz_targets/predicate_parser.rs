//! Fuzz target for predicate key parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_predicate_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sift_query::predicate;

fuzz_target!(|key: &str| {
    if let Ok(parsed) = predicate::parse(key) {
        assert!(!parsed.attribute.is_empty());
        assert_eq!(parsed.negated, parsed.operator.negated);
        if key.contains('_') {
            assert_eq!(parsed.key(), key);
        }
    }
});
