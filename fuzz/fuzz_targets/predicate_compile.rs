//! Structured fuzz target for compiling and rendering predicates.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_predicate_compile
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sift_query::{Dialect, RawValue, compile_key, operator};
use sift_schema::{Model, ValueType};

/// A fuzzable raw value.
#[derive(Debug, Arbitrary, Clone)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FuzzValue>),
}

impl From<FuzzValue> for RawValue {
    fn from(val: FuzzValue) -> Self {
        match val {
            FuzzValue::Null => RawValue::Null,
            FuzzValue::Bool(b) => RawValue::Bool(b),
            FuzzValue::Int(i) => RawValue::Int(i),
            FuzzValue::Float(f) => RawValue::Float(f),
            FuzzValue::String(s) => RawValue::String(s),
            FuzzValue::List(list) => RawValue::List(list.into_iter().map(RawValue::from).collect()),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzPredicate {
    column: u8,
    operator: u8,
    dialect: u8,
    value: FuzzValue,
}

const COLUMNS: [(&str, ValueType); 5] = [
    ("name", ValueType::String),
    ("salary", ValueType::Int),
    ("score", ValueType::Float),
    ("awesome", ValueType::Boolean),
    ("born", ValueType::Date),
];

fuzz_target!(|input: FuzzPredicate| {
    let model = COLUMNS
        .iter()
        .fold(Model::named("Person").with_table("people"), |m, (name, ty)| {
            m.with_column(*name, *ty)
        });

    let (column, _) = COLUMNS[input.column as usize % COLUMNS.len()];
    let ops = operator::all();
    let op = &ops[input.operator as usize % ops.len()];
    let dialect = match input.dialect % 3 {
        0 => Dialect::postgres(),
        1 => Dialect::mysql(),
        _ => Dialect::sqlite(),
    };

    let key = format!("{}_{}", column, op.id);
    let value = RawValue::from(input.value);

    // Errors are fine; panics are not. Rendered SQL never contains a lone quote.
    if let Ok(condition) = compile_key(&model, &key, &value) {
        let sql = condition.render(&dialect);
        assert_eq!(sql.is_empty(), condition.is_empty());
        assert_eq!(sql.matches('\'').count() % 2, 0, "{}", sql);
    }
});
