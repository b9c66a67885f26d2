//! Condition compilation.
//!
//! [`compile`] turns a resolved attribute, a parsed predicate and a raw value
//! into a [`Condition`]. It validates the operator against the column type
//! first, then coerces and escapes the value. Nil input yields
//! [`Condition::Empty`] for every operator.
//!
//! ```rust
//! use sift_query::{compile, AttributeRef, Dialect, ParsedPredicate, RawValue};
//! use sift_schema::ValueType;
//!
//! let attr = AttributeRef::new("people", "name", ValueType::String);
//! let parsed = ParsedPredicate::parse("name_cont").unwrap();
//!
//! let condition = compile(&attr, &parsed, &RawValue::from("ric")).unwrap();
//! assert_eq!(condition.render(&Dialect::postgres()), r#""people"."name" ILIKE '%ric%'"#);
//!
//! let empty = compile(&attr, &parsed, &RawValue::Null).unwrap();
//! assert!(empty.is_empty());
//! ```

use sift_schema::{AttributeRef, ValueType};
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{CompileError, CompileResult};
use crate::operator::{Arity, Operator, Template};
use crate::predicate::ParsedPredicate;
use crate::sql;
use crate::value::RawValue;

/// Characters with special meaning inside `LIKE` patterns.
const WILDCARDS: [char; 3] = ['\\', '%', '.'];

/// A compiled predicate, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// No SQL is emitted.
    Empty,
    /// A renderable condition.
    Predicate(Predicate),
}

/// A type-checked predicate with its normalized value.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Resolved column.
    pub attribute: AttributeRef,
    /// Operator to render.
    pub operator: &'static Operator,
    /// Copied from the parsed predicate.
    pub negated: bool,
    /// Coerced and escaped value.
    pub value: NormalizedValue,
}

/// A value ready for the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    /// Selects one of a toggle operator's two renderings.
    Toggle(bool),
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Text(String),
    /// Escaped and wrapped `LIKE` pattern.
    Pattern(String),
    /// Members of an `IN` list.
    List(Vec<NormalizedValue>),
}

/// Knobs for [`compile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Treat empty strings and empty lists like nil.
    pub ignore_blank: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { ignore_blank: true }
    }
}

impl Condition {
    /// Whether this condition emits no SQL.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Render to SQL; `Empty` renders to `""`.
    pub fn render(&self, dialect: &Dialect) -> String {
        sql::render(self, dialect)
    }

    /// The predicate, if any.
    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Empty => None,
            Self::Predicate(p) => Some(p),
        }
    }
}

impl Predicate {
    /// For toggle operators, whether the non-negated form of the template is
    /// rendered. Always `!negated` otherwise.
    pub fn positive(&self) -> bool {
        match self.value {
            NormalizedValue::Toggle(toggle) => toggle != self.negated,
            _ => !self.negated,
        }
    }
}

/// Compile with default options.
pub fn compile(
    attribute: &AttributeRef,
    parsed: &ParsedPredicate,
    raw: &RawValue,
) -> CompileResult<Condition> {
    compile_with(attribute, parsed, raw, CompileOptions::default())
}

/// Compile a parsed predicate against a resolved attribute.
pub fn compile_with(
    attribute: &AttributeRef,
    parsed: &ParsedPredicate,
    raw: &RawValue,
    options: CompileOptions,
) -> CompileResult<Condition> {
    let operator = parsed.operator;

    if raw.is_null() || (options.ignore_blank && raw.is_blank()) {
        debug!(key = %parsed.key(), "suppressing predicate with empty value");
        return Ok(Condition::Empty);
    }

    if !operator.applies_to.admits(attribute.value_type()) {
        return Err(CompileError::TypeMismatch {
            operator: operator.id,
            attribute: attribute.to_string(),
            value_type: attribute.value_type(),
        });
    }

    let value = match (operator.arity, operator.template) {
        (Arity::Toggle, _) => {
            let toggle = raw
                .to_bool()
                .ok_or_else(|| invalid_value(parsed, "boolean", raw))?;
            NormalizedValue::Toggle(toggle)
        }
        (_, Template::PatternMatch(kind)) => {
            let text = match raw {
                RawValue::List(_) => None,
                other => other.to_text(),
            }
            .ok_or_else(|| invalid_value(parsed, "string", raw))?;
            NormalizedValue::Pattern(kind.wrap(&escape_wildcards(&text)))
        }
        (Arity::List, _) => {
            let items: Vec<&RawValue> = match raw {
                RawValue::List(items) => items.iter().filter(|v| !v.is_null()).collect(),
                scalar => vec![scalar],
            };
            if items.is_empty() {
                debug!(key = %parsed.key(), "suppressing membership test with no values");
                return Ok(Condition::Empty);
            }
            let members = items
                .into_iter()
                .map(|item| coerce_scalar(parsed, attribute.value_type(), item))
                .collect::<CompileResult<Vec<_>>>()?;
            NormalizedValue::List(members)
        }
        (Arity::Value, _) => coerce_scalar(parsed, attribute.value_type(), raw)?,
    };

    Ok(Condition::Predicate(Predicate {
        attribute: attribute.clone(),
        operator,
        negated: parsed.negated,
        value,
    }))
}

/// Backslash-escape `\`, `%` and `.` in a single pass.
pub fn escape_wildcards(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if WILDCARDS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Coerce a scalar to the column's declared type.
fn coerce_scalar(
    parsed: &ParsedPredicate,
    value_type: ValueType,
    raw: &RawValue,
) -> CompileResult<NormalizedValue> {
    let (coerced, expected) = if value_type.is_boolean() {
        (raw.to_bool().map(NormalizedValue::Bool), "boolean")
    } else if value_type.is_integral() {
        (raw.to_i64().map(NormalizedValue::Int), "integer")
    } else if value_type.is_numeric() {
        (raw.to_f64().map(NormalizedValue::Float), "number")
    } else {
        (raw.to_text().map(NormalizedValue::Text), "string")
    };

    coerced.ok_or_else(|| invalid_value(parsed, expected, raw))
}

fn invalid_value(parsed: &ParsedPredicate, expected: &'static str, raw: &RawValue) -> CompileError {
    CompileError::InvalidValueCoercion {
        operator: parsed.operator.id,
        attribute: parsed.attribute.to_string(),
        expected,
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attr(column: &str, value_type: ValueType) -> AttributeRef {
        AttributeRef::new("people", column, value_type)
    }

    fn compile_key(key: &str, value_type: ValueType, raw: impl Into<RawValue>) -> CompileResult<Condition> {
        let parsed = ParsedPredicate::parse(key).unwrap();
        compile(&attr(&parsed.attribute, value_type), &parsed, &raw.into())
    }

    fn predicate(condition: Condition) -> Predicate {
        match condition {
            Condition::Predicate(p) => p,
            Condition::Empty => panic!("expected a predicate"),
        }
    }

    #[test]
    fn test_nil_suppresses_every_operator() {
        for op in crate::operator::all() {
            let key = format!("name_{}", op.id);
            let condition = compile_key(&key, ValueType::String, RawValue::Null);
            // boolean-only operators still suppress before the type check
            assert_eq!(condition, Ok(Condition::Empty), "{}", key);
        }
    }

    #[test]
    fn test_blank_suppression_is_optional() {
        let parsed = ParsedPredicate::parse("name_eq").unwrap();
        let attribute = attr("name", ValueType::String);
        let raw = RawValue::from("");

        assert!(compile(&attribute, &parsed, &raw).unwrap().is_empty());

        let kept = compile_with(&attribute, &parsed, &raw, CompileOptions { ignore_blank: false }).unwrap();
        assert_eq!(predicate(kept).value, NormalizedValue::Text(String::new()));
    }

    #[test]
    fn test_eq_boolean_coercion() {
        let p = predicate(compile_key("awesome_eq", ValueType::Boolean, "t").unwrap());
        assert_eq!(p.value, NormalizedValue::Bool(true));

        let err = compile_key("awesome_eq", ValueType::Boolean, "maybe").unwrap_err();
        assert_eq!(err.error_code(), crate::ErrorCode::InvalidValueCoercion);
    }

    #[test]
    fn test_eq_numeric_coercion() {
        let p = predicate(compile_key("salary_eq", ValueType::Int, "42").unwrap());
        assert_eq!(p.value, NormalizedValue::Int(42));

        let p = predicate(compile_key("score_eq", ValueType::Float, 2).unwrap());
        assert_eq!(p.value, NormalizedValue::Float(2.0));

        let err = compile_key("salary_eq", ValueType::Int, "lots").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot use \"lots\" as integer for `salary_eq`"
        );
    }

    #[test]
    fn test_eq_string_takes_any_scalar() {
        let p = predicate(compile_key("name_eq", ValueType::String, 7).unwrap());
        assert_eq!(p.value, NormalizedValue::Text("7".into()));
    }

    #[test]
    fn test_eq_rejects_temporal_columns() {
        let err = compile_key("life_start_eq", ValueType::DateTime, "2020-01-01").unwrap_err();
        assert!(matches!(err, CompileError::TypeMismatch { operator: "eq", .. }));
    }

    #[test]
    fn test_toggle_requires_boolean() {
        let p = predicate(compile_key("name_present", ValueType::String, "no").unwrap());
        assert_eq!(p.value, NormalizedValue::Toggle(false));
        assert!(!p.positive());

        let err = compile_key("name_null", ValueType::String, "sometimes").unwrap_err();
        assert!(matches!(err, CompileError::InvalidValueCoercion { expected: "boolean", .. }));
    }

    #[test]
    fn test_toggle_polarity() {
        let cases = [
            ("name_null", true, true),
            ("name_null", false, false),
            ("name_not_null", true, false),
            ("name_not_null", false, true),
        ];
        for (key, toggle, positive) in cases {
            let p = predicate(compile_key(key, ValueType::String, toggle).unwrap());
            assert_eq!(p.positive(), positive, "{} = {}", key, toggle);
        }
    }

    #[test]
    fn test_cont_escapes_and_wraps() {
        let p = predicate(compile_key("name_cont", ValueType::String, r"%._\").unwrap());
        assert_eq!(p.value, NormalizedValue::Pattern(r"%\%\._\\%".into()));
    }

    #[test]
    fn test_cont_accepts_integers() {
        let p = predicate(compile_key("parent_id_cont", ValueType::Int, 1).unwrap());
        assert_eq!(p.value, NormalizedValue::Pattern("%1%".into()));
    }

    #[test]
    fn test_cont_on_boolean_is_type_mismatch() {
        let err = compile_key("awesome_cont", ValueType::Boolean, "x").unwrap_err();
        assert_eq!(
            err,
            CompileError::TypeMismatch {
                operator: "cont",
                attribute: "people.awesome".into(),
                value_type: ValueType::Boolean,
            }
        );
    }

    #[test]
    fn test_boolean_operators_need_boolean_columns() {
        assert!(compile_key("name_true", ValueType::String, true).is_err());
        assert!(compile_key("awesome_present", ValueType::Boolean, true).is_err());
        assert!(compile_key("awesome_null", ValueType::Boolean, true).is_ok());
    }

    #[test]
    fn test_membership() {
        let p = predicate(compile_key("salary_in", ValueType::Int, vec![RawValue::Int(1), RawValue::Null, RawValue::from("2")]).unwrap());
        assert_eq!(
            p.value,
            NormalizedValue::List(vec![NormalizedValue::Int(1), NormalizedValue::Int(2)])
        );

        let p = predicate(compile_key("salary_in", ValueType::Int, 5).unwrap());
        assert_eq!(p.value, NormalizedValue::List(vec![NormalizedValue::Int(5)]));

        let only_nulls = compile_key("salary_in", ValueType::Int, vec![RawValue::Null]).unwrap();
        assert!(only_nulls.is_empty());
    }

    #[test]
    fn test_escape_wildcards_single_pass() {
        assert_eq!(escape_wildcards(r"\%"), r"\\\%");
        assert_eq!(escape_wildcards("a.b"), r"a\.b");
        assert_eq!(escape_wildcards("plain_text"), "plain_text");
    }
}
