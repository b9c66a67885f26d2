//! The operator registry.
//!
//! Every predicate suffix (`eq`, `not_null`, `cont`, ...) maps to one static
//! [`Operator`] record. Negated forms are separate entries carrying
//! `negated = true`, so a single rendering path per [`Template`] covers both
//! polarities.
//!
//! ```rust
//! use sift_query::operator::{self, Template};
//!
//! let op = operator::lookup("not_null").unwrap();
//! assert_eq!(op.template, Template::NullCheck);
//! assert!(op.negated);
//! assert_eq!(op.paired().map(|p| p.id), Some("null"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use sift_schema::ValueType;

/// How a condition is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// `col = value`
    Equality,
    /// `col IS NULL`
    NullCheck,
    /// `col = <literal>` against a fixed boolean literal.
    BooleanLiteral(bool),
    /// `(col IS NOT NULL AND col != '')`
    Presence,
    /// `col LIKE pattern`, case-insensitive where the dialect allows.
    PatternMatch(MatchKind),
    /// `col < value` and friends.
    Comparison(Comparison),
    /// `col IN (...)`
    Membership,
}

/// Where a pattern is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
}

impl MatchKind {
    /// Wrap an already escaped value in wildcards.
    pub fn wrap(&self, escaped: &str) -> String {
        match self {
            Self::Contains => format!("%{}%", escaped),
            Self::StartsWith => format!("{}%", escaped),
            Self::EndsWith => format!("%{}", escaped),
        }
    }
}

/// Ordering comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
}

impl Comparison {
    /// SQL operator symbol.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// What kind of value an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// A scalar compared against the column.
    Value,
    /// A boolean selecting which of two renderings is produced.
    Toggle,
    /// A list (scalars are wrapped).
    List,
}

/// Column types an operator may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Every column.
    Any,
    /// Scalars with a meaningful literal equality.
    Equatable,
    /// `String` or `Text`.
    StringLike,
    /// `Boolean`.
    Boolean,
    /// String-like or numeric; numeric columns are cast to text.
    Textual,
    /// String-like or numeric.
    Ordered,
}

impl TypeClass {
    /// Check whether a column of `value_type` is accepted.
    pub fn admits(&self, value_type: ValueType) -> bool {
        match self {
            Self::Any => true,
            Self::Equatable => !value_type.is_temporal()
                && !matches!(value_type, ValueType::Json | ValueType::Bytes),
            Self::StringLike => value_type.is_string_like(),
            Self::Boolean => value_type.is_boolean(),
            Self::Textual | Self::Ordered => {
                value_type.is_string_like() || value_type.is_numeric()
            }
        }
    }
}

/// A registered predicate operator.
#[derive(Debug, PartialEq, Eq)]
pub struct Operator {
    /// Suffix used in predicate keys.
    pub id: &'static str,
    /// Rendering template.
    pub template: Template,
    /// Value shape.
    pub arity: Arity,
    /// Admissible column types.
    pub applies_to: TypeClass,
    /// Renders the inverse of the template.
    pub negated: bool,
    /// Id of the operator with opposite polarity.
    pub pair: Option<&'static str>,
}

impl Operator {
    /// The operator with opposite polarity, if any.
    pub fn paired(&self) -> Option<&'static Operator> {
        self.pair.and_then(lookup)
    }

    /// Whether the value is a boolean toggle.
    pub fn is_toggle(&self) -> bool {
        self.arity == Arity::Toggle
    }
}

const fn op(
    id: &'static str,
    template: Template,
    arity: Arity,
    applies_to: TypeClass,
    negated: bool,
    pair: Option<&'static str>,
) -> Operator {
    Operator {
        id,
        template,
        arity,
        applies_to,
        negated,
        pair,
    }
}

use Arity::{List, Toggle, Value};
use MatchKind::{Contains, EndsWith, StartsWith};
use Template::{BooleanLiteral, Equality, Membership, NullCheck, PatternMatch, Presence};

/// Every registered operator.
pub static OPERATORS: [Operator; 22] = [
    op("eq", Equality, Value, TypeClass::Equatable, false, Some("not_eq")),
    op("not_eq", Equality, Value, TypeClass::Equatable, true, Some("eq")),
    op("null", NullCheck, Toggle, TypeClass::Any, false, Some("not_null")),
    op("not_null", NullCheck, Toggle, TypeClass::Any, true, Some("null")),
    op("present", Presence, Toggle, TypeClass::StringLike, false, Some("blank")),
    op("blank", Presence, Toggle, TypeClass::StringLike, true, Some("present")),
    op("true", BooleanLiteral(true), Toggle, TypeClass::Boolean, false, Some("not_true")),
    op("not_true", BooleanLiteral(true), Toggle, TypeClass::Boolean, true, Some("true")),
    op("false", BooleanLiteral(false), Toggle, TypeClass::Boolean, false, Some("not_false")),
    op("not_false", BooleanLiteral(false), Toggle, TypeClass::Boolean, true, Some("false")),
    op("cont", PatternMatch(Contains), Value, TypeClass::Textual, false, Some("not_cont")),
    op("not_cont", PatternMatch(Contains), Value, TypeClass::Textual, true, Some("cont")),
    op("start", PatternMatch(StartsWith), Value, TypeClass::Textual, false, Some("not_start")),
    op("not_start", PatternMatch(StartsWith), Value, TypeClass::Textual, true, Some("start")),
    op("end", PatternMatch(EndsWith), Value, TypeClass::Textual, false, Some("not_end")),
    op("not_end", PatternMatch(EndsWith), Value, TypeClass::Textual, true, Some("end")),
    op("lt", Template::Comparison(Comparison::Lt), Value, TypeClass::Ordered, false, Some("gteq")),
    op("lteq", Template::Comparison(Comparison::Lte), Value, TypeClass::Ordered, false, Some("gt")),
    op("gt", Template::Comparison(Comparison::Gt), Value, TypeClass::Ordered, false, Some("lteq")),
    op("gteq", Template::Comparison(Comparison::Gte), Value, TypeClass::Ordered, false, Some("lt")),
    op("in", Membership, List, TypeClass::Equatable, false, Some("not_in")),
    op("not_in", Membership, List, TypeClass::Equatable, true, Some("in")),
];

static BY_ID: LazyLock<HashMap<&'static str, &'static Operator>> =
    LazyLock::new(|| OPERATORS.iter().map(|op| (op.id, op)).collect());

static BY_SUFFIX_LENGTH: LazyLock<Vec<&'static Operator>> = LazyLock::new(|| {
    let mut ops: Vec<_> = OPERATORS.iter().collect();
    ops.sort_by(|a, b| b.id.len().cmp(&a.id.len()).then_with(|| a.id.cmp(b.id)));
    ops
});

/// Look up an operator by id.
pub fn lookup(id: &str) -> Option<&'static Operator> {
    BY_ID.get(id).copied()
}

/// All registered operators, in registration order.
pub fn all() -> &'static [Operator] {
    &OPERATORS
}

/// Operators ordered longest id first, for suffix matching.
pub(crate) fn by_suffix_length() -> &'static [&'static Operator] {
    &BY_SUFFIX_LENGTH
}

/// The operator used when a key carries no suffix.
pub fn default_operator() -> &'static Operator {
    &OPERATORS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_eq!(BY_ID.len(), OPERATORS.len());
    }

    #[test]
    fn test_pairs_are_symmetric() {
        for op in all() {
            let pair = op.paired().unwrap_or_else(|| panic!("{} has no pair", op.id));
            assert_eq!(pair.paired().map(|p| p.id), Some(op.id), "{}", op.id);
        }
    }

    #[test]
    fn test_negated_pairs_share_template() {
        for op in all().iter().filter(|op| op.negated) {
            let pair = op.paired().unwrap();
            assert_eq!(pair.template, op.template);
            assert!(!pair.negated);
        }
    }

    #[test]
    fn test_suffix_order_prefers_longest() {
        let ids: Vec<_> = by_suffix_length().iter().map(|op| op.id).collect();
        let not_null = ids.iter().position(|id| *id == "not_null").unwrap();
        let null = ids.iter().position(|id| *id == "null").unwrap();
        assert!(not_null < null);
        assert!(ids.windows(2).all(|w| w[0].len() >= w[1].len()));
    }

    #[test]
    fn test_type_classes() {
        assert!(TypeClass::Textual.admits(ValueType::Int));
        assert!(TypeClass::Textual.admits(ValueType::Text));
        assert!(!TypeClass::Textual.admits(ValueType::Boolean));
        assert!(!TypeClass::StringLike.admits(ValueType::Int));
        assert!(TypeClass::Equatable.admits(ValueType::Uuid));
        assert!(!TypeClass::Equatable.admits(ValueType::DateTime));
        assert!(!TypeClass::Equatable.admits(ValueType::Json));
        assert!(TypeClass::Any.admits(ValueType::Bytes));
    }

    #[test]
    fn test_match_kind_wrap() {
        assert_eq!(MatchKind::Contains.wrap("ric"), "%ric%");
        assert_eq!(MatchKind::StartsWith.wrap("ric"), "ric%");
        assert_eq!(MatchKind::EndsWith.wrap("ric"), "%ric");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("bogus").is_none());
        assert_eq!(default_operator().id, "eq");
    }
}
