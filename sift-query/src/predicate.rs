//! Predicate key parsing.
//!
//! A key such as `name_not_cont` is split on the longest registered operator
//! suffix into an attribute path (`name`) and an [`Operator`] (`not_cont`).

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::error::{ParseError, ParseResult};
use crate::operator::{self, Operator};

/// A predicate key split into attribute path and operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPredicate {
    /// Attribute path as written in the key.
    pub attribute: SmolStr,
    /// The matched operator.
    pub operator: &'static Operator,
    /// Copied from the operator.
    pub negated: bool,
}

impl ParsedPredicate {
    /// Parse a predicate key.
    ///
    /// ```rust
    /// use sift_query::ParsedPredicate;
    ///
    /// let parsed = ParsedPredicate::parse("name_not_null").unwrap();
    /// assert_eq!(parsed.attribute, "name");
    /// assert_eq!(parsed.operator.id, "not_null");
    /// assert!(parsed.negated);
    ///
    /// // No underscore at all: plain equality.
    /// assert_eq!(ParsedPredicate::parse("awesome").unwrap().operator.id, "eq");
    /// assert!(ParsedPredicate::parse("name_bogus").is_err());
    /// ```
    pub fn parse(key: &str) -> ParseResult<Self> {
        parse(key)
    }

    /// Attribute path segments, split on `.` and `__`.
    pub fn path(&self) -> SmallVec<[&str; 4]> {
        self.attribute
            .split('.')
            .flat_map(|segment| segment.split("__"))
            .collect()
    }

    /// The key this predicate was parsed from.
    pub fn key(&self) -> String {
        format!("{}_{}", self.attribute, self.operator.id)
    }
}

/// Parse a predicate key into attribute path and operator.
///
/// A suffix only counts when a non-empty attribute precedes it, so `not_null`
/// is the `null` operator on an attribute named `not`.
pub fn parse(key: &str) -> ParseResult<ParsedPredicate> {
    if key.is_empty() {
        return Err(ParseError::EmptyAttribute { key: key.to_string() });
    }

    for &op in operator::by_suffix_length() {
        let Some(prefix) = key.strip_suffix(op.id) else {
            continue;
        };
        let Some(attribute) = prefix.strip_suffix('_') else {
            continue;
        };
        if attribute.is_empty() {
            return Err(ParseError::EmptyAttribute { key: key.to_string() });
        }
        return Ok(ParsedPredicate {
            attribute: attribute.into(),
            operator: op,
            negated: op.negated,
        });
    }

    if !key.contains('_') {
        let op = operator::default_operator();
        return Ok(ParsedPredicate {
            attribute: key.into(),
            operator: op,
            negated: op.negated,
        });
    }

    Err(ParseError::UnknownOperator { key: key.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_suffix() {
        let parsed = parse("awesome_eq").unwrap();
        assert_eq!(parsed.attribute, "awesome");
        assert_eq!(parsed.operator.id, "eq");
        assert!(!parsed.negated);
    }

    #[test]
    fn test_longest_suffix_wins() {
        let parsed = parse("name_not_null").unwrap();
        assert_eq!(parsed.attribute, "name");
        assert_eq!(parsed.operator.id, "not_null");

        let parsed = parse("name_not_cont").unwrap();
        assert_eq!(parsed.attribute, "name");
        assert!(parsed.negated);

        let parsed = parse("salary_lteq").unwrap();
        assert_eq!(parsed.operator.id, "lteq");
    }

    #[test]
    fn test_attribute_with_underscores() {
        let parsed = parse("parent_id_cont").unwrap();
        assert_eq!(parsed.attribute, "parent_id");
        assert_eq!(parsed.operator.id, "cont");

        let parsed = parse("life_start_null").unwrap();
        assert_eq!(parsed.attribute, "life_start");
        assert_eq!(parsed.operator.id, "null");
    }

    #[test]
    fn test_operator_must_follow_underscore() {
        // `xin` ends in `in` but not in `_in`
        assert!(matches!(
            parse("reinvent_xin"),
            Err(ParseError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn test_whole_key_is_never_an_operator() {
        // the suffix needs a non-empty attribute in front, so a shorter one wins
        let parsed = parse("not_null").unwrap();
        assert_eq!(parsed.attribute, "not");
        assert_eq!(parsed.operator.id, "null");

        let parsed = parse("not_eq").unwrap();
        assert_eq!(parsed.attribute, "not");
        assert_eq!(parsed.operator.id, "eq");
    }

    #[test]
    fn test_bare_key_defaults_to_eq() {
        let parsed = parse("awesome").unwrap();
        assert_eq!(parsed.attribute, "awesome");
        assert_eq!(parsed.operator.id, "eq");
    }

    #[test]
    fn test_unknown_operator() {
        let err = parse("name_bogus").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOperator {
                key: "name_bogus".into()
            }
        );
    }

    #[test]
    fn test_empty_attribute() {
        assert!(matches!(parse("_eq"), Err(ParseError::EmptyAttribute { .. })));
        assert!(matches!(parse(""), Err(ParseError::EmptyAttribute { .. })));
    }

    #[test]
    fn test_path_segments() {
        let parsed = parse("author__name_cont").unwrap();
        assert_eq!(parsed.path().as_slice(), &["author", "name"]);

        let parsed = parse("author.profile__bio_present").unwrap();
        assert_eq!(parsed.path().as_slice(), &["author", "profile", "bio"]);

        assert_eq!(parse("name_eq").unwrap().path().as_slice(), &["name"]);
    }

    #[test]
    fn test_key_roundtrip() {
        assert_eq!(parse("name_not_cont").unwrap().key(), "name_not_cont");
    }
}
