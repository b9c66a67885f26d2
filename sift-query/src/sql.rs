//! SQL emission.
//!
//! Renders a [`Condition`] through a [`Dialect`]. The fragment templates live
//! here; every backend-specific spelling comes from the dialect.

use crate::condition::{Condition, NormalizedValue, Predicate};
use crate::dialect::{CaseInsensitiveMatch, Dialect};
use crate::operator::Template;
use crate::sift_trace;

/// Render a condition; `Empty` renders to `""`.
pub fn render(condition: &Condition, dialect: &Dialect) -> String {
    let Some(predicate) = condition.as_predicate() else {
        return String::new();
    };

    let sql = render_predicate(predicate, dialect);
    sift_trace!(
        operator = predicate.operator.id,
        dialect = dialect.name(),
        sql = %sql,
        "rendered condition"
    );
    sql
}

fn render_predicate(p: &Predicate, dialect: &Dialect) -> String {
    let column = dialect.qualify(p.attribute.table(), p.attribute.column());
    let positive = p.positive();

    match p.operator.template {
        Template::Equality => {
            let op = if positive { "=" } else { "!=" };
            format!("{} {} {}", column, op, literal(&p.value, dialect))
        }
        Template::NullCheck => {
            if positive {
                format!("{} IS NULL", column)
            } else {
                format!("{} IS NOT NULL", column)
            }
        }
        Template::BooleanLiteral(target) => {
            let op = if positive { "=" } else { "!=" };
            format!("{} {} {}", column, op, dialect.bool_literal(target))
        }
        Template::Presence => {
            if positive {
                format!("({col} IS NOT NULL AND {col} != '')", col = column)
            } else {
                format!("({col} IS NULL OR {col} = '')", col = column)
            }
        }
        Template::PatternMatch(_) => {
            let column = if p.attribute.value_type().is_string_like() {
                column
            } else {
                dialect.cast_to_text(&column)
            };
            pattern_match(&column, &literal(&p.value, dialect), positive, dialect)
        }
        Template::Comparison(cmp) => {
            format!("{} {} {}", column, cmp.as_sql(), literal(&p.value, dialect))
        }
        Template::Membership => {
            let op = if positive { "IN" } else { "NOT IN" };
            format!("{} {} ({})", column, op, literal(&p.value, dialect))
        }
    }
}

fn pattern_match(column: &str, pattern: &str, positive: bool, dialect: &Dialect) -> String {
    let not = if positive { "" } else { "NOT " };
    let mut sql = match dialect.case_insensitive() {
        CaseInsensitiveMatch::Native => format!("{} {}ILIKE {}", column, not, pattern),
        CaseInsensitiveMatch::FoldCase => {
            format!("LOWER({}) {}LIKE LOWER({})", column, not, pattern)
        }
        CaseInsensitiveMatch::Plain => format!("{} {}LIKE {}", column, not, pattern),
    };
    if dialect.like_escape_clause() {
        sql.push_str(" ESCAPE ");
        sql.push_str(&dialect.quote_string("\\"));
    }
    sql
}

/// Render a normalized value as a SQL literal.
fn literal(value: &NormalizedValue, dialect: &Dialect) -> String {
    match value {
        NormalizedValue::Toggle(b) | NormalizedValue::Bool(b) => dialect.bool_literal(*b).to_string(),
        NormalizedValue::Int(i) => i.to_string(),
        NormalizedValue::Float(f) => f.to_string(),
        NormalizedValue::Text(s) | NormalizedValue::Pattern(s) => dialect.quote_string(s),
        NormalizedValue::List(items) => items
            .iter()
            .map(|item| literal(item, dialect))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::compile;
    use crate::predicate::ParsedPredicate;
    use crate::value::RawValue;
    use pretty_assertions::assert_eq;
    use sift_schema::{AttributeRef, ValueType};

    fn people(column: &str, value_type: ValueType) -> AttributeRef {
        AttributeRef::new("people", column, value_type)
    }

    fn sql(key: &str, value_type: ValueType, raw: impl Into<RawValue>, dialect: &Dialect) -> String {
        let parsed = ParsedPredicate::parse(key).unwrap();
        compile(&people(&parsed.attribute, value_type), &parsed, &raw.into())
            .unwrap()
            .render(dialect)
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(render(&Condition::Empty, &Dialect::postgres()), "");
    }

    #[test]
    fn test_equality() {
        let pg = Dialect::postgres();
        assert_eq!(sql("awesome_eq", ValueType::Boolean, true, &pg), r#""people"."awesome" = TRUE"#);
        assert_eq!(sql("salary_not_eq", ValueType::Int, 10, &pg), r#""people"."salary" != 10"#);
        assert_eq!(sql("name_eq", ValueType::String, "O'Neil", &pg), r#""people"."name" = 'O''Neil'"#);
    }

    #[test]
    fn test_pattern_match_per_dialect() {
        assert_eq!(
            sql("name_cont", ValueType::String, "ric", &Dialect::postgres()),
            r#""people"."name" ILIKE '%ric%'"#
        );
        assert_eq!(
            sql("name_not_cont", ValueType::String, "ric", &Dialect::mysql()),
            "`people`.`name` NOT LIKE '%ric%'"
        );
        assert_eq!(
            sql("name_start", ValueType::String, "ric", &Dialect::sqlite()),
            r#""people"."name" LIKE 'ric%' ESCAPE '\'"#
        );
    }

    #[test]
    fn test_fold_case_strategy() {
        let folded = Dialect::builder("folded")
            .case_insensitive(CaseInsensitiveMatch::FoldCase)
            .like_escape_clause(false)
            .build();
        assert_eq!(
            sql("name_not_end", ValueType::String, "son", &folded),
            r#"LOWER("people"."name") NOT LIKE LOWER('%son')"#
        );
    }

    #[test]
    fn test_numeric_pattern_casts_column() {
        assert_eq!(
            sql("parent_id_cont", ValueType::Int, 1, &Dialect::postgres()),
            r#"CAST("people"."parent_id" AS TEXT) ILIKE '%1%'"#
        );
    }

    #[test]
    fn test_comparison_and_membership() {
        let pg = Dialect::postgres();
        assert_eq!(sql("salary_gteq", ValueType::Int, "100", &pg), r#""people"."salary" >= 100"#);
        assert_eq!(
            sql("name_not_in", ValueType::String, vec!["a", "b"], &pg),
            r#""people"."name" NOT IN ('a', 'b')"#
        );
    }
}
