//! Column definitions for the Sift schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Documentation, Ident, Span, ValueType};

/// A column of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Attribute name used in predicate keys.
    pub name: Ident,
    /// Declared value type.
    pub value_type: ValueType,
    /// Whether the column accepts NULL.
    pub optional: bool,
    /// Database column name when it differs from `name` (`@map`).
    pub mapped_name: Option<SmolStr>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Column {
    /// Create a new non-null column.
    pub fn new(name: Ident, value_type: ValueType, span: Span) -> Self {
        Self {
            name,
            value_type,
            optional: false,
            mapped_name: None,
            documentation: None,
            span,
        }
    }

    /// Get the attribute name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the database column name (from `@map` or the attribute name).
    pub fn column_name(&self) -> &str {
        self.mapped_name.as_deref().unwrap_or_else(|| self.name())
    }

    /// Mark the column as nullable.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Map the column onto a different database name.
    pub fn mapped(mut self, column: impl Into<SmolStr>) -> Self {
        self.mapped_name = Some(column.into());
        self
    }

    /// Set documentation.
    pub fn with_documentation(mut self, doc: Documentation) -> Self {
        self.documentation = Some(doc);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_defaults_to_attribute() {
        let col = Column::new(Ident::synthetic("name"), ValueType::String, Span::default());
        assert_eq!(col.column_name(), "name");
        assert!(!col.optional);
    }

    #[test]
    fn test_mapped_column() {
        let col = Column::new(Ident::synthetic("nick"), ValueType::String, Span::default())
            .mapped("nickname")
            .optional();
        assert_eq!(col.name(), "nick");
        assert_eq!(col.column_name(), "nickname");
        assert!(col.optional);
    }
}
