//! Model definitions for the Sift schema AST.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Column, Documentation, Ident, Span, ValueType};

/// A model definition (maps to a database table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: Ident,
    /// Model columns, in declaration order.
    pub columns: IndexMap<SmolStr, Column>,
    /// Database table name when it differs from the model name (`@map`).
    pub mapped_table: Option<SmolStr>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Model {
    /// Create a new model.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            columns: IndexMap::new(),
            mapped_table: None,
            documentation: None,
            span,
        }
    }

    /// Create a model outside of a schema file.
    ///
    /// ```rust
    /// use sift_schema::{Model, ValueType};
    ///
    /// let person = Model::named("Person")
    ///     .with_table("people")
    ///     .with_column("name", ValueType::String);
    /// assert_eq!(person.table_name(), "people");
    /// ```
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::new(Ident::synthetic(name), Span::default())
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the database table name (from `@map` or the model name).
    pub fn table_name(&self) -> &str {
        self.mapped_table.as_deref().unwrap_or_else(|| self.name())
    }

    /// Add a column to the model, replacing any column with the same name.
    pub fn add_column(&mut self, column: Column) {
        self.columns.insert(column.name.name.clone(), column);
    }

    /// Get a column by attribute name.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Map the model onto a database table.
    pub fn with_table(mut self, table: impl Into<SmolStr>) -> Self {
        self.mapped_table = Some(table.into());
        self
    }

    /// Add a nullable column and return the model.
    pub fn with_column(mut self, name: impl Into<SmolStr>, value_type: ValueType) -> Self {
        self.add_column(Column::new(Ident::synthetic(name), value_type, Span::default()).optional());
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
    fn test_table_name_defaults_to_model_name() {
        let model = Model::named("people");
        assert_eq!(model.table_name(), "people");
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let model = Model::named("Person")
            .with_table("people")
            .with_column("name", ValueType::String)
            .with_column("awesome", ValueType::Boolean)
            .with_column("id", ValueType::Int);

        let names: Vec<_> = model.columns.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["name", "awesome", "id"]);
        assert!(model.has_column("awesome"));
        assert_eq!(
            model.get_column("awesome").map(|c| c.value_type),
            Some(ValueType::Boolean)
        );
    }
}
