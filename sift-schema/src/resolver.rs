//! Attribute resolution.
//!
//! Predicate compilation never looks at storage. Everything it knows about a
//! column comes through [`AttributeResolver`], which turns the attribute path
//! of a predicate key (`name`, `author.name`, `author__name`) into an
//! [`AttributeRef`].
//!
//! ```rust
//! use sift_schema::{AttributeResolver, Model, ValueType};
//!
//! let person = Model::named("Person")
//!     .with_table("people")
//!     .with_column("awesome", ValueType::Boolean);
//!
//! let attr = person.resolve(&["awesome"]).unwrap();
//! assert_eq!(attr.table(), "people");
//! assert_eq!(attr.value_type(), ValueType::Boolean);
//! assert!(person.resolve(&["missing"]).is_none());
//! ```

use smol_str::SmolStr;
use tracing::debug;

use crate::ast::{Model, ValueType};

/// A resolved column: qualified table, column name and declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    table: SmolStr,
    column: SmolStr,
    value_type: ValueType,
}

impl AttributeRef {
    /// Create a new attribute reference.
    pub fn new(table: impl Into<SmolStr>, column: impl Into<SmolStr>, value_type: ValueType) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            value_type,
        }
    }

    /// Table (or alias) the column belongs to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Database column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl std::fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Resolves attribute paths against a base table.
///
/// Implementations must be pure lookups; they are called once per predicate.
pub trait AttributeResolver {
    /// Resolve a path, returning `None` when no such column exists.
    fn resolve(&self, path: &[&str]) -> Option<AttributeRef>;
}

impl<R: AttributeResolver + ?Sized> AttributeResolver for &R {
    fn resolve(&self, path: &[&str]) -> Option<AttributeRef> {
        (**self).resolve(path)
    }
}

impl<R: AttributeResolver + ?Sized> AttributeResolver for Box<R> {
    fn resolve(&self, path: &[&str]) -> Option<AttributeRef> {
        (**self).resolve(path)
    }
}

impl AttributeResolver for Model {
    fn resolve(&self, path: &[&str]) -> Option<AttributeRef> {
        match path {
            [name] => self.get_column(name).map(|column| {
                AttributeRef::new(self.table_name(), column.column_name(), column.value_type)
            }),
            _ => {
                // Association traversal belongs to the caller's ORM layer.
                debug!(model = self.name(), path = ?path, "multi-segment path not resolvable on a single model");
                None
            }
        }
    }
}
