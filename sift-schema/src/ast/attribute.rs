//! Attribute definitions for the Sift schema AST.

use serde::{Deserialize, Serialize};

use super::{Ident, Span};

/// An attribute attached to a model or column (`@map("people")`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@` prefix.
    pub name: Ident,
    /// The single string argument, if any.
    pub argument: Option<String>,
    /// Source location.
    pub span: Span,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: Ident, argument: Option<String>, span: Span) -> Self {
        Self {
            name,
            argument,
            span,
        }
    }

    /// Check if this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_str() == name
    }
}

/// Attributes understood by the schema parser.
pub const KNOWN_ATTRIBUTES: &[&str] = &["map"];
