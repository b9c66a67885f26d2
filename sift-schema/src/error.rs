//! Error types for schema parsing, resolution and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading a schema or configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(sift::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error in the schema file.
    #[error("syntax error in schema")]
    #[diagnostic(code(sift::schema::syntax_error))]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("error here")]
        span: miette::SourceSpan,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(sift::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Unknown type reference.
    #[error("unknown type `{type_name}` in `{model}.{column}`")]
    #[diagnostic(
        code(sift::schema::unknown_type),
        help("supported types: Boolean, String, Text, Int, BigInt, Float, Decimal, Date, DateTime, Time, Uuid, Json, Bytes")
    )]
    UnknownType {
        model: String,
        column: String,
        type_name: String,
    },

    /// Invalid attribute.
    #[error("invalid attribute `@{attribute}`: {message}")]
    #[diagnostic(code(sift::schema::invalid_attribute))]
    InvalidAttribute { attribute: String, message: String },

    /// Model or table lookup failed.
    #[error("unknown model `{name}`")]
    #[diagnostic(code(sift::schema::unknown_model))]
    UnknownModel { name: String },

    /// The parse tree did not have the shape the grammar promises.
    #[error("malformed parse tree: expected {expected}")]
    #[diagnostic(code(sift::schema::malformed_tree))]
    MalformedTree { expected: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(sift::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaError {
    /// Create a syntax error with source location.
    pub fn syntax(
        src: impl Into<String>,
        offset: usize,
        len: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            src: src.into(),
            span: (offset, len).into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unknown type error.
    pub fn unknown_type(
        model: impl Into<String>,
        column: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            model: model.into(),
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a malformed parse tree error.
    pub fn malformed(expected: impl Into<String>) -> Self {
        Self::MalformedTree {
            expected: expected.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}
