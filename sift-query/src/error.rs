//! Error types for predicate parsing and condition compilation.
//!
//! Errors are grouped by phase:
//! - [`ParseError`]: the predicate key could not be split into attribute and operator
//! - [`CompileError`]: the attribute or value does not fit the operator
//! - [`SearchError`]: either of the above, a schema error, or malformed parameters
//!
//! Each error carries an [`ErrorCode`] for programmatic handling:
//! - 1xxx: predicate key errors
//! - 2xxx: compile errors
//! - 7xxx: schema and configuration errors
//!
//! ```rust
//! use sift_query::{ErrorCode, ParseError, SearchError};
//!
//! let err: SearchError = ParseError::UnknownOperator { key: "name_bogus".into() }.into();
//! assert_eq!(err.error_code(), ErrorCode::UnknownOperator);
//! assert_eq!(err.error_code().code(), "S1001");
//! ```

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use std::fmt;

use miette::Diagnostic;
use sift_schema::{SchemaError, ValueType};
use thiserror::Error;

/// Result type for predicate parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for condition compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// Result type for whole searches.
pub type SearchResult<T> = Result<T, SearchError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No registered operator suffix (S1001).
    UnknownOperator = 1001,
    /// Predicate key without an attribute (S1002).
    EmptyAttribute = 1002,
    /// Attribute not found by the resolver (S2001).
    UnknownAttribute = 2001,
    /// Operator not applicable to the column type (S2002).
    TypeMismatch = 2002,
    /// Value cannot be coerced for the operator (S2003).
    InvalidValueCoercion = 2003,
    /// Search parameters are not a flat object (S2004).
    InvalidParams = 2004,
    /// Schema or configuration error (S7001).
    Schema = 7001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "S1001").
    pub fn code(&self) -> String {
        format!("S{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnknownOperator => "Unknown predicate operator",
            Self::EmptyAttribute => "Predicate has no attribute",
            Self::UnknownAttribute => "Unknown attribute",
            Self::TypeMismatch => "Operator not applicable to attribute type",
            Self::InvalidValueCoercion => "Value cannot be coerced",
            Self::InvalidParams => "Invalid search parameters",
            Self::Schema => "Schema error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while splitting a predicate key.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The key does not end in a registered operator.
    #[error("unknown operator in predicate `{key}`")]
    #[diagnostic(
        code(sift::predicate::unknown_operator),
        help("predicate keys end in an operator such as `_eq`, `_cont`, `_null` or `_present`")
    )]
    UnknownOperator { key: String },

    /// The key has an operator but nothing in front of it.
    #[error("predicate `{key}` has no attribute")]
    #[diagnostic(code(sift::predicate::empty_attribute))]
    EmptyAttribute { key: String },
}

impl ParseError {
    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownOperator { .. } => ErrorCode::UnknownOperator,
            Self::EmptyAttribute { .. } => ErrorCode::EmptyAttribute,
        }
    }
}

/// Errors raised while compiling a parsed predicate into a condition.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum CompileError {
    /// The resolver knows no such attribute.
    #[error("unknown attribute `{path}`")]
    #[diagnostic(code(sift::compile::unknown_attribute))]
    UnknownAttribute { path: String },

    /// The operator does not apply to the column's declared type.
    #[error("operator `{operator}` cannot be applied to `{attribute}` of type {value_type}")]
    #[diagnostic(code(sift::compile::type_mismatch))]
    TypeMismatch {
        operator: &'static str,
        attribute: String,
        value_type: ValueType,
    },

    /// The supplied value cannot be coerced to what the operator needs.
    #[error("cannot use {value} as {expected} for `{attribute}_{operator}`")]
    #[diagnostic(code(sift::compile::invalid_value))]
    InvalidValueCoercion {
        operator: &'static str,
        attribute: String,
        expected: &'static str,
        value: String,
    },
}

impl CompileError {
    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownAttribute { .. } => ErrorCode::UnknownAttribute,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::InvalidValueCoercion { .. } => ErrorCode::InvalidValueCoercion,
        }
    }
}

/// Errors raised while building a whole search.
#[derive(Error, Debug, Diagnostic)]
pub enum SearchError {
    /// A predicate key failed to parse.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// A predicate failed to compile.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    /// The schema could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    /// Search parameters were not a flat object of scalars and lists.
    #[error("invalid search parameters: {message}")]
    #[diagnostic(code(sift::search::invalid_params))]
    InvalidParams { message: String },
}

impl SearchError {
    /// Get the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Compile(e) => e.error_code(),
            Self::Schema(_) => ErrorCode::Schema,
            Self::InvalidParams { .. } => ErrorCode::InvalidParams,
        }
    }

    /// Create an invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }
}
