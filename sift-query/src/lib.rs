//! # sift-query
//!
//! Predicate-to-SQL condition compiler.
//!
//! A predicate key such as `name_cont` or `awesome_not_true` names an
//! attribute and an operator. This crate:
//! - splits the key on the longest registered operator suffix ([`predicate`])
//! - checks the operator against the column type reported by an
//!   [`AttributeResolver`]
//! - coerces and escapes the value into a [`Condition`] ([`condition`])
//! - renders the condition for a target [`Dialect`] ([`sql`])
//!
//! Nil values compile to [`Condition::Empty`] and contribute no SQL.
//!
//! ## Single predicates
//!
//! ```rust
//! use sift_query::{compile_key, Dialect, RawValue};
//! use sift_schema::{Model, ValueType};
//!
//! let people = Model::named("Person")
//!     .with_table("people")
//!     .with_column("name", ValueType::String)
//!     .with_column("awesome", ValueType::Boolean);
//!
//! let present = compile_key(&people, "name_present", &RawValue::from(true))?;
//! assert_eq!(
//!     present.render(&Dialect::postgres()),
//!     r#"("people"."name" IS NOT NULL AND "people"."name" != '')"#
//! );
//!
//! let not_true = compile_key(&people, "awesome_not_true", &RawValue::from(true))?;
//! assert_eq!(not_true.render(&Dialect::sqlite()), r#""people"."awesome" != 1"#);
//!
//! let nothing = compile_key(&people, "awesome_eq", &RawValue::Null)?;
//! assert!(nothing.is_empty());
//! # Ok::<(), sift_query::SearchError>(())
//! ```
//!
//! ## Escaping
//!
//! `%`, `.` and `\` are backslash-escaped before the value is wrapped in
//! wildcards:
//!
//! ```rust
//! use sift_query::{compile_key, Dialect, RawValue};
//! use sift_schema::{Model, ValueType};
//!
//! let people = Model::named("Person")
//!     .with_table("people")
//!     .with_column("name", ValueType::String);
//!
//! let cont = compile_key(&people, "name_cont", &RawValue::from(r"%._\"))?;
//! assert_eq!(cont.render(&Dialect::postgres()), r#""people"."name" ILIKE '%\%\._\\%'"#);
//! assert_eq!(cont.render(&Dialect::mysql()), r"`people`.`name` LIKE '%\\%\\._\\\\%'");
//! # Ok::<(), sift_query::SearchError>(())
//! ```
//!
//! ## Batches
//!
//! See [`Search`] for compiling many predicates into one `WHERE` clause.

pub mod condition;
pub mod dialect;
pub mod error;
pub mod logging;
pub mod operator;
pub mod predicate;
pub mod search;
pub mod sql;
pub mod value;

pub use condition::{CompileOptions, Condition, NormalizedValue, Predicate, compile, compile_with};
pub use dialect::{CaseInsensitiveMatch, Dialect, DialectBuilder, IdentifierQuote};
pub use error::{
    CompileError, CompileResult, ErrorCode, ParseError, ParseResult, SearchError, SearchResult,
};
pub use operator::{Arity, Operator, Template, TypeClass};
pub use predicate::ParsedPredicate;
pub use search::{Search, SearchOptions, compile_key, compile_key_with};
pub use value::RawValue;

// Re-export the resolver seam so callers need only one import.
pub use sift_schema::{AttributeRef, AttributeResolver};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::condition::{Condition, compile};
    pub use crate::dialect::Dialect;
    pub use crate::error::{CompileError, ParseError, SearchError, SearchResult};
    pub use crate::predicate::ParsedPredicate;
    pub use crate::search::{Search, SearchOptions, compile_key};
    pub use crate::value::RawValue;
    pub use sift_schema::{AttributeRef, AttributeResolver};
}
