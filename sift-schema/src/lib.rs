//! # sift-schema
//!
//! Schema model and attribute resolution for Sift.
//!
//! This crate provides:
//! - Column value types ([`ValueType`]) and the [`AttributeRef`] handed to the
//!   predicate compiler
//! - The [`AttributeResolver`] seam, implemented by [`Model`]
//! - A parser for `.sift` schema files
//! - Configuration parser for `sift.toml` files
//!
//! ## Example
//!
//! ```rust
//! use sift_schema::{AttributeResolver, ValueType, parse_schema};
//!
//! let schema = parse_schema(r#"
//!     model Person @map("people") {
//!         name    String?
//!         awesome Boolean?
//!     }
//! "#)?;
//!
//! let person = schema.model("Person")?;
//! let attr = person.resolve(&["awesome"]).expect("column exists");
//! assert_eq!(attr.value_type(), ValueType::Boolean);
//! # Ok::<(), sift_schema::SchemaError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod resolver;

pub use ast::*;
pub use config::{Combinator, DialectProvider, SiftConfig};
pub use error::{SchemaError, SchemaResult};
pub use parser::{parse_schema, parse_schema_file};
pub use resolver::{AttributeRef, AttributeResolver};
