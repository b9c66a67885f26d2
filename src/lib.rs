//! # Sift
//!
//! Compile string-keyed search predicates into SQL conditions.
//!
//! Sift provides:
//! - A predicate parser that splits keys like `name_not_cont` into attribute
//!   and operator
//! - A condition compiler that type-checks, coerces and escapes values
//! - Dialect-aware SQL rendering for PostgreSQL, MySQL and SQLite
//! - A small schema language and `sift.toml` configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use sift::prelude::*;
//! use sift::schema::parse_schema;
//!
//! let schema = parse_schema(r#"
//!     model Person @map("people") {
//!         id      Int
//!         name    String?
//!         awesome Boolean?
//!     }
//! "#)?;
//! let people = schema.model("Person")?;
//!
//! let search = Search::new(people, Dialect::postgres())
//!     .with("name_cont", "ric")
//!     .with("awesome_true", false);
//!
//! assert_eq!(
//!     search.where_clause()?.as_deref(),
//!     Some(r#"WHERE "people"."name" ILIKE '%ric%' AND "people"."awesome" != TRUE"#)
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema model, resolution and configuration.
pub mod schema {
    pub use sift_schema::*;
}

/// Predicate parsing, compilation and rendering.
pub mod query {
    pub use sift_query::*;
}

pub use sift_query::{
    Condition, Dialect, ParsedPredicate, RawValue, Search, SearchError, SearchResult, compile_key,
};
pub use sift_schema::{AttributeRef, AttributeResolver, SiftConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use sift_query::prelude::*;
    pub use sift_schema::{Model, Schema, SiftConfig, ValueType};
}
