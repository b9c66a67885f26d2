//! Abstract Syntax Tree (AST) types for Sift schemas.
//!
//! This module contains all the types that represent a parsed Sift schema.

mod attribute;
mod column;
mod model;
mod schema;
mod types;

pub use attribute::*;
pub use column::*;
pub use model::*;
pub use schema::*;
pub use types::*;
