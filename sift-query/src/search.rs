//! Batches of predicates.
//!
//! A [`Search`] holds `(key, value)` pairs in caller order, bound to an
//! attribute resolver and a dialect. Compiling it fails fast on the first bad
//! predicate, so a typo never silently widens a query.
//!
//! ```rust
//! use sift_query::{Dialect, Search};
//! use sift_schema::{Model, ValueType};
//!
//! let people = Model::named("Person")
//!     .with_table("people")
//!     .with_column("name", ValueType::String)
//!     .with_column("awesome", ValueType::Boolean);
//!
//! let search = Search::new(&people, Dialect::postgres())
//!     .with("name_cont", "ric")
//!     .with("awesome_eq", true)
//!     .with("name_null", None::<bool>);
//!
//! assert_eq!(
//!     search.where_clause()?.as_deref(),
//!     Some(r#"WHERE "people"."name" ILIKE '%ric%' AND "people"."awesome" = TRUE"#)
//! );
//! # Ok::<(), sift_query::SearchError>(())
//! ```

use serde_json::Value as JsonValue;
use sift_schema::{AttributeResolver, Combinator, SiftConfig};
use tracing::{debug, info};

use crate::condition::{self, CompileOptions, Condition};
use crate::dialect::Dialect;
use crate::error::{CompileError, SearchError, SearchResult};
use crate::predicate::ParsedPredicate;
use crate::sift_debug;
use crate::value::RawValue;

/// Options for a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// How non-empty fragments are joined.
    pub combinator: Combinator,
    /// Treat empty strings and empty lists like nil.
    pub ignore_blank_strings: bool,
    /// Log each compiled predicate at info level.
    pub log_predicates: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            combinator: Combinator::And,
            ignore_blank_strings: true,
            log_predicates: false,
        }
    }
}

impl From<&SiftConfig> for SearchOptions {
    fn from(config: &SiftConfig) -> Self {
        Self {
            combinator: config.search.combinator,
            ignore_blank_strings: config.search.ignore_blank_strings,
            log_predicates: config.debug.log_predicates,
        }
    }
}

/// An ordered batch of predicates.
#[derive(Debug, Clone)]
pub struct Search<R> {
    resolver: R,
    dialect: Dialect,
    options: SearchOptions,
    predicates: Vec<(String, RawValue)>,
}

impl<R: AttributeResolver> Search<R> {
    /// Create an empty search.
    pub fn new(resolver: R, dialect: Dialect) -> Self {
        Self {
            resolver,
            dialect,
            options: SearchOptions::default(),
            predicates: Vec::new(),
        }
    }

    /// Create an empty search using the dialect and defaults from a config.
    pub fn from_config(resolver: R, config: &SiftConfig) -> Self {
        Self::new(resolver, Dialect::from(config.dialect.provider)).with_options(config.into())
    }

    /// Replace the options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a search from a flat JSON object of `key: value` pairs.
    ///
    /// Keys keep the object's iteration order.
    pub fn from_params(resolver: R, dialect: Dialect, params: &JsonValue) -> SearchResult<Self> {
        let object = params
            .as_object()
            .ok_or_else(|| SearchError::invalid_params("expected an object of predicates"))?;

        let mut search = Self::new(resolver, dialect);
        for (key, value) in object {
            search.add(key.clone(), RawValue::try_from(value.clone())?);
        }
        Ok(search)
    }

    /// Append a predicate.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<RawValue>) -> &mut Self {
        self.predicates.push((key.into(), value.into()));
        self
    }

    /// Append a predicate, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.add(key, value);
        self
    }

    /// The dialect used for rendering.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Current options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Number of predicates, including ones that will compile to nothing.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Check if no predicates were added.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Compile every predicate in order, stopping at the first error.
    pub fn conditions(&self) -> SearchResult<Vec<Condition>> {
        let compile_options = CompileOptions {
            ignore_blank: self.options.ignore_blank_strings,
        };

        self.predicates
            .iter()
            .map(|(key, value)| compile_key_with(&self.resolver, key, value, compile_options))
            .collect()
    }

    /// Rendered non-empty fragments, in order.
    pub fn fragments(&self) -> SearchResult<Vec<String>> {
        let fragments: Vec<String> = self
            .conditions()?
            .iter()
            .zip(&self.predicates)
            .filter(|(condition, _)| !condition.is_empty())
            .map(|(condition, (key, _))| {
                let sql = condition.render(&self.dialect);
                if self.options.log_predicates {
                    info!(key = %key, sql = %sql, "compiled predicate");
                }
                sql
            })
            .collect();
        Ok(fragments)
    }

    /// The combined condition without the `WHERE` keyword, or `None` if every
    /// predicate was empty.
    pub fn condition_sql(&self) -> SearchResult<Option<String>> {
        let fragments = self.fragments()?;
        if fragments.is_empty() {
            debug!(predicates = self.predicates.len(), "search produced no conditions");
            return Ok(None);
        }
        let separator = format!(" {} ", self.options.combinator.as_sql());
        Ok(Some(fragments.join(&separator)))
    }

    /// `WHERE ...`, or `None` if every predicate was empty.
    pub fn where_clause(&self) -> SearchResult<Option<String>> {
        Ok(self.condition_sql()?.map(|sql| format!("WHERE {}", sql)))
    }
}

/// Parse, resolve and compile one predicate with default options.
///
/// ```rust
/// use sift_query::{compile_key, Dialect, RawValue};
/// use sift_schema::{Model, ValueType};
///
/// let people = Model::named("Person")
///     .with_table("people")
///     .with_column("name", ValueType::String);
///
/// let condition = compile_key(&people, "name_present", &RawValue::from(false))?;
/// assert_eq!(
///     condition.render(&Dialect::postgres()),
///     r#"("people"."name" IS NULL OR "people"."name" = '')"#
/// );
/// # Ok::<(), sift_query::SearchError>(())
/// ```
pub fn compile_key<R: AttributeResolver + ?Sized>(
    resolver: &R,
    key: &str,
    value: &RawValue,
) -> SearchResult<Condition> {
    compile_key_with(resolver, key, value, CompileOptions::default())
}

/// Parse, resolve and compile one predicate.
pub fn compile_key_with<R: AttributeResolver + ?Sized>(
    resolver: &R,
    key: &str,
    value: &RawValue,
    options: CompileOptions,
) -> SearchResult<Condition> {
    let parsed = ParsedPredicate::parse(key)?;
    let attribute = resolver
        .resolve(&parsed.path())
        .ok_or_else(|| CompileError::UnknownAttribute {
            path: parsed.attribute.to_string(),
        })?;
    sift_debug!(key = key, attribute = %attribute, "resolved predicate");

    Ok(condition::compile_with(&attribute, &parsed, value, options)?)
}
