//! Configuration file parsing for `sift.toml`.
//!
//! ```rust
//! use sift_schema::config::{DialectProvider, SiftConfig};
//!
//! let config = SiftConfig::from_str(r#"
//!     [dialect]
//!     provider = "mysql"
//!
//!     [search]
//!     combinator = "or"
//! "#).unwrap();
//!
//! assert_eq!(config.dialect.provider, DialectProvider::MySql);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};

/// Main configuration structure for `sift.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiftConfig {
    /// SQL dialect settings.
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Schema file configuration.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Search defaults.
    #[serde(default)]
    pub search: SearchConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl SiftConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(provider) = overrides.dialect.and_then(|d| d.provider) {
                self.dialect.provider = provider;
            }
            if let Some(search) = overrides.search {
                if let Some(combinator) = search.combinator {
                    self.search.combinator = combinator;
                }
                if let Some(ignore) = search.ignore_blank_strings {
                    self.search.ignore_blank_strings = ignore;
                }
            }
            if let Some(log) = overrides.debug.and_then(|d| d.log_predicates) {
                self.debug.log_predicates = log;
            }
        } else {
            tracing::warn!(environment = env, "No overrides configured for environment");
        }
        self
    }
}

/// Dialect configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialectConfig {
    /// Target SQL backend.
    #[serde(default)]
    pub provider: DialectProvider,
}

/// Supported SQL backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectProvider {
    /// PostgreSQL.
    #[default]
    #[serde(alias = "postgres")]
    PostgreSql,
    /// MySQL / MariaDB.
    #[serde(alias = "mariadb")]
    MySql,
    /// SQLite.
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl DialectProvider {
    /// Get the provider name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Schema file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Path to the schema file.
    #[serde(default = "default_schema_path")]
    pub path: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

fn default_schema_path() -> String {
    "schema.sift".to_string()
}

/// How non-empty fragments of a search are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    /// Every condition must hold.
    #[default]
    And,
    /// Any condition may hold.
    Or,
}

impl Combinator {
    /// SQL keyword for this combinator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Search defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// How conditions are combined.
    #[serde(default)]
    pub combinator: Combinator,

    /// Treat empty strings and empty lists like nil.
    #[serde(default = "default_true")]
    pub ignore_blank_strings: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            combinator: Combinator::default(),
            ignore_blank_strings: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Debug/logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log every compiled predicate at debug level.
    #[serde(default)]
    pub log_predicates: bool,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Dialect overrides.
    pub dialect: Option<DialectOverride>,

    /// Search overrides.
    pub search: Option<SearchOverride>,

    /// Debug overrides.
    pub debug: Option<DebugOverride>,
}

/// Dialect configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialectOverride {
    /// Override the provider.
    pub provider: Option<DialectProvider>,
}

/// Search configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchOverride {
    /// Override the combinator.
    pub combinator: Option<Combinator>,

    /// Override blank handling.
    pub ignore_blank_strings: Option<bool>,
}

/// Debug configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverride {
    /// Override log_predicates.
    pub log_predicates: Option<bool>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unset variables are left untouched.
fn expand_env_vars(content: &str) -> String {
    let re = match regex_lite::Regex::new(r"\$\{([^}]+)\}") {
        Ok(re) => re,
        Err(_) => return content.to_string(),
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiftConfig::default();
        assert_eq!(config.dialect.provider, DialectProvider::PostgreSql);
        assert_eq!(config.schema.path, "schema.sift");
        assert_eq!(config.search.combinator, Combinator::And);
        assert!(config.search.ignore_blank_strings);
        assert!(!config.debug.log_predicates);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = SiftConfig::from_str("").unwrap();
        assert_eq!(config.dialect.provider, DialectProvider::PostgreSql);
    }

    #[test]
    fn test_provider_aliases() {
        for (input, expected) in [
            ("postgres", DialectProvider::PostgreSql),
            ("postgresql", DialectProvider::PostgreSql),
            ("mariadb", DialectProvider::MySql),
            ("sqlite3", DialectProvider::Sqlite),
        ] {
            let toml = format!("[dialect]\nprovider = \"{}\"", input);
            let config = SiftConfig::from_str(&toml).unwrap();
            assert_eq!(config.dialect.provider, expected);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SiftConfig::from_str("[search]\nfuzzy = true").unwrap_err();
        assert!(matches!(err, SchemaError::TomlError { .. }));
    }

    #[test]
    fn test_environment_override() {
        let toml = r#"
            [dialect]
            provider = "postgresql"

            [environments.test.dialect]
            provider = "sqlite"

            [environments.test.search]
            combinator = "or"
        "#;

        let config = SiftConfig::from_str(toml).unwrap().with_environment("test");
        assert_eq!(config.dialect.provider, DialectProvider::Sqlite);
        assert_eq!(config.search.combinator, Combinator::Or);
        assert!(config.search.ignore_blank_strings);
    }

    #[test]
    fn test_env_var_expansion() {
        // SAFETY: This test runs single-threaded and we clean up after
        unsafe {
            std::env::set_var("SIFT_TEST_SCHEMA_PATH", "db/people.sift");
        }
        let expanded = expand_env_vars("path = \"${SIFT_TEST_SCHEMA_PATH}\"");
        assert_eq!(expanded, "path = \"db/people.sift\"");
        unsafe {
            std::env::remove_var("SIFT_TEST_SCHEMA_PATH");
        }
    }

    #[test]
    fn test_unset_env_var_left_alone() {
        let expanded = expand_env_vars("path = \"${SIFT_SURELY_UNSET_VAR}\"");
        assert_eq!(expanded, "path = \"${SIFT_SURELY_UNSET_VAR}\"");
    }
}
