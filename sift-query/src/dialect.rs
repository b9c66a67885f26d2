//! SQL dialect descriptors.
//!
//! A [`Dialect`] is a plain value describing how one backend spells
//! identifiers, string and boolean literals, and case-insensitive matching.
//! The emitter consults it for every backend-specific decision and never
//! looks at the dialect's name.
//!
//! ```rust
//! use sift_query::Dialect;
//!
//! let pg = Dialect::postgres();
//! assert_eq!(pg.qualify("people", "name"), r#""people"."name""#);
//! assert_eq!(pg.bool_literal(true), "TRUE");
//!
//! let mysql = Dialect::mysql();
//! assert_eq!(mysql.qualify("people", "name"), "`people`.`name`");
//! assert_eq!(mysql.quote_string(r"a\b"), r"'a\\b'");
//!
//! assert_eq!(Dialect::sqlite().bool_literal(false), "0");
//! ```

use sift_schema::DialectProvider;

/// How identifiers are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierQuote {
    /// `"name"` (ANSI, PostgreSQL, SQLite).
    DoubleQuote,
    /// `` `name` `` (MySQL).
    Backtick,
    /// `[name]` (SQL Server).
    Bracket,
}

/// How case-insensitive pattern matching is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseInsensitiveMatch {
    /// The backend has `ILIKE`.
    Native,
    /// `LOWER(col) LIKE LOWER(pattern)`.
    FoldCase,
    /// Plain `LIKE`; case sensitivity is whatever the backend's collation gives.
    Plain,
}

/// Rendering rules for one SQL backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    name: &'static str,
    identifier_quote: IdentifierQuote,
    true_literal: &'static str,
    false_literal: &'static str,
    case_insensitive: CaseInsensitiveMatch,
    backslash_escapes: bool,
    like_escape_clause: bool,
    text_type: &'static str,
}

impl Dialect {
    /// PostgreSQL.
    pub const fn postgres() -> Self {
        Self {
            name: "postgresql",
            identifier_quote: IdentifierQuote::DoubleQuote,
            true_literal: "TRUE",
            false_literal: "FALSE",
            case_insensitive: CaseInsensitiveMatch::Native,
            backslash_escapes: false,
            like_escape_clause: false,
            text_type: "TEXT",
        }
    }

    /// MySQL / MariaDB.
    pub const fn mysql() -> Self {
        Self {
            name: "mysql",
            identifier_quote: IdentifierQuote::Backtick,
            true_literal: "TRUE",
            false_literal: "FALSE",
            case_insensitive: CaseInsensitiveMatch::Plain,
            backslash_escapes: true,
            like_escape_clause: false,
            text_type: "CHAR",
        }
    }

    /// SQLite.
    ///
    /// SQLite's `LIKE` has no default escape character, so patterns carry an
    /// explicit `ESCAPE '\'`.
    pub const fn sqlite() -> Self {
        Self {
            name: "sqlite",
            identifier_quote: IdentifierQuote::DoubleQuote,
            true_literal: "1",
            false_literal: "0",
            case_insensitive: CaseInsensitiveMatch::Plain,
            backslash_escapes: false,
            like_escape_clause: true,
            text_type: "TEXT",
        }
    }

    /// Start a custom dialect from ANSI defaults.
    ///
    /// ```rust
    /// use sift_query::dialect::{CaseInsensitiveMatch, Dialect, IdentifierQuote};
    ///
    /// const MSSQL: Dialect = Dialect::builder("mssql")
    ///     .identifier_quote(IdentifierQuote::Bracket)
    ///     .booleans("1", "0")
    ///     .case_insensitive(CaseInsensitiveMatch::FoldCase)
    ///     .text_type("NVARCHAR(MAX)")
    ///     .build();
    ///
    /// assert_eq!(MSSQL.qualify("people", "name"), "[people].[name]");
    /// ```
    pub const fn builder(name: &'static str) -> DialectBuilder {
        DialectBuilder {
            dialect: Self {
                name,
                identifier_quote: IdentifierQuote::DoubleQuote,
                true_literal: "TRUE",
                false_literal: "FALSE",
                case_insensitive: CaseInsensitiveMatch::Plain,
                backslash_escapes: false,
                like_escape_clause: true,
                text_type: "TEXT",
            },
        }
    }

    /// Dialect name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Case-insensitive matching strategy.
    pub fn case_insensitive(&self) -> CaseInsensitiveMatch {
        self.case_insensitive
    }

    /// Whether `LIKE` patterns carry an explicit `ESCAPE` clause.
    pub fn like_escape_clause(&self) -> bool {
        self.like_escape_clause
    }

    /// Quote a single identifier.
    pub fn quote_identifier(&self, name: &str) -> String {
        match self.identifier_quote {
            IdentifierQuote::DoubleQuote => format!("\"{}\"", name.replace('"', "\"\"")),
            IdentifierQuote::Backtick => format!("`{}`", name.replace('`', "``")),
            IdentifierQuote::Bracket => format!("[{}]", name.replace(']', "]]")),
        }
    }

    /// Quote `table.column`.
    pub fn qualify(&self, table: &str, column: &str) -> String {
        format!("{}.{}", self.quote_identifier(table), self.quote_identifier(column))
    }

    /// Quote a string literal.
    pub fn quote_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' if self.backslash_escapes => out.push_str("\\\\"),
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Boolean literal.
    pub fn bool_literal(&self, value: bool) -> &'static str {
        if value { self.true_literal } else { self.false_literal }
    }

    /// Cast an expression to the dialect's text type.
    pub fn cast_to_text(&self, expr: &str) -> String {
        format!("CAST({} AS {})", expr, self.text_type)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::postgres()
    }
}

impl From<DialectProvider> for Dialect {
    fn from(provider: DialectProvider) -> Self {
        match provider {
            DialectProvider::PostgreSql => Self::postgres(),
            DialectProvider::MySql => Self::mysql(),
            DialectProvider::Sqlite => Self::sqlite(),
        }
    }
}

/// Builder for custom dialects; usable in `const` context.
#[derive(Debug, Clone, Copy)]
pub struct DialectBuilder {
    dialect: Dialect,
}

impl DialectBuilder {
    /// Identifier quoting.
    pub const fn identifier_quote(mut self, quote: IdentifierQuote) -> Self {
        self.dialect.identifier_quote = quote;
        self
    }

    /// Boolean literals.
    pub const fn booleans(mut self, true_literal: &'static str, false_literal: &'static str) -> Self {
        self.dialect.true_literal = true_literal;
        self.dialect.false_literal = false_literal;
        self
    }

    /// Case-insensitive matching strategy.
    pub const fn case_insensitive(mut self, strategy: CaseInsensitiveMatch) -> Self {
        self.dialect.case_insensitive = strategy;
        self
    }

    /// Double backslashes inside string literals.
    pub const fn backslash_escapes(mut self, enabled: bool) -> Self {
        self.dialect.backslash_escapes = enabled;
        self
    }

    /// Append `ESCAPE '\'` to pattern matches.
    pub const fn like_escape_clause(mut self, enabled: bool) -> Self {
        self.dialect.like_escape_clause = enabled;
        self
    }

    /// Type used by [`Dialect::cast_to_text`].
    pub const fn text_type(mut self, text_type: &'static str) -> Self {
        self.dialect.text_type = text_type;
        self
    }

    /// Finish the dialect.
    pub const fn build(self) -> Dialect {
        self.dialect
    }
}
