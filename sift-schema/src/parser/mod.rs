//! Schema parser for `.sift` files.
//!
//! ```rust
//! use sift_schema::parse_schema;
//!
//! let schema = parse_schema(r#"
//!     /// A person.
//!     model Person @map("people") {
//!         id      Int
//!         name    String?
//!         awesome Boolean?
//!     }
//! "#).unwrap();
//!
//! let person = schema.model("Person").unwrap();
//! assert_eq!(person.table_name(), "people");
//! assert_eq!(person.columns.len(), 3);
//! ```

mod grammar;

use std::path::Path;

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use smol_str::SmolStr;
use tracing::debug;

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};

pub use grammar::{Rule, SiftParser};

/// Parse a schema from a string.
pub fn parse_schema(input: &str) -> SchemaResult<Schema> {
    let mut pairs = SiftParser::parse(Rule::schema, input).map_err(|e| {
        let (offset, len) = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0),
            pest::error::InputLocation::Span((start, end)) => (start, end - start),
        };
        SchemaError::syntax(input.to_string(), offset, len, e.to_string())
    })?;

    let mut schema = Schema::new();
    let mut current_doc: Option<Documentation> = None;

    let schema_pair = next_pair(&mut pairs, "schema")?;

    for pair in schema_pair.into_inner() {
        match pair.as_rule() {
            Rule::documentation => current_doc = Some(parse_documentation(pair)),
            Rule::model_def => {
                let mut model = parse_model(pair)?;
                if let Some(doc) = current_doc.take() {
                    model = model.with_documentation(doc);
                }
                if schema.get_model(model.name()).is_some() {
                    return Err(SchemaError::duplicate("model", model.name()));
                }
                schema.add_model(model);
            }
            _ => {}
        }
    }

    debug!(models = schema.models.len(), "Parsed schema");
    Ok(schema)
}

/// Parse a schema from a file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content)
}

/// Take the next pair the grammar guarantees to be present.
fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> SchemaResult<Pair<'i, Rule>> {
    pairs.next().ok_or_else(|| SchemaError::malformed(expected))
}

fn parse_documentation(pair: Pair<'_, Rule>) -> Documentation {
    let span = Span::from(pair.as_span());
    let text = pair
        .into_inner()
        .map(|p| p.as_str().trim_start_matches("///").trim())
        .collect::<Vec<_>>()
        .join("\n");
    Documentation::new(text, span)
}

/// Parse a model definition.
fn parse_model(pair: Pair<'_, Rule>) -> SchemaResult<Model> {
    let span = Span::from(pair.as_span());
    let mut inner = pair.into_inner();

    let name_pair = next_pair(&mut inner, "model name")?;
    let name = Ident::new(name_pair.as_str(), Span::from(name_pair.as_span()));
    let mut model = Model::new(name, span);

    for item in inner {
        match item.as_rule() {
            Rule::attribute => {
                let attr = parse_attribute(item)?;
                model.mapped_table = Some(map_target(&attr)?);
            }
            Rule::column_def => {
                let column = parse_column(item, model.name())?;
                if model.has_column(column.name()) {
                    return Err(SchemaError::duplicate(
                        "column",
                        format!("{}.{}", model.name(), column.name()),
                    ));
                }
                model.add_column(column);
            }
            _ => {}
        }
    }

    Ok(model)
}

/// Parse a column definition.
fn parse_column(pair: Pair<'_, Rule>, model: &str) -> SchemaResult<Column> {
    let span = Span::from(pair.as_span());
    let mut documentation = None;
    let mut name = None;
    let mut value_type = None;
    let mut optional = false;
    let mut mapped_name = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::documentation => documentation = Some(parse_documentation(item)),
            Rule::identifier => name = Some(Ident::new(item.as_str(), Span::from(item.as_span()))),
            Rule::column_type => {
                let column_name = name.as_ref().map(|n| n.as_str()).unwrap_or_default();
                for part in item.into_inner() {
                    match part.as_rule() {
                        Rule::identifier => {
                            value_type = Some(ValueType::from_str(part.as_str()).ok_or_else(|| {
                                SchemaError::unknown_type(model, column_name, part.as_str())
                            })?);
                        }
                        Rule::optional_marker => optional = true,
                        _ => {}
                    }
                }
            }
            Rule::attribute => {
                let attr = parse_attribute(item)?;
                mapped_name = Some(map_target(&attr)?);
            }
            _ => {}
        }
    }

    let (Some(name), Some(value_type)) = (name, value_type) else {
        return Err(SchemaError::malformed(format!("column definition in model {}", model)));
    };

    let mut column = Column::new(name, value_type, span);
    column.optional = optional;
    column.mapped_name = mapped_name;
    column.documentation = documentation;
    Ok(column)
}

/// Parse an attribute (`@name("arg")`).
fn parse_attribute(pair: Pair<'_, Rule>) -> SchemaResult<Attribute> {
    let span = Span::from(pair.as_span());
    let mut inner = pair.into_inner();

    let name_pair = next_pair(&mut inner, "attribute name")?;
    let name = Ident::new(name_pair.as_str(), Span::from(name_pair.as_span()));

    let argument = inner
        .next()
        .and_then(|args| args.into_inner().next())
        .and_then(|literal| literal.into_inner().next())
        .map(|s| s.as_str().to_string());

    if !KNOWN_ATTRIBUTES.contains(&name.as_str()) {
        return Err(SchemaError::invalid_attribute(name.as_str(), "unknown attribute"));
    }

    Ok(Attribute::new(name, argument, span))
}

/// Extract the target of a `@map("...")` attribute.
fn map_target(attr: &Attribute) -> SchemaResult<SmolStr> {
    match attr.argument.as_deref() {
        Some(target) if !target.is_empty() => Ok(SmolStr::new(target)),
        _ => Err(SchemaError::invalid_attribute(
            attr.name.as_str(),
            "expected a non-empty string argument",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PEOPLE: &str = r#"
        /// People fixture.
        model Person @map("people") {
            id        Int
            parent_id Int?
            /// Display name.
            name      String?
            email     String?
            salary    Int?
            awesome   Boolean?
            life_start DateTime?
        }

        // Plain comments are ignored.
        model Note {
            body Text @map("content")
        }
    "#;

    #[test]
    fn test_parse_models() {
        let schema = parse_schema(PEOPLE).unwrap();
        let names: Vec<_> = schema.model_names().collect();
        assert_eq!(names, ["Person", "Note"]);
    }

    #[test]
    fn test_parse_columns() {
        let schema = parse_schema(PEOPLE).unwrap();
        let person = schema.model("Person").unwrap();

        assert_eq!(person.table_name(), "people");
        assert_eq!(person.columns.len(), 7);

        let id = person.get_column("id").unwrap();
        assert_eq!(id.value_type, ValueType::Int);
        assert!(!id.optional);

        let awesome = person.get_column("awesome").unwrap();
        assert_eq!(awesome.value_type, ValueType::Boolean);
        assert!(awesome.optional);
    }

    #[test]
    fn test_parse_documentation() {
        let schema = parse_schema(PEOPLE).unwrap();
        let person = schema.model("Person").unwrap();
        assert_eq!(
            person.documentation.as_ref().map(|d| d.text.as_str()),
            Some("People fixture.")
        );
        assert_eq!(
            person.get_column("name").and_then(|c| c.documentation.as_ref()).map(|d| d.text.as_str()),
            Some("Display name.")
        );
    }

    #[test]
    fn test_parse_column_map() {
        let schema = parse_schema(PEOPLE).unwrap();
        let note = schema.model("Note").unwrap();
        assert_eq!(note.table_name(), "Note");
        assert_eq!(note.get_column("body").unwrap().column_name(), "content");
    }

    #[test]
    fn test_unknown_type() {
        let err = parse_schema("model A { x Varchar }").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { ref type_name, .. } if type_name == "Varchar"));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = parse_schema("model A { x Int @unique }").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_duplicate_column() {
        let err = parse_schema("model A { x Int\n x String }").unwrap_err();
        assert!(matches!(err, SchemaError::Duplicate { ref kind, .. } if kind == "column"));
    }

    #[test]
    fn test_duplicate_model() {
        let err = parse_schema("model A { x Int }\nmodel A { y Int }").unwrap_err();
        assert!(matches!(err, SchemaError::Duplicate { ref kind, .. } if kind == "model"));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_schema("model { }").unwrap_err();
        assert!(matches!(err, SchemaError::SyntaxError { .. }));
    }

    #[test]
    fn test_exhausted_pairs_are_malformed() {
        let mut pairs = SiftParser::parse(Rule::identifier, "name").unwrap();
        let ident = next_pair(&mut pairs, "identifier").unwrap();
        assert_eq!(ident.as_str(), "name");

        let err = next_pair(&mut pairs, "model name").unwrap_err();
        assert!(matches!(err, SchemaError::MalformedTree { ref expected } if expected == "model name"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_schema_file("/definitely/not/here.sift").unwrap_err();
        assert!(matches!(err, SchemaError::IoError { .. }));
    }
}
