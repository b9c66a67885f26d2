//! Pest grammar parser for Sift schema files.

use pest_derive::Parser;

/// The Sift schema parser.
#[derive(Parser)]
#[grammar = "parser/sift.pest"]
pub struct SiftParser;

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn test_parse_identifier() {
        assert!(SiftParser::parse(Rule::identifier, "parent_id").is_ok());
        assert!(SiftParser::parse(Rule::identifier, "1abc").is_err());
    }

    #[test]
    fn test_parse_column_type() {
        assert!(SiftParser::parse(Rule::column_type, "String?").is_ok());
        assert!(SiftParser::parse(Rule::column_type, "Boolean").is_ok());
    }

    #[test]
    fn test_parse_attribute() {
        assert!(SiftParser::parse(Rule::attribute, "@map(\"people\")").is_ok());
        assert!(SiftParser::parse(Rule::attribute, "@map( \"people\" )").is_ok());
    }

    #[test]
    fn test_parse_model() {
        let input = r#"model Person @map("people") {
            id   Int
            name String? @map("full_name")
        }"#;
        let result = SiftParser::parse(Rule::model_def, input);
        assert!(result.is_ok(), "Failed to parse model: {:?}", result.err());
    }
}
