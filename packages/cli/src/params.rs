use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use typepath_ast::Expression;

/// Category tag attached to every result of a search parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchParamType {
    Number,
    Date,
    String,
    Token,
    Reference,
    Composite,
    Quantity,
    Uri,
    Special,
}

impl fmt::Display for SearchParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchParamType::Number => "number",
            SearchParamType::Date => "date",
            SearchParamType::String => "string",
            SearchParamType::Token => "token",
            SearchParamType::Reference => "reference",
            SearchParamType::Composite => "composite",
            SearchParamType::Quantity => "quantity",
            SearchParamType::Uri => "uri",
            SearchParamType::Special => "special",
        })
    }
}

/// A search parameter whose expression has already been parsed into a tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameterDefinition {
    pub name: String,
    pub resource_type: String,
    #[serde(rename = "type")]
    pub param_type: SearchParamType,
    pub expression: Expression,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDefinition {
    #[serde(rename = "type")]
    pub param_type: SearchParamType,
    pub expression: Expression,
}

impl SearchParameterDefinition {
    /// Components as `(category, expression)` pairs, in declaration order
    pub fn component_pairs(&self) -> Vec<(SearchParamType, &Expression)> {
        self.components
            .iter()
            .map(|component| (component.param_type, &component.expression))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Many(Vec<SearchParameterDefinition>),
    One(Box<SearchParameterDefinition>),
}

/// Parse a definitions document holding either one definition or an array
pub fn parse_definitions(json: &str) -> Result<Vec<SearchParameterDefinition>> {
    let file: DefinitionFile = serde_json::from_str(json)?;

    Ok(match file {
        DefinitionFile::Many(definitions) => definitions,
        DefinitionFile::One(definition) => vec![*definition],
    })
}

pub fn load_definitions(path: &Path) -> Result<Vec<SearchParameterDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read parameter file {}", path.display()))?;

    parse_definitions(&content)
        .with_context(|| format!("Invalid parameter file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "name": "family",
        "resourceType": "Patient",
        "type": "string",
        "expression": {
            "child": {
                "focus": { "child": { "focus": { "axis": "this" }, "name": "Patient" } },
                "name": "name"
            }
        }
    }"#;

    #[test]
    fn test_single_definition() {
        let definitions = parse_definitions(SINGLE).unwrap();

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "family");
        assert_eq!(definitions[0].resource_type, "Patient");
        assert_eq!(definitions[0].param_type, SearchParamType::String);
        assert_eq!(definitions[0].expression, Expression::path("Patient.name"));
        assert!(definitions[0].components.is_empty());
    }

    #[test]
    fn test_definition_array() {
        let json = format!("[{}, {}]", SINGLE, SINGLE);
        let definitions = parse_definitions(&json).unwrap();

        assert_eq!(definitions.len(), 2);
    }

    #[test]
    fn test_composite_components() {
        let json = r#"{
            "name": "component-code-value-quantity",
            "resourceType": "Observation",
            "type": "composite",
            "expression": { "child": { "focus": { "axis": "this" }, "name": "component" } },
            "components": [
                { "type": "token", "expression": { "child": { "focus": { "axis": "this" }, "name": "code" } } },
                { "type": "quantity", "expression": { "child": { "focus": { "axis": "this" }, "name": "value" } } }
            ]
        }"#;

        let definitions = parse_definitions(json).unwrap();
        let pairs = definitions[0].component_pairs();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, SearchParamType::Token);
        assert_eq!(pairs[1].0, SearchParamType::Quantity);
        assert_eq!(*pairs[1].1, Expression::path("value"));
    }

    #[test]
    fn test_unknown_param_type_is_rejected() {
        let json = SINGLE.replace("\"string\"", "\"fuzzy\"");
        assert!(parse_definitions(&json).is_err());
    }

    #[test]
    fn test_param_type_display_matches_serde() {
        for param_type in [SearchParamType::Date, SearchParamType::Uri, SearchParamType::Composite] {
            let json = serde_json::to_string(&param_type).unwrap();
            assert_eq!(json, format!("\"{}\"", param_type));
        }
    }
}
