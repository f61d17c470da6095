use serde::{Deserialize, Serialize};

/// Serialized form of a model: the list of every type it declares.
///
/// ```json
/// {
///   "types": [
///     { "name": "Patient", "kind": "resource", "fields": [
///         { "name": "name", "type": "HumanName" },
///         { "name": "deceased", "choice": ["boolean", "dateTime"] }
///     ] },
///     { "name": "HumanName" },
///     { "name": "boolean", "kind": "primitive" },
///     { "name": "dateTime", "kind": "primitive" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

/// Resource types are the only ones a path may start from by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Resource,
    #[default]
    Complex,
    Primitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub element: ElementDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementDefinition {
    Single {
        #[serde(rename = "type")]
        type_name: String,
    },
    Choice {
        choice: Vec<String>,
    },
}

impl ElementDefinition {
    /// Every type name the element refers to
    pub fn referenced_types(&self) -> &[String] {
        match self {
            ElementDefinition::Single { type_name } => std::slice::from_ref(type_name),
            ElementDefinition::Choice { choice } => choice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definition() {
        let json = r#"{
            "types": [
                { "name": "Observation", "kind": "resource", "fields": [
                    { "name": "code", "type": "CodeableConcept" },
                    { "name": "value", "choice": ["Quantity", "string"] }
                ] },
                { "name": "CodeableConcept" }
            ]
        }"#;

        let model: ModelDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(model.types.len(), 2);

        let observation = &model.types[0];
        assert_eq!(observation.kind, TypeKind::Resource);
        assert_eq!(
            observation.fields[0].element,
            ElementDefinition::Single {
                type_name: "CodeableConcept".to_string()
            }
        );
        assert_eq!(
            observation.fields[1].element.referenced_types(),
            &["Quantity".to_string(), "string".to_string()]
        );

        assert_eq!(model.types[1].kind, TypeKind::Complex);
        assert!(model.types[1].fields.is_empty());
    }

    #[test]
    fn test_field_without_type_is_rejected() {
        let json = r#"{ "types": [ { "name": "A", "fields": [ { "name": "x" } ] } ] }"#;
        assert!(serde_json::from_str::<ModelDefinition>(json).is_err());
    }
}
