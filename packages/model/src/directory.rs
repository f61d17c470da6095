use crate::definition::{ElementDefinition, ModelDefinition, TypeKind};
use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::error::{ModelError, ModelResult};
use crate::primitives::canonical_type_name;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Read-only catalog of structural types.
///
/// Implementations must be free of observable side effects: the resolver
/// shares one directory across every branch of a traversal.
pub trait TypeDirectory {
    /// Look up a type a path may start from by name (`Patient.name`)
    fn resolve_root_type_name(&self, name: &str) -> Option<TypeDescriptor>;

    /// Declared fields of `type_`, in declaration order. Unknown types have none.
    fn fields(&self, type_: &TypeDescriptor) -> &[FieldDescriptor];

    /// Look up any declared type by its exact nominal name
    fn find_by_nominal_name(&self, name: &str) -> Option<TypeDescriptor>;

    fn field(&self, type_: &TypeDescriptor, name: &str) -> Option<&FieldDescriptor> {
        self.fields(type_).iter().find(|field| field.name == name)
    }

    /// Resolve a type name as written in a cast, honouring the primitive
    /// keyword table before falling back to the nominal name.
    fn resolve_type_name(&self, name: &str) -> Option<TypeDescriptor> {
        let nominal = canonical_type_name(name).unwrap_or(name);
        self.find_by_nominal_name(nominal)
    }
}

#[derive(Debug, Clone)]
struct TypeEntry {
    descriptor: TypeDescriptor,
    kind: TypeKind,
    fields: Vec<FieldDescriptor>,
}

/// In-memory [`TypeDirectory`] built from a validated [`ModelDefinition`]
#[derive(Debug, Clone, Default)]
pub struct ModelDirectory {
    types: HashMap<String, TypeEntry>,
}

impl ModelDirectory {
    /// Validate a definition and index it. Every type a field refers to must
    /// itself be declared.
    pub fn from_definition(definition: ModelDefinition) -> ModelResult<Self> {
        let mut declared = HashSet::new();
        for type_def in &definition.types {
            if !declared.insert(type_def.name.as_str()) {
                return Err(ModelError::DuplicateType(type_def.name.clone()));
            }
        }

        let mut types = HashMap::with_capacity(definition.types.len());

        for type_def in &definition.types {
            let mut seen_fields = HashSet::new();
            let mut fields = Vec::with_capacity(type_def.fields.len());

            for field_def in &type_def.fields {
                if !seen_fields.insert(field_def.name.as_str()) {
                    return Err(ModelError::DuplicateField {
                        type_name: type_def.name.clone(),
                        field: field_def.name.clone(),
                    });
                }

                if let ElementDefinition::Choice { choice } = &field_def.element {
                    if choice.is_empty() {
                        return Err(ModelError::EmptyChoice {
                            type_name: type_def.name.clone(),
                            field: field_def.name.clone(),
                        });
                    }
                }

                for referenced in field_def.element.referenced_types() {
                    if !declared.contains(referenced.as_str()) {
                        return Err(ModelError::UnknownFieldType {
                            type_name: type_def.name.clone(),
                            field: field_def.name.clone(),
                            referenced: referenced.clone(),
                        });
                    }
                }

                let field = match &field_def.element {
                    ElementDefinition::Single { type_name } => {
                        FieldDescriptor::concrete(&field_def.name, TypeDescriptor::new(type_name))
                    }
                    ElementDefinition::Choice { choice } => FieldDescriptor::polymorphic(
                        &field_def.name,
                        choice.iter().map(TypeDescriptor::new).collect(),
                    ),
                };
                fields.push(field);
            }

            types.insert(
                type_def.name.clone(),
                TypeEntry {
                    descriptor: TypeDescriptor::new(&type_def.name),
                    kind: type_def.kind,
                    fields,
                },
            );
        }

        tracing::debug!("Loaded model with {} types", types.len());

        Ok(Self { types })
    }

    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let definition: ModelDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    /// Load a model definition file
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|entry| entry.kind)
    }

    /// Number of declared types of each kind
    pub fn count_by_kind(&self, kind: TypeKind) -> usize {
        self.types.values().filter(|entry| entry.kind == kind).count()
    }
}

impl TypeDirectory for ModelDirectory {
    fn resolve_root_type_name(&self, name: &str) -> Option<TypeDescriptor> {
        self.types
            .get(name)
            .filter(|entry| entry.kind == TypeKind::Resource)
            .map(|entry| entry.descriptor.clone())
    }

    fn fields(&self, type_: &TypeDescriptor) -> &[FieldDescriptor] {
        self.types
            .get(type_.name())
            .map(|entry| entry.fields.as_slice())
            .unwrap_or(&[])
    }

    fn find_by_nominal_name(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|entry| entry.descriptor.clone())
    }
}
