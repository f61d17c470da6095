use std::fmt;
use std::sync::Arc;

/// Handle for a nominal data type.
///
/// Two descriptors are equal exactly when they name the same type. Cloning is
/// a reference-count bump, so descriptors are passed around by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(Arc<str>);

impl TypeDescriptor {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// What a field holds at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Always the one declared type
    Concrete(TypeDescriptor),
    /// Any one of the listed types (a "choice" field)
    Polymorphic(Vec<TypeDescriptor>),
}

/// A declared field of a structural type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: ElementKind,
}

impl FieldDescriptor {
    pub fn concrete(name: impl Into<String>, type_: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::Concrete(type_),
        }
    }

    pub fn polymorphic(name: impl Into<String>, candidates: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: ElementKind::Polymorphic(candidates),
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        matches!(self.kind, ElementKind::Polymorphic(_))
    }

    /// Types the field may hold, in declaration order. A concrete field has
    /// exactly one candidate.
    pub fn candidates(&self) -> &[TypeDescriptor] {
        match &self.kind {
            ElementKind::Concrete(type_) => std::slice::from_ref(type_),
            ElementKind::Polymorphic(candidates) => candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_equality_is_by_name() {
        assert_eq!(TypeDescriptor::new("Quantity"), TypeDescriptor::from("Quantity"));
        assert_ne!(TypeDescriptor::new("Quantity"), TypeDescriptor::new("quantity"));
    }

    #[test]
    fn test_concrete_field_has_single_candidate() {
        let field = FieldDescriptor::concrete("name", TypeDescriptor::new("HumanName"));

        assert!(!field.is_polymorphic());
        assert_eq!(field.candidates(), &[TypeDescriptor::new("HumanName")]);
    }

    #[test]
    fn test_polymorphic_candidates_keep_order() {
        let field = FieldDescriptor::polymorphic(
            "value",
            vec![
                TypeDescriptor::new("Quantity"),
                TypeDescriptor::new("CodeableConcept"),
                TypeDescriptor::new("string"),
            ],
        );

        assert!(field.is_polymorphic());
        let names: Vec<_> = field.candidates().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Quantity", "CodeableConcept", "string"]);
    }
}
