//! # Typepath Model
//!
//! The structural type catalog the resolver walks: nominal type handles,
//! their declared fields, and the [`TypeDirectory`] trait the resolver
//! queries. [`ModelDirectory`] is an in-memory directory loaded from a JSON
//! model definition.

pub mod definition;
pub mod descriptor;
pub mod directory;
pub mod error;
pub mod primitives;

pub use definition::{ElementDefinition, FieldDefinition, ModelDefinition, TypeDefinition, TypeKind};
pub use descriptor::{ElementKind, FieldDescriptor, TypeDescriptor};
pub use directory::{ModelDirectory, TypeDirectory};
pub use error::{ModelError, ModelResult};
pub use primitives::{canonical_type_name, BOOLEAN_TYPE_NAME};
