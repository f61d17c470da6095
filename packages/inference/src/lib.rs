//! # Typepath Type Resolver
//!
//! Static type inference for path expressions: given a starting type and an
//! expression tree, compute every concrete type the expression can evaluate
//! to at runtime and the path that reaches it.
//!
//! ## Features
//!
//! - **Path walking**: `Patient.name.family` follows declared fields through the model
//! - **Choice fan-out**: a polymorphic field yields one result per candidate type
//! - **Casts**: `value.as(Quantity)` and `value as Quantity` pin a segment's type
//! - **Unions**: `a | b` contributes the types of both branches, left to right
//! - **Composite resolution**: components resolved relative to a primary expression
//! - **Deduplication**: one result per resolved type, first seen wins
//!
//! ## Example
//!
//! ```rust
//! use typepath_ast::Expression;
//! use typepath_inference::Resolver;
//! use typepath_model::ModelDirectory;
//!
//! let model = ModelDirectory::from_json_str(r#"{
//!     "types": [
//!         { "name": "Patient", "kind": "resource", "fields": [
//!             { "name": "name", "type": "HumanName" }
//!         ] },
//!         { "name": "HumanName" }
//!     ]
//! }"#).unwrap();
//!
//! let resolver = Resolver::new(&model);
//! let expr = Expression::path("Patient.name");
//! let results = resolver.resolve("Patient", ("string", &expr), &[]).unwrap();
//!
//! assert_eq!(results[0].type_name(), "HumanName");
//! assert_eq!(results[0].path.as_deref(), Some("Patient.name"));
//! ```

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod resolver;
pub mod result;

// Re-export main types for convenience
pub use context::{PathSegment, ResolutionContext, SegmentPath};
pub use diagnostics::DiagnosticSink;
pub use error::{ResolveError, ResolveErrorKind, ResolveResult};
pub use options::ResolverOptions;
pub use resolver::Resolver;
pub use result::{deduplicate, ResolutionResult};
