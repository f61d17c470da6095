//! # Typepath Expression Tree
//!
//! The parsed form of the path language consumed by the type resolver.
//! Parsing itself lives outside this workspace; trees arrive either built in
//! code through the constructors on [`Expression`] or deserialized from JSON.

pub mod ast;
pub mod display;

pub use ast::{Axis, BinaryOperator, Expression, Literal, MemberOperator, BUILTIN_PREFIX};
