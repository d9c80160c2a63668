#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Provider-agnostic query algebra for repository-style data access.
//!
//! This crate defines the immutable value types with which application code
//! declares query predicates — restriction/constraint/expression trees with
//! pattern matching — plus sorting, a static metamodel for typed attribute
//! references, and stable restriction digests. It is a vocabulary consumed
//! by persistence providers; nothing here executes a query.

pub mod builder;
pub mod constraint;
pub mod digest;
pub mod errors;
pub mod expression;
pub mod metamodel;
pub mod pattern;
pub mod restrict;
pub mod restriction;
pub mod sort;
pub mod value;

pub use builder::{Query, QueryBuilder};
pub use constraint::{Constraint, Like};
pub use errors::Error;
pub use expression::Expression;
pub use metamodel::{AttributeRef, Metamodel};
pub use pattern::Pattern;
pub use restriction::{BasicRestriction, Combine, CompositeRestriction, Restriction};
pub use sort::{Direction, Order, Sort};
pub use value::Value;
