//! Schema-driven request body validation.
//!
//! - `schema` - Field, type and rule declarations
//! - `constraints` - Rule evaluation, type checks and implicit coercion
//! - `gate` - The validator applied to every typed request body

pub mod constraints;
pub mod gate;
pub mod schema;

pub use gate::{ValidationGate, ROOT_PROPERTY, WHITELIST_RULE};
pub use schema::{
    Constraint, FieldSpec, FieldType, ObjectSchema, Primitive, RequestSchema, Rule, Schema,
};

#[cfg(test)]
mod tests;
