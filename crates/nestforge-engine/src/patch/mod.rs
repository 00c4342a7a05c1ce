//! Relation retrofitting against previously generated artifacts.
//!
//! When an entity declares a relation to an already-generated entity, the
//! owner side's create/update DTOs, mapper, domain entity, and schema gain
//! the foreign-key field, and the non-owner's domain entity gains the
//! reciprocal field. All of it happens by literal anchor matching against
//! text this engine previously emitted; nothing here parses TypeScript.

pub mod anchors;
mod engine;

pub use engine::{apply_relation, register_module};
