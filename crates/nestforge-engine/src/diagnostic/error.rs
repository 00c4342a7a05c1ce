//! Generator error types.

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during generation.
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Invalid entity name '{name}'")]
    #[diagnostic(
        code(nestforge::input::invalid_entity_name),
        help("Entity names must start with a letter and contain only letters, digits, and underscores")
    )]
    InvalidEntityName {
        name: String,
    },

    #[error("Invalid field name '{field}' on entity '{entity}'")]
    #[diagnostic(
        code(nestforge::input::invalid_field_name),
        help("Field names must start with a letter and contain only letters, digits, and underscores")
    )]
    InvalidFieldName {
        entity: String,
        field: String,
    },

    #[error("Duplicate entity name '{name}'")]
    #[diagnostic(
        code(nestforge::input::duplicate_entity),
        help("Entity names are case-insensitive because artifacts are namespaced by lower-cased name")
    )]
    DuplicateEntity {
        name: String,
    },

    #[error("Duplicate field '{field}' on entity '{entity}'")]
    #[diagnostic(code(nestforge::input::duplicate_field))]
    DuplicateField {
        entity: String,
        field: String,
    },

    #[error("Field '{field}' on entity '{entity}' collides with an implicit field")]
    #[diagnostic(
        code(nestforge::input::implicit_field_collision),
        help("id, createdAt, and updatedAt are added to every entity automatically")
    )]
    ImplicitFieldCollision {
        entity: String,
        field: String,
    },

    #[error("Relation on entity '{entity}' references unknown entity '{target}'")]
    #[diagnostic(
        code(nestforge::input::unknown_relation_target),
        help("Relations may only reference entities declared earlier in the session or already generated in the project")
    )]
    UnknownRelationTarget {
        entity: String,
        target: String,
    },

    #[error("Entity '{entity}' declares a relation to itself")]
    #[diagnostic(code(nestforge::input::self_relation))]
    SelfRelation {
        entity: String,
    },

    #[error("Unknown relation cardinality '{cardinality}'")]
    #[diagnostic(
        code(nestforge::input::unknown_cardinality),
        help("Supported cardinalities: 1-1, 1-n, n-1, n-n")
    )]
    UnknownCardinality {
        cardinality: String,
    },

    #[error("Failed to parse blueprint: {message}")]
    #[diagnostic(code(nestforge::input::blueprint_parse))]
    BlueprintParse {
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Unsupported ORM profile '{orm}'")]
    #[diagnostic(
        code(nestforge::config::unsupported_orm),
        help("Supported profiles: typeorm, mongoose, prisma")
    )]
    UnsupportedOrm {
        orm: String,
    },

    #[error("Unsupported architecture mode '{mode}'")]
    #[diagnostic(
        code(nestforge::config::unsupported_architecture),
        help("Supported modes: full, light")
    )]
    UnsupportedArchitecture {
        mode: String,
    },

    // =========================================================================
    // Sink Errors
    // =========================================================================
    #[error("Sink I/O failed for '{path}': {message}")]
    #[diagnostic(code(nestforge::sink::io_error))]
    Io {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Pipeline Errors
    // =========================================================================
    #[error("Generation failed for entity '{entity}' at step '{step}': {source}")]
    #[diagnostic(code(nestforge::pipeline::step_failed))]
    PipelineStep {
        entity: String,
        step: &'static str,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// Creates a sink I/O error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps an error with the entity and pipeline step it occurred in.
    pub fn pipeline(entity: impl Into<String>, step: &'static str, source: GeneratorError) -> Self {
        Self::PipelineStep {
            entity: entity.into(),
            step,
            source: Box::new(source),
        }
    }
}
