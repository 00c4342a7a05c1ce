//! Generator configuration.

use crate::diagnostic::GeneratorError;
use crate::model::BlueprintConfig;

/// Persistence technology family. Decides repository, schema, and mapper
/// record shapes; everything else is profile-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrmProfile {
    /// Relational, typed schemas (TypeORM `EntitySchema`).
    #[default]
    TypeOrm,
    /// Document schemas (Mongoose).
    Mongoose,
    /// Generic ORM with an external schema file (Prisma).
    Prisma,
}

impl OrmProfile {
    /// Parses a user spelling. Unknown profiles are fatal for the whole
    /// run; there is no degraded output for an unsupported ORM.
    pub fn parse(s: &str) -> Result<OrmProfile, GeneratorError> {
        match s.to_lowercase().as_str() {
            "typeorm" => Ok(OrmProfile::TypeOrm),
            "mongoose" => Ok(OrmProfile::Mongoose),
            "prisma" => Ok(OrmProfile::Prisma),
            _ => Err(GeneratorError::UnsupportedOrm { orm: s.to_string() }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrmProfile::TypeOrm => "typeorm",
            OrmProfile::Mongoose => "mongoose",
            OrmProfile::Prisma => "prisma",
        }
    }
}

/// Folder layout mode. Affects artifact paths and import specifiers only,
/// never artifact semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchitectureMode {
    /// Layered clean-architecture folders per entity.
    #[default]
    Full,
    /// Flattened folders per entity.
    Light,
}

impl ArchitectureMode {
    pub fn parse(s: &str) -> Result<ArchitectureMode, GeneratorError> {
        match s.to_lowercase().as_str() {
            "full" => Ok(ArchitectureMode::Full),
            "light" => Ok(ArchitectureMode::Light),
            _ => Err(GeneratorError::UnsupportedArchitecture { mode: s.to_string() }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitectureMode::Full => "full",
            ArchitectureMode::Light => "light",
        }
    }
}

/// Options recognized by a generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// Persistence profile for repositories, schemas, and records.
    pub orm: OrmProfile,

    /// Folder layout mode.
    pub architecture: ArchitectureMode,

    /// Adds documentation annotations and examples to DTOs and controllers,
    /// and a Swagger bootstrap to the project entrypoint.
    pub api_docs: bool,

    /// Injects implicit user and session entities before user-declared
    /// entities are processed.
    pub auth: bool,

    /// Emits Dockerfile and docker-compose.yml with project scaffolding.
    pub docker: bool,
}

impl GeneratorConfig {
    /// Applies a blueprint's configuration section over these defaults.
    pub fn merged_with(mut self, section: &BlueprintConfig) -> Result<Self, GeneratorError> {
        if let Some(orm) = &section.orm {
            self.orm = OrmProfile::parse(orm)?;
        }
        if let Some(mode) = &section.architecture {
            self.architecture = ArchitectureMode::parse(mode)?;
        }
        if let Some(api_docs) = section.api_docs {
            self.api_docs = api_docs;
        }
        if let Some(auth) = section.auth {
            self.auth = auth;
        }
        if let Some(docker) = section.docker {
            self.docker = docker;
        }
        Ok(self)
    }
}
