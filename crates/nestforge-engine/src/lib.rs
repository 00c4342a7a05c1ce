//! # NestForge Engine
//!
//! Relation-aware code assembly for NestJS-style projects. An entity
//! declaration plus a generator configuration goes in; a deterministic set
//! of TypeScript artifacts comes out: domain entity, DTOs, mapper,
//! repository contract and implementation, use cases, service, controller,
//! and the wiring module, laid out per architecture mode and ORM profile.
//!
//! Entities arrive one at a time, so relations are not regenerated into
//! fresh files; they are retrofitted into already-written artifacts by
//! literal anchor patching against text this engine previously emitted.
//!
//! ## Architecture
//!
//! ```text
//! Entity + GeneratorConfig
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Identifier shape, collisions, relation targets
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Per-layer TypeScript templates
//! │ (per entity) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Patch     │  Anchored relation retrofits into earlier artifacts
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Sink     │  Filesystem or in-memory projection
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nestforge_engine::{Entity, FieldType, GenerationSession, GeneratorConfig};
//! use nestforge_engine::sink::FsSink;
//!
//! let mut sink = FsSink::new("my-app");
//! let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
//! let post = Entity::new("post").with_field("title", FieldType::String);
//! let report = session.generate(&post)?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod model;
pub mod naming;
pub mod orchestrator;
pub mod patch;
pub mod sink;
pub mod typemap;
pub mod validate;

pub use config::{ArchitectureMode, GeneratorConfig, OrmProfile};
pub use diagnostic::{GenerationWarning, GeneratorError};
pub use model::{Blueprint, Cardinality, Entity, Field, FieldType, RelationDecl};
pub use orchestrator::{EntityReport, GenerationReport, GenerationSession, GenerationStep};
pub use sink::{ArtifactSink, FsSink, MemorySink};
