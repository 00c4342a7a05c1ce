//! The generation pipeline: one entity in, a full module out.
//!
//! A [`GenerationSession`] runs the fixed step sequence for each entity and
//! remembers what it has generated so far, which is how later entities can
//! relate to earlier ones. Failures are wrapped with the entity and step
//! they occurred in; patch misses accumulate as warnings on the report
//! instead of failing the run.

use crate::codegen::contract::generate_contract;
use crate::codegen::controller::generate_controller;
use crate::codegen::dto::{generate_create_dto, generate_update_dto};
use crate::codegen::entity::generate_entity;
use crate::codegen::layout::{self, ModuleLayout};
use crate::codegen::mapper::generate_mapper;
use crate::codegen::module::generate_module;
use crate::codegen::project::{generate_prisma_module, generate_prisma_service};
use crate::codegen::repository::generate_repository;
use crate::codegen::schema::{generate_prisma_model, generate_schema, prisma_schema_header};
use crate::codegen::service::generate_service;
use crate::codegen::usecase::{generate_use_case, use_case_defs};
use crate::config::{GeneratorConfig, OrmProfile};
use crate::diagnostic::{GenerationWarning, GeneratorError};
use crate::model::{Cardinality, Entity, FieldType};
use crate::naming::to_pascal_case;
use crate::patch::{anchors, apply_relation, register_module};
use crate::sink::ArtifactSink;
use crate::validate::validate_entity;

/// Pipeline steps, in execution order. Step names appear in wrapped errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStep {
    Directories,
    DomainEntity,
    RepositoryContract,
    Schema,
    Repository,
    UseCases,
    Dtos,
    Mapper,
    RelationPatch,
    Service,
    Controller,
    Module,
    RootRegistration,
}

impl GenerationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStep::Directories => "directories",
            GenerationStep::DomainEntity => "domain-entity",
            GenerationStep::RepositoryContract => "repository-contract",
            GenerationStep::Schema => "schema",
            GenerationStep::Repository => "repository",
            GenerationStep::UseCases => "use-cases",
            GenerationStep::Dtos => "dtos",
            GenerationStep::Mapper => "mapper",
            GenerationStep::RelationPatch => "relation-patch",
            GenerationStep::Service => "service",
            GenerationStep::Controller => "controller",
            GenerationStep::Module => "module",
            GenerationStep::RootRegistration => "root-registration",
        }
    }
}

/// Everything produced for one entity.
#[derive(Debug)]
pub struct EntityReport {
    pub entity: String,
    /// Paths written for this entity, in generation order.
    pub artifacts: Vec<String>,
    pub warnings: Vec<GenerationWarning>,
}

/// Result of a run over one or more entities.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub entities: Vec<EntityReport>,
}

impl GenerationReport {
    pub fn artifact_count(&self) -> usize {
        self.entities.iter().map(|e| e.artifacts.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.entities.iter().map(|e| e.warnings.len()).sum()
    }
}

fn step_err(entity: &str, step: GenerationStep) -> impl Fn(GeneratorError) -> GeneratorError + '_ {
    move |source| GeneratorError::pipeline(entity, step.as_str(), source)
}

/// A stateful run against one sink.
///
/// The session tracks which entities it has generated so a later entity in
/// the same batch can declare a relation to an earlier one; targets from
/// previous runs are recognized by probing the sink for their entity file.
pub struct GenerationSession<'a> {
    config: GeneratorConfig,
    sink: &'a mut dyn ArtifactSink,
    known: Vec<String>,
}

impl<'a> GenerationSession<'a> {
    pub fn new(sink: &'a mut dyn ArtifactSink, config: GeneratorConfig) -> Self {
        Self {
            config,
            sink,
            known: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the full pipeline for one entity.
    pub fn generate(&mut self, entity: &Entity) -> Result<EntityReport, GeneratorError> {
        if self.knows(&entity.name) {
            return Err(GeneratorError::DuplicateEntity {
                name: entity.name.clone(),
            });
        }
        {
            let sink: &dyn ArtifactSink = &*self.sink;
            let known = &self.known;
            let mode = self.config.architecture;
            validate_entity(entity, |target| {
                known.iter().any(|k| k.eq_ignore_ascii_case(target))
                    || matches!(
                        sink.read_file(&ModuleLayout::new(target, mode).entity_file()),
                        Ok(Some(_))
                    )
            })?;
        }

        let name = entity.name.as_str();
        let layout = ModuleLayout::new(name, self.config.architecture);
        let mut artifacts = Vec::new();
        let mut warnings = Vec::new();

        for dir in layout.directories() {
            self.sink
                .ensure_dir(&dir)
                .map_err(step_err(name, GenerationStep::Directories))?;
        }

        self.sink
            .write_file(&layout.entity_file(), &generate_entity(entity))
            .map_err(step_err(name, GenerationStep::DomainEntity))?;
        artifacts.push(layout.entity_file());

        self.sink
            .write_file(&layout.contract_file(), &generate_contract(entity, &layout))
            .map_err(step_err(name, GenerationStep::RepositoryContract))?;
        artifacts.push(layout.contract_file());

        self.write_schema(entity, &layout, &mut artifacts)
            .map_err(step_err(name, GenerationStep::Schema))?;

        let repository_path = layout.repository_file(self.config.orm);
        self.sink
            .write_file(
                &repository_path,
                &generate_repository(entity, &self.config, &layout),
            )
            .map_err(step_err(name, GenerationStep::Repository))?;
        artifacts.push(repository_path);

        for def in use_case_defs(entity) {
            let path = layout.use_case_file(&def.file_stem);
            self.sink
                .write_file(&path, &generate_use_case(entity, &def, &layout))
                .map_err(step_err(name, GenerationStep::UseCases))?;
            artifacts.push(path);
        }

        self.sink
            .write_file(
                &layout.create_dto_file(),
                &generate_create_dto(entity, &self.config),
            )
            .map_err(step_err(name, GenerationStep::Dtos))?;
        artifacts.push(layout.create_dto_file());
        self.sink
            .write_file(
                &layout.update_dto_file(),
                &generate_update_dto(entity, &self.config),
            )
            .map_err(step_err(name, GenerationStep::Dtos))?;
        artifacts.push(layout.update_dto_file());

        self.sink
            .write_file(
                &layout.mapper_file(),
                &generate_mapper(entity, &self.config, &layout),
            )
            .map_err(step_err(name, GenerationStep::Mapper))?;
        artifacts.push(layout.mapper_file());

        // Relations patch artifacts that already exist, including the ones
        // written just above when the declaring side owns the key.
        if let Some(relation) = &entity.relation {
            let mut patched = apply_relation(&mut *self.sink, &self.config, name, relation)
                .map_err(step_err(name, GenerationStep::RelationPatch))?;
            warnings.append(&mut patched);
        }

        self.sink
            .write_file(&layout.service_file(), &generate_service(entity, &layout))
            .map_err(step_err(name, GenerationStep::Service))?;
        artifacts.push(layout.service_file());

        self.sink
            .write_file(
                &layout.controller_file(),
                &generate_controller(entity, &self.config, &layout),
            )
            .map_err(step_err(name, GenerationStep::Controller))?;
        artifacts.push(layout.controller_file());

        self.sink
            .write_file(
                &layout.module_file(),
                &generate_module(entity, &self.config, &layout),
            )
            .map_err(step_err(name, GenerationStep::Module))?;
        artifacts.push(layout.module_file());

        let mut registered = register_module(&mut *self.sink, &self.config, name)
            .map_err(step_err(name, GenerationStep::RootRegistration))?;
        warnings.append(&mut registered);

        self.known.push(entity.name.clone());
        Ok(EntityReport {
            entity: entity.name.clone(),
            artifacts,
            warnings,
        })
    }

    /// Generates a batch in declaration order. With auth enabled the batch
    /// is extended with the principal `user` entity (in front, so others
    /// can relate to it) and a `session` entity (appended last, since it
    /// relates to `user`), unless the batch declares those names itself.
    pub fn generate_batch(&mut self, entities: &[Entity]) -> Result<GenerationReport, GeneratorError> {
        let batch = if self.config.auth {
            with_auth_entities(entities)
        } else {
            entities.to_vec()
        };

        let mut report = GenerationReport::default();
        for entity in &batch {
            report.entities.push(self.generate(entity)?);
        }
        Ok(report)
    }

    fn knows(&self, name: &str) -> bool {
        self.known.iter().any(|k| k.eq_ignore_ascii_case(name))
    }

    fn write_schema(
        &mut self,
        entity: &Entity,
        layout: &ModuleLayout,
        artifacts: &mut Vec<String>,
    ) -> Result<(), GeneratorError> {
        let path = layout.schema_file(self.config.orm);
        self.sink
            .write_file(&path, &generate_schema(entity, self.config.orm))?;
        artifacts.push(path);

        if self.config.orm != OrmProfile::Prisma {
            return Ok(());
        }

        // Shared schema.prisma: header created once, one model appended per
        // entity, keyed on the model open line.
        let mut schema = match self.sink.read_file(layout::PRISMA_SCHEMA_FILE)? {
            Some(existing) => existing,
            None => {
                artifacts.push(layout::PRISMA_SCHEMA_FILE.to_string());
                prisma_schema_header()
            }
        };
        let model_open = anchors::prisma_model_open(&to_pascal_case(&entity.name));
        if !schema.contains(&model_open) {
            schema.push('\n');
            schema.push_str(&generate_prisma_model(entity));
            self.sink.write_file(layout::PRISMA_SCHEMA_FILE, &schema)?;
        }

        if self.sink.read_file(layout::PRISMA_SERVICE_FILE)?.is_none() {
            self.sink
                .write_file(layout::PRISMA_SERVICE_FILE, &generate_prisma_service())?;
            artifacts.push(layout::PRISMA_SERVICE_FILE.to_string());
        }
        if self.sink.read_file(layout::PRISMA_MODULE_FILE)?.is_none() {
            self.sink
                .write_file(layout::PRISMA_MODULE_FILE, &generate_prisma_module())?;
            artifacts.push(layout::PRISMA_MODULE_FILE.to_string());
        }
        Ok(())
    }
}

/// Extends a batch with the authentication entities. A declared `user`
/// keeps its fields but is forced principal.
fn with_auth_entities(entities: &[Entity]) -> Vec<Entity> {
    let declared =
        |name: &str| entities.iter().any(|e| e.name.eq_ignore_ascii_case(name));

    let mut batch = Vec::new();
    if !declared("user") {
        batch.push(
            Entity::new("user")
                .with_field("email", FieldType::String)
                .with_field("password", FieldType::String)
                .principal(),
        );
    }
    for entity in entities {
        let mut entity = entity.clone();
        if entity.name.eq_ignore_ascii_case("user") {
            entity.is_principal = true;
        }
        batch.push(entity);
    }
    if !declared("session") {
        batch.push(
            Entity::new("session")
                .with_field("token", FieldType::String)
                .with_field("expiresAt", FieldType::Date)
                .with_relation("user", Cardinality::ManyToOne),
        );
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArchitectureMode;
    use crate::sink::MemorySink;

    fn post() -> Entity {
        Entity::new("post")
            .with_field("title", FieldType::String)
            .with_field("content", FieldType::Text)
    }

    #[test]
    fn test_full_pipeline_writes_all_artifacts() {
        let mut sink = MemorySink::new();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        let report = session.generate(&post()).unwrap();

        assert_eq!(report.entity, "post");
        assert!(report.warnings.is_empty(), "unexpected: {:?}", report.warnings);
        // entity, contract, schema, repository, 5 use cases, 2 dtos,
        // mapper, service, controller, module
        assert_eq!(report.artifacts.len(), 15);

        for path in [
            "src/post/domain/entities/post.entity.ts",
            "src/post/domain/interfaces/post.repository.interface.ts",
            "src/post/infrastructure/adapters/post.schema.ts",
            "src/post/infrastructure/repositories/typeorm-post.repository.ts",
            "src/post/application/use-cases/create-post.use-case.ts",
            "src/post/application/use-cases/find-all-posts.use-case.ts",
            "src/post/application/use-cases/find-post-by-id.use-case.ts",
            "src/post/application/use-cases/update-post.use-case.ts",
            "src/post/application/use-cases/delete-post.use-case.ts",
            "src/post/application/dtos/create-post.dto.ts",
            "src/post/application/dtos/update-post.dto.ts",
            "src/post/infrastructure/mappers/post.mapper.ts",
            "src/post/application/services/post.service.ts",
            "src/post/presentation/controllers/post.controller.ts",
            "src/post/post.module.ts",
        ] {
            assert!(sink.get(path).is_some(), "missing {path}");
        }
        // Root module was created and the entity registered.
        let root = sink.get(layout::APP_MODULE_FILE).unwrap();
        assert!(root.contains("import { PostModule } from './post/post.module';"));
    }

    #[test]
    fn test_batch_relation_patches_both_sides() {
        let mut sink = MemorySink::new();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        let comment = Entity::new("comment")
            .with_field("content", FieldType::Text)
            .with_relation("post", Cardinality::ManyToOne);
        let report = session.generate_batch(&[post(), comment]).unwrap();
        assert_eq!(report.entities.len(), 2);
        assert_eq!(report.warning_count(), 0);

        // comment declared n-1 post, so comment owns postId
        let dto = sink.get("src/comment/application/dtos/create-comment.dto.ts").unwrap();
        assert!(dto.contains("postId: string;"));
        let entity = sink.get("src/post/domain/entities/post.entity.ts").unwrap();
        assert!(entity.contains("get comments(): Comment[]"));
    }

    #[test]
    fn test_one_to_many_patches_earlier_entity() {
        let mut sink = MemorySink::new();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        let author = Entity::new("author")
            .with_field("name", FieldType::String)
            .with_relation("post", Cardinality::OneToMany);
        session.generate_batch(&[post(), author]).unwrap();

        // author 1-n post puts the key on post, generated earlier
        let entity = sink.get("src/post/domain/entities/post.entity.ts").unwrap();
        assert!(entity.contains("_authorId"));
        let dto = sink.get("src/post/application/dtos/create-post.dto.ts").unwrap();
        assert!(dto.contains("authorId: string;"));
        let author_entity = sink.get("src/author/domain/entities/author.entity.ts").unwrap();
        assert!(author_entity.contains("get posts(): Post[]"));
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let mut sink = MemorySink::new();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        session.generate(&post()).unwrap();
        assert!(matches!(
            session.generate(&Entity::new("Post").with_field("x", FieldType::Number)),
            Err(GeneratorError::DuplicateEntity { name }) if name == "Post"
        ));
    }

    #[test]
    fn test_unknown_relation_target_rejected() {
        let mut sink = MemorySink::new();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        let comment = Entity::new("comment").with_relation("post", Cardinality::ManyToOne);
        assert!(matches!(
            session.generate(&comment),
            Err(GeneratorError::UnknownRelationTarget { .. })
        ));
    }

    #[test]
    fn test_relation_target_from_previous_run() {
        let mut sink = MemorySink::new();
        {
            let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
            session.generate(&post()).unwrap();
        }
        // A fresh session probes the sink for the target's entity file.
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        let comment = Entity::new("comment")
            .with_field("content", FieldType::Text)
            .with_relation("post", Cardinality::ManyToOne);
        let report = session.generate(&comment).unwrap();
        assert_eq!(report.warnings.len(), 0);
    }

    #[test]
    fn test_prisma_shares_schema_and_support_files() {
        let mut sink = MemorySink::new();
        let config = GeneratorConfig {
            orm: OrmProfile::Prisma,
            ..GeneratorConfig::default()
        };
        let mut session = GenerationSession::new(&mut sink, config);
        let tag = Entity::new("tag").with_field("label", FieldType::String);
        session.generate_batch(&[post(), tag]).unwrap();

        let schema = sink.get(layout::PRISMA_SCHEMA_FILE).unwrap();
        assert!(schema.contains("model Post {"));
        assert!(schema.contains("model Tag {"));
        assert_eq!(schema.matches("generator client").count(), 1);
        assert!(sink.get(layout::PRISMA_SERVICE_FILE).is_some());
        assert!(sink.get(layout::PRISMA_MODULE_FILE).is_some());
    }

    #[test]
    fn test_auth_injects_principal_and_session() {
        let mut sink = MemorySink::new();
        let config = GeneratorConfig {
            auth: true,
            ..GeneratorConfig::default()
        };
        let mut session = GenerationSession::new(&mut sink, config);
        let report = session.generate_batch(&[post()]).unwrap();

        let names: Vec<&str> = report.entities.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(names, vec!["user", "post", "session"]);

        let user = sink.get("src/user/domain/entities/user.entity.ts").unwrap();
        assert!(user.contains("_role: string = 'USER'"));
        assert!(user.contains("get sessions(): Session[]"));

        // session n-1 user owns the key
        let session_dto = sink.get("src/session/application/dtos/create-session.dto.ts").unwrap();
        assert!(session_dto.contains("userId: string;"));
    }

    #[test]
    fn test_auth_respects_declared_user() {
        let mut sink = MemorySink::new();
        let config = GeneratorConfig {
            auth: true,
            ..GeneratorConfig::default()
        };
        let mut session = GenerationSession::new(&mut sink, config);
        let custom_user = Entity::new("user")
            .with_field("email", FieldType::String)
            .with_field("password", FieldType::String)
            .with_field("displayName", FieldType::String);
        let report = session.generate_batch(&[custom_user]).unwrap();

        let names: Vec<&str> = report.entities.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(names, vec!["user", "session"]);

        // The declared user is forced principal and keeps its own fields.
        let user = sink.get("src/user/domain/entities/user.entity.ts").unwrap();
        assert!(user.contains("_displayName"));
        assert!(user.contains("_role: string = 'USER'"));
    }

    #[test]
    fn test_light_mode_layout() {
        let mut sink = MemorySink::new();
        let config = GeneratorConfig {
            architecture: ArchitectureMode::Light,
            ..GeneratorConfig::default()
        };
        let mut session = GenerationSession::new(&mut sink, config);
        let report = session.generate(&post()).unwrap();

        assert!(sink.get("src/post/entities/post.entity.ts").is_some());
        assert!(sink.get("src/post/repositories/post.mapper.ts").is_some());
        assert!(sink.get("src/post/controllers/post.controller.ts").is_some());
        assert_eq!(report.artifacts.len(), 15);
    }

    #[test]
    fn test_regeneration_overwrites_cleanly() {
        let mut sink = MemorySink::new();
        {
            let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
            session.generate(&post()).unwrap();
        }
        let count = sink.file_count();
        let mut session = GenerationSession::new(&mut sink, GeneratorConfig::default());
        session.generate(&post()).unwrap();
        // Same paths, no duplicate registration in the root module.
        assert_eq!(sink.file_count(), count);
        let root = sink.get(layout::APP_MODULE_FILE).unwrap();
        assert_eq!(root.matches("PostModule").count(), 2);
    }
}
