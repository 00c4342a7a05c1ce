//! Directory layout for generated entity modules.
//!
//! `full` mode lays each entity out as a clean-architecture slice
//! (domain / application / infrastructure / presentation); `light` mode
//! flattens the same artifacts into five folders. Layout decides paths
//! and import specifiers only; artifact content is identical either way.

use std::path::Path;

use crate::config::{ArchitectureMode, OrmProfile};
use crate::naming::to_kebab_case;

/// Path of the root wiring file every entity registers into.
pub const APP_MODULE_FILE: &str = "src/app.module.ts";

/// Path of the project entrypoint.
pub const MAIN_FILE: &str = "src/main.ts";

/// Path of the shared Prisma schema file (Prisma profile only).
pub const PRISMA_SCHEMA_FILE: &str = "prisma/schema.prisma";

/// Path of the shared Prisma connection service (Prisma profile only).
pub const PRISMA_SERVICE_FILE: &str = "src/prisma/prisma.service.ts";

/// Path of the shared Prisma wiring module (Prisma profile only).
pub const PRISMA_MODULE_FILE: &str = "src/prisma/prisma.module.ts";

/// Computes every artifact path for one entity module.
#[derive(Debug, Clone)]
pub struct ModuleLayout {
    base: String,
    stem: String,
    mode: ArchitectureMode,
}

impl ModuleLayout {
    pub fn new(entity_name: &str, mode: ArchitectureMode) -> Self {
        let stem = to_kebab_case(entity_name);
        Self {
            base: format!("src/{stem}"),
            stem,
            mode,
        }
    }

    /// Kebab-cased entity name used in file names.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Directories the orchestrator creates before emitting files.
    pub fn directories(&self) -> Vec<String> {
        let base = &self.base;
        match self.mode {
            ArchitectureMode::Full => vec![
                format!("{base}/domain/entities"),
                format!("{base}/domain/interfaces"),
                format!("{base}/application/use-cases"),
                format!("{base}/application/dtos"),
                format!("{base}/application/services"),
                format!("{base}/infrastructure/repositories"),
                format!("{base}/infrastructure/mappers"),
                format!("{base}/infrastructure/adapters"),
                format!("{base}/presentation/controllers"),
            ],
            ArchitectureMode::Light => vec![
                format!("{base}/entities"),
                format!("{base}/dto"),
                format!("{base}/services"),
                format!("{base}/repositories"),
                format!("{base}/controllers"),
            ],
        }
    }

    pub fn entity_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!("{}/domain/entities/{}.entity.ts", self.base, self.stem),
            ArchitectureMode::Light => format!("{}/entities/{}.entity.ts", self.base, self.stem),
        }
    }

    pub fn contract_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!(
                "{}/domain/interfaces/{}.repository.interface.ts",
                self.base, self.stem
            ),
            ArchitectureMode::Light => format!(
                "{}/entities/{}.repository.interface.ts",
                self.base, self.stem
            ),
        }
    }

    pub fn create_dto_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!("{}/application/dtos/create-{}.dto.ts", self.base, self.stem),
            ArchitectureMode::Light => format!("{}/dto/create-{}.dto.ts", self.base, self.stem),
        }
    }

    pub fn update_dto_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!("{}/application/dtos/update-{}.dto.ts", self.base, self.stem),
            ArchitectureMode::Light => format!("{}/dto/update-{}.dto.ts", self.base, self.stem),
        }
    }

    pub fn mapper_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!("{}/infrastructure/mappers/{}.mapper.ts", self.base, self.stem),
            ArchitectureMode::Light => format!("{}/repositories/{}.mapper.ts", self.base, self.stem),
        }
    }

    pub fn repository_file(&self, orm: OrmProfile) -> String {
        let orm = orm.as_str();
        match self.mode {
            ArchitectureMode::Full => format!(
                "{}/infrastructure/repositories/{orm}-{}.repository.ts",
                self.base, self.stem
            ),
            ArchitectureMode::Light => {
                format!("{}/repositories/{orm}-{}.repository.ts", self.base, self.stem)
            }
        }
    }

    /// The persistence schema artifact. TypeORM and Mongoose carry their
    /// schema and record type in one file; Prisma keeps its schema in the
    /// shared `prisma/schema.prisma` and gets a record type file here.
    pub fn schema_file(&self, orm: OrmProfile) -> String {
        let suffix = match orm {
            OrmProfile::Prisma => "record",
            _ => "schema",
        };
        match self.mode {
            ArchitectureMode::Full => format!(
                "{}/infrastructure/adapters/{}.{suffix}.ts",
                self.base, self.stem
            ),
            ArchitectureMode::Light => {
                format!("{}/repositories/{}.{suffix}.ts", self.base, self.stem)
            }
        }
    }

    pub fn use_case_file(&self, file_stem: &str) -> String {
        match self.mode {
            ArchitectureMode::Full => format!(
                "{}/application/use-cases/{file_stem}.use-case.ts",
                self.base
            ),
            ArchitectureMode::Light => format!("{}/services/{file_stem}.use-case.ts", self.base),
        }
    }

    pub fn service_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!("{}/application/services/{}.service.ts", self.base, self.stem),
            ArchitectureMode::Light => format!("{}/services/{}.service.ts", self.base, self.stem),
        }
    }

    pub fn controller_file(&self) -> String {
        match self.mode {
            ArchitectureMode::Full => format!(
                "{}/presentation/controllers/{}.controller.ts",
                self.base, self.stem
            ),
            ArchitectureMode::Light => format!("{}/controllers/{}.controller.ts", self.base, self.stem),
        }
    }

    /// The wiring module sits at the module base in both modes.
    pub fn module_file(&self) -> String {
        format!("{}/{}.module.ts", self.base, self.stem)
    }
}

/// Relative import specifier from one generated file to another, without
/// the `.ts` extension and always starting with `./` or `../`.
pub fn import_specifier(from_file: &str, to_file: &str) -> String {
    let from_dir = Path::new(from_file).parent().unwrap_or_else(|| Path::new(""));
    let target = Path::new(to_file);
    let rel = pathdiff::diff_paths(target, from_dir).unwrap_or_else(|| target.to_path_buf());
    let mut spec = rel.to_string_lossy().replace('\\', "/");
    if let Some(stripped) = spec.strip_suffix(".ts") {
        spec = stripped.to_string();
    }
    if !spec.starts_with('.') {
        spec = format!("./{spec}");
    }
    spec
}
