//! Per-entity wiring module generation.
//!
//! Declares the controller, the service, the five use-cases, and the
//! binding from the repository token to the concrete ORM repository. The
//! persistence registration in `imports` is the only profile-specific
//! part.

use crate::config::{GeneratorConfig, OrmProfile};
use crate::model::Entity;
use crate::naming::to_pascal_case;

use super::contract::repository_token;
use super::layout::{import_specifier, ModuleLayout, PRISMA_MODULE_FILE};
use super::repository::repository_class;
use super::usecase::use_case_defs;
use super::FILE_BANNER;

/// Renders the `@Module` wiring class for an entity.
pub fn generate_module(entity: &Entity, config: &GeneratorConfig, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let token = repository_token(&entity.name);
    let repo_class = repository_class(&entity.name, config.orm);
    let module_file = layout.module_file();

    let controller_import = import_specifier(&module_file, &layout.controller_file());
    let service_import = import_specifier(&module_file, &layout.service_file());
    let repo_import = import_specifier(&module_file, &layout.repository_file(config.orm));
    let contract_import = import_specifier(&module_file, &layout.contract_file());

    let defs = use_case_defs(entity);
    let mut use_case_imports = String::new();
    let mut use_case_providers = String::new();
    for def in &defs {
        let spec = import_specifier(&module_file, &layout.use_case_file(&def.file_stem));
        use_case_imports.push_str(&format!("import {{ {} }} from '{spec}';\n", def.class_name));
        use_case_providers.push_str(&format!("    {},\n", def.class_name));
    }

    let (orm_import, persistence) = match config.orm {
        OrmProfile::TypeOrm => {
            let schema_import = import_specifier(&module_file, &layout.schema_file(config.orm));
            (
                format!(
                    "import {{ TypeOrmModule }} from '@nestjs/typeorm';\nimport {{ {pascal}Schema }} from '{schema_import}';\n"
                ),
                format!("TypeOrmModule.forFeature([{pascal}Schema])"),
            )
        }
        OrmProfile::Mongoose => {
            let schema_import = import_specifier(&module_file, &layout.schema_file(config.orm));
            (
                format!(
                    "import {{ MongooseModule }} from '@nestjs/mongoose';\nimport {{ {pascal}Schema }} from '{schema_import}';\n"
                ),
                format!(
                    "MongooseModule.forFeature([{{ name: '{pascal}', schema: {pascal}Schema }}])"
                ),
            )
        }
        OrmProfile::Prisma => {
            let prisma_import = import_specifier(&module_file, PRISMA_MODULE_FILE);
            (
                format!("import {{ PrismaModule }} from '{prisma_import}';\n"),
                "PrismaModule".to_string(),
            )
        }
    };

    format!(
        r#"{FILE_BANNER}import {{ Module }} from '@nestjs/common';
{orm_import}import {{ {pascal}Controller }} from '{controller_import}';
import {{ {pascal}Service }} from '{service_import}';
{use_case_imports}import {{ {repo_class} }} from '{repo_import}';
import {{ {token} }} from '{contract_import}';

@Module({{
  imports: [{persistence}],
  controllers: [{pascal}Controller],
  providers: [
    {pascal}Service,
{use_case_providers}    {{
      provide: {token},
      useClass: {repo_class},
    }},
  ],
  exports: [{pascal}Service],
}})
export class {pascal}Module {{}}
"#
    )
}
