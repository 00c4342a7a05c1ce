//! Use-case generation: five single-purpose application classes per entity.
//!
//! Each use-case injects the repository contract through its token and
//! exposes a single `execute`. Lookup misses surface as
//! `NotFoundException` here, so services and controllers stay free of
//! null handling.

use crate::model::Entity;
use crate::naming::{pluralize, to_camel_case, to_kebab_case, to_pascal_case};

use super::contract::repository_token;
use super::layout::{import_specifier, ModuleLayout};
use super::FILE_BANNER;

/// The five generated use-case kinds, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCaseKind {
    Create,
    FindAll,
    FindById,
    Update,
    Delete,
}

/// Naming for one use-case artifact.
#[derive(Debug, Clone)]
pub struct UseCaseDef {
    pub kind: UseCaseKind,
    pub class_name: String,
    pub file_stem: String,
}

/// The use-case set for an entity. Shared by the generator, the service
/// facade, and the wiring module so names never drift apart.
pub fn use_case_defs(entity: &Entity) -> Vec<UseCaseDef> {
    let pascal = to_pascal_case(&entity.name);
    let kebab = to_kebab_case(&entity.name);
    vec![
        UseCaseDef {
            kind: UseCaseKind::Create,
            class_name: format!("Create{pascal}UseCase"),
            file_stem: format!("create-{kebab}"),
        },
        UseCaseDef {
            kind: UseCaseKind::FindAll,
            class_name: format!("FindAll{}UseCase", pluralize(&pascal)),
            file_stem: format!("find-all-{}", pluralize(&kebab)),
        },
        UseCaseDef {
            kind: UseCaseKind::FindById,
            class_name: format!("Find{pascal}ByIdUseCase"),
            file_stem: format!("find-{kebab}-by-id"),
        },
        UseCaseDef {
            kind: UseCaseKind::Update,
            class_name: format!("Update{pascal}UseCase"),
            file_stem: format!("update-{kebab}"),
        },
        UseCaseDef {
            kind: UseCaseKind::Delete,
            class_name: format!("Delete{pascal}UseCase"),
            file_stem: format!("delete-{kebab}"),
        },
    ]
}

/// Renders one use-case class.
pub fn generate_use_case(entity: &Entity, def: &UseCaseDef, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let camel = to_camel_case(&entity.name);
    let token = repository_token(&entity.name);
    let class_name = &def.class_name;
    let file = layout.use_case_file(&def.file_stem);

    let needs_not_found = matches!(
        def.kind,
        UseCaseKind::FindById | UseCaseKind::Update | UseCaseKind::Delete
    );
    let common = if needs_not_found {
        "Inject, Injectable, NotFoundException"
    } else {
        "Inject, Injectable"
    };

    let mut imports = format!("import {{ {common} }} from '@nestjs/common';\n");
    if def.kind != UseCaseKind::Delete {
        let entity_import = import_specifier(&file, &layout.entity_file());
        imports.push_str(&format!("import {{ {pascal} }} from '{entity_import}';\n"));
    }
    let contract_import = import_specifier(&file, &layout.contract_file());
    imports.push_str(&format!(
        "import {{ {token}, {pascal}Repository }} from '{contract_import}';\n"
    ));
    match def.kind {
        UseCaseKind::Create => {
            let dto_import = import_specifier(&file, &layout.create_dto_file());
            imports.push_str(&format!("import {{ Create{pascal}Dto }} from '{dto_import}';\n"));
        }
        UseCaseKind::Update => {
            let dto_import = import_specifier(&file, &layout.update_dto_file());
            imports.push_str(&format!("import {{ Update{pascal}Dto }} from '{dto_import}';\n"));
        }
        _ => {}
    }

    let body = match def.kind {
        UseCaseKind::Create => format!(
            r#"  execute(dto: Create{pascal}Dto): Promise<{pascal}> {{
    return this.repository.create(dto);
  }}"#
        ),
        UseCaseKind::FindAll => format!(
            r#"  execute(): Promise<{pascal}[]> {{
    return this.repository.findAll();
  }}"#
        ),
        UseCaseKind::FindById => format!(
            r#"  async execute(id: string): Promise<{pascal}> {{
    const {camel} = await this.repository.findById(id);
    if (!{camel}) {{
      throw new NotFoundException(`{pascal} ${{id}} not found`);
    }}
    return {camel};
  }}"#
        ),
        UseCaseKind::Update => format!(
            r#"  async execute(id: string, dto: Update{pascal}Dto): Promise<{pascal}> {{
    const {camel} = await this.repository.update(id, dto);
    if (!{camel}) {{
      throw new NotFoundException(`{pascal} ${{id}} not found`);
    }}
    return {camel};
  }}"#
        ),
        UseCaseKind::Delete => format!(
            r#"  async execute(id: string): Promise<void> {{
    const deleted = await this.repository.delete(id);
    if (!deleted) {{
      throw new NotFoundException(`{pascal} ${{id}} not found`);
    }}
  }}"#
        ),
    };

    format!(
        r#"{FILE_BANNER}{imports}
@Injectable()
export class {class_name} {{
  constructor(
    @Inject({token})
    private readonly repository: {pascal}Repository,
  ) {{}}

{body}
}}
"#
    )
}
