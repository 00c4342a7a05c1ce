//! Service generation: a facade over the five use-cases.
//!
//! Controllers depend on this one class instead of on each use-case, so
//! the use-case set can grow without touching the presentation layer.

use crate::model::Entity;
use crate::naming::{to_camel_case, to_pascal_case};

use super::layout::{import_specifier, ModuleLayout};
use super::usecase::use_case_defs;
use super::FILE_BANNER;

/// Renders the service facade for an entity.
pub fn generate_service(entity: &Entity, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let service_file = layout.service_file();
    let entity_import = import_specifier(&service_file, &layout.entity_file());
    let create_import = import_specifier(&service_file, &layout.create_dto_file());
    let update_import = import_specifier(&service_file, &layout.update_dto_file());

    let defs = use_case_defs(entity);
    let mut use_case_imports = String::new();
    let mut ctor_params = String::new();
    for def in &defs {
        let spec = import_specifier(&service_file, &layout.use_case_file(&def.file_stem));
        use_case_imports.push_str(&format!("import {{ {} }} from '{spec}';\n", def.class_name));
        let member = to_camel_case(&def.class_name);
        ctor_params.push_str(&format!(
            "    private readonly {member}: {},\n",
            def.class_name
        ));
    }

    let create_member = to_camel_case(&defs[0].class_name);
    let find_all_member = to_camel_case(&defs[1].class_name);
    let find_by_id_member = to_camel_case(&defs[2].class_name);
    let update_member = to_camel_case(&defs[3].class_name);
    let delete_member = to_camel_case(&defs[4].class_name);

    format!(
        r#"{FILE_BANNER}import {{ Injectable }} from '@nestjs/common';
import {{ {pascal} }} from '{entity_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';
{use_case_imports}
@Injectable()
export class {pascal}Service {{
  constructor(
{ctor_params}  ) {{}}

  create(dto: Create{pascal}Dto): Promise<{pascal}> {{
    return this.{create_member}.execute(dto);
  }}

  findAll(): Promise<{pascal}[]> {{
    return this.{find_all_member}.execute();
  }}

  findById(id: string): Promise<{pascal}> {{
    return this.{find_by_id_member}.execute(id);
  }}

  update(id: string, dto: Update{pascal}Dto): Promise<{pascal}> {{
    return this.{update_member}.execute(id, dto);
  }}

  delete(id: string): Promise<void> {{
    return this.{delete_member}.execute(id);
  }}
}}
"#
    )
}
