//! Domain entity class generation.
//!
//! The emitted class is a leaf value object: constructor parameters in the
//! fixed field order (implicit `id`, `createdAt`, `updatedAt` first), one
//! getter per field, and a `serialize()` method returning a plain record.
//! Controllers return `serialize()` output, so nothing outside the module
//! ever imports the class for its shape alone. The constructor close, the
//! `serialize()` signature, and its return close all serve as patch anchors.

use crate::model::Entity;
use crate::naming::{to_camel_case, to_pascal_case};
use crate::typemap::domain_type;

use super::FILE_BANNER;

/// Renders the domain entity class.
///
/// Only scalar-compatible fields survive; `ObjectRef`/`EntityRef` fields
/// belong to higher-level composition and are filtered out. Principal
/// entities default their `role` parameter to `'USER'`.
pub fn generate_entity(entity: &Entity) -> String {
    let class_name = to_pascal_case(&entity.name);
    let mut params = String::new();
    let mut getters = String::new();
    let mut entries = String::new();

    for field in entity.domain_fields() {
        let prop = to_camel_case(&field.name);
        let ty = domain_type(&field.typ);
        let default = if entity.is_principal && field.name == "role" {
            " = 'USER'"
        } else {
            ""
        };
        params.push_str(&format!("    private readonly _{prop}: {ty}{default},\n"));
        getters.push_str(&format!(
            "\n  get {prop}(): {ty} {{\n    return this._{prop};\n  }}\n"
        ));
        entries.push_str(&format!("      {prop}: this._{prop},\n"));
    }

    format!(
        r#"{FILE_BANNER}
export class {class_name} {{
  constructor(
{params}  ) {{}}
{getters}
  serialize(): Record<string, unknown> {{
    return {{
{entries}    }};
  }}
}}
"#
    )
}
