//! Mapper generation: persistence records to domain entities and back.
//!
//! `toDomain` constructs the entity in the fixed field order, so its
//! argument list and the entity constructor's parameter list must always
//! agree; the patch engine appends to both in lockstep when a relation is
//! retrofitted. `toPersistence` copies create-DTO fields directly and
//! `toPartialPersistence` copies update-DTO fields only when defined.

use crate::config::GeneratorConfig;
use crate::model::{Entity, Field, FieldType};
use crate::naming::{to_camel_case, to_pascal_case};

use super::layout::{import_specifier, ModuleLayout};
use super::FILE_BANNER;

/// Renders the mapper class for an entity.
pub fn generate_mapper(entity: &Entity, config: &GeneratorConfig, layout: &ModuleLayout) -> String {
    let pascal = to_pascal_case(&entity.name);
    let record = format!("{pascal}Record");
    let mapper_file = layout.mapper_file();
    let entity_import = import_specifier(&mapper_file, &layout.entity_file());
    let record_import = import_specifier(&mapper_file, &layout.schema_file(config.orm));
    let create_import = import_specifier(&mapper_file, &layout.create_dto_file());
    let update_import = import_specifier(&mapper_file, &layout.update_dto_file());

    let mut domain_args = String::new();
    for field in entity.domain_fields() {
        let prop = to_camel_case(&field.name);
        domain_args.push_str(&format!("      record.{prop},\n"));
    }

    let mut persistence_entries = String::new();
    for field in entity.dto_fields() {
        let prop = to_camel_case(&field.name);
        let value = persistence_expr(&field);
        persistence_entries.push_str(&format!("      {prop}: {value},\n"));
    }
    if entity.is_principal {
        persistence_entries.push_str("      role: dto.role ?? 'USER',\n");
    }

    let mut partial_entries = String::new();
    for field in entity.dto_fields() {
        let prop = to_camel_case(&field.name);
        let value = persistence_expr(&field);
        partial_entries.push_str(&format!(
            "    if (dto.{prop} !== undefined) {{\n      data.{prop} = {value};\n    }}\n"
        ));
    }

    format!(
        r#"{FILE_BANNER}import {{ {pascal} }} from '{entity_import}';
import {{ {record} }} from '{record_import}';
import {{ Create{pascal}Dto }} from '{create_import}';
import {{ Update{pascal}Dto }} from '{update_import}';

export class {pascal}Mapper {{
  static toDomain(record: {record}): {pascal} {{
    return new {pascal}(
{domain_args}    );
  }}

  static toPersistence(dto: Create{pascal}Dto): Omit<{record}, 'id' | 'createdAt' | 'updatedAt'> {{
    return {{
{persistence_entries}    }};
  }}

  static toPartialPersistence(dto: Update{pascal}Dto): Partial<{record}> {{
    const data: Partial<{record}> = {{}};
{partial_entries}    return data;
  }}
}}
"#
    )
}

/// Expression copying a DTO field into a persistence record. Date fields
/// arrive as ISO strings on the DTO and are revived here.
fn persistence_expr(field: &Field) -> String {
    let prop = to_camel_case(&field.name);
    match &field.typ {
        FieldType::Date => format!("new Date(dto.{prop})"),
        FieldType::Array(inner) if **inner == FieldType::Date => {
            format!("dto.{prop}.map((value) => new Date(value))")
        }
        _ => format!("dto.{prop}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArchitectureMode, OrmProfile};

    fn post() -> Entity {
        Entity::new("post")
            .with_field("title", FieldType::String)
            .with_field("content", FieldType::Text)
    }

    fn layout() -> ModuleLayout {
        ModuleLayout::new("post", ArchitectureMode::Full)
    }

    #[test]
    fn test_to_domain_preserves_fixed_field_order() {
        let code = generate_mapper(&post(), &GeneratorConfig::default(), &layout());
        let expected = "    return new Post(\n      record.id,\n      record.createdAt,\n      record.updatedAt,\n      record.title,\n      record.content,\n    );";
        assert!(code.contains(expected));
    }

    #[test]
    fn test_to_persistence_copies_dto_fields_only() {
        let code = generate_mapper(&post(), &GeneratorConfig::default(), &layout());
        assert!(code.contains("      title: dto.title,\n"));
        assert!(code.contains("      content: dto.content,\n"));
        assert!(!code.contains("id: dto.id"));
        assert!(!code.contains("createdAt: dto.createdAt"));
    }

    #[test]
    fn test_partial_persistence_guards_each_field() {
        let code = generate_mapper(&post(), &GeneratorConfig::default(), &layout());
        assert!(code.contains(
            "    if (dto.title !== undefined) {\n      data.title = dto.title;\n    }\n"
        ));
        assert!(code.contains("    return data;\n"));
    }

    #[test]
    fn test_imports_follow_layout() {
        let code = generate_mapper(&post(), &GeneratorConfig::default(), &layout());
        assert!(code.contains("import { Post } from '../../domain/entities/post.entity';"));
        assert!(code.contains("import { PostRecord } from '../adapters/post.schema';"));
        assert!(code.contains("import { CreatePostDto } from '../../application/dtos/create-post.dto';"));
    }

    #[test]
    fn test_prisma_record_import() {
        let config = GeneratorConfig {
            orm: OrmProfile::Prisma,
            ..GeneratorConfig::default()
        };
        let code = generate_mapper(&post(), &config, &layout());
        assert!(code.contains("import { PostRecord } from '../adapters/post.record';"));
    }

    #[test]
    fn test_principal_role_defaults_on_create() {
        let user = Entity::new("user")
            .with_field("email", FieldType::String)
            .principal();
        let code = generate_mapper(
            &user,
            &GeneratorConfig::default(),
            &ModuleLayout::new("user", ArchitectureMode::Full),
        );
        assert!(code.contains("      role: dto.role ?? 'USER',\n"));
        assert!(code.contains("      record.role,\n"));
        // The update path never touches role.
        assert!(!code.contains("data.role"));
    }

    #[test]
    fn test_date_fields_are_revived_from_strings() {
        let event = Entity::new("event").with_field("startsAt", FieldType::Date);
        let code = generate_mapper(
            &event,
            &GeneratorConfig::default(),
            &ModuleLayout::new("event", ArchitectureMode::Full),
        );
        assert!(code.contains("startsAt: new Date(dto.startsAt),"));
        assert!(code.contains("data.startsAt = new Date(dto.startsAt);"));
    }
}
