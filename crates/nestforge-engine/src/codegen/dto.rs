//! Create/Update DTO generation.
//!
//! Create DTOs carry required fields with class-validator decorators;
//! Update DTOs mark the same fields optional. With API docs enabled every
//! field gains an `@ApiProperty` annotation and the Update DTO collapses
//! to `extends PartialType(CreateXDto)`. The class-open line and the
//! single-line validator import are both patch anchors.

use crate::config::GeneratorConfig;
use crate::model::{Entity, Field, FieldType};
use crate::naming::{to_camel_case, to_kebab_case, to_pascal_case};
use crate::typemap::{api_property, decorator_names, domain_type, validator_set};

use super::FILE_BANNER;

/// Renders the Create DTO class.
pub fn generate_create_dto(entity: &Entity, config: &GeneratorConfig) -> String {
    let class_name = format!("Create{}Dto", to_pascal_case(&entity.name));
    let mut blocks = Vec::new();
    let mut imports = Vec::new();

    for field in entity.dto_fields() {
        let decorators = validator_set(&field);
        imports.extend(decorator_names(&decorators));
        blocks.push(field_block(&field, &decorators, config, false));
    }
    if entity.is_principal {
        imports.push("IsOptional".to_string());
        imports.push("IsString".to_string());
        blocks.push(role_block(config));
    }

    render_dto(&class_name, blocks, imports, config)
}

/// Renders the Update DTO class.
///
/// With API docs enabled the class derives from the Create DTO through
/// `PartialType`, which re-declares every field as optional while keeping
/// its validators and annotations. Without docs the fields are listed
/// explicitly with `@IsOptional()`.
pub fn generate_update_dto(entity: &Entity, config: &GeneratorConfig) -> String {
    let pascal = to_pascal_case(&entity.name);
    let class_name = format!("Update{pascal}Dto");

    if config.api_docs {
        let create_class = format!("Create{pascal}Dto");
        let create_import = format!("./create-{}.dto", to_kebab_case(&entity.name));
        return format!(
            r#"{FILE_BANNER}import {{ PartialType }} from '@nestjs/swagger';
import {{ {create_class} }} from '{create_import}';

export class {class_name} extends PartialType({create_class}) {{}}
"#
        );
    }

    let mut blocks = Vec::new();
    let mut imports = vec!["IsOptional".to_string()];
    for field in entity.dto_fields() {
        let decorators = validator_set(&field);
        imports.extend(decorator_names(&decorators));
        blocks.push(field_block(&field, &decorators, config, true));
    }
    if blocks.is_empty() {
        imports.clear();
    }

    render_dto(&class_name, blocks, imports, config)
}

/// DTO-side spelling of a field type. Dates travel as ISO strings because
/// `@IsDateString()` validates string input.
fn dto_type(typ: &FieldType) -> String {
    match typ {
        FieldType::Date => "string".to_string(),
        FieldType::Array(inner) if **inner == FieldType::Date => "string[]".to_string(),
        other => domain_type(other),
    }
}

fn field_block(
    field: &Field,
    decorators: &[String],
    config: &GeneratorConfig,
    optional: bool,
) -> String {
    let mut lines = Vec::new();
    if config.api_docs {
        lines.push(format!("  {}", api_property(field)));
    }
    if optional {
        lines.push("  @IsOptional()".to_string());
    }
    for decorator in decorators {
        lines.push(format!("  {decorator}"));
    }
    let prop = to_camel_case(&field.name);
    let ty = dto_type(&field.typ);
    let marker = if optional { "?" } else { "" };
    lines.push(format!("  {prop}{marker}: {ty};"));
    lines.join("\n")
}

fn role_block(config: &GeneratorConfig) -> String {
    let mut lines = Vec::new();
    if config.api_docs {
        lines.push(
            "  @ApiProperty({ description: 'Access role', example: 'USER', required: false })"
                .to_string(),
        );
    }
    lines.push("  @IsOptional()".to_string());
    lines.push("  @IsString()".to_string());
    lines.push("  role?: string = 'USER';".to_string());
    lines.join("\n")
}

fn render_dto(
    class_name: &str,
    blocks: Vec<String>,
    mut imports: Vec<String>,
    config: &GeneratorConfig,
) -> String {
    let mut code = String::from(FILE_BANNER);
    imports.sort();
    imports.dedup();
    if !imports.is_empty() {
        code.push_str(&format!(
            "import {{ {} }} from 'class-validator';\n",
            imports.join(", ")
        ));
    }
    if config.api_docs && !blocks.is_empty() {
        code.push_str("import { ApiProperty } from '@nestjs/swagger';\n");
    }
    code.push('\n');
    if blocks.is_empty() {
        code.push_str(&format!("export class {class_name} {{}}\n"));
    } else {
        code.push_str(&format!(
            "export class {class_name} {{\n{}\n}}\n",
            blocks.join("\n\n")
        ));
    }
    code
}
