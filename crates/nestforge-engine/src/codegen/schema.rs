//! Persistence schema generation per ORM profile.
//!
//! Every profile emits a `XRecord` type describing the raw storage shape
//! the mapper reads from. TypeORM adds an `EntitySchema`, Mongoose a
//! `Schema` with timestamps, and Prisma keeps its schema in the shared
//! `prisma/schema.prisma` file (appended model-by-model) next to a
//! record-type-only artifact. The record close and the column/field list
//! closes are patch anchors for foreign-key retrofits.

use crate::config::OrmProfile;
use crate::model::{Entity, Field, IMPLICIT_FIELDS};
use crate::naming::{pluralize, to_camel_case, to_pascal_case, to_snake_case};
use crate::typemap::{column_type, domain_type};

use super::FILE_BANNER;

/// Renders the per-entity schema artifact for the given profile.
pub fn generate_schema(entity: &Entity, orm: OrmProfile) -> String {
    match orm {
        OrmProfile::TypeOrm => typeorm_schema(entity),
        OrmProfile::Mongoose => mongoose_schema(entity),
        OrmProfile::Prisma => format!("{FILE_BANNER}\n{}", record_type(entity)),
    }
}

fn record_type(entity: &Entity) -> String {
    let pascal = to_pascal_case(&entity.name);
    let mut fields = String::new();
    for field in entity.domain_fields() {
        let prop = to_camel_case(&field.name);
        let ty = domain_type(&field.typ);
        fields.push_str(&format!("  {prop}: {ty};\n"));
    }
    format!("export type {pascal}Record = {{\n{fields}}};\n")
}

/// User-declared scalar fields, the ones a schema body lists explicitly.
fn declared_fields(entity: &Entity) -> Vec<Field> {
    entity
        .domain_fields()
        .into_iter()
        .filter(|f| !IMPLICIT_FIELDS.contains(&f.name.as_str()))
        .collect()
}

fn typeorm_schema(entity: &Entity) -> String {
    let pascal = to_pascal_case(&entity.name);
    let table = pluralize(&to_snake_case(&entity.name));
    let record = record_type(entity);

    let mut columns = String::new();
    columns.push_str(
        "    id: {\n      type: 'uuid',\n      primary: true,\n      generated: 'uuid',\n    },\n",
    );
    columns.push_str("    createdAt: {\n      type: 'timestamp',\n      createDate: true,\n    },\n");
    columns.push_str("    updatedAt: {\n      type: 'timestamp',\n      updateDate: true,\n    },\n");
    for field in declared_fields(entity) {
        let prop = to_camel_case(&field.name);
        let column = column_type(&field.typ, OrmProfile::TypeOrm);
        if entity.is_principal && field.name == "role" {
            columns.push_str(&format!(
                "    {prop}: {{\n      type: '{column}',\n      default: 'USER',\n    }},\n"
            ));
        } else {
            columns.push_str(&format!("    {prop}: {{\n      type: '{column}',\n    }},\n"));
        }
    }

    format!(
        r#"{FILE_BANNER}import {{ EntitySchema }} from 'typeorm';

{record}
export const {pascal}Schema = new EntitySchema<{pascal}Record>({{
  name: '{pascal}',
  tableName: '{table}',
  columns: {{
{columns}  }},
}});
"#
    )
}

fn mongoose_schema(entity: &Entity) -> String {
    let pascal = to_pascal_case(&entity.name);
    let record = record_type(entity);

    let mut fields = String::new();
    for field in declared_fields(entity) {
        let prop = to_camel_case(&field.name);
        let column = column_type(&field.typ, OrmProfile::Mongoose);
        if entity.is_principal && field.name == "role" {
            fields.push_str(&format!("    {prop}: {{ type: {column}, default: 'USER' }},\n"));
        } else {
            fields.push_str(&format!("    {prop}: {{ type: {column}, required: true }},\n"));
        }
    }

    format!(
        r#"{FILE_BANNER}import {{ Schema }} from 'mongoose';

{record}
export const {pascal}Schema = new Schema(
  {{
{fields}  }},
  {{ timestamps: true }},
);
"#
    )
}

/// Renders the Prisma model block appended to `prisma/schema.prisma`.
pub fn generate_prisma_model(entity: &Entity) -> String {
    let pascal = to_pascal_case(&entity.name);
    let rows: Vec<(String, String, &'static str)> = entity
        .domain_fields()
        .iter()
        .map(|field| {
            let attribute = match field.name.as_str() {
                "id" => "@id @default(uuid())",
                "createdAt" => "@default(now())",
                "updatedAt" => "@updatedAt",
                "role" if entity.is_principal => "@default(\"USER\")",
                _ => "",
            };
            (
                to_camel_case(&field.name),
                column_type(&field.typ, OrmProfile::Prisma),
                attribute,
            )
        })
        .collect();

    let name_width = rows.iter().map(|(n, _, _)| n.len()).max().unwrap_or(0);
    let type_width = rows.iter().map(|(_, t, _)| t.len()).max().unwrap_or(0);

    let mut body = String::new();
    for (name, ty, attribute) in &rows {
        if attribute.is_empty() {
            body.push_str(&format!("  {name:<name_width$} {ty}\n"));
        } else {
            body.push_str(&format!("  {name:<name_width$} {ty:<type_width$} {attribute}\n"));
        }
    }
    format!("model {pascal} {{\n{body}}}\n")
}

/// Renders the generator/datasource header of a fresh `prisma/schema.prisma`.
pub fn prisma_schema_header() -> String {
    format!(
        r#"{FILE_BANNER}
generator client {{
  provider = "prisma-client-js"
}}

datasource db {{
  provider = "postgresql"
  url      = env("DATABASE_URL")
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    fn post() -> Entity {
        Entity::new("post")
            .with_field("title", FieldType::String)
            .with_field("content", FieldType::Text)
    }

    #[test]
    fn test_record_type_lists_all_fields_in_order() {
        let code = generate_schema(&post(), OrmProfile::TypeOrm);
        let expected = "export type PostRecord = {\n  id: string;\n  createdAt: Date;\n  updatedAt: Date;\n  title: string;\n  content: string;\n};";
        assert!(code.contains(expected));
    }

    #[test]
    fn test_typeorm_schema_shape() {
        let code = generate_schema(&post(), OrmProfile::TypeOrm);
        assert!(code.contains("import { EntitySchema } from 'typeorm';"));
        assert!(code.contains("export const PostSchema = new EntitySchema<PostRecord>({"));
        assert!(code.contains("  name: 'Post',\n  tableName: 'posts',"));
        assert!(code.contains("    id: {\n      type: 'uuid',\n      primary: true,"));
        assert!(code.contains("    title: {\n      type: 'varchar',\n    },"));
        assert!(code.contains("    content: {\n      type: 'text',\n    },"));
        assert!(code.ends_with("  },\n});\n"));
    }

    #[test]
    fn test_typeorm_table_name_is_plural_snake_case() {
        let entity = Entity::new("blog_post").with_field("title", FieldType::String);
        let code = generate_schema(&entity, OrmProfile::TypeOrm);
        assert!(code.contains("tableName: 'blog_posts',"));
    }

    #[test]
    fn test_mongoose_schema_shape() {
        let code = generate_schema(&post(), OrmProfile::Mongoose);
        assert!(code.contains("import { Schema } from 'mongoose';"));
        assert!(code.contains("export const PostSchema = new Schema("));
        assert!(code.contains("    title: { type: String, required: true },"));
        assert!(code.contains("  { timestamps: true },\n);"));
        // Implicit fields live in the record type, not the schema body.
        assert!(!code.contains("createdAt: { type:"));
    }

    #[test]
    fn test_principal_role_defaults_in_schema() {
        let user = Entity::new("user")
            .with_field("email", FieldType::String)
            .principal();
        let typeorm = generate_schema(&user, OrmProfile::TypeOrm);
        assert!(typeorm.contains("    role: {\n      type: 'varchar',\n      default: 'USER',\n    },"));
        let mongoose = generate_schema(&user, OrmProfile::Mongoose);
        assert!(mongoose.contains("    role: { type: String, default: 'USER' },"));
    }

    #[test]
    fn test_prisma_record_file_has_no_schema_object() {
        let code = generate_schema(&post(), OrmProfile::Prisma);
        assert!(code.contains("export type PostRecord = {"));
        assert!(!code.contains("Schema"));
        assert!(!code.contains("import"));
    }

    #[test]
    fn test_prisma_model_block() {
        let code = generate_prisma_model(&post());
        assert!(code.starts_with("model Post {\n"));
        assert!(code.contains("  id        String   @id @default(uuid())\n"));
        assert!(code.contains("  createdAt DateTime @default(now())\n"));
        assert!(code.contains("  updatedAt DateTime @updatedAt\n"));
        assert!(code.contains("  title     String\n"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_prisma_header_declares_client_and_datasource() {
        let header = prisma_schema_header();
        assert!(header.contains("generator client {"));
        assert!(header.contains("provider = \"postgresql\""));
        assert!(header.contains("env(\"DATABASE_URL\")"));
    }
}
