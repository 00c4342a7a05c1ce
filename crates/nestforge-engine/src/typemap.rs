//! Field type mapping to target representations.
//!
//! One source of truth for how a semantic type spells itself in the domain
//! layer (TypeScript types), the persistence layer (per-ORM column types),
//! and the validation layer (class-validator decorators). Generators and
//! the patch engine both consume these mappings.

use crate::config::OrmProfile;
use crate::model::{Field, FieldType};
use crate::naming::to_pascal_case;

/// Maps a semantic type to its TypeScript domain spelling.
pub fn domain_type(typ: &FieldType) -> String {
    match typ {
        FieldType::String | FieldType::Text | FieldType::Uuid => "string".to_string(),
        FieldType::Number | FieldType::Decimal => "number".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Date => "Date".to_string(),
        FieldType::Json => "Record<string, unknown>".to_string(),
        FieldType::Array(inner) => format!("{}[]", domain_type(inner)),
        FieldType::EnumRef(name) | FieldType::ObjectRef(name) => name.clone(),
        FieldType::EntityRef(name) => to_pascal_case(name),
        FieldType::Any => "any".to_string(),
    }
}

/// Maps a semantic type to a persistence column type for the given ORM
/// profile. Foreign-key columns are `uuid`-keyed strings in every profile.
pub fn column_type(typ: &FieldType, orm: OrmProfile) -> String {
    match orm {
        OrmProfile::TypeOrm => typeorm_column(typ),
        OrmProfile::Mongoose => mongoose_column(typ),
        OrmProfile::Prisma => prisma_column(typ),
    }
}

fn typeorm_column(typ: &FieldType) -> String {
    match typ {
        FieldType::String => "varchar".to_string(),
        FieldType::Text => "text".to_string(),
        FieldType::Number => "int".to_string(),
        FieldType::Decimal => "decimal".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Date => "timestamp".to_string(),
        FieldType::Uuid => "uuid".to_string(),
        FieldType::Json | FieldType::ObjectRef(_) | FieldType::Any => "jsonb".to_string(),
        FieldType::Array(_) => "simple-array".to_string(),
        FieldType::EnumRef(_) => "varchar".to_string(),
        FieldType::EntityRef(_) => "uuid".to_string(),
    }
}

fn mongoose_column(typ: &FieldType) -> String {
    match typ {
        FieldType::String | FieldType::Text | FieldType::Uuid | FieldType::EnumRef(_) => {
            "String".to_string()
        }
        FieldType::Number | FieldType::Decimal => "Number".to_string(),
        FieldType::Boolean => "Boolean".to_string(),
        FieldType::Date => "Date".to_string(),
        FieldType::Json | FieldType::ObjectRef(_) => "Object".to_string(),
        FieldType::Array(inner) => format!("[{}]", mongoose_column(inner)),
        FieldType::EntityRef(_) => "String".to_string(),
        FieldType::Any => "Schema.Types.Mixed".to_string(),
    }
}

fn prisma_column(typ: &FieldType) -> String {
    match typ {
        FieldType::String | FieldType::Text | FieldType::Uuid | FieldType::EnumRef(_) => {
            "String".to_string()
        }
        FieldType::Number => "Int".to_string(),
        FieldType::Decimal => "Decimal".to_string(),
        FieldType::Boolean => "Boolean".to_string(),
        FieldType::Date => "DateTime".to_string(),
        FieldType::Json | FieldType::ObjectRef(_) | FieldType::Any => "Json".to_string(),
        FieldType::Array(inner) => format!("{}[]", prisma_column(inner)),
        FieldType::EntityRef(_) => "String".to_string(),
    }
}

/// Ordered class-validator decorators for a DTO field.
///
/// Name heuristics win over the plain type rule: email-shaped names get a
/// format rule, password-shaped names a minimum length. Array types wrap
/// the element rule with `{ each: true }`.
pub fn validator_set(field: &Field) -> Vec<String> {
    let lower = field.name.to_lowercase();
    if field.typ == FieldType::String || field.typ == FieldType::Text {
        if lower.contains("email") {
            return vec!["@IsEmail()".to_string()];
        }
        if lower.contains("password") {
            return vec!["@IsString()".to_string(), "@MinLength(8)".to_string()];
        }
    }
    match &field.typ {
        FieldType::Array(inner) => match scalar_rule(inner) {
            Some(rule) => vec![format!("@{rule}({{ each: true }})")],
            None => Vec::new(),
        },
        typ => match scalar_rule(typ) {
            Some(rule) => vec![format!("@{rule}()")],
            None => Vec::new(),
        },
    }
}

fn scalar_rule(typ: &FieldType) -> Option<&'static str> {
    match typ {
        FieldType::String | FieldType::Text | FieldType::EnumRef(_) => Some("IsString"),
        FieldType::Number | FieldType::Decimal => Some("IsNumber"),
        FieldType::Boolean => Some("IsBoolean"),
        FieldType::Uuid => Some("IsUUID"),
        FieldType::Date => Some("IsDateString"),
        FieldType::Json | FieldType::ObjectRef(_) => Some("IsObject"),
        FieldType::Array(_) | FieldType::EntityRef(_) | FieldType::Any => None,
    }
}

/// Bare decorator names referenced by a decorator list, for import lines.
pub fn decorator_names(decorators: &[String]) -> Vec<String> {
    decorators
        .iter()
        .filter_map(|d| {
            let name = d.strip_prefix('@')?;
            let end = name.find('(')?;
            Some(name[..end].to_string())
        })
        .collect()
}

/// `@ApiProperty` annotation for a DTO field when API docs are enabled.
///
/// Description and example follow the same name heuristics as validation
/// (email / password / token / id-suffix), falling back to a typed default
/// literal per base type.
pub fn api_property(field: &Field) -> String {
    let (description, example) = doc_heuristic(field);
    format!("@ApiProperty({{ description: '{description}', example: {example} }})")
}

fn doc_heuristic(field: &Field) -> (String, String) {
    let lower = field.name.to_lowercase();
    if lower.contains("email") {
        return ("Email address".to_string(), "'user@example.com'".to_string());
    }
    if lower.contains("password") {
        return (
            "Password, minimum 8 characters".to_string(),
            "'changeme123'".to_string(),
        );
    }
    if lower.contains("token") {
        return ("Opaque token".to_string(), "'f1e2d3c4'".to_string());
    }
    if field.name.len() > 2 && field.name.ends_with("Id") {
        let related = &field.name[..field.name.len() - 2];
        return (
            format!("Identifier of the related {related}"),
            "'00000000-0000-0000-0000-000000000000'".to_string(),
        );
    }
    let name = &field.name;
    (format!("The {name} value"), example_literal(&field.typ))
}

fn example_literal(typ: &FieldType) -> String {
    match typ {
        FieldType::String => "'example'".to_string(),
        FieldType::Text => "'Lorem ipsum dolor sit amet'".to_string(),
        FieldType::Number => "42".to_string(),
        FieldType::Decimal => "19.99".to_string(),
        FieldType::Boolean => "true".to_string(),
        FieldType::Date => "'2024-01-01T00:00:00.000Z'".to_string(),
        FieldType::Uuid => "'00000000-0000-0000-0000-000000000000'".to_string(),
        FieldType::Json | FieldType::ObjectRef(_) | FieldType::Any => "{}".to_string(),
        FieldType::Array(inner) => format!("[{}]", example_literal(inner)),
        FieldType::EnumRef(_) | FieldType::EntityRef(_) => "'example'".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_types() {
        assert_eq!(domain_type(&FieldType::String), "string");
        assert_eq!(domain_type(&FieldType::Text), "string");
        assert_eq!(domain_type(&FieldType::Decimal), "number");
        assert_eq!(domain_type(&FieldType::Date), "Date");
        assert_eq!(domain_type(&FieldType::Json), "Record<string, unknown>");
        assert_eq!(
            domain_type(&FieldType::Array(Box::new(FieldType::Uuid))),
            "string[]"
        );
        assert_eq!(
            domain_type(&FieldType::ObjectRef("PostMeta".to_string())),
            "PostMeta"
        );
        assert_eq!(domain_type(&FieldType::Any), "any");
    }

    #[test]
    fn test_typeorm_columns() {
        assert_eq!(column_type(&FieldType::String, OrmProfile::TypeOrm), "varchar");
        assert_eq!(column_type(&FieldType::Text, OrmProfile::TypeOrm), "text");
        assert_eq!(column_type(&FieldType::Decimal, OrmProfile::TypeOrm), "decimal");
        assert_eq!(column_type(&FieldType::Date, OrmProfile::TypeOrm), "timestamp");
        assert_eq!(column_type(&FieldType::Uuid, OrmProfile::TypeOrm), "uuid");
        assert_eq!(column_type(&FieldType::Json, OrmProfile::TypeOrm), "jsonb");
    }

    #[test]
    fn test_mongoose_columns() {
        assert_eq!(column_type(&FieldType::Text, OrmProfile::Mongoose), "String");
        assert_eq!(column_type(&FieldType::Date, OrmProfile::Mongoose), "Date");
        assert_eq!(
            column_type(
                &FieldType::Array(Box::new(FieldType::Number)),
                OrmProfile::Mongoose
            ),
            "[Number]"
        );
    }

    #[test]
    fn test_prisma_columns() {
        assert_eq!(column_type(&FieldType::Number, OrmProfile::Prisma), "Int");
        assert_eq!(column_type(&FieldType::Date, OrmProfile::Prisma), "DateTime");
        assert_eq!(
            column_type(&FieldType::Array(Box::new(FieldType::String)), OrmProfile::Prisma),
            "String[]"
        );
    }

    #[test]
    fn test_validators_by_type() {
        assert_eq!(
            validator_set(&Field::new("title", FieldType::String)),
            vec!["@IsString()"]
        );
        assert_eq!(
            validator_set(&Field::new("count", FieldType::Number)),
            vec!["@IsNumber()"]
        );
        assert_eq!(
            validator_set(&Field::new("active", FieldType::Boolean)),
            vec!["@IsBoolean()"]
        );
        assert_eq!(
            validator_set(&Field::new("ownerId", FieldType::Uuid)),
            vec!["@IsUUID()"]
        );
        assert_eq!(
            validator_set(&Field::new("publishedAt", FieldType::Date)),
            vec!["@IsDateString()"]
        );
    }

    #[test]
    fn test_name_heuristics_override_type_rule() {
        assert_eq!(
            validator_set(&Field::new("email", FieldType::String)),
            vec!["@IsEmail()"]
        );
        assert_eq!(
            validator_set(&Field::new("contactEmail", FieldType::String)),
            vec!["@IsEmail()"]
        );
        assert_eq!(
            validator_set(&Field::new("password", FieldType::String)),
            vec!["@IsString()", "@MinLength(8)"]
        );
        // Heuristics only apply to string-family fields.
        assert_eq!(
            validator_set(&Field::new("emailCount", FieldType::Number)),
            vec!["@IsNumber()"]
        );
    }

    #[test]
    fn test_array_wraps_element_rule() {
        assert_eq!(
            validator_set(&Field::new("tags", FieldType::Array(Box::new(FieldType::String)))),
            vec!["@IsString({ each: true })"]
        );
    }

    #[test]
    fn test_decorator_names_for_imports() {
        let decorators = vec!["@IsString()".to_string(), "@MinLength(8)".to_string()];
        assert_eq!(decorator_names(&decorators), vec!["IsString", "MinLength"]);
    }

    #[test]
    fn test_api_property_heuristics() {
        let email = api_property(&Field::new("email", FieldType::String));
        assert!(email.contains("'user@example.com'"));

        let fk = api_property(&Field::new("postId", FieldType::Uuid));
        assert!(fk.contains("related post"));
        assert!(fk.contains("00000000-0000"));

        let plain = api_property(&Field::new("title", FieldType::String));
        assert!(plain.contains("The title value"));
        assert!(plain.contains("'example'"));
    }
}
