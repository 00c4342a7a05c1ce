//! Literal anchors into generated TypeScript.
//!
//! Every constant here is a byte-exact fragment of what the generators in
//! [`crate::codegen`] emit. The patch engine finds the first occurrence of
//! an anchor and splices text around it, so the generators and this module
//! have to move in lockstep; the tests below pin each anchor against real
//! generator output to catch drift.

/// Closing of the domain entity constructor parameter list.
pub const CONSTRUCTOR_CLOSE: &str = "\n  ) {}";

/// Opening of the domain entity `serialize()` method.
pub const SERIALIZE_OPEN: &str = "\n  serialize(): Record<string, unknown> {";

/// Closing of an object literal returned at method-body indentation.
///
/// In an entity file this is the `serialize()` return object; in a mapper
/// it is the `toPersistence` return object (the `toDomain` constructor call
/// closes with `);` and never matches).
pub const OBJECT_RETURN_CLOSE: &str = "\n    };";

/// Closing of the `toDomain` constructor call in a mapper.
pub const CONSTRUCTOR_CALL_CLOSE: &str = "\n    );";

/// Return statement of `toPartialPersistence` in a mapper.
pub const PARTIAL_RETURN: &str = "\n    return data;";

/// The `@Module` decorator opening in the root application module.
pub const ROOT_MODULE_OPEN: &str = "\n\n@Module({";

/// Closing of the `imports` array in the root application module.
///
/// `controllers` and `providers` are emitted as single-line `[]` there, so
/// the first occurrence is always the imports array.
pub const ROOT_IMPORTS_CLOSE: &str = "\n  ],";

/// Closing of an `export type XRecord = { ... };` declaration.
///
/// TypeORM schema files also contain `\n});` from the `EntitySchema` call,
/// which does not match this anchor.
pub const RECORD_TYPE_CLOSE: &str = "\n};";

/// Closing of the `columns` map in a TypeORM `EntitySchema` file.
pub const TYPEORM_COLUMNS_CLOSE: &str = "\n  },\n});";

/// Closing of the field map in a Mongoose `new Schema(...)` file.
pub const MONGOOSE_FIELDS_CLOSE: &str = "\n  },\n  { timestamps: true },\n);";

/// Opening of a class declaration, as emitted for entities and DTOs.
pub fn class_open(class_name: &str) -> String {
    format!("export class {class_name} {{")
}

/// Opening of a Prisma model block in `schema.prisma`.
pub fn prisma_model_open(model_name: &str) -> String {
    format!("model {model_name} {{")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::dto::generate_create_dto;
    use crate::codegen::entity::generate_entity;
    use crate::codegen::layout::ModuleLayout;
    use crate::codegen::mapper::generate_mapper;
    use crate::codegen::project::generate_app_module;
    use crate::codegen::schema::{generate_prisma_model, generate_schema};
    use crate::config::{ArchitectureMode, GeneratorConfig, OrmProfile};
    use crate::model::{Entity, FieldType};

    fn post() -> Entity {
        Entity::new("post")
            .with_field("title", FieldType::String)
            .with_field("viewCount", FieldType::Number)
    }

    fn layout() -> ModuleLayout {
        ModuleLayout::new("post", ArchitectureMode::Full)
    }

    #[test]
    fn test_entity_anchors_present_once() {
        let code = generate_entity(&post());
        assert_eq!(code.matches(CONSTRUCTOR_CLOSE).count(), 1);
        assert_eq!(code.matches(SERIALIZE_OPEN).count(), 1);
        // Getters close at two-space indentation, so the only four-space
        // close brace is the serialize() return object.
        assert_eq!(code.matches(OBJECT_RETURN_CLOSE).count(), 1);
    }

    #[test]
    fn test_mapper_first_object_close_is_to_persistence() {
        let code = generate_mapper(&post(), &GeneratorConfig::default(), &layout());
        let ctor_close = code.find(CONSTRUCTOR_CALL_CLOSE).unwrap();
        let object_close = code.find(OBJECT_RETURN_CLOSE).unwrap();
        let partial = code.find(PARTIAL_RETURN).unwrap();
        let to_persistence = code.find("toPersistence").unwrap();
        // toDomain closes with `);` before toPersistence opens its object.
        assert!(ctor_close < to_persistence);
        assert!(object_close > to_persistence);
        assert!(object_close < partial);
        assert_eq!(code.matches(PARTIAL_RETURN).count(), 1);
    }

    #[test]
    fn test_root_module_anchors() {
        let code = generate_app_module(&GeneratorConfig::default());
        assert_eq!(code.matches(ROOT_MODULE_OPEN).count(), 1);
        // Single-line controllers/providers keep the imports close unique.
        assert_eq!(code.matches(ROOT_IMPORTS_CLOSE).count(), 1);
    }

    #[test]
    fn test_typeorm_schema_anchors() {
        let code = generate_schema(&post(), OrmProfile::TypeOrm);
        assert!(code.contains(RECORD_TYPE_CLOSE));
        assert!(code.contains(TYPEORM_COLUMNS_CLOSE));
        // The record close sits before the EntitySchema call.
        assert!(code.find(RECORD_TYPE_CLOSE).unwrap() < code.find("EntitySchema").unwrap());
    }

    #[test]
    fn test_mongoose_schema_anchor() {
        let code = generate_schema(&post(), OrmProfile::Mongoose);
        assert!(code.contains(MONGOOSE_FIELDS_CLOSE));
        assert!(code.contains(RECORD_TYPE_CLOSE));
    }

    #[test]
    fn test_class_open_matches_dto() {
        let code = generate_create_dto(&post(), &GeneratorConfig::default());
        assert!(code.contains(&class_open("CreatePostDto")));
    }

    #[test]
    fn test_prisma_model_open_matches_model() {
        let code = generate_prisma_model(&post());
        assert!(code.contains(&prisma_model_open("Post")));
    }
}
