//! Pre-generation validation of entity declarations.
//!
//! Runs before any artifact is written so a bad declaration rejects the
//! whole entity instead of leaving a half-generated module behind.

use crate::diagnostic::GeneratorError;
use crate::model::{Entity, IMPLICIT_FIELDS};

/// True for `[A-Za-z][A-Za-z0-9_]*`. Entity and field names feed directly
/// into class names, file stems, and property names, so anything outside
/// this shape would produce broken TypeScript.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates one entity declaration.
///
/// `target_exists` answers whether a relation target is known, either
/// declared earlier in the current batch or generated by a previous run.
/// Collisions with implicit fields are exact-name matches; `CreatedAt`
/// is a different property than the implicit `createdAt` and passes.
pub fn validate_entity(
    entity: &Entity,
    target_exists: impl Fn(&str) -> bool,
) -> Result<(), GeneratorError> {
    if !is_valid_identifier(&entity.name) {
        return Err(GeneratorError::InvalidEntityName {
            name: entity.name.clone(),
        });
    }

    let mut seen: Vec<&str> = Vec::new();
    for field in &entity.fields {
        if !is_valid_identifier(&field.name) {
            return Err(GeneratorError::InvalidFieldName {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
        if IMPLICIT_FIELDS.contains(&field.name.as_str()) {
            return Err(GeneratorError::ImplicitFieldCollision {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
        if seen.contains(&field.name.as_str()) {
            return Err(GeneratorError::DuplicateField {
                entity: entity.name.clone(),
                field: field.name.clone(),
            });
        }
        seen.push(&field.name);
    }

    if let Some(relation) = &entity.relation {
        if relation.target.eq_ignore_ascii_case(&entity.name) {
            return Err(GeneratorError::SelfRelation {
                entity: entity.name.clone(),
            });
        }
        if !target_exists(&relation.target) {
            return Err(GeneratorError::UnknownRelationTarget {
                entity: entity.name.clone(),
                target: relation.target.clone(),
            });
        }
    }

    Ok(())
}
