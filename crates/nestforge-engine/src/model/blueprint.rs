//! Blueprint documents: the batch input format.
//!
//! A blueprint is a JSON description of a whole domain: configuration,
//! entities in declaration order, and optional standalone relation rows
//! that are merged onto their `from` entity before generation.

use serde::{Deserialize, Serialize};

use crate::diagnostic::GeneratorError;
use crate::model::{Cardinality, Entity, Field, FieldType, RelationDecl};

/// Raw blueprint document as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BlueprintConfig>,
    pub entities: Vec<EntitySpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationSpec>,
}

/// Configuration section of a blueprint. Every option is optional;
/// unset options keep the session defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, rename = "apiDocs", skip_serializing_if = "Option::is_none")]
    pub api_docs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<bool>,
}

/// One entity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<EntityRelationSpec>,
    /// Overrides the default principal detection (entity named `user`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<bool>,
}

/// One field row: `{ "name": "title", "type": "string" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
}

/// Relation carried on an entity: `{ "target": "post", "type": "n-1" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRelationSpec {
    pub target: String,
    #[serde(rename = "type")]
    pub typ: String,
}

/// Standalone relation row: `{ "from": "tag", "to": "post", "type": "n-n" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub typ: String,
}

impl Blueprint {
    /// Parses a blueprint from JSON text.
    pub fn from_json(text: &str) -> Result<Blueprint, GeneratorError> {
        serde_json::from_str(text).map_err(|e| GeneratorError::BlueprintParse {
            message: e.to_string(),
        })
    }

    /// Serializes the blueprint as pretty JSON (starter files, dumps).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Resolves the document into entities in declaration order.
    ///
    /// Standalone `relations` rows are merged onto their `from` entity.
    /// An entity named `user` is marked principal unless the row says
    /// otherwise. Field types parse permissively; cardinalities do not.
    pub fn into_entities(self) -> Result<Vec<Entity>, GeneratorError> {
        let mut entities: Vec<Entity> = Vec::with_capacity(self.entities.len());

        for spec in self.entities {
            let relation = match spec.relation {
                Some(rel) => Some(parse_relation(&rel.target, &rel.typ)?),
                None => None,
            };
            let is_principal = spec
                .principal
                .unwrap_or_else(|| spec.name.eq_ignore_ascii_case("user"));
            entities.push(Entity {
                fields: spec
                    .fields
                    .iter()
                    .map(|f| Field::new(f.name.clone(), FieldType::parse(&f.typ)))
                    .collect(),
                name: spec.name,
                relation,
                is_principal,
            });
        }

        for row in self.relations {
            let relation = parse_relation(&row.to, &row.typ)?;
            let entity = entities
                .iter_mut()
                .find(|e| e.name.eq_ignore_ascii_case(&row.from))
                .ok_or_else(|| GeneratorError::BlueprintParse {
                    message: format!("relation row references undeclared entity '{}'", row.from),
                })?;
            if entity.relation.is_some() {
                return Err(GeneratorError::BlueprintParse {
                    message: format!("entity '{}' already declares a relation", entity.name),
                });
            }
            entity.relation = Some(relation);
        }

        Ok(entities)
    }
}

fn parse_relation(target: &str, cardinality: &str) -> Result<RelationDecl, GeneratorError> {
    let cardinality =
        Cardinality::parse(cardinality).ok_or_else(|| GeneratorError::UnknownCardinality {
            cardinality: cardinality.to_string(),
        })?;
    Ok(RelationDecl {
        target: target.to_string(),
        cardinality,
    })
}

/// Built-in demo profile: a tiny blog domain exercising every relation path
/// (principal entity, n-1 foreign key, n-n pivot).
pub fn demo_blueprint() -> Blueprint {
    Blueprint {
        config: None,
        entities: vec![
            EntitySpec {
                name: "user".to_string(),
                fields: vec![
                    field("email", "string"),
                    field("password", "string"),
                ],
                relation: None,
                principal: None,
            },
            EntitySpec {
                name: "post".to_string(),
                fields: vec![
                    field("title", "string"),
                    field("content", "text"),
                ],
                relation: None,
                principal: None,
            },
            EntitySpec {
                name: "comment".to_string(),
                fields: vec![field("body", "text")],
                relation: Some(EntityRelationSpec {
                    target: "post".to_string(),
                    typ: "n-1".to_string(),
                }),
                principal: None,
            },
            EntitySpec {
                name: "tag".to_string(),
                fields: vec![field("name", "string")],
                relation: Some(EntityRelationSpec {
                    target: "post".to_string(),
                    typ: "n-n".to_string(),
                }),
                principal: None,
            },
        ],
        relations: Vec::new(),
    }
}

fn field(name: &str, typ: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        typ: typ.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_blueprint() {
        let json = r#"{
            "entities": [
                { "name": "post", "fields": [ { "name": "title", "type": "string" } ] }
            ]
        }"#;
        let entities = Blueprint::from_json(json).unwrap().into_entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "post");
        assert_eq!(entities[0].fields[0].typ, FieldType::String);
        assert!(!entities[0].is_principal);
    }

    #[test]
    fn test_user_entity_marked_principal() {
        let json = r#"{ "entities": [ { "name": "user" } ] }"#;
        let entities = Blueprint::from_json(json).unwrap().into_entities().unwrap();
        assert!(entities[0].is_principal);
    }

    #[test]
    fn test_principal_override() {
        let json = r#"{ "entities": [ { "name": "account", "principal": true } ] }"#;
        let entities = Blueprint::from_json(json).unwrap().into_entities().unwrap();
        assert!(entities[0].is_principal);
    }

    #[test]
    fn test_relation_rows_merged_onto_from_entity() {
        let json = r#"{
            "entities": [
                { "name": "post" },
                { "name": "tag" }
            ],
            "relations": [ { "from": "tag", "to": "post", "type": "n-n" } ]
        }"#;
        let entities = Blueprint::from_json(json).unwrap().into_entities().unwrap();
        let tag = &entities[1];
        let relation = tag.relation.as_ref().unwrap();
        assert_eq!(relation.target, "post");
        assert_eq!(relation.cardinality, Cardinality::ManyToMany);
    }

    #[test]
    fn test_unknown_cardinality_rejected() {
        let json = r#"{
            "entities": [
                { "name": "comment", "relation": { "target": "post", "type": "one-to-many" } },
                { "name": "post" }
            ]
        }"#;
        let err = Blueprint::from_json(json).unwrap().into_entities().unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownCardinality { .. }));
    }

    #[test]
    fn test_relation_row_for_unknown_entity_rejected() {
        let json = r#"{
            "entities": [ { "name": "post" } ],
            "relations": [ { "from": "tag", "to": "post", "type": "n-n" } ]
        }"#;
        let err = Blueprint::from_json(json).unwrap().into_entities().unwrap_err();
        assert!(matches!(err, GeneratorError::BlueprintParse { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Blueprint::from_json("{ entities: oops").unwrap_err();
        assert!(matches!(err, GeneratorError::BlueprintParse { .. }));
    }

    #[test]
    fn test_demo_profile_resolves() {
        let entities = demo_blueprint().into_entities().unwrap();
        assert_eq!(entities.len(), 4);
        assert!(entities[0].is_principal);
        assert_eq!(
            entities[2].relation.as_ref().unwrap().cardinality,
            Cardinality::ManyToOne
        );
        assert_eq!(
            entities[3].relation.as_ref().unwrap().cardinality,
            Cardinality::ManyToMany
        );
    }
}
