//! The entity/relationship model consumed by every generator.
//!
//! This model is produced by input adapters (blueprint files, CLI flags)
//! and consumed by the generators and the patch engine. It carries no
//! behavior beyond type parsing and derived-field computation; ownership
//! resolution lives in [`relation`] and batch input in [`blueprint`].

mod blueprint;
mod relation;

pub use blueprint::{
    demo_blueprint, Blueprint, BlueprintConfig, EntityRelationSpec, EntitySpec, FieldSpec,
    RelationSpec,
};
pub use relation::{resolve, Cardinality, Ownership, Reciprocal, RelationDecl};

/// Semantic field types recognized by the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    Text,
    Number,
    Decimal,
    Boolean,
    Date,
    Uuid,
    Json,
    /// Array of another semantic type.
    Array(Box<FieldType>),
    /// Reference to a named enum.
    EnumRef(String),
    /// Reference to a named complex/DTO type.
    ObjectRef(String),
    /// Relationship-carrying reference to another entity.
    EntityRef(String),
    /// Unrecognized type spelling; rendered permissively, never rejected.
    Any,
}

impl FieldType {
    /// Parses a user-supplied type spelling.
    ///
    /// A `[]` suffix wraps the inner type in an array. `enum:Name`,
    /// `object:Name`, and `entity:Name` are explicit references. Unknown
    /// spellings fall back to [`FieldType::Any`].
    pub fn parse(spec: &str) -> FieldType {
        let spec = spec.trim();
        if let Some(inner) = spec.strip_suffix("[]") {
            return FieldType::Array(Box::new(FieldType::parse(inner)));
        }
        if let Some(name) = spec.strip_prefix("enum:") {
            return FieldType::EnumRef(name.trim().to_string());
        }
        if let Some(name) = spec.strip_prefix("object:") {
            return FieldType::ObjectRef(name.trim().to_string());
        }
        if let Some(name) = spec.strip_prefix("entity:") {
            return FieldType::EntityRef(name.trim().to_string());
        }
        match spec.to_lowercase().as_str() {
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "number" | "int" | "integer" | "float" => FieldType::Number,
            "decimal" => FieldType::Decimal,
            "boolean" | "bool" => FieldType::Boolean,
            "date" | "datetime" | "timestamp" => FieldType::Date,
            "uuid" => FieldType::Uuid,
            "json" => FieldType::Json,
            _ => FieldType::Any,
        }
    }

    /// True for the eight base scalar types.
    pub fn is_base_scalar(&self) -> bool {
        matches!(
            self,
            FieldType::String
                | FieldType::Text
                | FieldType::Number
                | FieldType::Decimal
                | FieldType::Boolean
                | FieldType::Date
                | FieldType::Uuid
                | FieldType::Json
        )
    }
}

/// A single declared or implicit field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub typ: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, typ: FieldType) -> Self {
        Self {
            name: name.into(),
            typ,
        }
    }

    /// True when the field belongs in the domain entity's constructor:
    /// base scalars, arrays of base scalars, and foreign-key names.
    /// Complex `ObjectRef`/`EntityRef` fields are composition concerns and
    /// stay out of the leaf value object.
    pub fn is_scalar_compatible(&self) -> bool {
        match &self.typ {
            typ if typ.is_base_scalar() => true,
            FieldType::Array(inner) => inner.is_base_scalar(),
            _ => self.name.ends_with("Id"),
        }
    }

    /// True when the field belongs in the Create/Update DTOs: the base
    /// scalar set, with arrays of scalars allowed.
    pub fn is_dto_field(&self) -> bool {
        match &self.typ {
            typ if typ.is_base_scalar() => true,
            FieldType::Array(inner) => inner.is_base_scalar(),
            _ => false,
        }
    }
}

/// Names of the fields every entity gains automatically, in emission order.
pub const IMPLICIT_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// A named domain concept with typed fields, the unit of generation.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<Field>,
    pub relation: Option<RelationDecl>,
    /// Principal entities carry the authentication capabilities: an
    /// implicit `role` field, a `findByEmail` lookup, and no public create
    /// route. Set by input adapters, never inferred from the name inside
    /// the generators.
    pub is_principal: bool,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            relation: None,
            is_principal: false,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, typ: FieldType) -> Self {
        self.fields.push(Field::new(name, typ));
        self
    }

    pub fn with_relation(mut self, target: impl Into<String>, cardinality: Cardinality) -> Self {
        self.relation = Some(RelationDecl {
            target: target.into(),
            cardinality,
        });
        self
    }

    pub fn principal(mut self) -> Self {
        self.is_principal = true;
        self
    }

    /// True when the user declared a field with this exact name.
    pub fn declares_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The field list as generated: `id`, `createdAt`, `updatedAt`
    /// prepended in that order, then user fields in declaration order,
    /// then the implicit `role` for principal entities that did not
    /// declare one themselves.
    pub fn generation_fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::new("id", FieldType::Uuid),
            Field::new("createdAt", FieldType::Date),
            Field::new("updatedAt", FieldType::Date),
        ];
        fields.extend(self.fields.iter().cloned());
        if self.is_principal && !self.declares_field("role") {
            fields.push(Field::new("role", FieldType::String));
        }
        fields
    }

    /// Generation fields that survive the domain-entity scalar filter.
    pub fn domain_fields(&self) -> Vec<Field> {
        self.generation_fields()
            .into_iter()
            .filter(Field::is_scalar_compatible)
            .collect()
    }

    /// User-declared fields that belong in the DTOs, excluding the
    /// principal `role` field which is special-cased by the DTO generator.
    pub fn dto_fields(&self) -> Vec<Field> {
        self.fields
            .iter()
            .filter(|f| f.is_dto_field())
            .filter(|f| !(self.is_principal && f.name == "role"))
            .cloned()
            .collect()
    }
}
