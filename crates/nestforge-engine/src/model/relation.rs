//! Relationship declarations and foreign-key ownership resolution.

use crate::naming::{pluralize, to_camel_case};

/// Relationship cardinality, read from the declaring entity's perspective:
/// `1-n` means "the declaring entity has many of the target".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Parses the wire spelling. Anything outside the four supported
    /// spellings is `None`; callers turn that into an input error.
    pub fn parse(s: &str) -> Option<Cardinality> {
        match s.trim() {
            "1-1" => Some(Cardinality::OneToOne),
            "1-n" => Some(Cardinality::OneToMany),
            "n-1" => Some(Cardinality::ManyToOne),
            "n-n" => Some(Cardinality::ManyToMany),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1-1",
            Cardinality::OneToMany => "1-n",
            Cardinality::ManyToOne => "n-1",
            Cardinality::ManyToMany => "n-n",
        }
    }
}

/// A declared relation from the entity that carries it to a target entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecl {
    pub target: String,
    pub cardinality: Cardinality,
}

/// Shape of the reciprocal field on the entity that does not carry the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reciprocal {
    /// Single reference (1-1).
    Reference,
    /// Reference collection (1-n / n-1).
    Collection,
}

/// Which side of a relation persists the scalar foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    /// Entity whose persisted record carries the foreign-key column.
    pub owner: String,
    /// Entity the foreign key points at (the non-owner side).
    pub related: String,
    /// Property name of the foreign-key field on the owner.
    pub fk_field: String,
    /// Reciprocal field shape on the non-owner side.
    pub reciprocal: Reciprocal,
}

impl Ownership {
    /// Property name of the reciprocal field on the non-owner entity.
    pub fn reciprocal_field(&self) -> String {
        match self.reciprocal {
            Reciprocal::Reference => to_camel_case(&self.owner),
            Reciprocal::Collection => pluralize(&to_camel_case(&self.owner)),
        }
    }
}

/// Decides foreign-key ownership for a relation declared by `source`.
///
/// | cardinality (source→target) | owner  | key points at |
/// |-----------------------------|--------|---------------|
/// | 1-n                         | target | source        |
/// | n-1                         | source | target        |
/// | 1-1                         | source | target        |
/// | n-n                         | none   | pivot table   |
///
/// This table is the single authority on ownership. The DTO/mapper patches
/// and the reciprocal domain-entity injection both consume the returned
/// value; neither re-derives which side carries the key.
pub fn resolve(source: &str, relation: &RelationDecl) -> Option<Ownership> {
    let (owner, related) = match relation.cardinality {
        Cardinality::OneToMany => (relation.target.clone(), source.to_string()),
        Cardinality::ManyToOne | Cardinality::OneToOne => {
            (source.to_string(), relation.target.clone())
        }
        Cardinality::ManyToMany => return None,
    };
    let reciprocal = match relation.cardinality {
        Cardinality::OneToOne => Reciprocal::Reference,
        _ => Reciprocal::Collection,
    };
    Some(Ownership {
        fk_field: format!("{}Id", to_camel_case(&related)),
        owner,
        related,
        reciprocal,
    })
}
