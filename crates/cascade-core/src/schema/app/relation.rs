mod has_many;
pub use has_many::HasMany;

mod has_many_through;
pub use has_many_through::HasManyThrough;

mod has_one;
pub use has_one::HasOne;

use super::ModelId;
use crate::stmt::{Filter, Value};

use std::fmt;

/// Relation metadata, as registered on the owning model.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    HasOne(HasOne),
    HasMany(HasMany),
    HasManyThrough(HasManyThrough),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationKind {
    HasOne,
    HasMany,
    HasManyThrough,
}

impl Relation {
    pub fn kind(&self) -> RelationKind {
        match self {
            Relation::HasOne(_) => RelationKind::HasOne,
            Relation::HasMany(_) => RelationKind::HasMany,
            Relation::HasManyThrough(_) => RelationKind::HasManyThrough,
        }
    }

    /// The related model
    pub fn target(&self) -> ModelId {
        match self {
            Relation::HasOne(rel) => rel.target,
            Relation::HasMany(rel) => rel.target,
            Relation::HasManyThrough(rel) => rel.target,
        }
    }

    /// The model whose rows reference the parent and are removed by a
    /// cascade. For `HasManyThrough` this is the join model: deleting a
    /// physician removes its appointments, not its patients.
    pub fn scope_model(&self) -> ModelId {
        match self {
            Relation::HasOne(rel) => rel.target,
            Relation::HasMany(rel) => rel.target,
            Relation::HasManyThrough(rel) => rel.through,
        }
    }

    /// The foreign key field on [`Relation::scope_model`] that stores the
    /// parent's primary key.
    pub fn key_to(&self) -> &str {
        match self {
            Relation::HasOne(rel) => &rel.key_to,
            Relation::HasMany(rel) => &rel.key_to,
            Relation::HasManyThrough(rel) => &rel.key_to,
        }
    }

    /// Filter selecting the rows of [`Relation::scope_model`] that belong to
    /// the parent identified by `parent_id`.
    pub fn scope(&self, parent_id: impl Into<Value>) -> Filter {
        Filter::eq(self.key_to(), parent_id)
    }

    pub fn as_has_many_through(&self) -> Option<&HasManyThrough> {
        match self {
            Relation::HasManyThrough(rel) => Some(rel),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationKind::HasOne => "has-one",
            RelationKind::HasMany => "has-many",
            RelationKind::HasManyThrough => "has-many-through",
        })
    }
}
