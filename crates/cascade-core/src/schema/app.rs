//! Application-level schema

mod model;
pub use model::{Model, ModelId};

mod relation;
pub use relation::{HasMany, HasManyThrough, HasOne, Relation, RelationKind};
