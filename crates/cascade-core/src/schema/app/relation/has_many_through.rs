use super::*;

/// A many-to-many relation mediated by a join model, e.g. physicians and
/// patients through appointments.
#[derive(Debug, Clone, PartialEq)]
pub struct HasManyThrough {
    /// Associated model
    pub target: ModelId,

    /// The join model
    pub through: ModelId,

    /// Field on the join model holding the owner's primary key
    pub key_to: String,

    /// Field on the join model holding the target's primary key
    pub key_through: String,
}

impl From<HasManyThrough> for Relation {
    fn from(value: HasManyThrough) -> Self {
        Self::HasManyThrough(value)
    }
}
