use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct HasMany {
    /// Associated model
    pub target: ModelId,

    /// Field on the target model holding the owner's primary key
    pub key_to: String,
}

impl From<HasMany> for Relation {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}
