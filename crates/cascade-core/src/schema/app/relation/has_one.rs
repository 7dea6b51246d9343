use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct HasOne {
    /// Associated model
    pub target: ModelId,

    /// Field on the target model holding the owner's primary key
    pub key_to: String,
}

impl From<HasOne> for Relation {
    fn from(value: HasOne) -> Self {
        Self::HasOne(value)
    }
}
