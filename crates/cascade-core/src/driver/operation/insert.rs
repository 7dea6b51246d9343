use super::*;
use crate::stmt::Record;

#[derive(Debug, Clone)]
pub struct Insert {
    /// Which model to insert into
    pub model: ModelId,

    /// The record to store. The primary key must already be assigned.
    pub record: Record,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
