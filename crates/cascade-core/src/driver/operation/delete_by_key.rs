use super::*;
use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct DeleteByKey {
    /// Which model to delete from
    pub model: ModelId,

    /// Which keys to delete
    pub keys: Vec<Value>,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::DeleteByKey(value)
    }
}
