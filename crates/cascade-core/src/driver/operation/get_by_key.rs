use super::*;
use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct GetByKey {
    /// Which model to get records from
    pub model: ModelId,

    /// Keys to get
    pub keys: Vec<Value>,
}

impl From<GetByKey> for Operation {
    fn from(value: GetByKey) -> Self {
        Self::GetByKey(value)
    }
}
