use super::*;
use crate::stmt::Filter;

#[derive(Debug, Clone)]
pub struct DeleteByFilter {
    /// Which model to delete from
    pub model: ModelId,

    /// Records matching the filter are deleted
    pub filter: Filter,
}

impl From<DeleteByFilter> for Operation {
    fn from(value: DeleteByFilter) -> Self {
        Self::DeleteByFilter(value)
    }
}
