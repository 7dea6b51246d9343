use super::*;
use crate::stmt::Filter;

#[derive(Debug, Clone)]
pub struct QueryByFilter {
    /// Which model to query
    pub model: ModelId,

    /// Records matching the filter are returned
    pub filter: Filter,
}

impl From<QueryByFilter> for Operation {
    fn from(value: QueryByFilter) -> Self {
        Self::QueryByFilter(value)
    }
}
