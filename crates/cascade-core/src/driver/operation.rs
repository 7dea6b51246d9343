mod delete_by_filter;
pub use delete_by_filter::DeleteByFilter;

mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod get_by_key;
pub use get_by_key::GetByKey;

mod insert;
pub use insert::Insert;

mod query_by_filter;
pub use query_by_filter::QueryByFilter;

use crate::schema::app::ModelId;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Create a new record
    Insert(Insert),

    /// Delete records identified by the given keys.
    DeleteByKey(DeleteByKey),

    /// Delete every record matching a filter
    DeleteByFilter(DeleteByFilter),

    /// Get one or more records by the primary key
    GetByKey(GetByKey),

    /// Query the model's records with a filter
    QueryByFilter(QueryByFilter),
}

impl Operation {
    /// The model the operation reads from or writes to.
    pub fn model(&self) -> ModelId {
        match self {
            Operation::Insert(op) => op.model,
            Operation::DeleteByKey(op) => op.model,
            Operation::DeleteByFilter(op) => op.model,
            Operation::GetByKey(op) => op.model,
            Operation::QueryByFilter(op) => op.model,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            Operation::DeleteByKey(_) | Operation::DeleteByFilter(_)
        )
    }
}
