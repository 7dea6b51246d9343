#[derive(Debug, Clone)]
pub struct Capability {
    /// The driver deletes every record matching a filter in one operation.
    ///
    /// When false, live associations do not expose `destroy_all` and
    /// filter-scoped deletes fall back to a query followed by a delete by
    /// key.
    pub delete_by_filter: bool,
}

impl Capability {
    /// In-memory driver capabilities.
    pub const MEMORY: Self = Self {
        delete_by_filter: true,
    };

    /// Key-value stores only delete by primary key.
    pub const KEY_VALUE: Self = Self {
        delete_by_filter: false,
    };
}
