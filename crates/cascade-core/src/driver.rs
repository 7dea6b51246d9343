mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Schema};

use std::{fmt::Debug, sync::Arc};

/// The persistence layer the cascade engine deletes through.
///
/// A driver is shared by every concurrent relation deletion of a delete
/// event, so implementations must be safe to call concurrently.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs strategy selection.
    fn capability(&self) -> &Capability;

    /// Register the schema with the driver.
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Execute a database operation
    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response>;

    /// Drop all stored records.
    async fn reset_db(&self, schema: &Schema) -> crate::Result<()>;
}
