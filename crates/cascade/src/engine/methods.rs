use super::DeleteInfo;
use crate::{async_trait, Db, ModelId, Relation, Result, Value};

use indexmap::IndexMap;
use std::{fmt, future::Future, sync::Arc};

/// Application code that replaces the default deletion of a relation, e.g.
/// to archive or soft-delete children.
///
/// The engine does not interpret what a setter does; it only awaits it and
/// treats its error like a deletion error.
#[async_trait]
pub trait Setter: Send + Sync + 'static {
    async fn delete(&self, cx: SetterCx) -> Result<DeleteInfo>;
}

/// Notified once a relation's deletion has settled. Purely informational:
/// its result never changes the outcome of the delete event.
#[async_trait]
pub trait AfterDelete: Send + Sync + 'static {
    async fn after_delete(&self, cx: AfterDeleteCx) -> Result<()>;
}

/// Arguments handed to a [`Setter`].
#[derive(Debug, Clone)]
pub struct SetterCx {
    pub db: Db,

    /// Primary key of the parent being deleted
    pub parent_id: Value,

    /// The related model
    pub target: ModelId,

    pub relation_name: String,

    pub relation: Relation,
}

/// Arguments handed to an [`AfterDelete`] callback.
#[derive(Debug, Clone)]
pub struct AfterDeleteCx {
    pub db: Db,

    pub relation_name: String,

    pub parent_id: Value,

    /// What the relation's deletion (or setter) reported
    pub result: Result<DeleteInfo>,
}

#[async_trait]
impl<F, Fut> Setter for F
where
    F: Fn(SetterCx) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<DeleteInfo>> + Send + 'static,
{
    async fn delete(&self, cx: SetterCx) -> Result<DeleteInfo> {
        self(cx).await
    }
}

#[async_trait]
impl<F, Fut> AfterDelete for F
where
    F: Fn(AfterDeleteCx) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn after_delete(&self, cx: AfterDeleteCx) -> Result<()> {
        self(cx).await
    }
}

/// Named setters and callbacks registered on a model.
///
/// Cascade options refer to methods by name; a lookup of a name that was
/// never registered returns `None` and the engine reports it as
/// [`Error::method_not_registered`](crate::Error::method_not_registered).
#[derive(Clone, Default)]
pub struct Methods {
    setters: IndexMap<String, Arc<dyn Setter>>,
    after_delete: IndexMap<String, Arc<dyn AfterDelete>>,
}

impl Methods {
    pub fn register_setter(&mut self, name: impl Into<String>, setter: impl Setter) {
        self.setters.insert(name.into(), Arc::new(setter));
    }

    pub fn register_after_delete(&mut self, name: impl Into<String>, callback: impl AfterDelete) {
        self.after_delete.insert(name.into(), Arc::new(callback));
    }

    pub fn setter(&self, name: &str) -> Option<&Arc<dyn Setter>> {
        self.setters.get(name)
    }

    pub fn after_delete(&self, name: &str) -> Option<&Arc<dyn AfterDelete>> {
        self.after_delete.get(name)
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Methods")
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .field("after_delete", &self.after_delete.keys().collect::<Vec<_>>())
            .finish()
    }
}
