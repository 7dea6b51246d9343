//! Where in a record's delete lifecycle the cascade runs, and what it is
//! told about the delete.

use crate::{schema::app::Model, Filter, Instance, ModelId, Value};

/// The delete hook a model's cascade is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookPoint {
    /// Children are removed first. A fatal cascade failure aborts the delete
    /// and the parent row is left in place.
    #[default]
    BeforeDelete,

    /// The parent row is removed first. Children are always located through
    /// relation metadata, and a fatal cascade failure is reported after the
    /// parent is already gone.
    AfterDelete,
}

/// Describes one delete event handed to the cascade.
#[derive(Debug, Clone)]
pub struct DeleteContext {
    /// The model of the record(s) being deleted
    pub model: ModelId,

    /// The loaded record, when the delete was issued on an instance.
    pub instance: Option<Instance>,

    /// The delete's filter, when it was issued with a where clause.
    pub filter: Option<Filter>,
}

impl DeleteContext {
    pub fn for_instance(instance: Instance) -> Self {
        Self {
            model: instance.model_id(),
            instance: Some(instance),
            filter: None,
        }
    }

    pub fn for_filter(model: ModelId, filter: Filter) -> Self {
        Self {
            model,
            instance: None,
            filter: Some(filter),
        }
    }

    /// The primary key of the record being deleted.
    ///
    /// Taken from the instance if there is one, otherwise from a filter that
    /// pins the primary key. `None` means there is nothing to cascade.
    pub fn parent_id(&self, model: &Model) -> Option<Value> {
        if let Some(instance) = &self.instance {
            return instance.id().cloned();
        }

        self.filter
            .as_ref()
            .and_then(|filter| filter.value_of(&model.primary_key))
            .filter(|id| !id.is_null())
            .cloned()
    }
}
