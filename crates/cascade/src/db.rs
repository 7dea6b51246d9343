mod builder;
pub use builder::Builder;

mod connect;

use crate::{
    driver::{
        operation::{DeleteByFilter, DeleteByKey, GetByKey, Insert, Operation, QueryByFilter},
        Capability, Driver, Response,
    },
    schema::Schema,
    Cascade, CascadeOutcome, DeleteContext, DeleteInfo, Error, Filter, HookPoint, Instance,
    ModelId, Record, Result, Value,
};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Shared state between all `Db` clones.
struct Shared {
    schema: Arc<Schema>,
    driver: Box<dyn Driver>,

    /// Resolved cascades, keyed by the owning model
    cascades: IndexMap<ModelId, Cascade>,
}

/// A handle to the models, their cascades and the driver storing them.
///
/// Cloning is cheap; every clone shares the same state.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

/// Identifies a model either by [`ModelId`] or by name.
pub trait ModelRef {
    fn model_id(&self, schema: &Schema) -> Result<ModelId>;
}

impl ModelRef for ModelId {
    fn model_id(&self, schema: &Schema) -> Result<ModelId> {
        match schema.models.contains_key(self) {
            true => Ok(*self),
            false => Err(Error::invalid_schema(format!("unknown model {self:?}"))),
        }
    }
}

impl ModelRef for &str {
    fn model_id(&self, schema: &Schema) -> Result<ModelId> {
        schema
            .model_by_name(self)
            .map(|model| model.id)
            .ok_or_else(|| Error::invalid_schema(format!("unknown model `{self}`")))
    }
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub fn capability(&self) -> &Capability {
        self.shared.driver.capability()
    }

    pub fn model_id(&self, model: impl ModelRef) -> Result<ModelId> {
        model.model_id(&self.shared.schema)
    }

    /// The cascade configured on `model`, if any.
    pub fn cascade(&self, model: ModelId) -> Option<&Cascade> {
        self.shared.cascades.get(&model)
    }

    /// Stores a new record. A missing primary key is assigned a random UUID.
    pub async fn create(&self, model: impl ModelRef, mut record: Record) -> Result<Instance> {
        let model = self.model_id(model)?;
        let primary_key = &self.shared.schema.model(model).primary_key;

        if record.get_non_null(primary_key).is_none() {
            record.set(primary_key.clone(), uuid::Uuid::new_v4());
        }

        self.exec(
            Insert {
                model,
                record: record.clone(),
            }
            .into(),
        )
        .await?;

        Ok(Instance::new(self.clone(), model, record))
    }

    pub async fn get(&self, model: impl ModelRef, id: impl Into<Value>) -> Result<Option<Instance>> {
        let model = self.model_id(model)?;
        let res = self
            .exec(
                GetByKey {
                    model,
                    keys: vec![id.into()],
                }
                .into(),
            )
            .await?;

        Ok(res
            .rows
            .into_records()?
            .into_iter()
            .next()
            .map(|record| Instance::new(self.clone(), model, record)))
    }

    pub async fn find(&self, model: impl ModelRef, filter: Filter) -> Result<Vec<Instance>> {
        let model = self.model_id(model)?;
        let res = self.exec(QueryByFilter { model, filter }.into()).await?;

        Ok(res
            .rows
            .into_records()?
            .into_iter()
            .map(|record| Instance::new(self.clone(), model, record))
            .collect())
    }

    /// Deletes `instance`, running its model's cascade at the model's hook
    /// point.
    pub async fn delete(&self, instance: &Instance) -> Result<CascadeOutcome> {
        self.delete_event(DeleteContext::for_instance(instance.clone()))
            .await
    }

    /// Deletes every record of `model` matching `filter`.
    ///
    /// The cascade only runs when `filter` pins the primary key and matches
    /// a stored record; other where-only deletes remove the matching rows
    /// and nothing else.
    pub async fn delete_where(&self, model: impl ModelRef, filter: Filter) -> Result<CascadeOutcome> {
        let model = self.model_id(model)?;
        self.delete_event(DeleteContext::for_filter(model, filter))
            .await
    }

    /// Bulk deletes the records of `model` matching `filter` without running
    /// any cascade of `model` itself.
    ///
    /// Drivers without [`Capability::delete_by_filter`] are served by a query
    /// followed by a delete by primary key.
    pub async fn destroy_all(&self, model: impl ModelRef, filter: Filter) -> Result<DeleteInfo> {
        let model = self.model_id(model)?;

        if self.capability().delete_by_filter {
            let res = self.exec(DeleteByFilter { model, filter }.into()).await?;
            return Ok(DeleteInfo {
                count: res.rows.into_count()?,
            });
        }

        let primary_key = &self.shared.schema.model(model).primary_key;
        let keys: Vec<_> = self
            .exec(QueryByFilter { model, filter }.into())
            .await?
            .rows
            .into_records()?
            .into_iter()
            .filter_map(|record| record.get_non_null(primary_key).cloned())
            .collect();

        if keys.is_empty() {
            return Ok(DeleteInfo::default());
        }

        let res = self.exec(DeleteByKey { model, keys }.into()).await?;
        Ok(DeleteInfo {
            count: res.rows.into_count()?,
        })
    }

    /// Drops every stored record.
    pub async fn reset_db(&self) -> Result<()> {
        self.shared.driver.reset_db(&self.shared.schema).await
    }

    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        self.shared.driver.exec(&self.shared.schema, op).await
    }

    async fn delete_event(&self, cx: DeleteContext) -> Result<CascadeOutcome> {
        let cascade = self.cascade(cx.model);
        let mut outcome = CascadeOutcome::default();

        if let Some(cascade) = cascade.filter(|cascade| cascade.hook() == HookPoint::BeforeDelete) {
            // A fatal failure here leaves the parent in place.
            if self.parent_exists(&cx).await? {
                outcome = cascade.execute(self, &cx).await?;
            }
        }

        let deleted = self.delete_parent(&cx).await?;

        if let Some(cascade) = cascade.filter(|cascade| cascade.hook() == HookPoint::AfterDelete) {
            // A where-only delete that removed nothing has no parent.
            if cx.instance.is_some() || deleted.count > 0 {
                outcome = cascade.execute(self, &cx).await?;
            }
        }

        Ok(outcome)
    }

    /// Whether a where-only delete matches a row. Instance deletes always
    /// cascade.
    async fn parent_exists(&self, cx: &DeleteContext) -> Result<bool> {
        match (&cx.instance, &cx.filter) {
            (None, Some(filter)) => Ok(!self.find(cx.model, filter.clone()).await?.is_empty()),
            _ => Ok(true),
        }
    }

    async fn delete_parent(&self, cx: &DeleteContext) -> Result<DeleteInfo> {
        if let Some(filter) = &cx.filter {
            return self.destroy_all(cx.model, filter.clone()).await;
        }

        let Some(id) = cx.instance.as_ref().and_then(Instance::id) else {
            return Err(Error::record_not_found(format!(
                "cannot delete a `{}` record without a primary key",
                self.shared.schema.model(cx.model).name
            )));
        };

        let res = self
            .exec(
                DeleteByKey {
                    model: cx.model,
                    keys: vec![id.clone()],
                }
                .into(),
            )
            .await?;

        Ok(DeleteInfo {
            count: res.rows.into_count()?,
        })
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("models", &self.shared.schema.models.len())
            .field("cascades", &self.shared.cascades.len())
            .finish()
    }
}
