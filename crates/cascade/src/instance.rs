use crate::{
    schema::app::Model, Association, CascadeOutcome, Db, ModelId, Record, Result, Value,
};

use std::fmt;

/// A record loaded from, or just written to, a [`Db`].
#[derive(Clone)]
pub struct Instance {
    db: Db,
    model: ModelId,
    record: Record,
}

impl Instance {
    pub(crate) fn new(db: Db, model: ModelId, record: Record) -> Self {
        Self { db, model, record }
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn model(&self) -> &Model {
        self.db.schema().model(self.model)
    }

    /// The primary key value, `None` if the record does not carry one.
    pub fn id(&self) -> Option<&Value> {
        self.record.get_non_null(&self.model().primary_key)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// The live association for relation `name`, bound to this record's
    /// primary key.
    ///
    /// Returns `None` when the model declares no such relation or the record
    /// has no primary key to bind to.
    pub fn association(&self, name: &str) -> Option<Association> {
        let relation = self.model().relation(name)?;
        let parent_id = self.id()?;

        Some(Association::new(
            self.db.clone(),
            name,
            relation.clone(),
            parent_id.clone(),
        ))
    }

    /// Deletes this record, running its model's cascade.
    pub async fn destroy(&self) -> Result<CascadeOutcome> {
        self.db.delete(self).await
    }

    /// Loads the current version of this record, `None` once it is deleted.
    pub async fn reload(&self) -> Result<Option<Instance>> {
        match self.id() {
            Some(id) => self.db.get(self.model, id.clone()).await,
            None => Ok(None),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Instance")
            .field("model", &self.model().name)
            .field("record", &self.record)
            .finish()
    }
}
