use cascade_core::{
    async_trait,
    driver::{
        operation::{DeleteByFilter, DeleteByKey, GetByKey, Insert, Operation, QueryByFilter},
        Capability, Driver, Response,
    },
    err,
    schema::app::{Model, ModelId},
    stmt::{Filter, Record, Value},
    Error, Result, Schema,
};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use url::Url;

/// A driver keeping every record in process memory.
///
/// Each model gets its own table, a list of records in insertion order. All
/// operations lock the store for their whole duration, so concurrent
/// cascades never observe a half-applied operation.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<IndexMap<ModelId, Vec<Record>>>,
}

impl Memory {
    /// Create a new memory driver from a connection URL such as `memory:`
    /// or `memory://test`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "memory" {
            return Err(err!(
                "connection URL does not have a `memory` scheme; url={url_str}"
            ));
        }

        Ok(Self::in_memory())
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, IndexMap<ModelId, Vec<Record>>>> {
        self.tables
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))
    }

    fn insert(&self, model: &Model, op: Insert) -> Result<Response> {
        let Some(key) = op.record.get_non_null(&model.primary_key) else {
            return Err(err!(
                "insert into `{}` without a primary key value",
                model.name
            ));
        };

        let mut tables = self.tables()?;
        let table = tables.entry(model.id).or_default();

        if table
            .iter()
            .any(|record| record.get(&model.primary_key) == Some(key))
        {
            return Err(err!(
                "duplicate primary key; model={} key={key}",
                model.name
            ));
        }

        table.push(op.record);
        Ok(Response::count(1))
    }

    fn get_by_key(&self, model: &Model, op: GetByKey) -> Result<Response> {
        let tables = self.tables()?;
        let records = tables
            .get(&model.id)
            .map(|table| {
                table
                    .iter()
                    .filter(|record| is_keyed(model, record, &op.keys))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Response::records(records))
    }

    fn query_by_filter(&self, model: &Model, op: QueryByFilter) -> Result<Response> {
        let tables = self.tables()?;
        let records = tables
            .get(&model.id)
            .map(|table| matching(table, &op.filter))
            .unwrap_or_default();

        Ok(Response::records(records))
    }

    fn delete_by_key(&self, model: &Model, op: DeleteByKey) -> Result<Response> {
        let mut tables = self.tables()?;
        let Some(table) = tables.get_mut(&model.id) else {
            return Ok(Response::count(0));
        };

        let before = table.len();
        table.retain(|record| !is_keyed(model, record, &op.keys));
        Ok(Response::count((before - table.len()) as u64))
    }

    fn delete_by_filter(&self, model: &Model, op: DeleteByFilter) -> Result<Response> {
        let mut tables = self.tables()?;
        let Some(table) = tables.get_mut(&model.id) else {
            return Ok(Response::count(0));
        };

        let before = table.len();
        table.retain(|record| !op.filter.matches(record));
        Ok(Response::count((before - table.len()) as u64))
    }
}

#[async_trait]
impl Driver for Memory {
    fn capability(&self) -> &Capability {
        &Capability::MEMORY
    }

    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let mut tables = self.tables()?;
        for model in schema.models() {
            tables.entry(model.id).or_default();
        }
        Ok(())
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        let model = schema
            .models
            .get(&op.model())
            .ok_or_else(|| err!("operation on unregistered {:?}", op.model()))?;

        tracing::trace!(model = %model.name, ?op, "memory.exec");

        match op {
            Operation::Insert(op) => self.insert(model, op),
            Operation::GetByKey(op) => self.get_by_key(model, op),
            Operation::QueryByFilter(op) => self.query_by_filter(model, op),
            Operation::DeleteByKey(op) => self.delete_by_key(model, op),
            Operation::DeleteByFilter(op) => self.delete_by_filter(model, op),
        }
    }

    async fn reset_db(&self, _schema: &Schema) -> Result<()> {
        for table in self.tables()?.values_mut() {
            table.clear();
        }
        Ok(())
    }
}

fn is_keyed(model: &Model, record: &Record, keys: &[Value]) -> bool {
    record
        .get(&model.primary_key)
        .is_some_and(|key| keys.contains(key))
}

fn matching(table: &[Record], filter: &Filter) -> Vec<Record> {
    table
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}
