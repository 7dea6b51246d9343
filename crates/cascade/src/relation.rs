//! Live accessors for a record's relations.

use crate::{
    bail, driver::operation::DeleteByFilter, err, Db, DeleteInfo, Filter, Instance, Record,
    Relation, Result, Value,
};

use std::fmt;

/// A relation of one parent record, bound to the parent's primary key.
///
/// Obtained from [`Instance::association`].
#[derive(Clone)]
pub struct Association {
    db: Db,
    name: String,
    relation: Relation,
    parent_id: Value,
}

impl Association {
    pub(crate) fn new(db: Db, name: &str, relation: Relation, parent_id: Value) -> Self {
        Self {
            db,
            name: name.to_string(),
            relation,
            parent_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn parent_id(&self) -> &Value {
        &self.parent_id
    }

    /// The rows of the relation's scope model that belong to the parent:
    /// the related records, or the join records for `HasManyThrough`.
    fn scope(&self) -> Filter {
        self.relation.scope(self.parent_id.clone())
    }

    /// `true` if [`Association::destroy_all`] is available, i.e. the driver
    /// deletes by filter in a single operation.
    pub fn supports_destroy_all(&self) -> bool {
        self.db.capability().delete_by_filter
    }

    /// Loads the related records.
    pub async fn all(&self) -> Result<Vec<Instance>> {
        let Relation::HasManyThrough(through) = &self.relation else {
            return self.db.find(self.relation.target(), self.scope()).await;
        };

        let joins = self.db.find(through.through, self.scope()).await?;

        let mut related = Vec::with_capacity(joins.len());
        for join in joins {
            let Some(key) = join.get(&through.key_through) else {
                continue;
            };

            if let Some(instance) = self.db.get(through.target, key.clone()).await? {
                related.push(instance);
            }
        }

        Ok(related)
    }

    /// Loads the first related record; the natural accessor for `HasOne`.
    pub async fn get(&self) -> Result<Option<Instance>> {
        Ok(self.all().await?.into_iter().next())
    }

    /// Creates a related record owned by the parent.
    ///
    /// For `HasManyThrough` the target record and the join record linking it
    /// to the parent are both created.
    pub async fn create(&self, mut record: Record) -> Result<Instance> {
        match &self.relation {
            Relation::HasOne(_) | Relation::HasMany(_) => {
                record.set(self.relation.key_to(), self.parent_id.clone());
                self.db.create(self.relation.target(), record).await
            }
            Relation::HasManyThrough(_) => {
                let target = self.db.create(self.relation.target(), record).await?;
                self.add(&target).await?;
                Ok(target)
            }
        }
    }

    /// Links an existing record to the parent through the join model and
    /// returns the join record. Only valid for `HasManyThrough`.
    pub async fn add(&self, target: &Instance) -> Result<Instance> {
        let Relation::HasManyThrough(through) = &self.relation else {
            bail!(
                "`add` requires a has-many-through relation; relation `{}` is {}",
                self.name,
                self.relation.kind()
            );
        };

        if target.model_id() != through.target {
            bail!(
                "cannot add a `{}` record to relation `{}`",
                target.model().name,
                self.name
            );
        }

        let key = target
            .id()
            .cloned()
            .ok_or_else(|| err!("cannot add a record without a primary key"))?;

        let join = Record::new()
            .with(through.key_to.clone(), self.parent_id.clone())
            .with(through.key_through.clone(), key);

        self.db.create(through.through, join).await
    }

    /// Deletes every row of the relation bound to the parent in one driver
    /// operation. For `HasManyThrough` the join rows are deleted and the
    /// related records are kept.
    pub async fn destroy_all(&self) -> Result<DeleteInfo> {
        if !self.supports_destroy_all() {
            bail!("driver does not support deleting by filter");
        }

        let res = self
            .db
            .exec(
                DeleteByFilter {
                    model: self.relation.scope_model(),
                    filter: self.scope(),
                }
                .into(),
            )
            .await?;

        Ok(DeleteInfo {
            count: res.rows.into_count()?,
        })
    }
}

impl fmt::Debug for Association {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Association")
            .field("name", &self.name)
            .field("relation", &self.relation)
            .field("parent_id", &self.parent_id)
            .finish()
    }
}
