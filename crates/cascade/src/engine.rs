mod branch;
use branch::Branch;

mod config;
pub use config::{CascadeConfig, RawRelationConfig};

mod descriptor;
pub use descriptor::{RelationDescriptor, RelationOptions};

mod methods;
pub use methods::{AfterDelete, AfterDeleteCx, Methods, Setter, SetterCx};

mod outcome;
pub use outcome::{CascadeOutcome, DeleteInfo, RelationOutcome, RelationStatus, StrategyKind};

mod resolve;
pub use resolve::resolve;

mod strategy;

use crate::{err, Db, DeleteContext, Error, HookPoint, ModelId, Result};

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::task::{Id, JoinError, JoinSet};

/// The resolved cascade behavior of one model.
///
/// Built once when the [`Db`] is built and shared by every delete event of
/// the model afterwards.
#[derive(Debug, Clone)]
pub struct Cascade {
    model: ModelId,
    hook: HookPoint,
    descriptors: Arc<[RelationDescriptor]>,
    methods: Arc<Methods>,
}

impl Cascade {
    /// Resolves `config` for `model`. Fails on a malformed configuration.
    pub fn new(
        model: ModelId,
        config: &CascadeConfig,
        hook: HookPoint,
        methods: Methods,
    ) -> Result<Self> {
        Ok(Self {
            model,
            hook,
            descriptors: resolve(&config.relations)?.into(),
            methods: Arc::new(methods),
        })
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Whether the cascade runs before or after the parent row is removed.
    pub fn hook(&self) -> HookPoint {
        self.hook
    }

    pub fn descriptors(&self) -> &[RelationDescriptor] {
        &self.descriptors
    }

    /// Runs one cascade pass for the delete event described by `cx`.
    ///
    /// Every relation that is not skipped runs as its own task. The call
    /// waits for all of them unless a relation marked `fail_on_err` fails:
    /// that relation's error is returned right away and the remaining tasks
    /// are left to finish in the background, their results discarded.
    /// Failures of other relations are logged and reported in the outcome.
    pub async fn execute(&self, db: &Db, cx: &DeleteContext) -> Result<CascadeOutcome> {
        let model = db.schema().model(self.model);

        tracing::debug!(model = %model.name, hook = ?self.hook, "cascade.resolving_parent_id");

        // Captured once, before any child is touched.
        let Some(parent_id) = cx.parent_id(model) else {
            tracing::debug!(model = %model.name, "cascade.skip; delete carries no parent id");
            return Ok(CascadeOutcome::default());
        };

        tracing::debug!(
            model = %model.name,
            parent_id = %parent_id,
            relations = self.descriptors.len(),
            "cascade.cascading"
        );

        let mut settled = Vec::with_capacity(self.descriptors.len());
        let mut tasks = JoinSet::new();
        let mut branches = IndexMap::new();

        for (index, descriptor) in self.descriptors.iter().enumerate() {
            if descriptor.options.skip_cascade {
                settled.push((
                    index,
                    RelationOutcome {
                        relation: descriptor.relation_name.clone(),
                        strategy: None,
                        status: RelationStatus::Skipped,
                    },
                ));
                continue;
            }

            let association = cx
                .instance
                .as_ref()
                .and_then(|instance| instance.association(&descriptor.relation_name));

            let handle = tasks.spawn(
                Branch {
                    index,
                    db: db.clone(),
                    model: self.model,
                    hook: self.hook,
                    descriptor: descriptor.clone(),
                    parent_id: parent_id.clone(),
                    association,
                    methods: self.methods.clone(),
                }
                .run(),
            );

            branches.insert(handle.id(), index);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let (index, relation) = self.settle(joined, &branches);

            if let RelationStatus::Failed(err) = &relation.status {
                if self.descriptors[index].options.fail_on_err {
                    // Report siblings that already finished, then leave the
                    // ones still in flight to run to completion on their own.
                    while let Some(joined) = tasks.try_join_next_with_id() {
                        let (_, sibling) = self.settle(joined, &branches);
                        if let RelationStatus::Failed(err) = &sibling.status {
                            tracing::warn!(
                                model = %model.name,
                                relation = %sibling.relation,
                                error = %err,
                                "discarding failed cascade delete"
                            );
                        }
                    }
                    tasks.detach_all();

                    tracing::debug!(
                        model = %model.name,
                        relation = %relation.relation,
                        error = %err,
                        "cascade.failed"
                    );

                    return Err(err.clone().context(Error::cascade_failed(&relation.relation)));
                }

                tracing::warn!(
                    model = %model.name,
                    relation = %relation.relation,
                    error = %err,
                    "ignoring failed cascade delete"
                );
            }

            settled.push((index, relation));
        }

        settled.sort_by_key(|(index, _)| *index);

        let outcome = CascadeOutcome {
            parent_id: Some(parent_id),
            relations: settled.into_iter().map(|(_, relation)| relation).collect(),
        };

        tracing::debug!(
            model = %model.name,
            deleted = outcome.deleted(),
            "cascade.succeeded"
        );

        Ok(outcome)
    }

    /// Maps a joined branch to its descriptor. A branch that panicked is a
    /// failure of its own relation.
    fn settle(
        &self,
        joined: std::result::Result<(Id, (usize, RelationOutcome)), JoinError>,
        branches: &IndexMap<Id, usize>,
    ) -> (usize, RelationOutcome) {
        let join_err = match joined {
            Ok((_, settled)) => return settled,
            Err(join_err) => join_err,
        };

        let index = branches[&join_err.id()];
        let relation = self.descriptors[index].relation_name.clone();

        let outcome = RelationOutcome {
            status: RelationStatus::Failed(err!(
                "cascade of relation `{relation}` did not complete: {join_err}"
            )),
            relation,
            strategy: None,
        };

        (index, outcome)
    }
}
