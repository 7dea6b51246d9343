use super::{
    strategy::Strategy, AfterDeleteCx, DeleteInfo, Methods, RelationDescriptor, RelationOutcome,
    RelationStatus,
};
use crate::{err, Association, Db, Error, HookPoint, ModelId, Result, Value};

use std::sync::Arc;

/// One relation's share of a delete event.
///
/// A branch owns everything it touches, so it runs as its own task and
/// never shares mutable state with its siblings.
pub(super) struct Branch {
    /// Position of the descriptor in the model's configuration
    pub(super) index: usize,
    pub(super) db: Db,
    pub(super) model: ModelId,
    pub(super) hook: HookPoint,
    pub(super) descriptor: RelationDescriptor,
    pub(super) parent_id: Value,

    /// The parent's live association, when the delete carried an instance
    pub(super) association: Option<Association>,
    pub(super) methods: Arc<Methods>,
}

impl Branch {
    pub(super) async fn run(self) -> (usize, RelationOutcome) {
        let relation_name = &self.descriptor.relation_name;

        let (strategy, result) = match self.select() {
            Ok(strategy) => {
                let kind = strategy.kind();
                tracing::debug!(relation = %relation_name, strategy = ?kind, "cascade.relation.start");
                (Some(kind), self.run_strategy(strategy).await)
            }
            Err(err) => (None, Err(err)),
        };

        match &result {
            Ok(info) => {
                tracing::debug!(relation = %relation_name, count = info.count, "cascade.relation.deleted")
            }
            Err(err) => {
                tracing::debug!(relation = %relation_name, error = %err, "cascade.relation.failed")
            }
        }

        self.notify(&result).await;

        let status = match result {
            Ok(info) => RelationStatus::Deleted(info),
            Err(err) => RelationStatus::Failed(err),
        };

        let outcome = RelationOutcome {
            relation: self.descriptor.relation_name.clone(),
            strategy,
            status,
        };

        (self.index, outcome)
    }

    /// Runs the strategy in its own task so a panic, in a setter or in the
    /// driver, fails only this relation.
    async fn run_strategy(&self, strategy: Strategy) -> Result<DeleteInfo> {
        let db = self.db.clone();
        let relation_name = self.descriptor.relation_name.clone();
        let parent_id = self.parent_id.clone();

        let task =
            tokio::spawn(async move { strategy.run(&db, &relation_name, &parent_id).await });

        match task.await {
            Ok(res) => res,
            Err(join_err) => Err(err!(
                "deletion of relation `{}` did not complete: {join_err}",
                self.descriptor.relation_name
            )),
        }
    }

    fn select(&self) -> Result<Strategy> {
        let schema = self.db.schema();
        let model = schema.model(self.model);
        let relation_name = &self.descriptor.relation_name;

        let Some(relation) = model.relation(relation_name) else {
            return Err(Error::relation_not_found(&model.name, relation_name));
        };

        if let Some(name) = &self.descriptor.options.setter {
            let Some(setter) = self.methods.setter(name) else {
                return Err(Error::method_not_registered(&model.name, name));
            };

            return Ok(Strategy::Setter {
                setter: setter.clone(),
                relation: relation.clone(),
            });
        }

        // After the parent row is gone its in-memory associations may be
        // stale, so only a before-delete hook trusts them.
        if self.hook == HookPoint::BeforeDelete {
            if let Some(association) = self
                .association
                .as_ref()
                .filter(|association| association.supports_destroy_all())
            {
                return Ok(Strategy::Direct(association.clone()));
            }
        }

        Ok(Strategy::Scoped {
            model: relation.scope_model(),
            filter: relation.scope(self.parent_id.clone()),
        })
    }

    /// Invokes the relation's after-delete callback, if any. Failures are
    /// logged and never reach the delete event.
    async fn notify(&self, result: &Result<DeleteInfo>) {
        let Some(name) = &self.descriptor.options.after_delete_callback else {
            return;
        };

        let relation_name = &self.descriptor.relation_name;

        let Some(callback) = self.methods.after_delete(name).cloned() else {
            let model = &self.db.schema().model(self.model).name;
            tracing::warn!(
                relation = %relation_name,
                error = %Error::method_not_registered(model, name),
                "skipping after-delete callback"
            );
            return;
        };

        let cx = AfterDeleteCx {
            db: self.db.clone(),
            relation_name: relation_name.clone(),
            parent_id: self.parent_id.clone(),
            result: result.clone(),
        };

        let res = match tokio::spawn(async move { callback.after_delete(cx).await }).await {
            Ok(res) => res,
            Err(join_err) => Err(err!("callback `{name}` did not complete: {join_err}")),
        };

        if let Err(err) = res {
            tracing::warn!(relation = %relation_name, callback = %name, error = %err, "after-delete callback failed");
        }
    }
}
