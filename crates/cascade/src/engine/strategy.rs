use super::{DeleteInfo, Setter, SetterCx, StrategyKind};
use crate::{Association, Db, Filter, ModelId, Relation, Result, Value};

use std::sync::Arc;

/// How one relation's children get deleted for one delete event.
pub(super) enum Strategy {
    /// Delegate to application code registered on the owning model.
    Setter {
        setter: Arc<dyn Setter>,
        relation: Relation,
    },

    /// The parent's live association deletes the rows bound to it.
    Direct(Association),

    /// Bulk delete against the scope model, scoped by `key_to`.
    Scoped { model: ModelId, filter: Filter },
}

impl Strategy {
    pub(super) fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Setter { .. } => StrategyKind::Setter,
            Strategy::Direct(_) => StrategyKind::Direct,
            Strategy::Scoped { .. } => StrategyKind::Scoped,
        }
    }

    pub(super) async fn run(
        self,
        db: &Db,
        relation_name: &str,
        parent_id: &Value,
    ) -> Result<DeleteInfo> {
        match self {
            Strategy::Setter { setter, relation } => {
                let cx = SetterCx {
                    db: db.clone(),
                    parent_id: parent_id.clone(),
                    target: relation.target(),
                    relation_name: relation_name.to_string(),
                    relation,
                };

                setter.delete(cx).await
            }
            Strategy::Direct(association) => association.destroy_all().await,
            Strategy::Scoped { model, filter } => db.destroy_all(model, filter).await,
        }
    }
}
