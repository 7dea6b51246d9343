use crate::{Error, Value};

/// What deleting one relation's children reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteInfo {
    /// Number of records removed
    pub count: u64,
}

/// How a relation's children were (or were meant to be) deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// A setter registered on the owning model handled the relation.
    Setter,

    /// The parent's live association deleted its own children.
    Direct,

    /// A bulk delete on the relation's scope model, filtered by `key_to`.
    Scoped,
}

#[derive(Debug, Clone)]
pub enum RelationStatus {
    Deleted(DeleteInfo),

    /// `skip_cascade` is set; nothing was issued for the relation.
    Skipped,

    /// The failure did not abort the event because `fail_on_err` is unset.
    Failed(Error),
}

#[derive(Debug, Clone)]
pub struct RelationOutcome {
    pub relation: String,

    /// `None` when no strategy was selected: the relation was skipped or its
    /// metadata could not be resolved.
    pub strategy: Option<StrategyKind>,

    pub status: RelationStatus,
}

/// The consolidated result of one successful delete event.
///
/// Relations are listed in configuration order. A fatal failure is reported
/// as the event's `Err` instead, so an outcome only ever carries non-fatal
/// failures.
#[derive(Debug, Clone, Default)]
pub struct CascadeOutcome {
    /// Primary key of the deleted parent. `None` when the delete carried no
    /// id and there was nothing to cascade.
    pub parent_id: Option<Value>,

    pub relations: Vec<RelationOutcome>,
}

impl RelationStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, RelationStatus::Deleted(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RelationStatus::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RelationStatus::Failed(_))
    }

    pub fn deleted_count(&self) -> u64 {
        match self {
            RelationStatus::Deleted(info) => info.count,
            _ => 0,
        }
    }
}

impl CascadeOutcome {
    /// `true` when the event had no parent id and cascaded nothing.
    pub fn is_noop(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn relation(&self, name: &str) -> Option<&RelationOutcome> {
        self.relations.iter().find(|outcome| outcome.relation == name)
    }

    /// Total number of records removed across all relations.
    pub fn deleted(&self) -> u64 {
        self.relations
            .iter()
            .map(|outcome| outcome.status.deleted_count())
            .sum()
    }

    /// Non-fatal failures, in configuration order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> + '_ {
        self.relations
            .iter()
            .filter_map(|outcome| match &outcome.status {
                RelationStatus::Failed(err) => Some((outcome.relation.as_str(), err)),
                _ => None,
            })
    }
}
