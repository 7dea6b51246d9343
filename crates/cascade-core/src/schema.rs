pub mod app;
use app::{Model, ModelId, Relation};

mod verify;

use crate::Result;
use indexmap::IndexMap;

/// The relation registry: every registered model and the relations it
/// declares.
///
/// The schema is immutable once built; the cascade engine only reads it.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    /// Builds a schema from models whose ids and relation targets are
    /// already resolved, verifying that every relation points at a
    /// registered model.
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Result<Self> {
        let schema = Schema {
            models: models.into_iter().map(|model| (model.id, model)).collect(),
        };

        schema.verify()?;
        Ok(schema)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a model by ID
    #[track_caller]
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models().find(|model| model.name == name)
    }

    /// Returns `true` if `model` declares a relation called `name`.
    pub fn has_relation(&self, model: impl Into<ModelId>, name: &str) -> bool {
        self.relation(model, name).is_some()
    }

    /// Looks up the metadata of the relation `name` declared on `model`.
    pub fn relation(&self, model: impl Into<ModelId>, name: &str) -> Option<&Relation> {
        self.models
            .get(&model.into())
            .and_then(|model| model.relation(name))
    }
}
