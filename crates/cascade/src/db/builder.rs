use super::{connect, Db, Shared};
use crate::{
    driver::Driver,
    err,
    schema::{
        app::{HasMany, HasManyThrough, HasOne, Model, ModelId, Relation},
        RelationDef, Schema,
    },
    Cascade, Error, ModelDef, Result,
};

use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Registered definitions, relations still referencing models by name
    models: Vec<ModelDef>,
}

impl Builder {
    pub fn register(&mut self, model: ModelDef) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Resolves model names and verifies the resulting schema.
    pub fn build_schema(&self) -> Result<Schema> {
        let ids = self
            .models
            .iter()
            .enumerate()
            .map(|(index, def)| (def.name.as_str(), ModelId(index)))
            .collect::<IndexMap<_, _>>();

        let models = self
            .models
            .iter()
            .enumerate()
            .map(|(index, def)| self.convert_model(def, ModelId(index), &ids))
            .collect::<Result<Vec<_>>>()?;

        Schema::from_models(models)
    }

    fn convert_model(
        &self,
        def: &ModelDef,
        id: ModelId,
        ids: &IndexMap<&str, ModelId>,
    ) -> Result<Model> {
        let mut model = Model::new(id, &def.name, &def.primary_key);

        for relation in &def.relations {
            let name = relation.name();

            let resolve = |target: &str| {
                ids.get(target).copied().ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "relation `{}.{name}` references unknown model `{target}`",
                        def.name
                    ))
                })
            };

            let converted: Relation = match relation {
                RelationDef::HasOne { target, key_to, .. } => HasOne {
                    target: resolve(target)?,
                    key_to: key_to.clone(),
                }
                .into(),
                RelationDef::HasMany { target, key_to, .. } => HasMany {
                    target: resolve(target)?,
                    key_to: key_to.clone(),
                }
                .into(),
                RelationDef::HasManyThrough {
                    target,
                    through,
                    key_to,
                    key_through,
                    ..
                } => HasManyThrough {
                    target: resolve(target)?,
                    through: resolve(through)?,
                    key_to: key_to.clone(),
                    key_through: key_through.clone(),
                }
                .into(),
            };

            if model.relations.insert(name.to_string(), converted).is_some() {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{name}` is declared more than once",
                    def.name
                )));
            }
        }

        Ok(model)
    }

    fn build_cascades(&self) -> Result<IndexMap<ModelId, Cascade>> {
        let mut cascades = IndexMap::new();

        for (index, def) in self.models.iter().enumerate() {
            let Some(config) = &def.cascade else {
                continue;
            };

            let id = ModelId(index);
            let cascade = Cascade::new(id, config, def.hook, def.methods.clone())
                .map_err(|e| e.context(err!("cascade configuration of model `{}`", def.name)))?;

            cascades.insert(id, cascade);
        }

        Ok(cascades)
    }

    /// Connects to the database at `url` and builds the `Db`.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build_dyn(connect::driver(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_dyn(Box::new(driver)).await
    }

    pub async fn build_dyn(&mut self, mut driver: Box<dyn Driver>) -> Result<Db> {
        let schema = self.build_schema()?;
        let cascades = self.build_cascades()?;

        driver.register_schema(&schema).await?;

        tracing::debug!(
            models = schema.models.len(),
            cascades = cascades.len(),
            "db.built"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                schema: Arc::new(schema),
                driver,
                cascades,
            }),
        })
    }
}
