use super::{
    app::{Model, ModelId, Relation},
    Result, Schema,
};
use crate::Error;

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_model_names_are_unique()?;

        for model in self.schema.models() {
            if model.primary_key.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` has an empty primary key name",
                    model.name
                )));
            }

            for (name, relation) in &model.relations {
                self.verify_relation(model, name, relation)?;
            }
        }

        Ok(())
    }

    fn verify_model_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for model in self.schema.models() {
            if !names.insert(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate model name `{}`",
                    model.name
                )));
            }
        }

        Ok(())
    }

    fn verify_relation(&self, model: &Model, name: &str, relation: &Relation) -> Result<()> {
        self.verify_model_exists(model, name, relation.target())?;

        if let Some(through) = relation.as_has_many_through() {
            self.verify_model_exists(model, name, through.through)?;

            if through.key_through.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{name}` has an empty `key_through` field",
                    model.name
                )));
            }
        }

        if relation.key_to().is_empty() {
            return Err(Error::invalid_schema(format!(
                "relation `{}.{name}` has an empty `key_to` field",
                model.name
            )));
        }

        Ok(())
    }

    fn verify_model_exists(&self, model: &Model, name: &str, id: ModelId) -> Result<()> {
        if self.schema.models.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::invalid_schema(format!(
                "relation `{}.{name}` references unknown {id:?}",
                model.name
            )))
        }
    }
}
