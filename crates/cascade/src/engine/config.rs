use super::RelationOptions;
use crate::{Error, Result};

use serde::Deserialize;

/// Declares which relations of a model are deleted along with it.
///
/// The configuration mirrors its JSON form:
///
/// ```json
/// { "relations": [
///     { "rel": "chapters" },
///     { "rel": "logs", "options": { "failOnErr": true } } ] }
/// ```
///
/// Entries are validated and normalized by [`resolve`](super::resolve)
/// when the [`Db`](crate::Db) is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CascadeConfig {
    #[serde(default)]
    pub relations: Vec<RawRelationConfig>,
}

/// One unvalidated entry of [`CascadeConfig::relations`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRelationConfig {
    /// Name of the relation to cascade. Required.
    pub rel: Option<String>,

    /// Missing options behave like [`RelationOptions::default`].
    pub options: Option<RelationOptions>,
}

impl CascadeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::invalid_config(err.to_string()))
    }

    /// Cascades `rel` with default options.
    pub fn relation(mut self, rel: impl Into<String>) -> Self {
        self.relations.push(RawRelationConfig {
            rel: Some(rel.into()),
            options: None,
        });
        self
    }

    pub fn relation_with(mut self, rel: impl Into<String>, options: RelationOptions) -> Self {
        self.relations.push(RawRelationConfig {
            rel: Some(rel.into()),
            options: Some(options),
        });
        self
    }
}
