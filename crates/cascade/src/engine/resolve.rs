use super::{RawRelationConfig, RelationDescriptor};
use crate::{Error, Result};

use std::collections::HashSet;

/// Validates and normalizes a model's cascade configuration.
///
/// Missing options become [`RelationOptions::default`]. An entry without a
/// relation name, a relation listed twice or a blank method name is a
/// configuration error.
///
/// Relation names are not checked against the schema here: a descriptor
/// naming a relation the model never declares fails when a delete event
/// looks it up, subject to the descriptor's `fail_on_err`.
///
/// [`RelationOptions::default`]: super::RelationOptions::default
pub fn resolve(raw: &[RawRelationConfig]) -> Result<Vec<RelationDescriptor>> {
    let mut seen = HashSet::new();

    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let relation_name = match entry.rel.as_deref().map(str::trim) {
                Some(rel) if !rel.is_empty() => rel.to_string(),
                _ => {
                    return Err(Error::invalid_config(format!(
                        "relations[{index}]: missing `rel`"
                    )))
                }
            };

            if !seen.insert(relation_name.clone()) {
                return Err(Error::invalid_config(format!(
                    "relations[{index}]: relation `{relation_name}` is listed more than once"
                )));
            }

            let options = entry.options.clone().unwrap_or_default();

            for (option, method) in [
                ("setter", &options.setter),
                ("afterDeleteCallback", &options.after_delete_callback),
            ] {
                if method.as_deref().is_some_and(|name| name.trim().is_empty()) {
                    return Err(Error::invalid_config(format!(
                        "relations[{index}]: `{option}` must name a method"
                    )));
                }
            }

            Ok(RelationDescriptor {
                relation_name,
                options,
            })
        })
        .collect()
}
