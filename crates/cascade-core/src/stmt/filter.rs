use super::{Record, Value};

use std::fmt;

/// A conjunction of field equality predicates, e.g. `{ book_id: 7 }`.
///
/// This is the only filter shape the cascade needs: child rows are scoped by
/// the foreign key that points back at the parent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    predicates: Vec<(String, Value)>,
}

impl Filter {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    /// Returns the value `field` is pinned to, if the filter constrains it.
    pub fn value_of(&self, field: &str) -> Option<&Value> {
        self.predicates
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|(field, expected)| {
            // A missing field compares as null
            record.get(field).unwrap_or(&Value::Null) == expected
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return f.write_str("{ }");
        }

        f.write_str("{ ")?;
        for (i, (field, value)) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        f.write_str(" }")
    }
}
