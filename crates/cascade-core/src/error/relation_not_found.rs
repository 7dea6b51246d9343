use super::Error;

/// Error when a cascade descriptor names a relation the owning model does
/// not declare.
#[derive(Debug)]
pub(super) struct RelationNotFound {
    model: Box<str>,
    relation: Box<str>,
}

impl std::error::Error for RelationNotFound {}

impl core::fmt::Display for RelationNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "relation `{}` not found for model `{}`",
            self.relation, self.model
        )
    }
}

impl Error {
    /// Creates a relation not found error.
    pub fn relation_not_found(model: impl Into<String>, relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RelationNotFound(RelationNotFound {
            model: model.into().into(),
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error is a relation not found error.
    pub fn is_relation_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RelationNotFound(_))
    }
}
