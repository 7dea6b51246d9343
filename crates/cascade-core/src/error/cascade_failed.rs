use super::Error;

/// Context attached to a relation's failure when it aborts a delete event.
///
/// The cause (deletion, setter or lookup failure) is kept as the error's
/// cause chain, so the rendered message reads
/// ``cascade delete of relation `logs` failed: <cause>``.
#[derive(Debug)]
pub(super) struct CascadeFailed {
    relation: Box<str>,
}

impl std::error::Error for CascadeFailed {}

impl core::fmt::Display for CascadeFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cascade delete of relation `{}` failed", self.relation)
    }
}

impl Error {
    /// Creates the cascade failure context for `relation`.
    ///
    /// Attach it to the relation's error with [`Error::context`].
    pub fn cascade_failed(relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::CascadeFailed(CascadeFailed {
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error is a cascade failure.
    pub fn is_cascade_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CascadeFailed(_))
    }

    /// Returns the name of the relation whose failure aborted the cascade,
    /// searching the whole context chain.
    pub fn cascade_relation(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::CascadeFailed(failed) => Some(&*failed.relation),
            _ => None,
        })
    }
}
