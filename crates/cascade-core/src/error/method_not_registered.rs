use super::Error;

/// Error when a cascade option names a setter or after-delete callback that
/// was never registered on the owning model.
#[derive(Debug)]
pub(super) struct MethodNotRegistered {
    model: Box<str>,
    method: Box<str>,
}

impl std::error::Error for MethodNotRegistered {}

impl core::fmt::Display for MethodNotRegistered {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "method `{}` is not registered on model `{}`",
            self.method, self.model
        )
    }
}

impl Error {
    pub fn method_not_registered(model: impl Into<String>, method: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MethodNotRegistered(MethodNotRegistered {
            model: model.into().into(),
            method: method.into().into(),
        }))
    }

    pub fn is_method_not_registered(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MethodNotRegistered(_))
    }
}
