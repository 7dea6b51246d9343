use super::Error;

/// Error when a cascade configuration is malformed.
///
/// This occurs when:
/// - A relation entry has no `rel` name
/// - The same relation is listed twice for one model
/// - The configuration document cannot be parsed
///
/// These errors are raised while the `Db` is built and are fatal at startup.
#[derive(Debug)]
pub(super) struct InvalidConfig {
    message: Box<str>,
}

impl std::error::Error for InvalidConfig {}

impl core::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid cascade configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid cascade configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfig {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid cascade configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfig(_))
    }
}
