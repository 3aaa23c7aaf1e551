//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, StoreError, TransportError};

/// Every error condition a Herald operation can surface.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldError, ConfigError};
///
/// let err: HeraldError = ConfigError::new("missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Card delivery error
    #[from(TransportError)]
    Transport(TransportError),
    /// Guild configuration store error
    #[from(StoreError)]
    Store(StoreError),
    /// JSON encoding error
    #[from(JsonError)]
    Json(JsonError),
}

/// Herald error with kind discrimination.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldErrorKind, HeraldResult, TransportError, TransportErrorKind};
///
/// fn send() -> HeraldResult<()> {
///     Err(TransportError::new(TransportErrorKind::PermissionDenied(7)))?
/// }
///
/// let err = send().unwrap_err();
/// assert!(matches!(err.kind(), HeraldErrorKind::Transport(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
