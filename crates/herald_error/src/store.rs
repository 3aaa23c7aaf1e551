//! Guild configuration store errors.

/// Kinds of configuration store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Store backend could not be reached
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
    /// Stored settings could not be decoded
    #[display("Malformed settings for guild {}: {}", guild, reason)]
    Malformed {
        /// Guild whose settings failed to decode
        guild: u64,
        /// Why decoding failed
        reason: String,
    },
}

/// Configuration store error with location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Unavailable("connection reset".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
