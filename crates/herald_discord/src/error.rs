//! Gateway adapter error types.

use derive_getters::Getters;
use herald_error::HeraldError;

/// Discord adapter error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (HTTP, gateway, rate limit).
    #[display("Serenity API error: {_0}")]
    Serenity(String),

    /// Bot token is malformed.
    #[display("Invalid or expired bot token")]
    InvalidToken,

    /// Connection to the gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// A platform model could not be converted to a snapshot.
    #[display("Conversion failed: {_0}")]
    Conversion(String),

    /// The audit log rejected an event.
    #[display("Audit error: {_0}")]
    Audit(String),
}

/// Discord adapter error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use herald_discord::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InvalidToken);
    /// assert_eq!(err.kind(), &DiscordErrorKind::InvalidToken);
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the source file where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

/// Result type for Discord adapter operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::Serenity(err.to_string()))
    }
}

impl From<HeraldError> for DiscordError {
    #[track_caller]
    fn from(err: HeraldError) -> Self {
        DiscordError::new(DiscordErrorKind::Audit(err.to_string()))
    }
}
