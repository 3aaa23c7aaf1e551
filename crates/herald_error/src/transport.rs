//! Card delivery errors.

/// Specific delivery failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransportErrorKind {
    /// Destination channel does not exist or is not visible to the bot
    #[display("Channel not found: {}", _0)]
    ChannelNotFound(u64),
    /// Bot lacks permission to post in the channel
    #[display("Missing permission to post in channel {}", _0)]
    PermissionDenied(u64),
    /// The platform rejected or dropped the send
    #[display("Send failed: {}", _0)]
    SendFailed(String),
}

/// Delivery error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    kind: TransportErrorKind,
    line: u32,
    file: &'static str,
}

impl TransportError {
    /// Create a new transport error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::{TransportError, TransportErrorKind};
    ///
    /// let err = TransportError::new(TransportErrorKind::ChannelNotFound(42));
    /// assert_eq!(err.kind(), &TransportErrorKind::ChannelNotFound(42));
    /// ```
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TransportErrorKind {
        &self.kind
    }
}
