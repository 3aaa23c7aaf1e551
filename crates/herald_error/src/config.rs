//! Configuration error types.

use std::fmt;

/// Invalid or missing configuration, optionally tied to the offending key.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct ConfigError {
    message: String,
    key: Option<String>,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a configuration error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_error::ConfigError;
    ///
    /// let err = ConfigError::new("Guild key is not a snowflake").with_key("guilds.abc");
    /// assert_eq!(err.message(), "Guild key is not a snowflake");
    /// assert_eq!(err.key(), Some("guilds.abc"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name the setting the error refers to, e.g. `audit.utc_offset_minutes`.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offending setting, if known.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Line where the error was raised.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was raised.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration Error: {}", self.message)?;
        if let Some(key) = &self.key {
            write!(f, " [{}]", key)?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_key() {
        let err = ConfigError::new("UTC offset out of range").with_key("audit.utc_offset_minutes");
        let shown = err.to_string();
        assert!(shown.starts_with("Configuration Error: UTC offset out of range [audit.utc_offset_minutes] at line"));
        assert!(shown.ends_with(err.file()));
    }

    #[test]
    fn test_display_without_key() {
        let err = ConfigError::new("missing");
        assert!(!err.to_string().contains('['));
        assert_eq!(err.key(), None);
    }
}
