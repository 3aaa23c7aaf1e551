//! Time sources and timestamp formatting.

use crate::AuditSettings;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Utc};
use herald_error::{ConfigError, HeraldResult};
use std::sync::Arc;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats instants for cards in the configured timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use herald_audit::{AuditSettings, FixedClock, Timekeeper};
/// use std::sync::Arc;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
/// let settings = AuditSettings::default().with_utc_offset_minutes(60);
/// let timekeeper = Timekeeper::new(Arc::new(FixedClock(now)), &settings).unwrap();
///
/// assert_eq!(timekeeper.stamp(), "2024-01-15 15:30:00");
/// ```
#[derive(Clone)]
pub struct Timekeeper {
    clock: Arc<dyn Clock>,
    format: String,
    offset: FixedOffset,
}

impl Timekeeper {
    /// Build a timekeeper, validating the format pattern and offset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the strftime pattern contains an
    /// unknown specifier or the offset is a day or more.
    pub fn new(clock: Arc<dyn Clock>, settings: &AuditSettings) -> HeraldResult<Self> {
        let format = settings.timestamp_format().clone();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::new(format!("Invalid timestamp format: {}", format))
                .with_key("audit.timestamp_format")
                .into());
        }

        let offset = settings
            .utc_offset_minutes()
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "UTC offset out of range: {} minutes",
                    settings.utc_offset_minutes()
                ))
                .with_key("audit.utc_offset_minutes")
            })?;

        Ok(Self {
            clock,
            format,
            offset,
        })
    }

    /// Timekeeper backed by the system clock.
    pub fn system(settings: &AuditSettings) -> HeraldResult<Self> {
        Self::new(Arc::new(SystemClock), settings)
    }

    /// Current instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Format an instant in the configured timezone.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset).format(&self.format).to_string()
    }

    /// Current time, formatted. Used for card footers.
    pub fn stamp(&self) -> String {
        self.format(self.now())
    }
}

impl std::fmt::Debug for Timekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timekeeper")
            .field("format", &self.format)
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_pattern() {
        let settings = AuditSettings::default().with_timestamp_format("%Q".to_string());
        assert!(Timekeeper::system(&settings).is_err());
    }

    #[test]
    fn test_rejects_bad_offset() {
        let settings = AuditSettings::default().with_utc_offset_minutes(24 * 60);
        assert!(Timekeeper::system(&settings).is_err());
    }

    #[test]
    fn test_rejects_overflowing_offset() {
        for minutes in [i32::MAX, 40_000_000, i32::MIN] {
            let settings = AuditSettings::default().with_utc_offset_minutes(minutes);
            let err = Timekeeper::system(&settings).unwrap_err();
            assert!(err.to_string().contains("audit.utc_offset_minutes"), "{minutes}: {err}");
        }
    }
}
