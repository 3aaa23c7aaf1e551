//! Last-seen user snapshots.

use herald_core::{UserId, UserSnapshot};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Remembers the last account snapshot seen for each user.
///
/// The platform reports account changes (avatar, username) through a member
/// update in every guild the user shares with the bot. The tracker turns those
/// into a single before/after pair: the first report of a change yields the
/// pair, later reports of the same state yield nothing.
///
/// # Examples
///
/// ```
/// use herald_core::UserSnapshotBuilder;
/// use herald_discord::UserSnapshotTracker;
///
/// let snapshot = |name: &str| {
///     UserSnapshotBuilder::default()
///         .id(1u64)
///         .name(name)
///         .avatar_url("https://cdn.example/1.png")
///         .build()
///         .unwrap()
/// };
///
/// let tracker = UserSnapshotTracker::new();
/// tracker.remember(snapshot("ferris"));
///
/// let (before, after) = tracker.observe(snapshot("corro")).unwrap();
/// assert_eq!(before.name(), "ferris");
/// assert_eq!(after.name(), "corro");
/// assert!(tracker.observe(snapshot("corro")).is_none());
/// ```
#[derive(Debug, Default)]
pub struct UserSnapshotTracker {
    last_seen: Mutex<HashMap<UserId, UserSnapshot>>,
}

impl UserSnapshotTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot without reporting a change.
    pub fn remember(&self, snapshot: UserSnapshot) {
        self.last_seen.lock().insert(*snapshot.id(), snapshot);
    }

    /// Record a snapshot only if the user is not tracked yet.
    pub fn seed(&self, snapshot: UserSnapshot) {
        self.last_seen
            .lock()
            .entry(*snapshot.id())
            .or_insert(snapshot);
    }

    /// Record a snapshot, returning the previous one if it differs.
    ///
    /// The first snapshot seen for a user has nothing to compare against and
    /// returns `None`.
    pub fn observe(&self, snapshot: UserSnapshot) -> Option<(UserSnapshot, UserSnapshot)> {
        let mut last_seen = self.last_seen.lock();
        match last_seen.insert(*snapshot.id(), snapshot.clone()) {
            Some(previous) if previous != snapshot => Some((previous, snapshot)),
            _ => None,
        }
    }

    /// Forget a user, e.g. once they share no guild with the bot.
    pub fn forget(&self, user: UserId) {
        self.last_seen.lock().remove(&user);
    }

    /// Number of users tracked.
    pub fn len(&self) -> usize {
        self.last_seen.lock().len()
    }

    /// True when no user is tracked.
    pub fn is_empty(&self) -> bool {
        self.last_seen.lock().is_empty()
    }
}
