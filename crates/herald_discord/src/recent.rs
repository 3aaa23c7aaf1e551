//! Bounded store of recently seen messages.

use herald_core::MessageId;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
struct RecentState<M> {
    entries: HashMap<MessageId, M>,
    order: VecDeque<MessageId>,
}

impl<M> Default for RecentState<M> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }
}

/// Keeps the most recent messages so deletions and edits can be reported
/// with their content.
///
/// The gateway only sends ids for deleted messages, so anything not kept here
/// cannot be described. Once `capacity` messages are stored the oldest is
/// dropped. A capacity of zero stores nothing.
///
/// # Examples
///
/// ```
/// use herald_core::MessageId;
/// use herald_discord::RecentMessages;
///
/// let recent = RecentMessages::new(2);
/// recent.insert(MessageId(1), "first");
/// recent.insert(MessageId(2), "second");
/// recent.insert(MessageId(3), "third");
///
/// assert!(recent.get(MessageId(1)).is_none());
/// assert_eq!(recent.remove(MessageId(3)), Some("third"));
/// assert_eq!(recent.len(), 1);
/// ```
#[derive(Debug)]
pub struct RecentMessages<M> {
    capacity: usize,
    state: Mutex<RecentState<M>>,
}

impl<M: Clone> RecentMessages<M> {
    /// Create a store holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(RecentState::default()),
        }
    }

    /// Store or replace a message. Replacing keeps its original position.
    pub fn insert(&self, id: MessageId, message: M) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if state.entries.insert(id, message).is_some() {
            return;
        }
        state.order.push_back(id);
        while state.order.len() > self.capacity {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
            }
        }
    }

    /// A stored message.
    pub fn get(&self, id: MessageId) -> Option<M> {
        self.state.lock().entries.get(&id).cloned()
    }

    /// Take a message out of the store.
    pub fn remove(&self, id: MessageId) -> Option<M> {
        let mut state = self.state.lock();
        let message = state.entries.remove(&id)?;
        if let Some(pos) = state.order.iter().position(|m| *m == id) {
            state.order.remove(pos);
        }
        Some(message)
    }

    /// Maximum number of stored messages.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}
