//!
//! Status line of the dialog.
//!
//! Messages are shown after a short delay, which gives screen
//! readers a chance to announce them after the focus change
//! that caused them.
//!
//! Requesting the same text as the last request does nothing.
//! A different text is scheduled without dropping the ones
//! already waiting, so messages are debounced but not serialized.
//!

use log::debug;
use std::time::{Duration, Instant};

/// Default delay for status messages.
pub const MESSAGE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    due: Instant,
    text: String,
}

/// Delayed status message.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    delay: Duration,
    /// Last requested text.
    last: String,
    /// Text currently shown.
    current: String,
    /// Ordered by due time, next due last.
    pending: Vec<Pending>,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self {
            delay: MESSAGE_DELAY,
            last: Default::default(),
            current: Default::default(),
            pending: Default::default(),
        }
    }
}

impl StatusMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay before a message is shown.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Delay before a message is shown.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Request a message.
    ///
    /// Returns true if a new message has been scheduled.
    pub fn set_message(&mut self, text: &str, now: Instant) -> bool {
        if text == self.last {
            return false;
        }
        self.last = text.to_string();

        let p = Pending {
            due: now + self.delay,
            text: text.to_string(),
        };
        let idx = self
            .pending
            .iter()
            .position(|v| v.due <= p.due)
            .unwrap_or(self.pending.len());
        self.pending.insert(idx, p);
        true
    }

    /// Removes the visible message and everything pending.
    pub fn clear(&mut self) {
        self.last.clear();
        self.current.clear();
        self.pending.clear();
    }

    /// Last requested message. This may not be visible yet.
    pub fn requested(&self) -> &str {
        self.last.as_str()
    }

    /// Visible message.
    pub fn message(&self) -> &str {
        self.current.as_str()
    }

    /// Number of messages waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the next message is due.
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        self.pending
            .last()
            .map(|v| v.due.saturating_duration_since(now))
    }

    /// Shows every message that is due.
    ///
    /// Returns true if the visible message has been replaced.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(p) = self.pending.last() {
            if p.due > now {
                break;
            }
            if let Some(p) = self.pending.pop() {
                debug!("status message {:?}", p.text);
                self.current = p.text;
                changed = true;
            }
        }
        changed
    }
}
