//! Transient notifications
//!
//! One message at a time. A new message replaces the visible one and restarts
//! the clear timer, so earlier timers can never clear a later message.

use crate::timer::Timer;
use std::time::{Duration, Instant};

/// Single-slot notification with auto-clear
#[derive(Debug)]
pub struct NotificationSink {
    message: Option<String>,
    clear: Timer,
    display: Duration,
}

impl NotificationSink {
    /// Create a sink that keeps messages visible for `display`
    pub fn new(display: Duration) -> Self {
        Self {
            message: None,
            clear: Timer::new(),
            display,
        }
    }

    /// Show `message`, replacing any visible one
    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some(message.into());
        self.clear.schedule(now, self.display);
    }

    /// Clear the message if its display time has passed
    ///
    /// Returns true when a message was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.clear.fire(now) {
            self.message = None;
            true
        } else {
            false
        }
    }

    /// Visible message
    pub fn current(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
