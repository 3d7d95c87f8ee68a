use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A transient user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Single-slot notification queue. Every new message replaces the previous
/// one; the slot empties on dismissal or once `auto_hide` has elapsed.
pub struct Notifier {
    slot: Mutex<Option<Notification>>,
    auto_hide: Duration,
}

impl Notifier {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            auto_hide,
        }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        *self.slot.lock() = Some(Notification {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(message, Severity::Info);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(message, Severity::Warning);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Clear the slot
    pub fn reset(&self) {
        *self.slot.lock() = None;
    }

    /// User closed the snackbar
    pub fn dismiss(&self) {
        self.reset();
    }

    /// The visible notification, if any. Expired entries are dropped here.
    pub fn current(&self) -> Option<Notification> {
        let mut slot = self.slot.lock();
        if slot
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() > self.auto_hide)
        {
            *slot = None;
        }
        slot.clone()
    }
}
