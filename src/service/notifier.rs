use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Fire-and-forget signal sink. Implementations must not block.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(level = %notification.level, "{}", notification.message)
            }
            NotificationLevel::Warning => warn!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

/// Keeps every notification; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.log.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.log.borrow_mut().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_log() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.notify(Notification::new(NotificationLevel::Success, "done"));
        notifier.notify(Notification::new(NotificationLevel::Error, "failed"));

        assert_eq!(handle.count(), 2);
        assert_eq!(handle.last().unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn test_tracing_notifier_does_not_panic() {
        TracingNotifier.notify(Notification::new(NotificationLevel::Warning, "careful"));
    }
}
