//! User-facing notices
//!
//! Mutations that have something to tell the user (an empty search term, a
//! replace with no matches) report through an optional `Notifier` supplied
//! by the caller. The core never decides how notices are displayed.

use std::sync::Mutex;

use tracing::{info, warn};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// Forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(notice = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(notice = "error", "{}", message);
    }

    fn info(&self, message: &str) {
        info!(notice = "info", "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Keeps every notice in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        match self.notices.lock() {
            Ok(notices) => notices.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, level: NoticeLevel, message: &str) {
        let mut notices = match self.notices.lock() {
            Ok(notices) => notices,
            Err(poisoned) => poisoned.into_inner(),
        };
        notices.push((level, message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(NoticeLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.record(NoticeLevel::Info, message);
    }
}
