//! User-facing notices raised while processing admonitions

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Something was corrected and the user should know
    Warning,
    /// Something could not be processed
    Error,
}

/// A message meant for the person reading or editing the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity level of the notice
    pub level: NoticeLevel,
    /// Human-readable message
    pub message: String,
    /// Source of the notice (e.g., "params", "pipeline")
    pub source: String,
}

impl Notice {
    /// Create a new notice
    pub fn new(level: NoticeLevel, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a warning notice
    pub fn warning(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message, source)
    }

    /// Create an error notice
    pub fn error(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message, source)
    }
}

/// Channel that shows notices to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Forwards notices to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Warning => log::Level::Warn,
            NoticeLevel::Error => log::Level::Error,
        };
        log::log!(target: "admonish", level, "[{}] {}", notice.source, notice.message);
    }
}

/// Collects notices so they can be shown later
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notice collected so far
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
