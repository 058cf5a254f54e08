#[cfg(test)]
use std::cell::RefCell;
use std::fmt;
#[cfg(test)]
use std::rc::Rc;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    pub fn icon(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✗",
            Level::Warning => "⚠",
            Level::Info => "ℹ",
        }
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Prints notices to stderr, colored by level.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let line = notice.to_string();
        let styled = match notice.level {
            Level::Success => line.green(),
            Level::Error => line.red().bold(),
            Level::Warning => line.yellow(),
            Level::Info => line.cyan(),
        };
        eprintln!("{styled}");
    }
}

/// Keeps every notice; clones share the same log.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display_has_icon() {
        assert_eq!(Notice::success("Laporan berhasil disimpan!").to_string(), "✓ Laporan berhasil disimpan!");
        assert_eq!(Notice::error("Gagal").to_string(), "✗ Gagal");
        assert_eq!(Notice::warning("Awas").to_string(), "⚠ Awas");
        assert_eq!(Notice::info("Info").to_string(), "ℹ Info");
    }

    #[test]
    fn test_recording_notifier_shares_log_between_clones() {
        let recorder = RecordingNotifier::new();
        let handle = recorder.clone();
        handle.notify(Notice::info("satu"));
        recorder.notify(Notice::error("dua"));
        let notices = recorder.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].level, Level::Error);
    }
}
