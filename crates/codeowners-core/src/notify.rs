// User-visible warnings raised while editing rules files

use owo_colors::OwoColorize;
use std::cell::RefCell;

pub trait Notifier {
    fn warn(&self, title: &str, detail: &str);
}

/// Prints warnings to stderr and mirrors them into the log
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn warn(&self, title: &str, detail: &str) {
        tracing::warn!(%title, %detail, "notification");
        eprintln!("{} {}", "▸ ".bright_yellow(), title.yellow());
        if !detail.is_empty() {
            eprintln!("   {}", detail.bright_black());
        }
    }
}

/// Keeps warnings in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    warnings: RefCell<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(title, detail)` pairs, oldest first
    pub fn warnings(&self) -> Vec<(String, String)> {
        self.warnings.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.warnings.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, title: &str, detail: &str) {
        self.warnings.borrow_mut().push((title.to_string(), detail.to_string()));
    }
}
