//! Console output for a migration run
//!
//! Progress and status lines go through a notifier so the same run can print
//! to a terminal or be captured.

use parking_lot::Mutex;

/// Trait for handling migration output
pub trait MigrationNotifier: Send + Sync {
    /// Handle progress and status output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);
}

/// Default console-based notifier
pub struct ConsoleNotifier {
    stderr_only: bool,
}

impl ConsoleNotifier {
    /// Progress to stdout, errors to stderr
    pub fn new() -> Self {
        Self { stderr_only: false }
    }

    /// Everything to stderr, keeping stdout free for a machine-readable report
    pub fn stderr() -> Self {
        Self { stderr_only: true }
    }
}

impl MigrationNotifier for ConsoleNotifier {
    fn on_output(&self, content: &str) {
        if self.stderr_only {
            eprintln!("{content}");
        } else {
            println!("{content}");
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{content}");
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifier that keeps everything it is given
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    output: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Vec<String> {
        self.output.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// True if any output line contains `needle`
    pub fn saw(&self, needle: &str) -> bool {
        self.output.lock().iter().any(|line| line.contains(needle))
    }
}

impl MigrationNotifier for RecordingNotifier {
    fn on_output(&self, content: &str) {
        self.output.lock().push(content.to_string());
    }

    fn on_error(&self, content: &str) {
        self.errors.lock().push(content.to_string());
    }
}
