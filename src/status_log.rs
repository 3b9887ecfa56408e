//! Severity-leveled track logger.
//!
//! [`StatusLogger`] prints user-facing track messages to the console, gated
//! by a verbosity threshold, and optionally appends them to a file. It is the
//! fixed-method replacement for a dynamically generated per-severity API: one
//! named operation per severity, keyed by [`Severity`].
//!
//! Console lines use a short (second-precision) timestamp and carry the
//! severity label and invoking program name; file lines use a long
//! (microsecond-precision) timestamp and just the message. A supplied file
//! path is appended to on *every* call regardless of the threshold, with the
//! file opened, appended, and closed each time. There is no internal locking;
//! callers in a concurrent context must serialize their own access.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::error;

const TIME_SHORTFORM: &str = "%Y%m%d %H:%M:%S";
const TIME_LONGFORM: &str = "%Y%m%d %H:%M:%S%.6f";

/// Message severity, ordered from most critical (lowest ordinal) to most
/// verbose.
///
/// A logger with threshold `t` emits a message at severity `s` to the console
/// iff `t >= s.ordinal()`, so ERROR is shown at every verbosity and DISPLAY
/// only at the most verbose setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Unrecoverable problems; always shown.
    Error = 0,
    /// Recoverable problems worth surfacing.
    Warn = 1,
    /// Routine progress information.
    Info = 2,
    /// Chatty per-item output.
    Display = 3,
}

impl Severity {
    /// Four-character label used in console lines.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERRO",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Display => "DISP",
        }
    }

    /// Ordinal used for threshold comparison.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Console-and-file track logger with a fixed verbosity threshold.
///
/// The threshold is set once at construction and read-only thereafter.
#[derive(Debug, Clone)]
pub struct StatusLogger {
    verbosity: u8,
}

impl Default for StatusLogger {
    /// The default logger is the most verbose one.
    fn default() -> Self {
        StatusLogger::new(Severity::Display.ordinal())
    }
}

impl StatusLogger {
    /// Creates a logger with the given verbosity threshold (0-3).
    pub fn new(verbosity: u8) -> Self {
        StatusLogger { verbosity }
    }

    /// The configured verbosity threshold.
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Whether a message at `severity` would be printed to the console.
    ///
    /// File appends are unaffected by this: a supplied path is written on
    /// every call.
    pub fn emits(&self, severity: Severity) -> bool {
        self.verbosity >= severity.ordinal()
    }

    /// Logs at ERROR severity.
    pub fn error(&self, msg: &str, file: Option<&Path>) {
        self.emit(Severity::Error, msg, file);
    }

    /// Logs at WARN severity.
    pub fn warn(&self, msg: &str, file: Option<&Path>) {
        self.emit(Severity::Warn, msg, file);
    }

    /// Logs at INFO severity.
    pub fn info(&self, msg: &str, file: Option<&Path>) {
        self.emit(Severity::Info, msg, file);
    }

    /// Logs at DISPLAY severity.
    pub fn display(&self, msg: &str, file: Option<&Path>) {
        self.emit(Severity::Display, msg, file);
    }

    /// Appends `msg` to `path` with a long-form timestamp.
    ///
    /// The file is opened, appended, and closed per call; no handle is held.
    /// A failed append is reported on the diagnostic channel rather than
    /// panicking or aborting the caller.
    pub fn file_message(&self, msg: &str, path: &Path) {
        let line = format!("{} {}\n", Local::now().format(TIME_LONGFORM), msg);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(e) = result {
            error!("failed to append to {}: {}", path.display(), e);
        }
    }

    fn emit(&self, severity: Severity, msg: &str, file: Option<&Path>) {
        if self.emits(severity) {
            println!(
                "{} [{}] {} {{{}}}",
                Local::now().format(TIME_SHORTFORM),
                severity.label(),
                msg,
                invoking_program()
            );
        }
        if let Some(path) = file {
            self.file_message(msg, path);
        }
    }
}

// argv[0], matching what the user typed to start the program.
fn invoking_program() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_ordinals_are_ordered() {
        assert_eq!(Severity::Error.ordinal(), 0);
        assert_eq!(Severity::Warn.ordinal(), 1);
        assert_eq!(Severity::Info.ordinal(), 2);
        assert_eq!(Severity::Display.ordinal(), 3);
    }

    #[test]
    fn test_threshold_warn_emits_error_and_warn_only() {
        let logger = StatusLogger::new(1);
        assert!(logger.emits(Severity::Error));
        assert!(logger.emits(Severity::Warn));
        assert!(!logger.emits(Severity::Info));
        assert!(!logger.emits(Severity::Display));
    }

    #[test]
    fn test_threshold_zero_emits_errors_only() {
        let logger = StatusLogger::new(0);
        assert!(logger.emits(Severity::Error));
        assert!(!logger.emits(Severity::Warn));
    }

    #[test]
    fn test_default_is_most_verbose() {
        let logger = StatusLogger::default();
        assert!(logger.emits(Severity::Display));
        assert_eq!(logger.verbosity(), 3);
    }

    #[test]
    fn test_file_sink_ignores_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.log");

        // Threshold 0 suppresses everything but errors on the console, yet
        // all four calls must land in the file
        let logger = StatusLogger::new(0);
        logger.error("e", Some(&path));
        logger.warn("w", Some(&path));
        logger.info("i", Some(&path));
        logger.display("d", Some(&path));

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with(" e"));
        assert!(lines[3].ends_with(" d"));
    }

    #[test]
    fn test_file_lines_carry_long_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.log");

        StatusLogger::default().display("message body", Some(&path));

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        // "<YYYYMMDD> <HH:MM:SS.ffffff> message body"
        let mut parts = line.splitn(3, ' ');
        let date = parts.next().unwrap();
        let time = parts.next().unwrap();
        assert_eq!(parts.next(), Some("message body"));
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        assert!(time.contains('.'), "expected sub-second precision: {time}");
    }

    #[test]
    fn test_file_message_appends_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.log");

        let logger = StatusLogger::default();
        logger.file_message("first", &path);
        logger.file_message("second", &path);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
