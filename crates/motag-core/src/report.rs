//! Per-element decision log.
//!
//! The reconciler never prints. Every decision it makes on a matching
//! element is recorded as a [`LogEntry`] and handed back with the new
//! markup; rendering is left to the host.

use std::fmt;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// How noteworthy a decision is. `Warn` marks elements the tool skipped
/// or only partly changed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// An attribute was set or removed as asked.
    Info,
    /// An element was left (partly) alone.
    Warn,
}

/// One decision about one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// INFO or WARN.
    pub severity: Severity,
    /// Name of the element the decision is about.
    pub tag: String,
    /// Human-readable description.
    pub message: String,
}

impl LogEntry {
    /// An INFO entry.
    pub fn info(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// A WARN entry.
    pub fn warn(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            tag: tag.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Result of one annotate or de-annotate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Decisions in document order.
    pub log: Vec<LogEntry>,
    /// The rewritten document.
    pub markup: String,
}

impl Outcome {
    /// Number of entries with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.log.iter().filter(|e| e.severity == severity).count()
    }

    /// Entries with WARN severity.
    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(|e| e.severity == Severity::Warn)
    }
}
