//! Rendering the decision log on stderr.

use std::io::{self, IsTerminal, Write};

use motag_core::{LogEntry, Outcome, Severity};
use owo_colors::OwoColorize;

/// Color only when stderr is a terminal and `NO_COLOR` is unset.
pub fn use_color() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn visible(log: &[LogEntry], level: Severity) -> impl Iterator<Item = &LogEntry> {
    log.iter().filter(move |entry| entry.severity >= level)
}

/// One line per entry at or above `level`, then a summary line.
pub fn write_text(
    out: &mut impl Write,
    outcome: &Outcome,
    level: Severity,
    color: bool,
) -> io::Result<()> {
    for entry in visible(&outcome.log, level) {
        let label = format!("[{}]", entry.severity);
        if color {
            match entry.severity {
                Severity::Info => write!(out, "{}", label.green())?,
                Severity::Warn => write!(out, "{}", label.yellow())?,
            }
        } else {
            write!(out, "{label}")?;
        }
        writeln!(out, " {}", entry.message)?;
    }

    let info = outcome.count(Severity::Info);
    let warnings = outcome.count(Severity::Warn);
    let summary = format!("{info} info, {warnings} warnings");
    if color {
        writeln!(out, "{}", summary.bold())
    } else {
        writeln!(out, "{summary}")
    }
}

/// The entries at or above `level` as a JSON array.
pub fn write_json(out: &mut impl Write, log: &[LogEntry], level: Severity) -> io::Result<()> {
    let entries: Vec<&LogEntry> = visible(log, level).collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)
}
