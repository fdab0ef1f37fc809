//! Execution-log recording.
//!
//! Every simulated action (CPU burst, kernel-entry step, ISR chunk, IRET)
//! is recorded as a [`LogLine`] with its start time and duration. The log
//! is kept as structured records and serialized to text only at the output
//! boundary, so tests can assert on data instead of strings.

use std::fmt;
use std::io::Write;

use crate::types::Ticks;

/// A single timed entry in the execution log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Clock value when the action started.
    pub start: Ticks,
    /// Ticks the action consumed.
    pub duration: Ticks,
    /// Human-readable description of the action.
    pub description: String,
}

impl LogLine {
    pub fn new(start: Ticks, duration: Ticks, description: impl Into<String>) -> Self {
        LogLine {
            start,
            duration,
            description: description.into(),
        }
    }

    /// Clock value after this action completes.
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.start, self.duration, self.description)
    }
}

/// The complete execution log, in emission order.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    lines: Vec<LogLine>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        ExecutionLog::default()
    }

    pub(crate) fn record(&mut self, line: LogLine) {
        self.lines.push(line);
    }

    pub(crate) fn extend(&mut self, lines: Vec<LogLine>) {
        self.lines.extend(lines);
    }

    /// All recorded lines, in emission order.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all logged durations.
    pub fn total_duration(&self) -> Ticks {
        self.lines.iter().map(|l| l.duration).sum()
    }

    /// Serialize the log in the output text format, one line per entry.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// The serialized output text as a single string.
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        // Writing to a Vec<u8> cannot fail.
        self.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let line = LogLine::new(112, 50, "I/O request started for device 0");
        assert_eq!(line.to_string(), "112, 50, I/O request started for device 0");
        assert_eq!(line.end(), 162);
    }

    #[test]
    fn test_log_serialization_order() {
        let mut log = ExecutionLog::new();
        log.record(LogLine::new(0, 100, "CPU burst"));
        log.record(LogLine::new(100, 1, "switch to kernel mode"));
        assert_eq!(log.to_text(), "0, 100, CPU burst\n100, 1, switch to kernel mode\n");
        assert_eq!(log.total_duration(), 101);
        assert_eq!(log.len(), 2);
    }
}
