//! Trace-event parsing.
//!
//! A trace is one event per line: an activity keyword (`CPU`, `SYSCALL`,
//! `END_IO`) and an integer argument, comma-separated. [`TraceReader`]
//! yields events lazily so the engine never buffers more than the line it
//! is currently processing.

use std::io::BufRead;

use crate::types::{DeviceId, Ticks};

/// One parsed line of the input trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The recorded program computes for `duration` ticks.
    CpuBurst { duration: Ticks },
    /// The recorded program issues a system call starting I/O on a device.
    Syscall { device: DeviceId },
    /// A device signals completion of an earlier I/O request.
    EndIo { device: DeviceId },
}

/// Errors from reading or parsing a trace.
#[derive(Debug)]
pub enum TraceError {
    /// The trace source could not be read.
    Io(std::io::Error),
    /// Unrecognized activity keyword.
    UnknownActivity { line: usize, activity: String },
    /// The activity's integer argument was missing or did not parse.
    BadArgument { line: usize, text: String },
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "I/O error: {e}"),
            TraceError::UnknownActivity { line, activity } => {
                write!(f, "line {line}: unknown activity {activity:?}")
            }
            TraceError::BadArgument { line, text } => {
                write!(f, "line {line}: malformed trace line {text:?}")
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(e: std::io::Error) -> Self {
        TraceError::Io(e)
    }
}

impl TraceEvent {
    /// Parse a single trace line. `line_no` is 1-based, for error reporting.
    pub fn parse(text: &str, line_no: usize) -> Result<TraceEvent, TraceError> {
        let (activity, argument) = text.split_once(',').ok_or_else(|| TraceError::BadArgument {
            line: line_no,
            text: text.to_string(),
        })?;

        let argument = argument.trim();
        let value = argument
            .parse::<u64>()
            .map_err(|_| TraceError::BadArgument {
                line: line_no,
                text: text.to_string(),
            })?;

        match activity.trim() {
            "CPU" => Ok(TraceEvent::CpuBurst { duration: value }),
            "SYSCALL" => Ok(TraceEvent::Syscall {
                device: DeviceId(value as usize),
            }),
            "END_IO" => Ok(TraceEvent::EndIo {
                device: DeviceId(value as usize),
            }),
            other => Err(TraceError::UnknownActivity {
                line: line_no,
                activity: other.to_string(),
            }),
        }
    }
}

/// Lazy, finite, non-restartable trace source.
///
/// Wraps a buffered reader and yields one [`TraceEvent`] per non-empty
/// line. Read and parse errors surface as items so the consumer decides
/// where the run stops.
pub struct TraceReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        TraceReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            return Some(TraceEvent::parse(text, self.line_no));
        }
    }
}
