//! Device tables and kernel timing parameters.
//!
//! The vector table maps a device number to the symbolic address of its
//! ISR; the delay table maps the same index to the device's I/O service
//! time. Both are loaded before the run and read-only for the lifetime of
//! a simulation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::{DeviceId, Ticks};

/// Errors from loading the vector or delay tables.
#[derive(Debug)]
pub enum ConfigError {
    /// The table file could not be read.
    Io(std::io::Error),
    /// A delay-table line did not parse as a non-negative integer.
    BadDelay { line: usize, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::BadDelay { line, value } => {
                write!(f, "line {line}: invalid device delay {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::BadDelay { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Ordered symbolic ISR addresses, indexed by device number.
#[derive(Debug, Clone)]
pub struct VectorTable {
    entries: Vec<String>,
}

impl VectorTable {
    pub fn new(entries: Vec<String>) -> Self {
        VectorTable { entries }
    }

    /// Load a vector table: one symbolic ISR address per non-empty line.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let address = line.trim();
            if !address.is_empty() {
                entries.push(address.to_string());
            }
        }
        Ok(VectorTable { entries })
    }

    /// The ISR address for a device, or `None` when out of range.
    pub fn address(&self, device: DeviceId) -> Option<&str> {
        self.entries.get(device.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered per-device I/O service delays, indexed by device number.
#[derive(Debug, Clone)]
pub struct DelayTable {
    entries: Vec<Ticks>,
}

impl DelayTable {
    pub fn new(entries: Vec<Ticks>) -> Self {
        DelayTable { entries }
    }

    /// Load a delay table: one non-negative integer per non-empty line.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let delay = text.parse::<Ticks>().map_err(|_| ConfigError::BadDelay {
                line: index + 1,
                value: text.to_string(),
            })?;
            entries.push(delay);
        }
        Ok(DelayTable { entries })
    }

    /// The service delay for a device.
    ///
    /// Out-of-range devices resolve to 0 so that a trace referencing an
    /// unknown device degrades instead of aborting the run.
    pub fn delay(&self, device: DeviceId) -> Ticks {
        self.entries.get(device.0).copied().unwrap_or(0)
    }

    /// Whether the table has an entry for this device.
    pub fn contains(&self, device: DeviceId) -> bool {
        device.0 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fixed kernel overhead costs, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelCosts {
    /// Time to save the execution context on kernel entry.
    pub context_save: Ticks,
    /// Duration logged for each ISR activity chunk.
    pub isr_chunk: Ticks,
    /// Cost of the return-from-interrupt step.
    pub iret: Ticks,
}

impl Default for KernelCosts {
    fn default() -> Self {
        KernelCosts {
            context_save: 10,
            isr_chunk: 40,
            iret: 1,
        }
    }
}
