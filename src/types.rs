//! Newtype wrappers and type aliases for domain concepts.
//!
//! A newtype for device numbers prevents silent confusion with burst
//! durations, which share the integer slot in raw trace lines. Plain
//! quantities (timestamps, durations) stay as a type alias.

use std::fmt;

/// Simulated time in ticks (the trace's integer time unit).
pub type Ticks = u64;

/// Device number, used as an index into the vector and delay tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub usize);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
