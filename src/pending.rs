//! Pending-I/O tracking.
//!
//! A SYSCALL puts an entry here; the matching END_IO removes it. Lookup is
//! an explicit first-match-in-insertion-order scan: oldest-first for a
//! single device, with entries for other devices never affecting a
//! device's own order. Deliberately not a device-keyed map; the scan order
//! is part of the output contract.

use crate::types::{DeviceId, Ticks};

/// One in-flight I/O request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingIo {
    /// Device servicing the request.
    pub device: DeviceId,
    /// Clock value at which the device finishes servicing the request.
    pub completion_time: Ticks,
}

/// Ordered collection of in-flight I/O requests.
#[derive(Debug, Clone, Default)]
pub struct PendingIoQueue {
    entries: Vec<PendingIo>,
}

impl PendingIoQueue {
    pub fn new() -> Self {
        PendingIoQueue::default()
    }

    pub fn push(&mut self, entry: PendingIo) {
        self.entries.push(entry);
    }

    /// Remove and return the earliest-inserted entry for `device`.
    ///
    /// Removal is destructive: no entry is ever matched twice.
    pub fn remove_first(&mut self, device: DeviceId) -> Option<PendingIo> {
        let index = self.entries.iter().position(|e| e.device == device)?;
        Some(self.entries.remove(index))
    }

    /// All outstanding entries, in insertion order.
    pub fn entries(&self) -> &[PendingIo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
