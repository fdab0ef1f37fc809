//! Fixed-shape kernel entry and ISR execution sequences.
//!
//! Both SYSCALL and END_IO trap into the kernel through the same
//! boilerplate: switch to kernel mode, save the execution context, and
//! fetch the ISR address from the vector table. END_IO additionally runs
//! the ISR body as fixed-size activity chunks.

use crate::config::{KernelCosts, VectorTable};
use crate::log::LogLine;
use crate::types::{DeviceId, Ticks};

/// Ticks consumed by the mode switch on kernel entry.
const MODE_SWITCH_TICKS: Ticks = 1;

/// Ticks consumed by the vector fetch that transfers control to the ISR.
const VECTOR_FETCH_TICKS: Ticks = 1;

/// Width of one vector-table entry in bytes; a device's entry lives at
/// memory position `device * VECTOR_ENTRY_BYTES`.
const VECTOR_ENTRY_BYTES: usize = 2;

/// Address logged for devices with no vector-table entry.
const UNKNOWN_ISR_ADDRESS: &str = "0x0000";

/// Emit the kernel-entry boilerplate for an interrupt from `device`.
///
/// Returns the log lines and the advanced clock; the total duration is
/// `costs.context_save` plus the fixed mode-switch and vector-fetch costs.
/// A device outside the vector table logs the placeholder address instead
/// of failing.
pub fn dispatch(
    clock: Ticks,
    device: DeviceId,
    costs: &KernelCosts,
    vectors: &VectorTable,
) -> (Vec<LogLine>, Ticks) {
    let mut lines = Vec::with_capacity(3);
    let mut now = clock;

    lines.push(LogLine::new(now, MODE_SWITCH_TICKS, "switch to kernel mode"));
    now += MODE_SWITCH_TICKS;

    lines.push(LogLine::new(now, costs.context_save, "context saved"));
    now += costs.context_save;

    let address = vectors.address(device).unwrap_or(UNKNOWN_ISR_ADDRESS);
    let position = device.0 * VECTOR_ENTRY_BYTES;
    lines.push(LogLine::new(
        now,
        VECTOR_FETCH_TICKS,
        format!("find vector {device} in memory position {position:#06X}, ISR address is {address}"),
    ));
    now += VECTOR_FETCH_TICKS;

    (lines, now)
}

/// Expand a device's ISR body into fixed-size activity chunks.
///
/// Chunks are emitted while service time remains; the final chunk is
/// logged at the full chunk duration even when less service time remains,
/// so the total logged time is `service_time` rounded up to a chunk
/// multiple. Downstream log consumers depend on that exact shape; keep it.
/// Zero service time emits zero chunks.
pub fn expand_isr(
    clock: Ticks,
    device: DeviceId,
    service_time: Ticks,
    chunk: Ticks,
) -> (Vec<LogLine>, Ticks) {
    let mut lines = Vec::new();
    let mut now = clock;

    // A zero-tick chunk would never consume any service time.
    if chunk == 0 {
        return (lines, now);
    }

    let mut remaining = service_time;
    let mut index = 0u32;
    while remaining > 0 {
        lines.push(LogLine::new(
            now,
            chunk,
            format!("ISR activity from device {device} chunk number {index}"),
        ));
        now += chunk;
        remaining = remaining.saturating_sub(chunk);
        index += 1;
    }

    (lines, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors() -> VectorTable {
        VectorTable::new(vec!["0x01E3".into(), "0x02FD".into()])
    }

    #[test]
    fn test_dispatch_shape_and_total() {
        let costs = KernelCosts::default();
        let (lines, clock) = dispatch(100, DeviceId(1), &costs, &vectors());

        assert_eq!(clock, 100 + costs.context_save + 2);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), "100, 1, switch to kernel mode");
        assert_eq!(lines[1].to_string(), "101, 10, context saved");
        assert_eq!(
            lines[2].to_string(),
            "111, 1, find vector 1 in memory position 0x0002, ISR address is 0x02FD"
        );
    }

    #[test]
    fn test_dispatch_out_of_range_uses_placeholder_address() {
        let costs = KernelCosts::default();
        let (lines, clock) = dispatch(0, DeviceId(9), &costs, &vectors());
        assert_eq!(clock, 12);
        assert!(lines[2].description.contains("ISR address is 0x0000"));
    }

    #[test]
    fn test_isr_overshoot_rounds_up_to_chunk_multiple() {
        let (lines, clock) = expand_isr(174, DeviceId(0), 50, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "174, 40, ISR activity from device 0 chunk number 0");
        assert_eq!(lines[1].to_string(), "214, 40, ISR activity from device 0 chunk number 1");
        // 50 ticks of service are logged as 80: the documented overshoot.
        assert_eq!(clock, 254);
    }

    #[test]
    fn test_isr_exact_multiple() {
        let (lines, clock) = expand_isr(0, DeviceId(0), 80, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(clock, 80);
    }

    #[test]
    fn test_isr_zero_service_emits_nothing() {
        let (lines, clock) = expand_isr(42, DeviceId(0), 0, 40);
        assert!(lines.is_empty());
        assert_eq!(clock, 42);
    }
}
