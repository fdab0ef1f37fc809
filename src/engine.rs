//! The timeline engine.
//!
//! A synchronous fold over the trace: each event expands into one or more
//! log lines and a clock advance. The clock, the pending-I/O queue, and
//! the accumulated log are owned here; nothing executes concurrently and
//! no state lives outside the engine instance.

use tracing::{debug, warn};

use crate::config::{DelayTable, KernelCosts, VectorTable};
use crate::kernel;
use crate::log::{ExecutionLog, LogLine};
use crate::pending::{PendingIo, PendingIoQueue};
use crate::trace::{TraceError, TraceEvent};
use crate::types::{DeviceId, Ticks};

/// Drives the simulation: consumes trace events in order and accumulates
/// the execution log.
pub struct Engine {
    clock: Ticks,
    costs: KernelCosts,
    vectors: VectorTable,
    delays: DelayTable,
    pending: PendingIoQueue,
    log: ExecutionLog,
}

impl Engine {
    pub fn new(vectors: VectorTable, delays: DelayTable, costs: KernelCosts) -> Self {
        Engine {
            clock: 0,
            costs,
            vectors,
            delays,
            pending: PendingIoQueue::new(),
            log: ExecutionLog::new(),
        }
    }

    /// Current simulation clock, in ticks.
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// In-flight I/O requests (SYSCALL issued, END_IO not yet seen).
    pub fn pending(&self) -> &PendingIoQueue {
        &self.pending
    }

    /// The log accumulated so far.
    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    /// Consume the whole trace and return the finished execution log.
    ///
    /// The source is lazy; a read or parse error stops the run at the
    /// offending line and surfaces as the returned error.
    pub fn run<I>(mut self, events: I) -> Result<ExecutionLog, TraceError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
    {
        for event in events {
            self.step(event?);
        }
        Ok(self.log)
    }

    /// Process a single trace event.
    pub fn step(&mut self, event: TraceEvent) {
        debug!(clock = self.clock, ?event, "processing trace event");
        match event {
            TraceEvent::CpuBurst { duration } => self.cpu_burst(duration),
            TraceEvent::Syscall { device } => self.syscall(device),
            TraceEvent::EndIo { device } => self.end_io(device),
        }
    }

    fn cpu_burst(&mut self, duration: Ticks) {
        self.log.record(LogLine::new(self.clock, duration, "CPU burst"));
        self.clock += duration;
    }

    fn syscall(&mut self, device: DeviceId) {
        self.enter_kernel(device);

        let delay = self.resolve_delay(device);
        let completion_time = self.clock + delay;
        self.pending.push(PendingIo { device, completion_time });

        // The device services the request on its own; the kernel moves on
        // at the post-dispatch clock, so the delay is logged but not added.
        self.log.record(LogLine::new(
            self.clock,
            delay,
            format!("I/O request started for device {device}"),
        ));
    }

    fn end_io(&mut self, device: DeviceId) {
        match self.pending.remove_first(device) {
            Some(entry) => {
                // The kernel notices the completion no earlier than the
                // device's scheduled finish time.
                if self.clock < entry.completion_time {
                    self.clock = entry.completion_time;
                }
            }
            None => {
                // Lenient: dispatch and ISR still run, the clock just has
                // no completion time to catch up to.
                warn!(%device, clock = self.clock, "END_IO with no pending I/O request");
            }
        }

        self.enter_kernel(device);

        let delay = self.resolve_delay(device);
        let (lines, clock) = kernel::expand_isr(self.clock, device, delay, self.costs.isr_chunk);
        self.log.extend(lines);
        self.clock = clock;

        self.log.record(LogLine::new(self.clock, self.costs.iret, "IRET"));
        self.clock += self.costs.iret;
    }

    /// Shared SYSCALL/END_IO kernel-entry path.
    fn enter_kernel(&mut self, device: DeviceId) {
        let (lines, clock) = kernel::dispatch(self.clock, device, &self.costs, &self.vectors);
        self.log.extend(lines);
        self.clock = clock;
    }

    fn resolve_delay(&self, device: DeviceId) -> Ticks {
        if !self.delays.contains(device) {
            warn!(%device, "device not in delay table, using 0 service time");
        }
        self.delays.delay(device)
    }
}
