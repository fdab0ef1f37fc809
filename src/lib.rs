//! irqsim - Deterministic trace-driven simulator for kernel interrupt handling.
//!
//! This crate replays a recorded trace of CPU bursts, system calls, and I/O
//! completions and expands it into a timestamped execution log: the exact
//! sequence of kernel-entry overhead, ISR activity, and IRET steps an
//! operating system would interleave with the recorded program.
//!
//! # Architecture
//!
//! - **Engine**: synchronous fold over trace events, owning the clock,
//!   the pending-I/O queue, and the accumulated log
//! - **Kernel**: fixed-shape dispatch boilerplate and ISR chunk expansion
//! - **Tables**: read-only vector (ISR address) and delay tables, indexed
//!   by device number
//! - **Trace / Log**: lazy input parsing and structured output records,
//!   serialized to text only at the boundary
//!
//! # Usage
//!
//! ```rust
//! use irqsim::{DelayTable, Engine, KernelCosts, TraceReader, VectorTable};
//!
//! let vectors = VectorTable::new(vec!["0x01E3".into()]);
//! let delays = DelayTable::new(vec![50]);
//! let trace = "CPU, 100\nSYSCALL, 0\nCPU, 50\nEND_IO, 0\n";
//!
//! let engine = Engine::new(vectors, delays, KernelCosts::default());
//! let log = engine.run(TraceReader::new(trace.as_bytes())).unwrap();
//! for line in log.lines() {
//!     println!("{line}");
//! }
//! ```

pub mod config;
pub mod engine;
pub mod kernel;
pub mod log;
pub mod pending;
pub mod trace;
pub mod types;

// Re-export the main public types for convenience.
pub use config::{ConfigError, DelayTable, KernelCosts, VectorTable};
pub use engine::Engine;
pub use log::{ExecutionLog, LogLine};
pub use pending::{PendingIo, PendingIoQueue};
pub use trace::{TraceError, TraceEvent, TraceReader};
pub use types::{DeviceId, Ticks};
