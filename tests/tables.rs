//! Table loading and output serialization against real files.

use std::fs;
use std::io::BufReader;

use irqsim::{ConfigError, DelayTable, DeviceId, Engine, KernelCosts, TraceReader, VectorTable};

mod common;

#[test]
fn test_load_tables_from_files() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let vector_path = dir.path().join("vector_table.txt");
    fs::write(&vector_path, "0x01E3\n0x02FD\n0x0695\n").unwrap();
    let delay_path = dir.path().join("device_table.txt");
    fs::write(&delay_path, "110\n22\n5\n").unwrap();

    let vectors = VectorTable::load(&vector_path).unwrap();
    let delays = DelayTable::load(&delay_path).unwrap();

    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors.address(DeviceId(1)), Some("0x02FD"));
    assert_eq!(delays.delay(DeviceId(2)), 5);
}

#[test]
fn test_missing_table_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VectorTable::load(&dir.path().join("no_such_file.txt")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bad_delay_file_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let delay_path = dir.path().join("device_table.txt");
    fs::write(&delay_path, "110\n\n-5\n").unwrap();

    let err = DelayTable::load(&delay_path).unwrap_err();
    assert!(err.to_string().contains("line 3"));
    assert!(err.to_string().contains("-5"));
}

/// Full boundary round trip: trace and tables from disk, execution log
/// written back to disk.
#[test]
fn test_file_to_file_replay() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let trace_path = dir.path().join("trace.txt");
    fs::write(&trace_path, "CPU, 100\nSYSCALL, 0\nCPU, 50\nEND_IO, 0\n").unwrap();
    let vector_path = dir.path().join("vector_table.txt");
    fs::write(&vector_path, "0x01E3\n").unwrap();
    let delay_path = dir.path().join("device_table.txt");
    fs::write(&delay_path, "50\n").unwrap();

    let vectors = VectorTable::load(&vector_path).unwrap();
    let delays = DelayTable::load(&delay_path).unwrap();
    let trace = fs::File::open(&trace_path).unwrap();

    let engine = Engine::new(vectors, delays, KernelCosts::default());
    let log = engine.run(TraceReader::new(BufReader::new(trace))).unwrap();

    let out_path = dir.path().join("execution.txt");
    let mut out = fs::File::create(&out_path).unwrap();
    log.write_to(&mut out).unwrap();
    drop(out);

    let text = fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("0, 100, CPU burst\n"));
    assert!(text.ends_with("254, 1, IRET\n"));
    assert_eq!(text, log.to_text());
}
