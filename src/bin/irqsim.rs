//! irqsim — replay an interrupt trace into a timestamped execution log.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use irqsim::{DelayTable, Engine, KernelCosts, Ticks, TraceReader, VectorTable};

/// Replay an interrupt trace into a timestamped execution log.
#[derive(Parser)]
#[command(name = "irqsim")]
struct Cli {
    /// Path to the input trace (one `ACTIVITY, <n>` event per line).
    trace: PathBuf,

    /// Path to the vector table (one symbolic ISR address per line).
    vectors: PathBuf,

    /// Path to the device delay table (one service time per line).
    delays: PathBuf,

    /// Output file for the execution log.
    #[arg(short, long, default_value = "execution.txt")]
    output: PathBuf,

    /// Print the execution log to stdout instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// Context save time on kernel entry, in ticks.
    #[arg(long, default_value_t = 10)]
    context_save: Ticks,

    /// Duration of one ISR activity chunk, in ticks.
    #[arg(long, default_value_t = 40)]
    isr_chunk: Ticks,

    /// Cost of the return-from-interrupt step, in ticks.
    #[arg(long, default_value_t = 1)]
    iret: Ticks,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let vectors = VectorTable::load(&cli.vectors)
        .with_context(|| format!("failed to load vector table {}", cli.vectors.display()))?;
    let delays = DelayTable::load(&cli.delays)
        .with_context(|| format!("failed to load delay table {}", cli.delays.display()))?;

    let costs = KernelCosts {
        context_save: cli.context_save,
        isr_chunk: cli.isr_chunk,
        iret: cli.iret,
    };

    let trace = File::open(&cli.trace)
        .with_context(|| format!("failed to open trace {}", cli.trace.display()))?;
    let events = TraceReader::new(BufReader::new(trace));

    let log = Engine::new(vectors, delays, costs)
        .run(events)
        .context("trace replay failed")?;

    if cli.stdout {
        let stdout = std::io::stdout();
        log.write_to(&mut stdout.lock())?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("failed to create {}", cli.output.display()))?;
        let mut writer = BufWriter::new(file);
        log.write_to(&mut writer)?;
        writer.flush()?;
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
