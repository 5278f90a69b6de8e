//! circq - Inspect, script and benchmark ring buffers.

mod bench;
mod output;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use circq_buffer::render::{render_circle, render_slots};
use circq_buffer::{OverflowPolicy, RingBuffer, RingConfig};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{Output, OutputFormat};
use crate::scenario::Scenario;

/// Inspect, script and benchmark ring buffers.
#[derive(Parser, Debug)]
#[command(name = "circq")]
#[command(about = "Inspect, script and benchmark ring buffers")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a buffer and draw it
    Show(ShowArgs),
    /// Run a scenario file and print the report
    Run(RunArgs),
    /// Time each buffer operation
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Number of slots (default: number of items)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Initial items, comma-separated
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    items: Vec<i64>,

    /// Overflow policy: reject, overwrite or grow
    #[arg(short, long, default_value = "reject")]
    policy: OverflowPolicy,

    /// Fail on invalid operations instead of clamping
    #[arg(long)]
    strict: bool,

    /// Dequeue this many items before drawing
    #[arg(short, long, default_value_t = 0)]
    dequeue: usize,

    /// Circle radius (default: max(3, capacity / 2))
    #[arg(short, long)]
    radius: Option<usize>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario file (.yaml, .yml or .json)
    scenario: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Buffer capacity
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Calls per operation
    #[arg(short = 'n', long, default_value_t = 10_000)]
    iterations: usize,

    /// Overflow policy: reject, overwrite or grow
    #[arg(short, long, default_value = "reject")]
    policy: OverflowPolicy,

    /// Print results as YAML/JSON instead of a table
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Show(args) => show(args),
        Command::Run(args) => {
            let report = Scenario::load(&args.scenario)?.run()?;
            Output::new(args.format, args.output).write(&report)
        }
        Command::Bench(args) => {
            let results = bench::run(args.capacity, args.iterations, args.policy)?;
            match args.format {
                Some(format) => Output::new(format, None).write(&results),
                None => {
                    print!("{}", bench::format_table(&results));
                    Ok(())
                }
            }
        }
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let mut config = RingConfig::default().policy(args.policy);
    config.capacity = args.capacity;
    config.strict = args.strict;

    let buf = RingBuffer::with_items(config, &args.items)?;
    buf.discard(args.dequeue);

    let snapshot = buf.snapshot();
    println!(
        "capacity={} size={} head={} tail={} policy={}",
        snapshot.capacity(),
        snapshot.len(),
        snapshot.head(),
        snapshot.tail(),
        snapshot.policy()
    );
    println!("{}", render_slots(&snapshot));
    println!("{}", render_circle(&snapshot, args.radius));
    Ok(())
}
