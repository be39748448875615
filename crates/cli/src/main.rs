//! RTL wrapper scenario runner.
//!
//! This binary drives the wrapper with a stimulus file instead of an event kernel. It performs:
//! 1. **Load:** Parse a JSON scenario (configuration, memory image, per-cycle stimulus).
//! 2. **Run:** Clock the wrapper through every block, logging served requests and output edges.
//! 3. **Report:** Print rejected requests, captured console input and the activity counters.

mod scenario;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rtlbridge_core::core::WrapperOutputs;

use crate::scenario::{Scenario, describe};

#[derive(Parser, Debug)]
#[command(
    name = "rtlbridge",
    author,
    version,
    about = "RTL CPU wrapper scenario runner",
    long_about = "Clock the RTL wrapper through a JSON scenario and report what the CPU side saw.\n\nLogging is controlled with RUST_LOG (default: warn).\n\nExamples:\n  rtlbridge run scenarios/reset.json\n  RUST_LOG=rtlbridge_core=trace rtlbridge run scenarios/bus.json --quiet"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file.
    Run {
        /// Scenario JSON file.
        path: PathBuf,

        /// Only print the final statistics.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Parse a scenario file and print the configuration it resolves to.
    Check {
        /// Scenario JSON file.
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { path, quiet } => cmd_run(&path, quiet),
        Commands::Check { path } => cmd_check(&path),
    }
}

/// Loads a scenario or exits with code 1.
fn load(path: &Path) -> Scenario {
    Scenario::load(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    })
}

/// Runs a scenario and prints its log, console capture and statistics.
///
/// Exits with code 1 if the scenario cannot be built, and with code 2 if any
/// request was rejected for a malformed strobe.
fn cmd_run(path: &Path, quiet: bool) {
    let scenario = load(path);
    println!("[*] Scenario: {}", path.display());
    println!(
        "    bus={} bytes  clock={} Hz  blocks={}",
        scenario.config.bus.width_bytes,
        scenario.config.clock.hz,
        scenario.cycles.len()
    );
    println!();

    let outcome = scenario.run().unwrap_or_else(|e| {
        eprintln!("\n[!] Run failed: {e}");
        process::exit(1);
    });

    if !quiet {
        let mut prev = WrapperOutputs::default();
        for report in &outcome.reports {
            for line in describe(report, &prev) {
                println!("{line}");
            }
            prev = report.outputs;
        }
    }

    for (cycle, err) in &outcome.rejected {
        eprintln!("[!] cycle {cycle}: {err}");
    }

    if let Some(bytes) = &outcome.console {
        println!("\n[*] Console input: {:?}", String::from_utf8_lossy(bytes));
    }

    println!("\n{}", outcome.stats);

    if !outcome.rejected.is_empty() {
        process::exit(2);
    }
}

/// Prints the resolved configuration of a scenario.
fn cmd_check(path: &Path) {
    let scenario = load(path);
    if let Err(e) = scenario.config.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    println!("{:#?}", scenario.config);
    println!(
        "memory: base={:#x} size={:#x} preload={}",
        scenario.memory.base,
        scenario.memory.size,
        scenario.memory.preload.len()
    );
    println!(
        "cycles: {}",
        scenario.cycles.iter().map(|b| b.repeat).sum::<u64>()
    );
}
