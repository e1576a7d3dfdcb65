//! PMP-gated core simulator CLI.
//!
//! This binary drives the `pmpsim-core` library. It performs:
//! 1. **Run:** Loads a program (and optional data image), runs the core for a
//!    bounded number of cycles and reports violations and statistics.
//! 2. **Config:** Prints the effective configuration and PMP table.
//!
//! Logging goes to stderr through `tracing-subscriber`; `RUST_LOG` overrides
//! the default level.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pmpsim_core::config::Config;
use pmpsim_core::isa::disasm::disassemble;
use pmpsim_core::sim::{Simulator, loader};
use pmpsim_core::soc::System;
use pmpsim_core::soc::traits::Device;

#[derive(Parser, Debug)]
#[command(
    name = "pmpsim",
    author,
    version,
    about = "Single-cycle RV32I core with Physical Memory Protection",
    long_about = "Run a program on a single-cycle RV32I core whose fetches and data accesses are gated by a static PMP table.\n\nExamples:\n  pmpsim run --program prog.hex --cycles 100\n  pmpsim run --program prog.bin --data data.hex --config pmp.json --trace\n  pmpsim config --config pmp.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until the core halts or the cycle budget runs out.
    Run {
        /// Program image for instruction memory (`.hex` text or raw binary).
        #[arg(short, long)]
        program: PathBuf,

        /// Optional image for data memory.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget (overrides `general.max_cycles`).
        #[arg(long)]
        cycles: Option<u64>,

        /// Log every executed instruction.
        #[arg(long)]
        trace: bool,

        /// Print the run summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration.
    Config {
        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the whole configuration as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_logging(trace);

    let result = match cli.command {
        Commands::Run {
            program,
            data,
            config,
            cycles,
            trace,
            json,
        } => cmd_run(&program, data.as_deref(), config.as_deref(), cycles, trace, json),
        Commands::Config { config, json } => cmd_config(config.as_deref(), json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(p) => Config::from_file(p)?,
        None => Config::default(),
    })
}

/// Loads the images, runs the core and prints the summary and statistics.
fn cmd_run(
    program: &Path,
    data: Option<&Path>,
    config: Option<&Path>,
    cycles: Option<u64>,
    trace: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config)?;
    config.general.trace_instructions |= trace;

    let mut system = System::new(&config);
    system.load_program(&loader::load_image(program)?)?;
    if let Some(path) = data {
        system.load_data(&loader::load_image(path)?)?;
    }

    let mut sim = Simulator::new(system, &config)?;
    let budget = cycles.unwrap_or(config.general.max_cycles);
    tracing::info!(program = %program.display(), budget, "starting run");
    let summary = sim.run(budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("[*] Program: {}", program.display());
    println!(
        "[*] Stopped after {} cycles: {:?} at pc={:#010x}",
        summary.cycles, summary.reason, summary.pc
    );
    let log = sim.cpu.violation_log();
    if !log.is_empty() {
        println!("[*] Violations:");
        for v in log {
            println!(
                "    cycle {:>6}  {:<20} pc={:#010x} addr={:#010x}  {}",
                v.cycle,
                v.kind.label(),
                v.pc,
                v.address,
                disassemble(sim.cpu.bus.imem.read_u32(v.pc))
            );
        }
    }
    println!("[*] Registers:");
    print!("{}", sim.cpu.regs());
    print!("{}", sim.cpu.stats.render());
    Ok(())
}

/// Prints the effective configuration.
fn cmd_config(config: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Configuration:");
    println!(
        "  Start PC: {:#010x}  IMEM: {} B  DMEM: {} B  Max cycles: {}",
        config.general.start_pc,
        config.memory.imem_size,
        config.memory.dmem_size,
        config.general.max_cycles
    );
    println!("PMP table (highest priority first):");
    for (i, entry) in config.pmp.table()?.entries().iter().enumerate() {
        println!("  {i:>2}: {entry}");
    }
    Ok(())
}
