//! vm-translation-sim - TLB / page table / frame table simulator
//!
//! Usage: vm-translation-sim [OPTIONS] <COMMAND>
//!
//! Commands:
//!   case <N>      Run canned workload N (1-8)
//!   trace <FILE>  Replay an access trace file
//!   menu          Interactive loop: enter 1-8 to run a case, 9 to exit

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{info, warn};

use vm_translation_sim::constants::*;
use vm_translation_sim::io::{read_trace, write_trace};
use vm_translation_sim::report::{render_stats, render_trace};
use vm_translation_sim::{Access, Result, SimConfig, TranslationEngine, Workload};

#[derive(Parser)]
#[command(name = "vm-translation-sim")]
#[command(about = "Simulate TLB, page table and frame table behaviour over an access trace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Virtual pages in the page table
    #[arg(long, global = true, default_value_t = PAGE_COUNT)]
    pages: usize,

    /// TLB entries
    #[arg(long, global = true, default_value_t = TLB_CAPACITY)]
    tlb: usize,

    /// Physical frames
    #[arg(long, global = true, default_value_t = FRAME_COUNT)]
    frames: usize,

    /// Bytes per page
    #[arg(long, global = true, default_value_t = PAGE_SIZE)]
    page_size: u64,

    /// Random seed for reproducible workloads and tie-breaks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Clear all referenced bits after every N accesses
    #[arg(long, global = true, value_name = "N", default_value_t = 0)]
    clear_refs_every: usize,

    /// Omit the per-access listing
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log translation events
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a canned workload
    Case {
        /// Workload number, 1-8
        #[arg(value_parser = clap::value_parser!(u8).range(1..=8))]
        case: u8,

        /// Save the generated trace to a file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Replay an access trace file
    Trace {
        /// File of `r<addr>` / `w<addr>` tokens
        file: PathBuf,
    },

    /// Interactive case menu
    Menu,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    // Run the simulator and handle any errors
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = SimConfig {
        page_count: cli.pages,
        tlb_capacity: cli.tlb,
        frame_count: cli.frames,
        page_size: cli.page_size,
        seed: cli.seed,
    };
    let mut engine = TranslationEngine::new(config)?;

    match &cli.command {
        Commands::Case { case, save } => {
            let workload = Workload::from_case(*case)?;
            let trace = workload.generate(&config, engine.rng());
            if let Some(path) = save {
                write_trace(path, &trace)?;
                info!("trace written to {}", path.display());
            }
            simulate(cli, &mut engine, &trace)
        }
        Commands::Trace { file } => {
            let trace = read_trace(file)?;
            info!("loaded {} accesses from {}", trace.len(), file.display());
            simulate(cli, &mut engine, &trace)
        }
        Commands::Menu => menu(cli, &mut engine),
    }
}

/// Reset the engine, replay `trace` and print the report
fn simulate(cli: &Cli, engine: &mut TranslationEngine, trace: &[Access]) -> Result<()> {
    engine.reset();
    engine.replay_with_sweep(trace, cli.clear_refs_every)?;

    if !cli.quiet {
        println!("{}", render_trace(trace, engine.config().page_size));
    }
    println!("{}", render_stats(&engine.snapshot()));
    Ok(())
}

fn menu(cli: &Cli, engine: &mut TranslationEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("ENTER 1 - 8 TO RUN CORRESPONDING TEST CASE 9 TO EXIT");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        let case: u8 = match line.trim().parse() {
            Ok(9) => return Ok(()),
            Ok(case @ 1..=8) => case,
            _ => {
                warn!("ignoring menu input {:?}", line.trim());
                continue;
            }
        };

        let workload = Workload::from_case(case)?;
        println!("Case {}: {}", case, workload.description());
        let config = *engine.config();
        let trace = workload.generate(&config, engine.rng());
        simulate(cli, engine, &trace)?;
    }
}
