//! Vector ISA simulator CLI.
//!
//! This binary assembles a source file and optionally runs it. It performs:
//! 1. **Assembly:** Two-pass assembly of the input; prints the address/word/disassembly listing.
//! 2. **Run:** Loads the program and data vectors into a machine and runs it to completion.
//! 3. **Reporting:** Register dump, non-zero vector lanes, and run statistics.
//!
//! Exit status: 0 on success, 1 on an assembly or simulation error, 2 when
//! the step ceiling is reached.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use vecsim_core::isa::disasm::disassemble;
use vecsim_core::sim::loader::{self, DataPlacement};
use vecsim_core::{Config, Machine, Program, RunStatus, assemble_source};

/// Exit status for a run stopped by the step ceiling.
const EXIT_STEP_LIMIT: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "vecsim",
    author,
    version,
    about = "RISC-V-inspired vector ISA simulator and assembler",
    long_about = "Assemble a source file and optionally run it.\n\nExamples:\n  vecsim -f programs/sum.asm\n  vecsim -f programs/sum.asm --run\n  vecsim -f programs/vadd.asm --run --debug --config machine.json"
)]
struct Cli {
    /// Assembly source file.
    #[arg(short, long)]
    file: PathBuf,

    /// Run the assembled program.
    #[arg(short, long)]
    run: bool,

    /// Debug output: per-instruction trace and the assembly listing.
    #[arg(short, long)]
    debug: bool,

    /// JSON machine configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of instructions to execute.
    #[arg(long)]
    step_limit: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let source = loader::read_source(&cli.file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.file.display());
        process::exit(1);
    });

    let program = assemble_source(&source).unwrap_or_else(|e| {
        eprintln!("Assembly failed: {e}");
        process::exit(1);
    });
    debug!(words = program.words.len(), "assembled {}", cli.file.display());

    if !cli.run || cli.debug {
        print_listing(&program);
    }
    if cli.run {
        cmd_run(&cli, &program);
    }
}

/// Installs the stderr log subscriber: `warn` by default, `debug` with `--debug`,
/// `RUST_LOG` when set.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_listing(program: &Program) {
    let mut labels: Vec<_> = program.symbols.iter().collect();
    labels.sort_unstable_by_key(|&(name, addr)| (addr, name));
    for (name, addr) in labels {
        println!("{addr:04x}: <{name}>");
    }
    for (idx, word) in program.words.iter().enumerate() {
        println!("{:04x}: {word:08x}  {}", idx * 4, disassemble(*word));
    }
    for vector in &program.data {
        println!("data {}: {:?}", vector.name, vector.values);
    }
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {e}", path.display());
        process::exit(1);
    })
}

/// Builds a machine, loads the program, and runs it.
///
/// On a fatal error dumps the registers to stderr and exits with status 1.
fn cmd_run(cli: &Cli, program: &Program) {
    let mut config = load_config(cli.config.as_deref());
    if let Some(limit) = cli.step_limit {
        config.general.step_limit = limit;
    }
    if cli.debug {
        config.general.trace_instructions = true;
    }

    let mut machine = Machine::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let placements = machine.load(program).unwrap_or_else(|e| {
        eprintln!("Error loading program: {e}");
        process::exit(1);
    });
    for p in &placements {
        debug!(name = %p.name, addr = p.addr, len = p.len, "data placed");
    }

    match machine.run() {
        Ok(RunStatus::Completed { steps }) => {
            println!("[*] Completed after {steps} steps");
            print_state(&machine, &placements, cli.debug);
        }
        Ok(RunStatus::StepLimitExceeded { steps }) => {
            warn!(steps, "step limit exceeded");
            eprintln!("[!] Step limit reached after {steps} steps");
            print_state(&machine, &placements, cli.debug);
            process::exit(EXIT_STEP_LIMIT);
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            eprint!("{}", machine.dump_registers());
            process::exit(1);
        }
    }
}

fn print_state(machine: &Machine, placements: &[DataPlacement], debug: bool) {
    print!("{}", machine.dump_registers());
    println!();
    print!("{}", machine.dump_vectors());
    println!();
    if debug {
        for p in placements.iter().filter(|p| p.len > 0) {
            println!("data `{}`:", p.name);
            print!("{}", machine.memory.dump(p.addr..p.addr + p.len * 8));
        }
        println!();
    }
    print!("{}", machine.stats.summary());
}
