//! rvdump - A RISC-V RV32IM disassembler for ELF executables
//!
//! Usage:
//!   rvdump <INPUT> <OUTPUT>              Write the listing and symbol table to OUTPUT
//!   rvdump <INPUT> <OUTPUT> --sections   Also print the section table
//!   rvdump -vv <INPUT> <OUTPUT>          Log each extraction step

mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use rvdump_formats::Elf;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rvdump", version)]
#[command(about = "A RISC-V RV32IM disassembler for ELF executables", long_about = None)]
struct Cli {
    /// Path to the RISC-V ELF32 executable
    input: PathBuf,

    /// Path of the listing to write
    output: PathBuf,

    /// Print the section table to stdout
    #[arg(long)]
    sections: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported as errors that go to stdout.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the logger. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let elf = Elf::read(&mut BufReader::new(file))
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!(
        "{}: {} sections, {} symbols, {} code words",
        cli.input.display(),
        elf.sections.len(),
        elf.symbols.len(),
        elf.text.words.len()
    );

    if cli.sections {
        let mut table = String::new();
        render::sections::write_sections(&mut table, &elf.sections, &elf.section_names)
            .context("failed to render section table")?;
        print!("{table}");
    }

    // The output file is only created once the whole report is rendered.
    let report = render::render_report(&elf).context("failed to render listing")?;
    fs::write(&cli.output, report)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("wrote {}", cli.output.display());

    Ok(())
}
