#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use modz_cli::args::CliArgs;
use modz_cli::driver::{self, EXIT_FAULT};

fn main() {
    // Installs a subscriber only when MODZ_LOG or RUST_LOG is set.
    modz_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_FAULT);
        }
    }
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd)?;

    for fault in driver::fault_messages(&result) {
        eprintln!("error: {fault}");
    }
    let color = args.color.unwrap_or_else(|| std::io::stdout().is_terminal());
    let stdout = std::io::stdout();
    driver::print_report(&result, args.format, color, &mut stdout.lock())?;
    Ok(result.exit_code())
}
