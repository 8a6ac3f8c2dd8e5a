use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the modz binary.
#[derive(Parser, Debug)]
#[command(
    name = "modz",
    version,
    about = "Find legacy JavaScript/TypeScript idioms and rewrite them to modern equivalents"
)]
pub struct CliArgs {
    /// Files or directories to lint. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Path to a modz.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable every rule of a preset (recommended, modernization,
    /// performance-improvements, all). May be repeated.
    #[arg(long = "preset", value_name = "NAME")]
    pub presets: Vec<String>,

    /// Set one rule's level, e.g. `--rule prefer-includes=warn`. May be repeated.
    #[arg(long = "rule", value_name = "ID=LEVEL")]
    pub rules: Vec<String>,

    /// Derive types from the declarations in each file, enabling rules that
    /// require type information.
    #[arg(long = "type-aware", alias = "typeAware")]
    pub type_aware: bool,

    /// Apply automatic fixes and write the files back.
    #[arg(long)]
    pub fix: bool,

    /// Upper bound on fix-and-relint passes per file.
    #[arg(long = "max-fix-passes", default_value_t = 10)]
    pub max_fix_passes: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Colorize human output. Defaults to whether stdout is a terminal.
    #[arg(long)]
    pub color: Option<bool>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
