//! One run: resolve settings, find files, lint (and fix) them in parallel,
//! report.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};

use modz_common::Diagnostic;
use modz_rules::{LintError, Linter};

use crate::args::{CliArgs, OutputFormat};
use crate::config::{ModzConfig, ResolvedConfig, config_path, load_config, resolve};
use crate::reporter::{Reporter, Summary, render_json};
use crate::sources::{DiscoveryOptions, discover_files};

pub const EXIT_SUCCESS: i32 = 0;
/// At least one error-level finding remains.
pub const EXIT_FINDINGS: i32 = 1;
/// A configuration fault, or a file that could not be read or parsed.
pub const EXIT_FAULT: i32 = 2;

/// What happened to one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// The file's text after any fixes.
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Fixes applied to `text`; zero unless `--fix`.
    pub fixed: usize,
    pub fault: Option<String>,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl RunResult {
    pub fn has_faults(&self) -> bool {
        self.files.iter().any(|file| file.fault.is_some())
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_faults() {
            EXIT_FAULT
        } else if self.summary.errors > 0 {
            EXIT_FINDINGS
        } else {
            EXIT_SUCCESS
        }
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| &file.diagnostics)
    }
}

/// Load `modz.json` (if any) and layer the command-line flags over it.
pub fn resolve_settings(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let config = match config_path(args, cwd) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => ModzConfig::default(),
    };
    Ok(resolve(&config, args)?)
}

/// Lint every selected file. Fixed files are written back before
/// returning.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let settings = resolve_settings(args, cwd)?;
    let linter = Linter::new(settings.registry()?);
    debug!(
        rules = linter.registry().enabled().len(),
        type_aware = settings.type_aware,
        "settings resolved"
    );

    let roots: Vec<PathBuf> = if args.paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        args.paths
            .iter()
            .map(|path| if path.is_relative() { cwd.join(path) } else { path.clone() })
            .collect()
    };
    let options = DiscoveryOptions {
        include: settings.include.as_ref(),
        exclude: settings.exclude.as_ref(),
    };
    let paths = discover_files(&roots, &options)?;

    let files: Vec<FileReport> = paths
        .par_iter()
        .map(|path| process_file(&linter, path, cwd, args))
        .collect();

    let mut summary = Summary {
        files: files.len(),
        ..Summary::default()
    };
    for file in &files {
        if file.fixed > 0 {
            std::fs::write(&file.path, &file.text)
                .with_context(|| format!("failed to write {}", file.path.display()))?;
        }
        summary.add(&file.diagnostics);
        summary.fixed += file.fixed;
    }
    Ok(RunResult { files, summary })
}

fn process_file(linter: &Linter, path: &Path, cwd: &Path, args: &CliArgs) -> FileReport {
    let shown = path.strip_prefix(cwd).unwrap_or(path).display().to_string();
    let _span = info_span!("file", path = %shown).entered();
    let mut report = FileReport {
        path: path.to_path_buf(),
        text: String::new(),
        diagnostics: Vec::new(),
        fixed: 0,
        fault: None,
    };
    report.text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "unreadable file");
            report.fault = Some(format!("{shown}: failed to read: {err}"));
            return report;
        }
    };

    let result: Result<(), LintError> = if args.fix {
        linter
            .fix_source(&shown, &report.text, args.max_fix_passes)
            .map(|outcome| {
                report.fixed = outcome.applied;
                report.text = outcome.text;
                report.diagnostics = outcome.remaining;
            })
    } else {
        linter
            .lint_source(&shown, &report.text)
            .map(|diagnostics| report.diagnostics = diagnostics)
    };
    if let Err(err) = result {
        warn!(error = %err, "file skipped");
        report.fault = Some(err.to_string());
    }
    report
}

/// Print a run's findings, faults and summary.
pub fn print_report(result: &RunResult, format: OutputFormat, color: bool, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let diagnostics: Vec<Diagnostic> = result.diagnostics().cloned().collect();
            writeln!(out, "{}", render_json(&diagnostics, &result.summary)?)?;
        }
        OutputFormat::Human => {
            let reporter = Reporter::new(color);
            for file in &result.files {
                if !file.diagnostics.is_empty() {
                    write!(out, "{}", reporter.render_file(&file.text, &file.diagnostics))?;
                }
            }
            writeln!(out, "{}", reporter.render_summary(&result.summary))?;
        }
    }
    Ok(())
}

/// Faults are reported on stderr, outside the findings.
pub fn fault_messages(result: &RunResult) -> impl Iterator<Item = &str> {
    result.files.iter().filter_map(|file| file.fault.as_deref())
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
