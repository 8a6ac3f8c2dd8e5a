//! Source file discovery.

use anyhow::{Context, Result};
use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Extensions picked up when walking directories. JSX is not parsed, so
/// `.jsx`/`.tsx` files are only linted when named explicitly.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

#[derive(Debug, Default)]
pub struct DiscoveryOptions<'a> {
    pub include: Option<&'a GlobSet>,
    pub exclude: Option<&'a GlobSet>,
}

/// Expand `paths` into a sorted, deduplicated list of files to lint.
///
/// Explicit file paths are always kept. Directories are walked, skipping
/// `node_modules` and hidden directories; walked files must have a default
/// extension and pass the include/exclude globs, matched against the path
/// relative to the walked directory.
pub fn discover_files(paths: &[PathBuf], options: &DiscoveryOptions<'_>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            anyhow::bail!("no such file or directory: {}", root.display());
        }
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
        for entry in walker {
            let entry = entry.with_context(|| format!("walk {}", root.display()))?;
            if !entry.file_type().is_file() || !has_default_extension(entry.path()) {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if !is_selected(relative, options) {
                trace!(path = %entry.path().display(), "filtered out");
                continue;
            }
            files.push(entry.into_path());
        }
    }
    files.sort();
    files.dedup();
    debug!(files = files.len(), "discovered sources");
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == "node_modules" || name.starts_with('.'))
}

fn has_default_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DEFAULT_EXTENSIONS.contains(&ext))
}

fn is_selected(relative: &Path, options: &DiscoveryOptions<'_>) -> bool {
    if let Some(include) = options.include
        && !include.is_match(relative)
    {
        return false;
    }
    !options.exclude.is_some_and(|exclude| exclude.is_match(relative))
}

#[cfg(test)]
#[path = "../tests/sources_tests.rs"]
mod tests;
