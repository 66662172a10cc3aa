//! One full staging-to-output pass, as driven by the CLI.
//!
//! The library surface ([`EmitFilter`](crate::filter::EmitFilter)) is what a
//! build tool embeds. The driver plays that build tool for the standalone
//! binary: the staging directory's files are the pending assets, and the
//! output directory is reconciled against them.

use crate::filter::{CleanupReport, EmitFilter};
use crate::host::{AssetMap, BuildOptions};
use crate::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime flags for a driver pass.
#[derive(Clone, Copy, Default)]
pub struct PassOptions {
    /// Report what would happen without touching the output directory.
    pub dry_run: bool,
    /// Print each file as it is written or removed.
    pub verbose: bool,
}

/// What a pass did (or, under dry-run, would have done).
#[derive(Debug, Default)]
pub struct PassReport {
    /// Assets written to the output directory.
    pub written: Vec<String>,
    /// Assets skipped because an identical name already exists on disk.
    pub skipped: Vec<String>,
    /// Total bytes written (zero under dry-run).
    pub bytes_written: u64,
    pub cleanup: CleanupReport,
}

/// Run one reconciled emission pass from `staging` into the output directory
/// named in `build`.
///
/// Returns `Ok(None)` when the filter declined to attach (missing output
/// configuration, or a non-production build with `production` set); nothing
/// is written in that case.
pub fn run_pass(
    settings: Settings,
    staging: &Path,
    build: &mut BuildOptions,
    options: PassOptions,
) -> Result<Option<PassReport>> {
    let Some(filter) = EmitFilter::attach(settings, build) else {
        return Ok(None);
    };

    let mut assets = stage_assets(staging)?;
    let handled = filter.before_emit(&mut assets);

    let skipped: Vec<String> = handled
        .iter()
        .filter(|name| !assets.contains_key(name.as_str()))
        .cloned()
        .collect();
    let mut report = PassReport {
        skipped,
        ..PassReport::default()
    };

    if !options.dry_run {
        fs::create_dir_all(filter.out_dir()).with_context(|| {
            format!(
                "Failed to create output directory {}",
                filter.out_dir().display()
            )
        })?;
    }

    for (name, source) in &assets {
        let dest = filter.out_dir().join(name);

        if options.dry_run {
            println!("Would write: {}", dest.display());
            report.written.push(name.clone());
            continue;
        }

        let bytes = fs::copy(source, &dest)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        if options.verbose {
            println!("Wrote: {}", dest.display());
        }
        report.bytes_written += bytes;
        report.written.push(name.clone());
    }

    if options.dry_run {
        for file in filter.stale_files(&handled) {
            println!("Would remove: {}", filter.out_dir().join(file).display());
            report.cleanup.removed.push(file.to_string());
        }
    } else {
        report.cleanup = filter.after_emit(&handled);
        if options.verbose {
            for file in &report.cleanup.removed {
                println!("Removed: {}", filter.out_dir().join(file).display());
            }
        }
    }

    Ok(Some(report))
}

/// Enumerate the staging directory into a pending-asset map
/// (filename → staging path). Flat, regular files only, matching the flat
/// snapshot the filter takes of the output directory.
fn stage_assets(staging: &Path) -> Result<AssetMap<PathBuf>> {
    let entries = fs::read_dir(staging)
        .with_context(|| format!("Failed to read staging directory {}", staging.display()))?;

    let mut assets: AssetMap<PathBuf> = AssetMap::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", staging.display()))?;

        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => {
                assets.insert(name, entry.path());
            }
            Err(name) => eprintln!("Warning: skipping non-UTF-8 staging filename {:?}", name),
        }
    }

    Ok(assets)
}
