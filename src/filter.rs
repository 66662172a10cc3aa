//! The reconciliation filter itself.
//!
//! A build pass touches the output directory at two points. Before emission,
//! [`EmitFilter::before_emit`] drops pending assets whose on-disk copy can
//! stand in for them, so unchanged files are never rewritten. After emission,
//! [`EmitFilter::after_emit`] deletes leftovers from previous builds that
//! this pass no longer produces.

use crate::host::{AssetMap, BuildMode, BuildOptions, ChunkEligibility, RuntimeChunk};
use crate::pattern::is_match;
use crate::settings::Settings;
use std::fs;
use std::path::{Path, PathBuf};

/// An attached output filter, bound to one build pass.
pub struct EmitFilter {
    settings: Settings,
    out_dir: PathBuf,
    /// Filenames present in the output directory at attachment, captured
    /// before any deletion occurs.
    existing: Vec<String>,
}

/// What cleanup removed, and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

impl EmitFilter {
    /// Attach to a build.
    ///
    /// Returns `None` when the filter stays inactive: the output path or
    /// filename template is missing, or this is a non-production build and
    /// `production` is set. An inactive filter leaves the build untouched;
    /// neither condition is an error.
    pub fn attach(settings: Settings, build: &mut BuildOptions) -> Option<Self> {
        let (out_dir, filename) = match (&build.output.path, &build.output.filename) {
            (Some(path), Some(filename)) => (path.clone(), filename.clone()),
            _ => return None,
        };

        let existing = list_output_files(&out_dir);

        if settings.production && build.mode != BuildMode::Production {
            return None;
        }

        if settings.split_chunks {
            build.optimization.runtime_chunk = Some(RuntimeChunk::Single);
            build.optimization.chunks = Some(ChunkEligibility::All);
        }

        if !filename.contains("[contenthash") {
            eprintln!(
                "emitwise: using a [contenthash] substitution in the output filename is recommended"
            );
        }

        Some(EmitFilter {
            settings,
            out_dir,
            existing,
        })
    }

    /// Pre-emit phase.
    ///
    /// Removes from `assets` every pending asset whose name already exists
    /// on disk, unless the file fails the applies-to test, is excluded, or
    /// is configured as always-overwrite. The existing on-disk copy is kept
    /// as-is for each removed entry.
    ///
    /// Returns the full list of names this pass intended to emit; hand it
    /// to [`EmitFilter::after_emit`] once emission completes.
    pub fn before_emit<V>(&self, assets: &mut AssetMap<V>) -> Vec<String> {
        let handled: Vec<String> = assets.keys().cloned().collect();

        for file in &self.existing {
            if !self.applies_to(file) || self.excluded(file) || self.always_overwritten(file) {
                continue;
            }
            // Same name already on disk: skip the write, keep the old copy.
            assets.remove(file);
        }

        handled
    }

    /// Pre-existing files this pass no longer produces. Pure; cleanup is
    /// this plus deletion.
    pub fn stale_files(&self, handled: &[String]) -> Vec<&str> {
        let mut stale = Vec::new();

        for file in &self.existing {
            if !self.applies_to(file) || self.excluded(file) {
                continue;
            }
            if handled.iter().any(|h| h == file) {
                continue;
            }
            stale.push(file.as_str());
        }

        stale
    }

    /// Post-emit phase: delete stale leftovers from the output directory.
    ///
    /// A failed deletion is reported and skipped; cleanup never fails the
    /// build.
    pub fn after_emit(&self, handled: &[String]) -> CleanupReport {
        let mut report = CleanupReport::default();

        for file in self.stale_files(handled) {
            let path = self.out_dir.join(file);
            match fs::remove_file(&path) {
                Ok(()) => report.removed.push(file.to_string()),
                Err(err) => {
                    eprintln!(
                        "Warning: could not remove {}: {}. Skipping.",
                        path.display(),
                        err
                    );
                    report.failed.push(file.to_string());
                }
            }
        }

        report
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// The snapshot taken at attachment.
    pub fn existing_files(&self) -> &[String] {
        &self.existing
    }

    fn applies_to(&self, filename: &str) -> bool {
        is_match(filename, &self.settings.test, false)
    }

    fn excluded(&self, filename: &str) -> bool {
        is_match(filename, &self.settings.exclude, true)
    }

    fn always_overwritten(&self, filename: &str) -> bool {
        is_match(filename, &self.settings.always_overwrite, true)
    }
}

/// Flat listing of the regular files in the output directory, sorted for
/// deterministic reporting. A directory that does not exist yet yields an
/// empty snapshot.
fn list_output_files(out_dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("Warning: failed to read output directory entry: {}", err);
                continue;
            }
        };

        // Subdirectories can never collide with asset names; skip them.
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => eprintln!("Warning: skipping non-UTF-8 output filename {:?}", name),
        }
    }

    files.sort();
    files
}
