//! The host build tool's view: the slice of compiler configuration the
//! filter consumes, and the pending-asset collection it prunes.

use clap::ValueEnum;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Build mode reported by the host compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildMode {
    Development,
    Production,
}

/// Output configuration: where files land and how they are named.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output directory. The filter is inactive without one.
    pub path: Option<PathBuf>,
    /// Output filename template, e.g. `[name].[contenthash].js`.
    pub filename: Option<String>,
}

/// How the runtime bootstrap chunk is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeChunk {
    /// One shared runtime chunk for all entry points.
    Single,
    /// A runtime chunk per entry point.
    PerEntry,
}

/// Which chunks are eligible for splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkEligibility {
    All,
    Async,
    Initial,
}

/// Optimization knobs the filter may toggle at attachment.
#[derive(Debug, Clone, Default)]
pub struct SplitChunksOptions {
    pub runtime_chunk: Option<RuntimeChunk>,
    pub chunks: Option<ChunkEligibility>,
}

/// The compiler configuration handed to attachment.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub mode: BuildMode,
    pub output: OutputOptions,
    pub optimization: SplitChunksOptions,
}

impl BuildOptions {
    /// Convenience constructor for a fully specified output.
    pub fn new(mode: BuildMode, out_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        BuildOptions {
            mode,
            output: OutputOptions {
                path: Some(out_dir.into()),
                filename: Some(filename.into()),
            },
            optimization: SplitChunksOptions::default(),
        }
    }
}

/// Pending assets keyed by output filename.
///
/// The filter only inspects names and removes entries; values are whatever
/// the host stages for each asset (file contents, a source path, a handle).
pub type AssetMap<V> = BTreeMap<String, V>;
