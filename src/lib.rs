//! emitwise - build-output reconciliation
//!
//! emitwise sits between a build and its output directory. Given the set of
//! assets a pass intends to emit and a snapshot of what is already on disk,
//! it skips rewriting files whose name is unchanged, forces rewriting of
//! files configured as always-overwrite, and deletes stale leftovers from
//! previous builds. One pass, two phases: pre-emit filtering and post-emit
//! cleanup.
//!
//! ## Architecture
//!
//! - `pattern`: literal-or-regex filename patterns and the match predicate
//! - `settings`: the immutable configuration record (defaults, TOML loading)
//! - `host`: the host build tool's view (mode, output options, asset map)
//! - `filter`: the two-phase reconciliation core
//! - `driver`: a complete staging-to-output pass for the standalone CLI
//!
//! Excluded files are untouchable in both phases. Files failing the
//! applies-to test are likewise left alone, so by default only JavaScript
//! outputs are ever skipped or cleaned up.

pub mod driver;
pub mod filter;
pub mod host;
pub mod pattern;
pub mod settings;

// Re-export commonly used items
pub use driver::{run_pass, PassOptions, PassReport};
pub use filter::{CleanupReport, EmitFilter};
pub use host::{
    AssetMap, BuildMode, BuildOptions, ChunkEligibility, OutputOptions, RuntimeChunk,
    SplitChunksOptions,
};
pub use pattern::{is_match, Pattern, PatternSet};
pub use settings::Settings;
