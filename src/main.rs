use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use emitwise::{run_pass, BuildMode, BuildOptions, PassOptions, PatternSet, Settings};
use humansize::{format_size, BINARY};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reconcile a build output directory: skip rewriting unchanged files, delete stale leftovers",
    long_about = None
)]
struct Args {
    /// Directory holding the freshly built files to emit
    staging: PathBuf,

    /// Output directory to reconcile
    output: PathBuf,

    /// Settings file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Always rewrite files matching this pattern, repeatable (use /.../ for a regex)
    #[arg(long = "always-overwrite", value_name = "PATTERN")]
    always_overwrite: Vec<String>,

    /// Leave files matching this pattern completely alone, repeatable
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Only consider files matching this pattern, repeatable (default: /\.js/i)
    #[arg(long, value_name = "PATTERN")]
    test: Vec<String>,

    /// Build mode reported to the filter
    #[arg(long, value_enum, default_value = "production")]
    mode: BuildMode,

    /// Output filename template the build would use
    #[arg(long, default_value = "[name].js")]
    filename: String,

    /// Show what would be written and removed, but don't touch the output directory
    #[arg(long)]
    dry_run: bool,

    /// Show each file as it is written or removed
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    // CLI pattern flags override the settings file.
    if !args.always_overwrite.is_empty() {
        settings.always_overwrite = PatternSet::parse_all(&args.always_overwrite)?;
    }
    if !args.exclude.is_empty() {
        settings.exclude = PatternSet::parse_all(&args.exclude)?;
    }
    if !args.test.is_empty() {
        settings.test = PatternSet::parse_all(&args.test)?;
    }

    let mut build = BuildOptions::new(args.mode, args.output, args.filename);
    let options = PassOptions {
        dry_run: args.dry_run,
        verbose: args.verbose,
    };

    let Some(report) = run_pass(settings, &args.staging, &mut build, options)? else {
        println!("Nothing to do: filter inactive for this build.");
        return Ok(());
    };

    println!("========================================");
    if args.dry_run {
        println!("Would write: {}", report.written.len());
        println!("Would skip (unchanged): {}", report.skipped.len());
        println!("Would remove (stale): {}", report.cleanup.removed.len());
        println!("Dry run mode: No files were written or deleted.");
    } else {
        println!(
            "Written: {} ({})",
            report.written.len(),
            format_size(report.bytes_written, BINARY).bold()
        );
        println!(
            "Skipped (unchanged): {}",
            report.skipped.len().to_string().green()
        );
        println!(
            "Removed (stale): {}",
            report.cleanup.removed.len().to_string().red()
        );
        if !report.cleanup.failed.is_empty() {
            println!(
                "Failed to remove: {}",
                report.cleanup.failed.len().to_string().yellow()
            );
        }
    }

    Ok(())
}
