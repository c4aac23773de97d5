use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use slicer::cli::{CliArgs, Command, InitArgs, SliceArgs};
use slicer::config::{LoadedConfig, builtin_config, save_config};
use slicer::pipeline::{SliceOptions, WorkItem, run_batch};

#[allow(clippy::print_stderr)]
fn main() {
    match run() {
        Ok(true) => {}
        // Per-sheet failures were already logged in the batch summary
        Ok(false) => std::process::exit(1),
        Err(e) => {
            // Use eprintln instead of error! because logger may not be initialized
            // (e.g., config loading fails before logger init)
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when any sheet of the batch failed
fn run() -> Result<bool> {
    let cli = CliArgs::parse();

    match &cli.command {
        Command::Slice(args) => slice(args),
        Command::Init(args) => {
            init(args)?;
            Ok(true)
        }
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn slice(args: &SliceArgs) -> Result<bool> {
    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(args)?;

    init_logging(args.verbose);

    info!("Slicer v{}", env!("CARGO_PKG_VERSION"));

    let summary = run_batch(&merged.items, &merged.options)?;
    summary.log();

    Ok(!summary.has_errors())
}

fn init(args: &InitArgs) -> Result<()> {
    init_logging(false);

    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    let config = builtin_config();
    save_config(&config, &args.path)?;
    info!(
        "Wrote {} sheet entries to {}",
        config.sheets.len(),
        args.path.display()
    );

    Ok(())
}

/// Work items and options from CLI args and the sheet table.
struct MergedConfig {
    items: Vec<WorkItem>,
    options: SliceOptions,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &SliceArgs) -> Result<MergedConfig> {
    // Config file if specified, built-in table otherwise
    let mut loaded = if let Some(config_path) = &args.config {
        LoadedConfig::load(config_path)
            .with_context(|| format!("failed to load config: {}", config_path.display()))?
    } else {
        LoadedConfig::builtin()
    };

    // Root directory: CLI > config file directory
    if let Some(root) = &args.root {
        loaded.config_dir = root.clone();
    }

    let items = loaded
        .work_items(&args.only)
        .context("failed to select sheets")?;

    if items.is_empty() {
        bail!("no sheets selected");
    }

    // Tolerance: CLI > config > default
    let tolerance = args.tolerance.unwrap_or(loaded.config.tolerance);

    Ok(MergedConfig {
        items,
        options: SliceOptions {
            tolerance,
            jobs: args.jobs,
            compress: args.compress,
            manifest: args.manifest,
        },
    })
}
