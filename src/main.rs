//! Command line front-end for telepatch

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use telepatch::config::{PatcherConfig, DEFAULT_BACKUP_SUFFIX};
use telepatch::mode::PatchMode;
use telepatch::patcher::file::FilePatcher;
use telepatch::result::PatchResult;

/// Intercept and neutralize telemetry calls in a JavaScript extension bundle
#[derive(Debug, Parser)]
#[command(name = "telepatch", version, about)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suffix inserted between the target's stem and extension to name its backup
    #[arg(
        long,
        env = "TELEPATCH_BACKUP_SUFFIX",
        default_value = DEFAULT_BACKUP_SUFFIX,
        value_parser = NonEmptyStringValueParser::new(),
        global = true
    )]
    backup_suffix: String,

    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Patch a file, backing it up first
    Apply {
        /// Extension file to patch
        file: PathBuf,
        /// One of: block, random, empty, stealth, debug
        #[arg(short, long, default_value_t = PatchMode::Block)]
        mode: PatchMode,
    },
    /// Restore a file from its backup
    Restore {
        /// Previously patched extension file
        file: PathBuf,
    },
    /// Show whether a file is patched
    Status {
        /// Extension file to inspect
        file: PathBuf,
    },
    /// List the available patch modes
    Modes,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let patcher =
        FilePatcher::with_config(PatcherConfig::default().with_backup_suffix(&cli.backup_suffix));

    match &cli.command {
        Command::Apply { file, mode } => report(&patcher.apply_patch(file, *mode), cli.json),
        Command::Restore { file } => report(&patcher.restore_from_backup(file), cli.json),
        Command::Status { file } => status(&patcher, file, cli.json),
        Command::Modes => modes(cli.json),
    }
}

/// Logs go to stderr so that `--json` output on stdout stays parseable
fn init_tracing(verbose: u8) -> Result<()> {
    let default = if verbose > 0 {
        "telepatch=debug"
    } else {
        "telepatch=info"
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

/// Prints a [`PatchResult`] and maps it to an exit code
fn report(result: &PatchResult, as_json: bool) -> Result<ExitCode> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if result.success {
        println!("{}", result.message);
        println!("  file:   {}", result.file_path);
        println!("  backup: {}", result.backup_path);
    } else {
        eprintln!("error: {}", result.message);
    }

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prints the patch status of `file`
fn status(patcher: &FilePatcher, file: &Path, as_json: bool) -> Result<ExitCode> {
    let status = patcher.patch_status(file);
    let backup = patcher.backup_path(file);

    if as_json {
        let out = json!({
            "file_path": file.display().to_string(),
            "status": status,
            "backup_path": backup.display().to_string(),
            "backup_exists": backup.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}: {status}", file.display());
        if backup.exists() {
            println!("  backup: {}", backup.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints every mode with its description
fn modes(as_json: bool) -> Result<ExitCode> {
    if as_json {
        let out: Vec<_> = PatchMode::ALL
            .iter()
            .map(|mode| json!({ "name": mode, "description": mode.description() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for mode in PatchMode::ALL {
            println!("{:<8} {}", mode.name(), mode.description());
        }
    }
    Ok(ExitCode::SUCCESS)
}
