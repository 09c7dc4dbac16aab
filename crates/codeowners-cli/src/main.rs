use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeowners_core::AppendOptions;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codeowners", version, about = "Append, create and lint CODEOWNERS files")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append entries to the CODEOWNERS file
    Append {
        /// Entries to append; use "-" to read blank-line-separated blocks from stdin
        #[arg(value_name = "ENTRY")]
        entries: Vec<String>,
        /// Rules file (default: .github/CODEOWNERS, CODEOWNERS or docs/CODEOWNERS)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Owner added to each single-line entry (can be specified multiple times)
        #[arg(long = "owner", value_name = "OWNER")]
        owners: Vec<String>,
        /// Insert before this 1-based line instead of at the end
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        line: Option<u64>,
        /// Skip lines the file already contains
        #[arg(long)]
        ignore_duplicates: bool,
        /// Skip comment and blank lines
        #[arg(long)]
        ignore_comments: bool,
        /// Create the file if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Create an empty CODEOWNERS file unless one exists
    Create {
        #[arg(default_value = ".")]
        dir: String,
    },
    /// Validate the CODEOWNERS file
    Lint {
        #[arg(long)]
        file: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "codeowners=debug,codeowners_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_entries(entries: Vec<String>) -> Result<Vec<String>> {
    if entries.iter().any(|e| e == "-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read entries from stdin")?;
        let mut all: Vec<String> = entries.into_iter().filter(|e| e != "-").collect();
        all.extend(codeowners_core::split_blocks(&input));
        return Ok(all);
    }
    Ok(entries)
}

fn line_number(line: Option<u64>) -> Result<Option<usize>> {
    line.map(|l| usize::try_from(l).with_context(|| format!("Line number {} is too large", l)))
        .transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Append { entries, file, owners, line, ignore_duplicates, ignore_comments, create } => {
            tracing::debug!(entries = entries.len(), ?file, ?line, "dispatching append");
            let options = AppendOptions {
                file,
                entries: read_entries(entries)?,
                owners,
                line: line_number(line)?,
                ignore_duplicates,
                ignore_comments,
                create,
            };
            codeowners_core::cmd_append(&options)?;
        }
        Command::Create { dir } => {
            tracing::debug!(%dir, "dispatching create");
            codeowners_core::cmd_create(&dir)?;
        }
        Command::Lint { file } => {
            tracing::debug!(?file, "dispatching lint");
            codeowners_core::cmd_lint(file.as_deref())?;
        }
    }
    Ok(())
}
