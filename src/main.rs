//! filecommander - dual-pane file manager backend.
//!
//! Usage:
//!   fcmd                          Serve the HTTP API with default settings
//!   fcmd serve [--port N]         Serve the HTTP API
//!   fcmd drives                   List fixed and removable drives
//!   fcmd ls [PATH]                List a directory
//!   fcmd cp SOURCES... DEST       Copy into a directory
//!   fcmd mv SOURCES... DEST       Move into a directory
//!   fcmd rm PATHS...              Delete files and directories
//!   fcmd --help                   Show help

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use filecommander_core::{FileEntry, ServerConfig};
use filecommander_ops::{FileOperation, OperationExecutor};

#[derive(Parser)]
#[command(
    name = "filecommander",
    version,
    about = "A dual-pane file manager backend",
    long_about = "filecommander lists directories and copies, moves and deletes files \
                  for a browser-based dual-pane UI.\n\n\
                  Run `fcmd` to start the HTTP API, or use subcommands to run \
                  the same operations from the terminal."
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/filecommander/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static UI assets
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List fixed and removable drives
    Drives {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List a directory
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Copy files and directories into a directory (never overwrites)
    Cp {
        /// Sources followed by the destination directory
        #[arg(required = true, num_args = 2..)]
        paths: Vec<PathBuf>,
    },

    /// Move files and directories into a directory (never overwrites)
    Mv {
        /// Sources followed by the destination directory
        #[arg(required = true, num_args = 2..)]
        paths: Vec<PathBuf>,
    },

    /// Delete files and directories
    Rm {
        /// Paths to delete
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve {
            host,
            port,
            static_dir,
        }) => {
            let mut config = ServerConfig::load_or_default(cli.config.as_deref())
                .context("Failed to load configuration")?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
            run_serve(config).await?;
        }
        Some(Command::Drives { format }) => run_drives(format).await?,
        Some(Command::Ls { path, format }) => run_ls(path, format).await?,
        Some(Command::Cp { mut paths }) => {
            let destination = split_destination(&mut paths);
            run_operation(FileOperation::copy(paths, destination)).await?;
        }
        Some(Command::Mv { mut paths }) => {
            let destination = split_destination(&mut paths);
            run_operation(FileOperation::move_to(paths, destination)).await?;
        }
        Some(Command::Rm { paths }) => {
            run_operation(FileOperation::delete(paths)).await?;
        }
        None => {
            let config = ServerConfig::load_or_default(cli.config.as_deref())
                .context("Failed to load configuration")?;
            run_serve(config).await?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A token cancelled by Ctrl-C.
fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping");
            child.cancel();
        }
    });
    token
}

/// Serve the HTTP API until Ctrl-C.
async fn run_serve(config: ServerConfig) -> Result<()> {
    let shutdown = ctrl_c_token();
    filecommander_server::serve(config, shutdown)
        .await
        .context("Server failed")
}

/// List drives.
async fn run_drives(format: OutputFormat) -> Result<()> {
    let drives = OperationExecutor::new()
        .drives()
        .await
        .context("Failed to enumerate drives")?;

    match format {
        OutputFormat::Text => {
            for drive in &drives {
                println!("{drive}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&drives)?),
    }

    Ok(())
}

/// List a directory.
async fn run_ls(path: PathBuf, format: OutputFormat) -> Result<()> {
    let entries = OperationExecutor::new()
        .list(path.clone())
        .await
        .with_context(|| format!("Failed to list {}", path.display()))?;

    match format {
        OutputFormat::Text => {
            for entry in &entries {
                print_entry(entry);
            }
            eprintln!();
            eprintln!("{} entries", entries.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}

/// Run a copy, move or delete; Ctrl-C stops it before the next source.
async fn run_operation(operation: FileOperation) -> Result<()> {
    let cancel = ctrl_c_token();
    let operation_type = operation.operation_type();

    let outcome = OperationExecutor::new()
        .execute(operation, cancel)
        .await
        .with_context(|| format!("{operation_type} failed"))?;

    println!("{}", outcome.summary());
    Ok(())
}

/// The last path is the destination directory.
fn split_destination(paths: &mut Vec<PathBuf>) -> PathBuf {
    // clap guarantees at least two paths
    paths.pop().unwrap_or_default()
}

/// Print one listing line.
fn print_entry(entry: &FileEntry) {
    let marker = if entry.is_directory { "/" } else { "" };
    println!(
        "{:<12} {:<40} {:>10}  {}",
        entry.icon_key.as_ref(),
        truncate(&format!("{}{}", entry.name, marker), 40),
        entry.formatted_size,
        entry.last_modified.format("%Y-%m-%d %H:%M")
    );
}

/// Truncate a string to max length in characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
