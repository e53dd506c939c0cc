//! Folio: mirror CMS collections into static build directories.
//!
//! # Usage
//!
//! ```text
//! folio build [--config folio.yaml] [--target <name>] [--dry-run]
//! folio diff [--config folio.yaml] [--target <name>]
//! folio status [--config folio.yaml] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, diff::DiffArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Reconcile CMS collections with their on-disk manifests",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch each target and apply additions, updates and removals.
    Build(BuildArgs),

    /// Show a unified diff of the manifest a build would write.
    Diff(DiffArgs),

    /// Show manifest state for every configured target.
    Status(StatusArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
