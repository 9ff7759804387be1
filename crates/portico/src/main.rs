//! Portico CLI - documentation portal configuration checker.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "portico")]
#[command(about = "Validate documentation portal configuration and links")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the site config file (.toml, .json, .yaml)
    #[arg(short, long, default_value = "portico.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and docs directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate the config and check every internal link
    Check {
        /// Site directory (defaults to the config file's directory)
        #[arg(short, long)]
        site_dir: Option<PathBuf>,
    },

    /// Write the validated config as JSON for the site generator
    Export {
        /// Site directory (defaults to the config file's directory)
        #[arg(short, long)]
        site_dir: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not check links before exporting
        #[arg(long)]
        skip_links: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `export` can stream JSON on stdout.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Check { site_dir } => {
            commands::check::run(&cli.config, site_dir).await?;
        }
        Commands::Export {
            site_dir,
            output,
            skip_links,
        } => {
            commands::export::run(&cli.config, site_dir, output, skip_links).await?;
        }
    }

    Ok(())
}
