//! pagepack CLI - entry-page assembly and dev server for bundled front ends.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pagepack")]
#[command(about = "Entry-page assembly and dev server for bundled front ends")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to pagepack.toml config file
    #[arg(short, long, default_value = "pagepack.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate index.html for a bundler output directory
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the files and directories directly under a path
    Classify {
        /// Directory to classify
        dir: PathBuf,

        /// Collect every file beneath the directory instead
        #[arg(short, long)]
        recursive: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Serve the build output with the development routes
    Serve {
        /// Port to listen on (defaults to config or 9000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory to serve (defaults to config or "dist")
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Open browser
        #[arg(long)]
        open: bool,
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

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build { output } => {
            commands::build::run(&file_config, output).await?;
        }
        Commands::Classify {
            dir,
            recursive,
            json,
        } => {
            commands::classify::run(&dir, recursive, json)?;
        }
        Commands::Serve { port, dir, open } => {
            commands::serve::run(&file_config, port, dir, open).await?;
        }
    }

    Ok(())
}
