mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formease::BuilderConfig;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formease")]
#[command(version, about = "FormEase CLI - inspect, check and preview form definitions", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "formease.toml")]
    config: PathBuf,

    /// Log edit and render activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in sample form as JSON
    Sample,

    /// List the field types the palette offers
    Palette,

    /// Parse a form JSON file and report structural problems
    Check {
        /// Form JSON (component array or form document)
        file: PathBuf,
    },

    /// Render a form as a standalone HTML page
    Preview {
        /// Form JSON; defaults to the configured initial form or the sample form
        file: Option<PathBuf>,

        /// Render controls that accept input
        #[arg(short, long)]
        interactive: bool,

        /// Write the page here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = BuilderConfig::load(&cli.config)?;
    debug!(path = ?cli.config, project = %config.project.name, "configuration loaded");

    // Execute command
    match cli.command {
        Commands::Sample => {
            commands::sample::execute()?;
        }
        Commands::Palette => {
            commands::palette::execute();
        }
        Commands::Check { file } => {
            commands::check::execute(&file)?;
        }
        Commands::Preview {
            file,
            interactive,
            out,
        } => {
            commands::preview::execute(&config, file.as_deref(), interactive, out.as_deref())?;
        }
    }

    Ok(())
}
