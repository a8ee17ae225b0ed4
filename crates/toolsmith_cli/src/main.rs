//! TOOLSMITH CLI
//!
//! Command-line front end for normalizing, validating and compiling custom
//! tool definitions. JSON results go to stdout, logs go to stderr.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "toolsmith", version)]
#[command(
    about = "TOOLSMITH - Custom tool normalization and tool-spec compilation",
    long_about = None
)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw parameter list
    Normalize {
        /// Path to the parameter list
        #[arg(short, long)]
        file: PathBuf,
        /// Treat the file contents as a JSON-encoded string payload
        #[arg(long)]
        raw_string: bool,
    },
    /// Validate a tool definition
    Validate {
        /// Path to the tool definition
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Compile a tool, or an array of tools into a toolConfig
    Compile {
        /// Path to a tool or an array of tools
        #[arg(short, long)]
        file: PathBuf,
        /// Tool ids to offer; all active tools when omitted
        #[arg(short, long = "select")]
        select: Vec<String>,
    },
    /// Check tool arguments against a tool's input schema
    CheckInput {
        /// Path to the tool definition
        #[arg(short, long)]
        tool: PathBuf,
        /// Path to the arguments object
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("toolsmith=debug")
    } else {
        EnvFilter::new(&config.log_filter)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).wrap_err("failed to load configuration")?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Normalize { file, raw_string } => commands::normalize(&config, &file, raw_string),
        Commands::Validate { file } => commands::validate(&file),
        Commands::Compile { file, select } => commands::compile(&config, &file, &select),
        Commands::CheckInput { tool, input } => commands::check_input(&config, &tool, &input),
    }
}
