//! scrubline CLI
//!
//! Harness for the playback engine: inspect a project, check where a seek
//! lands, and play a project through simulated players.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use scrubline::Config;

#[derive(Parser)]
#[command(name = "scrubline")]
#[command(about = "Segmented media timeline engine")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the segments, gaps and markers of a project
    Inspect {
        /// Project file (JSON)
        project: PathBuf,
    },

    /// Show where a seek lands
    Seek {
        /// Project file (JSON)
        project: PathBuf,

        /// Target position in seconds
        #[arg(long, allow_negative_numbers = true)]
        to: f64,

        /// Snap back out of gaps instead of forward
        #[arg(long)]
        backward: bool,
    },

    /// Play a project through simulated players
    Play {
        /// Project file (JSON)
        project: PathBuf,

        /// Seconds of playback to simulate
        #[arg(long = "for", value_name = "SECONDS")]
        duration: f64,

        /// Start position in seconds
        #[arg(long, default_value = "0")]
        from: f64,

        /// Loop at the end (or at the end of --range)
        #[arg(long)]
        repeat: bool,

        /// Constrain playback to [START, END] seconds
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        range: Option<Vec<f64>>,

        /// Simulation step in milliseconds
        #[arg(long, default_value = "10")]
        step_ms: u64,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(not(tarpaulin_include))]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(not(tarpaulin_include))]
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_file = cli.config.as_ref();

    match cli.command {
        Commands::Inspect { project } => commands::inspect::handle(&project),
        Commands::Seek {
            project,
            to,
            backward,
        } => {
            let config = load_config(config_file)?;
            commands::seek::handle(&project, to, backward, &config)
        }
        Commands::Play {
            project,
            duration,
            from,
            repeat,
            range,
            step_ms,
        } => {
            let config = load_config(config_file)?;
            let options = commands::play::PlayOptions {
                duration,
                from,
                repeat,
                range: range.and_then(|r| match r.as_slice() {
                    [start, end] => Some((*start, *end)),
                    _ => None,
                }),
                step_ms,
            };
            commands::play::handle(&project, &options, &config)
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&load_config(config_file)?)
        }
        Commands::Config(ConfigCommands::Path) => commands::config::handle_path(config_file),
    }
}
