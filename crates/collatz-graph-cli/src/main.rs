//! Collatz Graph CLI - lay out 3x+1 trajectories as generative art.
//!
//! Computes trajectories, runs them through the layout core and writes the
//! positioned, styled graph as JSON for a renderer to draw.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use collatz_graph_core::{LayoutKind, LightPosition};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::generate::GenerateOptions;
use commands::{config as config_cmd, generate, sequence};
use config::Config;

/// Collatz Graph CLI - lay out Collatz trajectories as a styled tree.
#[derive(Parser, Debug)]
#[command(
    name = "cg",
    author,
    version,
    about = "Collatz Graph: lay out 3x+1 trajectories as generative art",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out a set of trajectories and write the graph as JSON.
    Generate {
        /// First start value of the range.
        #[arg(long)]
        start: Option<u64>,

        /// Last start value of the range (inclusive).
        #[arg(long)]
        end: Option<u64>,

        /// Explicit start values, comma separated. Overrides the range.
        #[arg(long, value_delimiter = ',')]
        starts: Vec<u64>,

        /// Layout: standard, radial_layers, spiral, galaxy or pseudo3d.
        #[arg(short, long)]
        layout: Option<String>,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Node radius before depth scaling.
        #[arg(long)]
        node_radius: Option<f64>,

        /// Light position, e.g. top-left, center or none.
        #[arg(long)]
        light: Option<String>,

        /// Skew every shape.
        #[arg(long)]
        skew: bool,

        /// Iteration cap per trajectory.
        #[arg(long)]
        max_steps: Option<usize>,

        /// Output file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print statistics instead of JSON.
        #[arg(long)]
        summary: bool,
    },

    /// Print one trajectory.
    Sequence {
        /// Start value.
        start: u64,

        /// Iteration cap.
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Show path to config file.
    Path,

    /// Reset configuration to defaults.
    Reset,

    /// Create a config file with every default written out.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            start,
            end,
            starts,
            layout,
            seed,
            node_radius,
            light,
            skew,
            max_steps,
            output,
            summary,
        } => {
            let mut config = Config::load()?;
            if let Some(start) = start {
                config.start = start;
            }
            if let Some(end) = end {
                config.end = end;
            }
            if let Some(layout) = layout {
                config.graph.layout = layout
                    .parse::<LayoutKind>()
                    .with_context(|| "Invalid --layout")?;
            }
            if let Some(light) = light {
                config.graph.light_position = light
                    .parse::<LightPosition>()
                    .with_context(|| "Invalid --light")?;
            }
            if seed.is_some() {
                config.graph.seed = seed;
            }
            if let Some(radius) = node_radius {
                config.graph.node_radius = radius;
            }
            if let Some(max_steps) = max_steps {
                config.max_steps = max_steps;
            }
            config.graph.skew |= skew;

            let options = GenerateOptions {
                starts,
                output,
                summary,
            };
            generate::execute(&config, &options)?;
        }

        Commands::Sequence { start, max_steps } => {
            let max_steps = match max_steps {
                Some(max_steps) => max_steps,
                None => Config::load()?.max_steps,
            };
            sequence::execute(start, max_steps)?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => config_cmd::show(&Config::load()?)?,
            ConfigCommands::Path => config_cmd::path()?,
            ConfigCommands::Reset => config_cmd::reset()?,
            ConfigCommands::Init { force } => config_cmd::init(force)?,
        },
    }

    Ok(())
}
