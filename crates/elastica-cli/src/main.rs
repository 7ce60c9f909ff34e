//! Elastica CLI: run scenes headless, list presets, validate inputs.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "elastica")]
#[command(version, about = "Elastica deformable body simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene for a number of frames.
    Simulate {
        /// Scene preset name, or a path to a tetrahedral mesh (.json).
        #[arg(short, long, default_value = "bridge")]
        scene: String,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 100)]
        frames: u64,

        /// Path to a simulation config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Write every frame's display buffers to this JSON file.
        #[arg(short, long)]
        export: Option<String>,

        /// Print a line per frame instead of only the summary.
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the built-in scenes.
    Scenes,

    /// Validate a config (.toml) or a tetrahedral mesh (.json).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            frames,
            config,
            export,
            verbose,
        } => commands::simulate(&scene, frames, config.as_deref(), export.as_deref(), verbose),
        Commands::Scenes => commands::scenes(),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
