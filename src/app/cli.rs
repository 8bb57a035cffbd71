//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airmouse - Control the pointer with hand gestures from a webcam
#[derive(Parser, Debug)]
#[command(name = "airmouse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start controlling the pointer
    Run {
        /// Session duration in seconds (0 = until stopped)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Log intents instead of injecting them
        #[arg(long)]
        dry_run: bool,

        /// Record the session's intents to a named trace
        #[arg(short, long)]
        trace: Option<String>,
    },

    /// Replay a recorded session trace into the pointer
    Replay {
        /// Trace file or saved trace name
        #[arg(short, long)]
        input: PathBuf,

        /// Log intents instead of injecting them
        #[arg(long)]
        dry_run: bool,

        /// Delay between frames in milliseconds
        #[arg(long, default_value = "33")]
        frame_delay_ms: u64,
    },

    /// List saved session traces
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "gesture.pinch_threshold")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the saved-traces directory
    pub fn traces_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".airmouse").join("traces"))
            .unwrap_or_else(|| PathBuf::from("traces"))
    }
}
