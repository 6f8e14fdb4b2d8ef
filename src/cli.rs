use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "trip-browser")]
#[command(about = "A terminal trip browser with a route map and a draggable trip panel")]
pub struct Cli {
    /// Path to the JSON application config
    #[arg(long, global = true)]
    pub app_config: Option<PathBuf>,

    /// Log to stderr at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Run {
        /// JSON file with the trips to browse (defaults to the configured source)
        #[arg(short, long)]
        trips: Option<PathBuf>,
    },
    /// Generate a screenshot from a JSON configuration
    Screenshot {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: String,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Execute a command against a configuration and output the result
    Execute {
        /// Path to the JSON configuration file
        #[arg(short, long)]
        config: String,
        /// Command to execute (e.g., "expand", "drag:-120", "search:s")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting configuration (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Also generate a screenshot of the result
        #[arg(long)]
        screenshot: bool,
        /// Terminal width for screenshot (if enabled)
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for screenshot (if enabled)
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Save the loaded trips and initial view state as a JSON configuration
    SaveState {
        /// Output file for the configuration (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON file with the trips to load (defaults to the configured source)
        #[arg(short, long)]
        trips: Option<PathBuf>,
    },
}
