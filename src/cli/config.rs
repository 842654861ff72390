use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "scene-narrator",
    version,
    about = "Screen-reader narration layer for a game UI scene graph"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: scene-narrator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run replay scenarios from YAML files
    Replay {
        /// Path to a scenario YAML file or a directory of them
        #[arg(long)]
        scenario: String,

        /// Write a JSONL announcement trace to this path
        #[arg(long)]
        trace: Option<String>,
    },

    /// Dump the classification table for a scenario's scene
    Classify {
        /// Path to a scenario YAML file
        #[arg(long)]
        scenario: String,
    },
}
