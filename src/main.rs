use clap::Parser;
use scene_narrator::cli::commands::{cmd_classify, cmd_replay};
use scene_narrator::cli::config::{Cli, Commands};
use scene_narrator::config::load_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Replay { scenario, trace } => {
            let all_passed = cmd_replay(&scenario, trace.as_deref(), &config, cli.verbose)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Classify { scenario } => {
            cmd_classify(&scenario, &config)?;
        }
    }

    Ok(())
}
