use std::path::PathBuf;

use clap::Subcommand;
use tracing::info;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the road graph file
    JsonSchema {
        /// Output file
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            let schema = odyssey_routing::graph::generate_json_schema()?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&out, schema)?;
            info!("Road graph schema written to {}", out.display());
        }
    }

    Ok(())
}
