use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobboard::{pkg::server::listen, prelude::Result};

mod import;
mod migrate;

#[derive(Parser)]
#[command(about = "job board search service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
    /// Load the tag catalog and job records from JSON files
    Import {
        #[arg(long, default_value = "data/tags.json")]
        tags: PathBuf,
        #[arg(long, default_value = "data/jobs.json")]
        jobs: PathBuf,
        /// Remove existing associations, jobs and tags first
        #[arg(long)]
        reset: bool,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Import { tags, jobs, reset }) => {
            import::apply(&tags, &jobs, reset).await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
