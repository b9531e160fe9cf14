use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{generate::GenerateSubcommands, matrix::MatrixArgs, solve::SolveArgs};

mod generate;
mod matrix;
mod output;
mod parsers;
mod provider_args;
mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal tour of an instance file
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Compute and store the distance matrix of an instance file
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args)?,
        Some(Commands::Matrix { args }) => matrix::run(args)?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {
            tracing::warn!("No command given, see --help");
        }
    }

    Ok(())
}
