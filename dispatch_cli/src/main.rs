use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{matrix::MatrixArgs, optimize::OptimizeArgs};

mod input;
mod matrix;
mod optimize;
mod output;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the delivery routes of a file of customers
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Fetch and print the travel time matrix of a file of customers
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Optimize { args } => optimize::run(args).await?,
        Commands::Matrix { args } => matrix::run(args).await?,
    }

    Ok(())
}
