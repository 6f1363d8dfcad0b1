use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dispatch_matrix_providers::coordinates::Coordinates;
use dispatch_optimizer::matrix_acquisition::fetch_distance_matrix;
use tracing::info;

use crate::{input::DispatchFile, output::matrix_table};

#[derive(Args)]
pub struct MatrixArgs {
    /// JSON file with the customers
    #[arg(short, long)]
    input: PathBuf,

    /// Depot location as "lat,lng", defaults to the first customer
    #[arg(long)]
    depot: Option<Coordinates>,
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let file = DispatchFile::read(&args.input)?;
    let customers = file.customers()?;

    let depot = args
        .depot
        .or(file.depot)
        .or_else(|| customers.first().map(|customer| *customer.location()))
        .context("No depot and no customers")?;

    let locations: Vec<Coordinates> = std::iter::once(depot)
        .chain(customers.iter().map(|customer| *customer.location()))
        .collect();
    let labels: Vec<String> = std::iter::once("Depot".to_string())
        .chain(customers.iter().map(|customer| customer.name().to_string()))
        .collect();

    let client = file.matrix_client()?;
    info!("Fetching {0}x{0} matrix from {1}", locations.len(), client.name());

    let matrix = fetch_distance_matrix(&client, &locations).await?;
    println!("{}", matrix_table(&labels, &matrix));

    Ok(())
}
