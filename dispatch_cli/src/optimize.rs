use std::path::PathBuf;

use clap::Args;
use dispatch_matrix_providers::coordinates::Coordinates;
use dispatch_optimizer::planner::{DispatchOutcome, DispatchPlanner};
use tracing::{info, warn};

use crate::{
    input::DispatchFile,
    output::{customers_table, routes_table},
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// JSON file with the customers to route
    #[arg(short, long)]
    input: PathBuf,

    /// Depot location as "lat,lng", defaults to the first routed customer
    #[arg(long)]
    depot: Option<Coordinates>,

    /// Vehicle capacities, e.g. "1500,1500,1000,750"
    #[arg(long, value_delimiter = ',')]
    vehicles: Vec<u64>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let file = DispatchFile::read(&args.input)?;
    let fleet = file.fleet(&args.vehicles)?;
    let depot = args.depot.or(file.depot);

    let client = file.matrix_client()?;

    info!(
        "Optimizing {} customers with {} vehicles using {}",
        file.customers.len(),
        fleet.len(),
        client.name()
    );

    let planner = DispatchPlanner::new(client, fleet).with_depot(depot);

    match planner.plan_inputs(file.customers).await? {
        DispatchOutcome::Solved(plan) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            println!("{}", routes_table(&plan.routes));
            if !plan.rejected.is_empty() {
                warn!("{} customers did not fit in the fleet", plan.rejected.len());
                println!("{}", customers_table(&plan.rejected));
            }
        }
        DispatchOutcome::Infeasible { rejected } => {
            warn!("No solution found");
            if !rejected.is_empty() {
                println!("{}", customers_table(&rejected));
            }
            anyhow::bail!("No route plan satisfies every deadline");
        }
    }

    Ok(())
}
