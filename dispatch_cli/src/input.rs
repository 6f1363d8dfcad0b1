use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use dispatch_matrix_providers::{
    coordinates::Coordinates,
    travel_matrix_client::{TravelMatrixClient, TravelMatrixClientSettings},
    travel_matrix_provider::TravelMatrixProvider,
};
use dispatch_optimizer::problem::{
    customer::{Customer, CustomerInput},
    vehicle::{DEFAULT_VEHICLE_CAPACITIES, Fleet},
};
use serde::Deserialize;

/// A dispatch day read from disk.
#[derive(Deserialize)]
pub struct DispatchFile {
    pub customers: Vec<CustomerInput>,
    #[serde(default)]
    pub vehicles: Option<Vec<u64>>,
    #[serde(default)]
    pub depot: Option<Coordinates>,
    #[serde(default)]
    pub provider: Option<TravelMatrixProvider>,
}

impl DispatchFile {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).with_context(|| format!("Failed to parse {path:?}"))
    }

    pub fn customers(&self) -> anyhow::Result<Vec<Customer>> {
        self.customers
            .iter()
            .cloned()
            .map(|input| Customer::try_from(input).map_err(anyhow::Error::from))
            .collect()
    }

    /// Capacities from the command line win over the file.
    pub fn fleet(&self, capacities: &[u64]) -> anyhow::Result<Fleet> {
        let capacities = if !capacities.is_empty() {
            capacities
        } else {
            self.vehicles.as_deref().unwrap_or(&DEFAULT_VEHICLE_CAPACITIES)
        };

        Ok(Fleet::from_capacities(capacities)?)
    }

    pub fn matrix_client(&self) -> anyhow::Result<TravelMatrixClient> {
        let settings = TravelMatrixClientSettings {
            google_api_key: std::env::var("GOOGLE_MAPS_API_KEY").ok(),
            ..TravelMatrixClientSettings::default()
        };

        Ok(TravelMatrixClient::new(
            self.provider.clone().unwrap_or_default(),
            settings,
        )?)
    }
}
