use std::time::Duration;

use anyhow::{Context, bail};
use dispatch_matrix_providers::{
    coordinates::Coordinates, google_api::GoogleTravelMode, retry::RetryPolicy,
    travel_matrix_client::TravelMatrixClientSettings,
    travel_matrix_provider::TravelMatrixProvider,
};
use dispatch_optimizer::problem::vehicle::{DEFAULT_VEHICLE_CAPACITIES, Fleet};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_CROW_SPEED_KMH: f64 = 50.0;

pub struct AppConfig {
    pub bind_address: String,
    pub provider: TravelMatrixProvider,
    pub client_settings: TravelMatrixClientSettings,
    pub fleet: Fleet,
    pub depot: Option<Coordinates>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let provider = match var("DISPATCH_MATRIX_PROVIDER").as_deref().map(str::trim) {
            None | Some("google") => TravelMatrixProvider::GoogleApi {
                travel_mode: GoogleTravelMode::Driving,
            },
            Some("crow") => {
                let speed_kmh: f64 = match var("DISPATCH_CROW_SPEED_KMH") {
                    Some(value) => value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid DISPATCH_CROW_SPEED_KMH {value:?}"))?,
                    None => DEFAULT_CROW_SPEED_KMH,
                };

                if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
                    bail!("DISPATCH_CROW_SPEED_KMH must be a positive number, got {speed_kmh}");
                }

                TravelMatrixProvider::AsTheCrowFlies { speed_kmh }
            }
            Some(other) => bail!("Unknown DISPATCH_MATRIX_PROVIDER {other:?}, expected google or crow"),
        };

        let mut client_settings = TravelMatrixClientSettings {
            google_api_key: var("GOOGLE_MAPS_API_KEY"),
            ..TravelMatrixClientSettings::default()
        };

        if let Some(value) = var("DISPATCH_MATRIX_TIMEOUT_SECS") {
            let seconds: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid DISPATCH_MATRIX_TIMEOUT_SECS {value:?}"))?;
            client_settings.timeout = Duration::from_secs(seconds);
        }

        if let Some(value) = var("DISPATCH_MATRIX_MAX_ATTEMPTS") {
            client_settings.retry = RetryPolicy {
                max_attempts: value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid DISPATCH_MATRIX_MAX_ATTEMPTS {value:?}"))?,
                ..RetryPolicy::default()
            };
        }

        let fleet = match var("DISPATCH_VEHICLE_CAPACITIES") {
            Some(value) => Fleet::from_capacities(&parse_capacities(&value)?)
                .context("DISPATCH_VEHICLE_CAPACITIES must list at least one vehicle")?,
            None => Fleet::from_capacities(&DEFAULT_VEHICLE_CAPACITIES)?,
        };

        let depot = var("DISPATCH_DEPOT")
            .map(|value| value.parse::<Coordinates>())
            .transpose()
            .context("Invalid DISPATCH_DEPOT")?;

        Ok(AppConfig {
            bind_address: var("DISPATCH_BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            provider,
            client_settings,
            fleet,
            depot,
        })
    }
}

/// Parses a comma separated list such as `1500,1500,1000,750`.
pub fn parse_capacities(value: &str) -> anyhow::Result<Vec<u64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|capacity| !capacity.is_empty())
        .map(|capacity| {
            capacity
                .parse::<u64>()
                .with_context(|| format!("Invalid vehicle capacity {capacity:?}"))
        })
        .collect()
}
