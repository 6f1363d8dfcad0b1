use std::time::Duration;

use crate::{
    as_the_crow_flies::AsTheCrowFlies,
    coordinates::Coordinates,
    custom_matrix::CustomMatrix,
    distance_matrix_provider::{DistanceMatrixProvider, MatrixRow},
    error::MatrixProviderError,
    google_api::{GoogleDistanceMatrixClient, GoogleMatrixClientParams},
    retry::RetryPolicy,
    travel_matrix_provider::TravelMatrixProvider,
};

pub struct TravelMatrixClientSettings {
    pub google_api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TravelMatrixClientSettings {
    fn default() -> Self {
        Self {
            google_api_key: None,
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

enum Backend {
    Google(GoogleDistanceMatrixClient),
    AsTheCrowFlies(AsTheCrowFlies),
    Custom(CustomMatrix),
}

/// Dispatches row requests to the configured [`TravelMatrixProvider`].
pub struct TravelMatrixClient {
    backend: Backend,
}

impl TravelMatrixClient {
    pub fn new(
        provider: TravelMatrixProvider,
        settings: TravelMatrixClientSettings,
    ) -> Result<Self, MatrixProviderError> {
        let backend = match provider {
            TravelMatrixProvider::GoogleApi { travel_mode } => {
                let api_key = settings
                    .google_api_key
                    .ok_or(MatrixProviderError::MissingApiKey("Google Distance Matrix API"))?;

                Backend::Google(GoogleDistanceMatrixClient::new(GoogleMatrixClientParams {
                    api_key,
                    travel_mode,
                    timeout: settings.timeout,
                    retry: settings.retry,
                    base_url: None,
                })?)
            }
            TravelMatrixProvider::AsTheCrowFlies { speed_kmh } => {
                Backend::AsTheCrowFlies(AsTheCrowFlies::new(speed_kmh)?)
            }
            TravelMatrixProvider::Custom { matrix } => Backend::Custom(matrix),
        };

        Ok(Self { backend })
    }

    pub fn name(&self) -> &'static str {
        match self.backend {
            Backend::Google(_) => "google_api",
            Backend::AsTheCrowFlies(_) => "as_the_crow_flies",
            Backend::Custom(_) => "custom",
        }
    }
}

impl DistanceMatrixProvider for TravelMatrixClient {
    async fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> Result<MatrixRow, MatrixProviderError> {
        match &self.backend {
            Backend::Google(client) => client.fetch_row(origin, destinations).await,
            Backend::AsTheCrowFlies(client) => client.fetch_row(origin, destinations).await,
            Backend::Custom(matrix) => matrix.fetch_row(origin, destinations).await,
        }
    }
}
