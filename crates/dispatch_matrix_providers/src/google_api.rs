use std::{fmt::Display, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    coordinates::Coordinates,
    distance_matrix_provider::{DistanceMatrixProvider, MatrixRow, RowElement},
    error::MatrixProviderError,
    retry::RetryPolicy,
};

pub const GOOGLE_DISTANCE_MATRIX_API_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Deserialize, Serialize, JsonSchema, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoogleTravelMode {
    #[default]
    Driving,
    Bicycling,
    Walking,
}

impl Display for GoogleTravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GoogleTravelMode::Driving => "driving",
                GoogleTravelMode::Bicycling => "bicycling",
                GoogleTravelMode::Walking => "walking",
            }
        )
    }
}

#[derive(Deserialize, Debug)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceMatrixResponseRow>,
}

#[derive(Deserialize, Debug)]
struct DistanceMatrixResponseRow {
    #[serde(default)]
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Deserialize, Debug)]
struct DistanceMatrixElement {
    status: String,
    duration: Option<DistanceMatrixValue>,
}

#[derive(Deserialize, Debug)]
struct DistanceMatrixValue {
    value: u64,
}

pub struct GoogleMatrixClientParams {
    pub api_key: String,
    pub travel_mode: GoogleTravelMode,
    /// Timeout of a single HTTP request.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Overrides [`GOOGLE_DISTANCE_MATRIX_API_URL`].
    pub base_url: Option<String>,
}

pub struct GoogleDistanceMatrixClient {
    params: GoogleMatrixClientParams,
    client: reqwest::Client,
}

impl GoogleDistanceMatrixClient {
    pub fn new(params: GoogleMatrixClientParams) -> Result<Self, MatrixProviderError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;
        Ok(Self { params, client })
    }

    fn url(&self) -> &str {
        self.params
            .base_url
            .as_deref()
            .unwrap_or(GOOGLE_DISTANCE_MATRIX_API_URL)
    }

    async fn request_row(
        &self,
        origin: &Coordinates,
        destinations: &str,
    ) -> Result<DistanceMatrixResponse, MatrixProviderError> {
        let response = self
            .client
            .get(self.url())
            .query(&[
                ("origins", origin.to_string().as_str()),
                ("destinations", destinations),
                ("mode", self.params.travel_mode.to_string().as_str()),
                ("key", self.params.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(MatrixProviderError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

impl DistanceMatrixProvider for GoogleDistanceMatrixClient {
    async fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> Result<MatrixRow, MatrixProviderError> {
        let destinations_param = destinations
            .iter()
            .map(|destination| destination.to_string())
            .collect::<Vec<_>>()
            .join("|");

        debug!(
            "GoogleApi: requesting row for {} ({} destinations)",
            origin,
            destinations.len()
        );

        let response = self
            .params
            .retry
            .run(|| self.request_row(origin, &destinations_param))
            .await?;

        parse_row(response, destinations.len())
    }
}

fn parse_row(
    response: DistanceMatrixResponse,
    expected_len: usize,
) -> Result<MatrixRow, MatrixProviderError> {
    if response.status != "OK" {
        return Err(MatrixProviderError::Status {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let row = response
        .rows
        .into_iter()
        .next()
        .ok_or_else(|| MatrixProviderError::IncompleteResponse("missing row".to_string()))?;

    if row.elements.len() != expected_len {
        return Err(MatrixProviderError::IncompleteResponse(format!(
            "expected {} elements, got {}",
            expected_len,
            row.elements.len()
        )));
    }

    Ok(row
        .elements
        .into_iter()
        .map(|element| match element.duration {
            Some(duration) if element.status == "OK" => RowElement::Duration(duration.value),
            _ => RowElement::Unavailable(element.status),
        })
        .collect())
}
