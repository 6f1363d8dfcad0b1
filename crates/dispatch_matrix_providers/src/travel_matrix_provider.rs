use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{custom_matrix::CustomMatrix, google_api::GoogleTravelMode};

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TravelMatrixProvider {
    /// https://developers.google.com/maps/documentation/distance-matrix
    GoogleApi {
        #[serde(default)]
        travel_mode: GoogleTravelMode,
    },
    AsTheCrowFlies {
        speed_kmh: f64,
    },
    Custom {
        matrix: CustomMatrix,
    },
}

impl Default for TravelMatrixProvider {
    fn default() -> Self {
        TravelMatrixProvider::GoogleApi {
            travel_mode: GoogleTravelMode::Driving,
        }
    }
}
