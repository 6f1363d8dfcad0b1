use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    coordinates::Coordinates,
    distance_matrix_provider::{DistanceMatrixProvider, MatrixRow, RowElement},
    error::MatrixProviderError,
};

/// A precomputed matrix over a known list of locations.
///
/// `durations[i][j]` is the travel time in seconds from `locations[i]` to
/// `locations[j]`. A `null` cell is reported as unavailable.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct CustomMatrix {
    pub locations: Vec<Coordinates>,
    pub durations: Vec<Vec<Option<u64>>>,
}

impl CustomMatrix {
    fn position(&self, coordinates: &Coordinates) -> Result<usize, MatrixProviderError> {
        self.locations
            .iter()
            .position(|location| location == coordinates)
            .ok_or_else(|| MatrixProviderError::UnknownLocation(coordinates.to_string()))
    }
}

impl DistanceMatrixProvider for CustomMatrix {
    async fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> Result<MatrixRow, MatrixProviderError> {
        let from = self.position(origin)?;
        let row = self.durations.get(from).ok_or_else(|| {
            MatrixProviderError::IncompleteResponse(format!("missing row {from}"))
        })?;

        destinations
            .iter()
            .map(|destination| {
                let to = self.position(destination)?;
                match row.get(to) {
                    Some(Some(duration)) => Ok(RowElement::Duration(*duration)),
                    Some(None) => Ok(RowElement::Unavailable("NOT_FOUND".to_string())),
                    None => Err(MatrixProviderError::IncompleteResponse(format!(
                        "row {from} has no column {to}"
                    ))),
                }
            })
            .collect()
    }
}
