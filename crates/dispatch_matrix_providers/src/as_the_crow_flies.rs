use geo::{Distance, Haversine};

use crate::{
    coordinates::Coordinates,
    distance_matrix_provider::{DistanceMatrixProvider, MatrixRow, RowElement},
    error::MatrixProviderError,
};

/// Travel time estimated from the great circle distance at a constant speed.
pub struct AsTheCrowFlies {
    speed_kmh: f64,
}

impl AsTheCrowFlies {
    /// Fails unless `speed_kmh` is finite and strictly positive.
    pub fn new(speed_kmh: f64) -> Result<Self, MatrixProviderError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(MatrixProviderError::InvalidSpeed(speed_kmh));
        }

        Ok(Self { speed_kmh })
    }

    pub fn travel_time(&self, from: &Coordinates, to: &Coordinates) -> u64 {
        if from == to {
            return 0;
        }

        let meters = Haversine.distance(geo::Point::from(from), geo::Point::from(to));
        let meters_per_second = self.speed_kmh / 3.6;

        (meters / meters_per_second).round() as u64
    }
}

impl DistanceMatrixProvider for AsTheCrowFlies {
    async fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> Result<MatrixRow, MatrixProviderError> {
        Ok(destinations
            .iter()
            .map(|destination| RowElement::Duration(self.travel_time(origin, destination)))
            .collect())
    }
}
