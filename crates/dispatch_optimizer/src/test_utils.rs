use std::sync::atomic::{AtomicUsize, Ordering};

use dispatch_matrix_providers::{
    coordinates::Coordinates,
    distance_matrix_provider::{DistanceMatrixProvider, MatrixRow, RowElement},
    error::MatrixProviderError,
};

use crate::problem::{
    customer::Customer,
    deadline::Deadline,
    distance_matrix::DistanceMatrix,
    vehicle::Fleet,
};

pub fn create_customer(name: &str, lat: f64, lng: f64, weight: u64, deadline: &str) -> Customer {
    Customer::new(
        name,
        Coordinates::new(lat, lng),
        weight,
        Deadline::parse(deadline).unwrap(),
    )
}

pub fn create_fleet(capacities: &[u64]) -> Fleet {
    Fleet::from_capacities(capacities).unwrap()
}

/// Nodes placed on a line, `cost(i, j) = |p_i - p_j| * seconds_per_unit`.
pub fn line_matrix(positions: &[i64], seconds_per_unit: u64) -> DistanceMatrix {
    let rows = positions
        .iter()
        .map(|from| {
            positions
                .iter()
                .map(|to| from.abs_diff(*to) * seconds_per_unit)
                .collect()
        })
        .collect();

    DistanceMatrix::from_rows(rows, positions.len()).unwrap()
}

/// Provider where every location sits on the `lng` axis and a degree takes
/// `seconds_per_degree` to travel.
pub struct MockProvider {
    pub seconds_per_degree: f64,
    pub failing_origin: Option<Coordinates>,
    pub unavailable: Vec<(Coordinates, Coordinates)>,
    pub calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(seconds_per_degree: f64) -> Self {
        MockProvider {
            seconds_per_degree,
            failing_origin: None,
            unavailable: vec![],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_at(mut self, origin: Coordinates) -> Self {
        self.failing_origin = Some(origin);
        self
    }

    pub fn with_unavailable(mut self, from: Coordinates, to: Coordinates) -> Self {
        self.unavailable.push((from, to));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceMatrixProvider for MockProvider {
    async fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> Result<MatrixRow, MatrixProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_origin.as_ref() == Some(origin) {
            return Err(MatrixProviderError::Status {
                status: "REQUEST_DENIED".to_string(),
                message: "The provided API key is invalid.".to_string(),
            });
        }

        Ok(destinations
            .iter()
            .map(|destination| {
                if self.unavailable.contains(&(*origin, *destination)) {
                    RowElement::Unavailable("ZERO_RESULTS".to_string())
                } else {
                    let degrees = (origin.lng - destination.lng).abs();
                    RowElement::Duration((degrees * self.seconds_per_degree).round() as u64)
                }
            })
            .collect())
    }
}
