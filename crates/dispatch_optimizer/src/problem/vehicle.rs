use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{define_index_newtype, problem::error::ProblemError};

define_index_newtype!(VehicleIdx, Vehicle);

/// Capacities of the default four vehicle deployment.
pub const DEFAULT_VEHICLE_CAPACITIES: [u64; 4] = [1500, 1500, 1000, 750];

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    capacity: u64,
}

impl Vehicle {
    pub const fn new(capacity: u64) -> Self {
        Vehicle { capacity }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// A fixed, non-empty set of vehicles sharing one depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, ProblemError> {
        if vehicles.is_empty() {
            return Err(ProblemError::EmptyFleet);
        }

        Ok(Fleet { vehicles })
    }

    pub fn from_capacities(capacities: &[u64]) -> Result<Self, ProblemError> {
        Fleet::new(capacities.iter().copied().map(Vehicle::new).collect())
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .fold(0u64, |total, vehicle| total.saturating_add(vehicle.capacity))
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet {
            vehicles: DEFAULT_VEHICLE_CAPACITIES
                .iter()
                .copied()
                .map(Vehicle::new)
                .collect(),
        }
    }
}
