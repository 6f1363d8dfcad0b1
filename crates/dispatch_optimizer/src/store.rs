use std::sync::Arc;

use dispatch_matrix_providers::coordinates::Coordinates;
use fxhash::FxHashSet;
use parking_lot::RwLock;
use tracing::debug;

use crate::problem::customer::Customer;

/// Process-wide customer list, kept in insertion order.
///
/// Solves work on a [`CustomerStore::snapshot`] and never write back.
#[derive(Debug, Default, Clone)]
pub struct CustomerStore {
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl CustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, customer: Customer) {
        debug!("Adding customer {}", customer.name());
        self.customers.write().push(customer);
    }

    pub fn snapshot(&self) -> Vec<Customer> {
        self.customers.read().clone()
    }

    pub fn len(&self) -> usize {
        self.customers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.read().is_empty()
    }

    /// Removes every customer, returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut customers = self.customers.write();
        let removed = customers.len();
        customers.clear();
        removed
    }

    /// Removes every customer located at one of `coordinates`.
    pub fn remove_by_coordinates(&self, coordinates: &[Coordinates]) -> usize {
        let keys: FxHashSet<(u64, u64)> = coordinates.iter().map(Coordinates::key).collect();

        let mut customers = self.customers.write();
        let before = customers.len();
        customers.retain(|customer| !keys.contains(&customer.location().key()));
        let removed = before - customers.len();

        debug!("Removed {} customers", removed);
        removed
    }
}
