use fixedbitset::FixedBitSet;
use tracing::{debug, info};

use crate::problem::customer::Customer;

/// Result of fitting the customers into the fleet capacity.
///
/// Both lists keep the order the customers were submitted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Admission {
    pub admitted: Vec<Customer>,
    pub rejected: Vec<Customer>,
}

impl Admission {
    pub fn total_weight(&self) -> u64 {
        total_weight(&self.admitted)
    }
}

fn total_weight(customers: &[Customer]) -> u64 {
    customers
        .iter()
        .fold(0u64, |total, customer| total.saturating_add(customer.weight()))
}

/// Drops customers until the total demand fits in `total_capacity`.
///
/// Nothing is dropped when everything fits. Otherwise customers are
/// considered earliest deadline first and admitted while their weight fits in
/// the remaining capacity; a customer that overflows is skipped and the scan
/// continues with the next one. Among equal deadlines the customer submitted
/// last is considered first.
///
/// Customers are identified by position, duplicates are handled independently.
pub fn filter_by_capacity(customers: &[Customer], total_capacity: u64) -> Admission {
    let demand = total_weight(customers);
    if demand <= total_capacity {
        debug!(
            "Demand {} fits in capacity {}, admitting all {} customers",
            demand,
            total_capacity,
            customers.len()
        );
        return Admission {
            admitted: customers.to_vec(),
            rejected: vec![],
        };
    }

    // Stable sort on latest deadline first, scanned backwards.
    let mut order: Vec<usize> = (0..customers.len()).collect();
    order.sort_by(|&a, &b| customers[b].deadline().cmp(&customers[a].deadline()));

    let mut selected = FixedBitSet::with_capacity(customers.len());
    let mut remaining = total_capacity;
    for &index in order.iter().rev() {
        let weight = customers[index].weight();
        if weight <= remaining {
            remaining -= weight;
            selected.insert(index);
        }
    }

    let (admitted, rejected): (Vec<_>, Vec<_>) = customers
        .iter()
        .enumerate()
        .partition(|(index, _)| selected.contains(*index));

    let admission = Admission {
        admitted: admitted.into_iter().map(|(_, c)| c.clone()).collect(),
        rejected: rejected.into_iter().map(|(_, c)| c.clone()).collect(),
    };

    info!(
        "Demand {} exceeds capacity {}: admitted {} customers ({}), rejected {}",
        demand,
        total_capacity,
        admission.admitted.len(),
        admission.total_weight(),
        admission.rejected.len()
    );

    admission
}
