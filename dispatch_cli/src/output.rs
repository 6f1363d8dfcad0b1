use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use dispatch_optimizer::{
    problem::{customer::Customer, distance_matrix::DistanceMatrix},
    route_extractor::VehicleRoute,
};
use jiff::SignedDuration;

pub fn format_seconds(seconds: u64) -> String {
    format!("{:#}", SignedDuration::from_secs(seconds as i64))
}

pub fn routes_table(routes: &[VehicleRoute]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Vehicle",
        "Load",
        "Travel time",
        "Stops",
    ]);

    for route in routes {
        let stops = route
            .stops
            .iter()
            .map(|stop| {
                format!(
                    "{} (+{}, due {})",
                    stop.name,
                    format_seconds(stop.arrival),
                    stop.deadline
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            Cell::new(route.vehicle).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}/{}", route.load, route.capacity)),
            Cell::new(format_seconds(route.travel_time)),
            Cell::new(if stops.is_empty() { "-".to_string() } else { stops }),
        ]);
    }

    table
}

pub fn customers_table(customers: &[Customer]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Location", "Weight", "Deadline"]);

    for customer in customers {
        table.add_row(vec![
            Cell::new(customer.name()),
            Cell::new(customer.location()),
            Cell::new(customer.weight()).set_alignment(CellAlignment::Right),
            Cell::new(customer.deadline()),
        ]);
    }

    table
}

/// `labels[i]` names row and column `i`.
pub fn matrix_table(labels: &[String], matrix: &DistanceMatrix) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(
        std::iter::once(String::new())
            .chain(labels.iter().cloned())
            .collect::<Vec<_>>(),
    );

    for (label, row) in labels.iter().zip(matrix.rows()) {
        table.add_row(
            std::iter::once(Cell::new(label)).chain(
                row.iter()
                    .map(|cost| Cell::new(cost).set_alignment(CellAlignment::Right)),
            ),
        );
    }

    table
}
