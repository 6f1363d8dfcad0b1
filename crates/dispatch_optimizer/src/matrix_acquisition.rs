use dispatch_matrix_providers::{
    coordinates::Coordinates,
    distance_matrix_provider::{DistanceMatrixProvider, RowElement},
    error::MatrixProviderError,
};
use tracing::{debug, instrument, warn};

use crate::problem::distance_matrix::{Cost, DistanceMatrix, UNREACHABLE_COST};

/// Builds the square travel time matrix over `locations`, one provider call
/// per origin.
///
/// Cells the provider could not compute are replaced with
/// [`UNREACHABLE_COST`]. Any failed row fails the whole matrix.
#[instrument(skip_all, fields(locations = locations.len()), level = "debug")]
pub async fn fetch_distance_matrix<P>(
    provider: &P,
    locations: &[Coordinates],
) -> Result<DistanceMatrix, MatrixProviderError>
where
    P: DistanceMatrixProvider,
{
    let mut rows: Vec<Vec<Cost>> = Vec::with_capacity(locations.len());

    for (row_index, origin) in locations.iter().enumerate() {
        let row = provider.fetch_row(origin, locations).await?;

        if row.len() != locations.len() {
            return Err(MatrixProviderError::IncompleteResponse(format!(
                "row {} has {} elements, expected {}",
                row_index,
                row.len(),
                locations.len()
            )));
        }

        rows.push(
            row.into_iter()
                .enumerate()
                .map(|(column, element)| match element {
                    RowElement::Duration(seconds) => seconds,
                    RowElement::Unavailable(status) => {
                        warn!(
                            "No travel time from {} to {} ({}), using {}",
                            origin, locations[column], status, UNREACHABLE_COST
                        );
                        UNREACHABLE_COST
                    }
                })
                .collect(),
        );
    }

    debug!("Fetched {}x{} matrix", rows.len(), locations.len());

    DistanceMatrix::from_rows(rows, locations.len())
        .map_err(|err| MatrixProviderError::IncompleteResponse(err.to_string()))
}
