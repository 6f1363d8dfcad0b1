use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{coordinates::Coordinates, error::MatrixProviderError};

/// One cell of a matrix row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum RowElement {
    /// Travel time in seconds.
    Duration(u64),
    /// The provider could not compute this pair, with the reported status.
    Unavailable(String),
}

pub type MatrixRow = Vec<RowElement>;

/// Source of pairwise travel times.
///
/// A call returns the row for `origin` with exactly one element per
/// destination, in destination order. Per-element failures are reported as
/// [`RowElement::Unavailable`]; an `Err` means the whole row is unusable.
pub trait DistanceMatrixProvider {
    fn fetch_row(
        &self,
        origin: &Coordinates,
        destinations: &[Coordinates],
    ) -> impl Future<Output = Result<MatrixRow, MatrixProviderError>> + Send;
}
