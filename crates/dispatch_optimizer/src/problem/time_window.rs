use serde::Serialize;

/// Bounds, in seconds from the route start, on the time a node may be reached.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    earliest: u64,
    latest: u64,
}

impl TimeWindow {
    pub fn new(earliest: u64, latest: u64) -> Self {
        TimeWindow { earliest, latest }
    }

    /// A deadline only window, `[0, latest]`.
    pub fn until(latest: u64) -> Self {
        TimeWindow { earliest: 0, latest }
    }

    pub fn earliest(&self) -> u64 {
        self.earliest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Whether service can start at `time`, both bounds included.
    pub fn is_satisfied(&self, time: u64) -> bool {
        (self.earliest..=self.latest).contains(&time)
    }
}
