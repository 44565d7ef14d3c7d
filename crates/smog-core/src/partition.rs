//! Row-band domain decomposition.
//!
//! The grid is split into contiguous horizontal bands, one per worker,
//! ordered by rank. Row 0 and row `size - 1` are fixed boundary rows and
//! belong to no band; the bands tile the interior rows exactly once.

use std::fmt;

/// A half-open range of grid rows `[first, last)` owned by one worker.
///
/// A well-formed band satisfies `0 < first < last < size`: it is
/// non-empty and never includes the fixed boundary rows. The rows
/// immediately outside the range (`first - 1` and `last`) are the band's
/// ghost rows, read during stencil computation but never owned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    /// First owned row (inclusive).
    pub first: usize,
    /// One past the last owned row (exclusive).
    pub last: usize,
}

impl RowRange {
    /// Number of owned rows.
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    /// Whether the range owns no rows.
    pub fn is_empty(&self) -> bool {
        self.last <= self.first
    }

    /// Whether `row` is owned by this range.
    pub fn contains(&self, row: usize) -> bool {
        self.first <= row && row < self.last
    }

    /// The padded range `[first - 1, last + 1)`: owned rows plus the two
    /// ghost rows. This is the row span a worker actually stores, and the
    /// span the scatter ships.
    pub fn padded(&self) -> (usize, usize) {
        (self.first - 1, self.last + 1)
    }

    /// Check well-formedness against a grid dimension.
    ///
    /// Used to screen ranges received over the wire before any storage is
    /// sized from them.
    pub fn validate(&self, size: usize) -> Result<(), PartitionError> {
        if self.is_empty() {
            return Err(PartitionError::EmptyBand { range: *self });
        }
        if self.first == 0 || self.last >= size {
            return Err(PartitionError::OutsideInterior { range: *self, size });
        }
        Ok(())
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.first, self.last)
    }
}

/// Errors from row-range validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// The range owns no rows (`last <= first`).
    EmptyBand {
        /// The offending range.
        range: RowRange,
    },
    /// The range touches a fixed boundary row or exceeds the grid.
    OutsideInterior {
        /// The offending range.
        range: RowRange,
        /// The grid dimension the range was checked against.
        size: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBand { range } => write!(f, "band {range} owns no rows"),
            Self::OutsideInterior { range, size } => {
                write!(f, "band {range} leaves the interior of a {size}-row grid")
            }
        }
    }
}

impl std::error::Error for PartitionError {}

/// Compute the row-band plan for `workers` workers over a `size × size` grid.
///
/// Worker `i` is assigned `[i * rows_per, (i + 1) * rows_per)` where
/// `rows_per = size / workers`. Worker 0's first row is clamped to 1 and
/// the last worker's end is clamped to `size - 1`, so the division
/// remainder is absorbed at the tail and the bands tile the interior rows
/// `1 ..= size - 2` exactly once.
///
/// # Preconditions
///
/// `workers >= 1`, `size >= 3`, and for `workers > 1`,
/// `size / workers >= 2` (so the clamped outer bands stay non-empty).
/// These are NOT checked here; violating them yields ranges that fail
/// [`RowRange::validate`]. Configuration validation rejects such shapes
/// before a plan is ever computed in a running world.
pub fn band_plan(size: usize, workers: usize) -> Vec<RowRange> {
    let rows_per = size / workers;
    let mut plan = Vec::with_capacity(workers);
    for w in 0..workers {
        let first = if w == 0 { 1 } else { w * rows_per };
        let last = if w == workers - 1 {
            size - 1
        } else {
            (w + 1) * rows_per
        };
        plan.push(RowRange { first, last });
    }
    plan
}
