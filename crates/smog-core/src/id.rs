//! Strongly-typed identifiers for workers and simulation steps.

use std::fmt;

/// Identifies one worker in a fixed cooperating set.
///
/// Ranks are dense: a run with `P` workers uses ranks `0..P`, and rank 0
/// is always the root (the scatter/gather coordinator). Row bands are
/// ordered by rank, so rank `r`'s row-adjacent neighbours are exactly
/// `r - 1` and `r + 1` where those exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub usize);

impl Rank {
    /// The root rank, owner of the full grid before scatter and after gather.
    pub const ROOT: Rank = Rank(0);

    /// Whether this rank is the root.
    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Rank {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Incremented each time a worker completes one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
