//! Error types for the stencil worker.

use smog_comm::CommError;
use smog_core::{PartitionError, Rank, RowRange};
use smog_grid::GridError;
use std::error::Error;
use std::fmt;

/// Errors from distribution, stepping, and aggregation.
///
/// Transport and protocol failures are fatal: there is no partial-step
/// retry, so a world that returned an error is not stepped further.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// An operation required a band, but `distribute()` has not run.
    NotDistributed,
    /// `distribute()` was called a second time.
    AlreadyDistributed,
    /// A send or receive failed, or a frame failed to decode.
    Comm(CommError),
    /// Band storage rejected received data.
    Grid(GridError),
    /// A band received over the wire was malformed.
    InvalidBand(PartitionError),
    /// A worker announced a band that disagrees with the root's plan.
    BandMismatch {
        /// The worker whose announcement disagreed.
        peer: Rank,
        /// The band the plan assigns to that worker.
        expected: RowRange,
        /// The band the worker announced.
        got: RowRange,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDistributed => write!(f, "worker has no band yet: distribute() has not run"),
            Self::AlreadyDistributed => write!(f, "distribute() may only run once"),
            Self::Comm(e) => write!(f, "transport: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::InvalidBand(e) => write!(f, "received band: {e}"),
            Self::BandMismatch {
                peer,
                expected,
                got,
            } => {
                write!(
                    f,
                    "worker {peer} announced band {got}, plan assigns {expected}"
                )
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Comm(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::InvalidBand(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommError> for StepError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PartitionError> for StepError {
    fn from(e: PartitionError) -> Self {
        Self::InvalidBand(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_the_peer_on_band_mismatch() {
        let err = StepError::BandMismatch {
            peer: Rank(2),
            expected: RowRange { first: 5, last: 9 },
            got: RowRange { first: 4, last: 9 },
        };
        let msg = format!("{err}");
        assert!(msg.contains("worker 2"));
        assert!(msg.contains("[4, 9)"));
        assert!(msg.contains("[5, 9)"));
    }

    #[test]
    fn comm_errors_wrap_with_source() {
        let err = StepError::from(CommError::Disconnected { peer: Rank(1) });
        assert!(err.source().is_some());
        assert!(format!("{err}").contains("disconnected"));
    }
}
