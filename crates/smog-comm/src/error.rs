//! Error types for the transport layer.

use smog_core::Rank;
use std::fmt;

/// Errors from point-to-point sends, receives, and frame decoding.
///
/// All of these are fatal to a run: the protocols assume a reliable,
/// ordered transport and add no recovery on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommError {
    /// The peer's endpoint was dropped (its worker is gone).
    Disconnected {
        /// The unreachable peer.
        peer: Rank,
    },
    /// A worker addressed a message to itself.
    SelfAddressed {
        /// The worker's own rank.
        rank: Rank,
    },
    /// The addressed rank is outside the worker set.
    UnknownPeer {
        /// The offending rank.
        peer: Rank,
        /// Size of the worker set.
        workers: usize,
    },
    /// A received frame was not the kind the protocol expected.
    UnexpectedMessage {
        /// What the protocol step expected.
        expected: &'static str,
        /// What actually arrived.
        got: &'static str,
    },
    /// A received row had the wrong length.
    RowLengthMismatch {
        /// Expected row length (the grid dimension).
        expected: usize,
        /// Length of the received row.
        got: usize,
    },
}

impl fmt::Display for CommError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { peer } => write!(f, "peer {peer} disconnected"),
            Self::SelfAddressed { rank } => {
                write!(f, "worker {rank} addressed a message to itself")
            }
            Self::UnknownPeer { peer, workers } => {
                write!(f, "rank {peer} outside worker set of {workers}")
            }
            Self::UnexpectedMessage { expected, got } => {
                write!(f, "expected {expected} frame, got {got}")
            }
            Self::RowLengthMismatch { expected, got } => {
                write!(f, "received row of length {got}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for CommError {}
