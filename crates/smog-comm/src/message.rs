//! Typed message frames.
//!
//! The wire vocabulary is deliberately tiny: a band assignment, or one
//! row of one layer. Each protocol step knows exactly which frame it is
//! waiting for; the `expect_*` decoders turn a wrong frame into a typed
//! error instead of silently misinterpreting bytes.

use crate::error::CommError;
use smog_core::RowRange;
use std::fmt;

/// Which grid layer a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Discrete life states.
    Cells,
    /// Pollution values.
    Pollution,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cells => write!(f, "cells"),
            Self::Pollution => write!(f, "pollution"),
        }
    }
}

/// One frame of the scatter/exchange/gather protocols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// A band assignment (scatter) or band announcement (gather).
    Band(RowRange),
    /// One full grid row of one layer.
    Row {
        /// The layer the row belongs to.
        layer: Layer,
        /// The row values, exactly `size` of them.
        values: Vec<i32>,
    },
}

impl Message {
    /// Frame kind, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Band(_) => "band",
            Self::Row {
                layer: Layer::Cells,
                ..
            } => "cells row",
            Self::Row {
                layer: Layer::Pollution,
                ..
            } => "pollution row",
        }
    }

    /// Decode this frame as a band assignment.
    pub fn expect_band(self) -> Result<RowRange, CommError> {
        match self {
            Self::Band(range) => Ok(range),
            other => Err(CommError::UnexpectedMessage {
                expected: "band",
                got: other.kind(),
            }),
        }
    }

    /// Decode this frame as a row of `layer` with exactly `len` values.
    pub fn expect_row(self, layer: Layer, len: usize) -> Result<Vec<i32>, CommError> {
        match self {
            Self::Row {
                layer: got_layer,
                values,
            } if got_layer == layer => {
                if values.len() != len {
                    return Err(CommError::RowLengthMismatch {
                        expected: len,
                        got: values.len(),
                    });
                }
                Ok(values)
            }
            other => Err(CommError::UnexpectedMessage {
                expected: match layer {
                    Layer::Cells => "cells row",
                    Layer::Pollution => "pollution row",
                },
                got: other.kind(),
            }),
        }
    }
}
