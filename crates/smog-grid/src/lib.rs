//! Grid storage for the smog stencil engine.
//!
//! Two storage shapes live here:
//!
//! - [`FullGrid`]: the root's `size × size` view of both layers, used for
//!   initialisation and post-run aggregation.
//! - [`BandGrid`]: a worker's slice of the grid, one contiguous row band
//!   plus one ghost row on each side, double-buffered per layer.
//!
//! Double buffering follows an arena-with-index pattern: each
//! [`RowBand`] owns two identically-shaped slots and an active index
//! toggled after every step. Reads during a step see only the active
//! slot; writes land in the staging slot. There are no pointer swaps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod band;
pub mod error;
pub mod full;

pub use band::{BandGrid, CurrentRows, NextRows, RowBand};
pub use error::GridError;
pub use full::FullGrid;
