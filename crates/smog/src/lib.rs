//! Smog: a band-decomposed cellular-automaton stencil engine.
//!
//! A `size × size` grid of cells, each carrying a discrete life state
//! and a pollution value, evolves under injected transition rules.
//! The grid is split into contiguous row bands, one per worker; workers
//! exchange ghost rows every step over a blocking point-to-point
//! transport, and the root scatters the initial board and gathers the
//! final one. Multi-worker runs are bit-identical to single-worker runs.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! smog sub-crates. For most users, adding `smog` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use smog::prelude::*;
//!
//! // Rules under which nothing ever changes.
//! struct Still;
//! impl Rules for Still {
//!     fn cell_next_state(&self, state: i32, _live: u32, _pollution: i32) -> i32 {
//!         state
//!     }
//!     fn next_pollution(&self, _state: i32, pollution: i32, _o: i32, _d: i32) -> i32 {
//!         pollution
//!     }
//!     fn max_pollution(&self) -> i32 {
//!         1
//!     }
//! }
//!
//! // An 8x8 board with one live cell, run by a single worker.
//! let mut board = FullGrid::new(8).unwrap();
//! board.set_cell(3, 3, 1);
//!
//! let mut endpoints = ChannelMesh::connect(1);
//! let mut world = StencilWorld::new(WorkerConfig {
//!     size: 8,
//!     rank: Rank(0),
//!     workers: 1,
//!     comm: Box::new(endpoints.remove(0)),
//!     rules: Box::new(Still),
//!     initial: Some(board),
//! })
//! .unwrap();
//!
//! world.distribute().unwrap();
//! world.step().unwrap();
//! assert_eq!(world.living_cells().unwrap(), Some(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `smog-core` | Ranks, step IDs, row bands, the `Rules` trait |
//! | [`grid`] | `smog-grid` | Band and full-grid storage |
//! | [`comm`] | `smog-comm` | Transport trait, message frames, channel mesh |
//! | [`engine`] | `smog-engine` | The stencil worker and its configuration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the rules strategy (`smog-core`).
///
/// Contains [`types::Rank`], [`types::StepId`], [`types::RowRange`],
/// [`types::band_plan`], and the [`types::Rules`] trait.
pub use smog_core as types;

/// Band and full-grid storage (`smog-grid`).
///
/// [`grid::BandGrid`] is the double-buffered worker-local slice;
/// [`grid::FullGrid`] is the root's whole-board view.
pub use smog_grid as grid;

/// Blocking point-to-point transport (`smog-comm`).
///
/// The [`comm::Transport`] trait is the seam between the engine and the
/// message plumbing; [`comm::ChannelMesh`] is the in-process rendezvous
/// implementation.
pub use smog_comm as comm;

/// The stencil worker (`smog-engine`).
///
/// [`engine::StencilWorld`] drives distribution, stepping, and
/// aggregation for one worker.
pub use smog_engine as engine;

/// Common imports for typical smog usage.
///
/// ```rust
/// use smog::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use smog_core::{band_plan, PartitionError, Rank, RowRange, Rules, StepId};

    // Grid storage
    pub use smog_grid::{BandGrid, FullGrid, GridError};

    // Transport
    pub use smog_comm::{ChannelMesh, CommError, Layer, MeshEndpoint, Message, Transport};

    // Engine
    pub use smog_engine::{ConfigError, StencilWorld, StepError, StepMetrics, WorkerConfig};
}
