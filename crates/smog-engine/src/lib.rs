//! Band-decomposed stencil worker for smog simulations.
//!
//! Each cooperating worker runs one [`StencilWorld`]: rank 0 (the root)
//! additionally coordinates the initial scatter and the final gather.
//! A step is exchange-then-compute-then-swap; the blocking border
//! exchange doubles as the inter-worker step barrier, so no explicit
//! barrier primitive exists anywhere in the engine.
//!
//! The life cycle is:
//! 1. [`StencilWorld::new`] validates a [`WorkerConfig`]
//! 2. [`StencilWorld::distribute`] runs the scatter (exactly once)
//! 3. [`StencilWorld::step`] advances one generation (any number of times)
//! 4. queries ([`StencilWorld::living_cells`],
//!    [`StencilWorld::average_pollution`]) lazily gather results to the root

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod world;

mod exchange;
mod gather;
mod scatter;
mod step;

pub use config::{ConfigError, WorkerConfig};
pub use error::StepError;
pub use metrics::StepMetrics;
pub use world::StencilWorld;
