//! Blocking point-to-point transport for smog worker sets.
//!
//! Workers coordinate exclusively through synchronous message passing:
//! every send blocks until the matching receive, every receive blocks
//! until a message arrives, and delivery between a pair of workers is
//! ordered and lossless. The engine's scatter, exchange, and gather
//! protocols are written against the [`Transport`] trait; the only
//! implementation shipped here is [`ChannelMesh`], a full in-process mesh
//! of rendezvous channels connecting one endpoint per worker thread.
//!
//! Transport failure is fatal by design: a disconnected peer surfaces as
//! [`CommError::Disconnected`] and the run aborts. There is no retry
//! policy and no redundancy on top of the channel guarantees.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod mesh;
pub mod message;
pub mod transport;

pub use error::CommError;
pub use mesh::{ChannelMesh, MeshEndpoint};
pub use message::{Layer, Message};
pub use transport::Transport;
