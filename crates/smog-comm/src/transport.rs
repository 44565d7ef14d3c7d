//! The [`Transport`] trait.

use crate::error::CommError;
use crate::message::Message;
use smog_core::Rank;

/// Blocking point-to-point message passing within a fixed worker set.
///
/// # Contract
///
/// - `send` blocks until the addressed peer performs the matching `recv`;
///   `recv` blocks until the named peer's message arrives. Delivery
///   between any ordered pair of workers is FIFO and lossless.
/// - The worker set is fixed for the lifetime of the transport; ranks are
///   dense in `0..workers()`.
/// - A failed send or receive means the peer is gone. That is fatal to
///   the run; callers propagate the error and abort.
///
/// The protocols built on top rely on the blocking semantics for their
/// step barrier: no explicit barrier primitive exists anywhere, the
/// mutual send/receive dependency chain is the barrier.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores its handle as
/// `Box<dyn Transport>`.
pub trait Transport: Send {
    /// This worker's rank.
    fn rank(&self) -> Rank;

    /// Number of workers in the set.
    fn workers(&self) -> usize;

    /// Send `message` to `to`, blocking until it is received.
    fn send(&self, to: Rank, message: Message) -> Result<(), CommError>;

    /// Receive the next message from `from`, blocking until one arrives.
    fn recv(&self, from: Rank) -> Result<Message, CommError>;
}
