//! In-process full mesh of rendezvous channels.
//!
//! [`ChannelMesh::connect`] wires every ordered pair of workers with a
//! dedicated zero-capacity crossbeam channel and hands back one
//! [`MeshEndpoint`] per worker. Zero capacity gives rendezvous semantics:
//! a send completes only when the matching receive runs, which is exactly
//! the blocking-transport contract the engine's protocol orders are
//! proven deadlock-free against.

use crossbeam_channel::{bounded, Receiver, Sender};
use smog_core::Rank;

use crate::error::CommError;
use crate::message::Message;
use crate::transport::Transport;

/// Factory for in-process worker meshes.
pub struct ChannelMesh;

impl ChannelMesh {
    /// Build a fully-connected mesh for `workers` workers.
    ///
    /// Returns one endpoint per rank, in rank order. Endpoints are `Send`
    /// and are typically moved into one thread each. Dropping an endpoint
    /// disconnects its channels; peers then observe
    /// [`CommError::Disconnected`] on any further traffic with it.
    pub fn connect(workers: usize) -> Vec<MeshEndpoint> {
        let mut senders: Vec<Vec<Option<Sender<Message>>>> = (0..workers)
            .map(|_| (0..workers).map(|_| None).collect())
            .collect();
        let mut receivers: Vec<Vec<Option<Receiver<Message>>>> = (0..workers)
            .map(|_| (0..workers).map(|_| None).collect())
            .collect();

        for from in 0..workers {
            for to in 0..workers {
                if from == to {
                    continue;
                }
                // Zero capacity: rendezvous on every message.
                let (tx, rx) = bounded(0);
                senders[from][to] = Some(tx);
                receivers[to][from] = Some(rx);
            }
        }

        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (tx, rx))| MeshEndpoint {
                rank: Rank(rank),
                workers,
                senders: tx,
                receivers: rx,
            })
            .collect()
    }
}

/// One worker's handle into a [`ChannelMesh`].
pub struct MeshEndpoint {
    rank: Rank,
    workers: usize,
    /// Outgoing channels, indexed by peer rank (`None` at own rank).
    senders: Vec<Option<Sender<Message>>>,
    /// Incoming channels, indexed by peer rank (`None` at own rank).
    receivers: Vec<Option<Receiver<Message>>>,
}

impl MeshEndpoint {
    fn sender(&self, to: Rank) -> Result<&Sender<Message>, CommError> {
        match self.senders.get(to.0) {
            None => Err(CommError::UnknownPeer {
                peer: to,
                workers: self.workers,
            }),
            Some(None) => Err(CommError::SelfAddressed { rank: self.rank }),
            Some(Some(tx)) => Ok(tx),
        }
    }

    fn receiver(&self, from: Rank) -> Result<&Receiver<Message>, CommError> {
        match self.receivers.get(from.0) {
            None => Err(CommError::UnknownPeer {
                peer: from,
                workers: self.workers,
            }),
            Some(None) => Err(CommError::SelfAddressed { rank: self.rank }),
            Some(Some(rx)) => Ok(rx),
        }
    }
}

impl Transport for MeshEndpoint {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn send(&self, to: Rank, message: Message) -> Result<(), CommError> {
        self.sender(to)?
            .send(message)
            .map_err(|_| CommError::Disconnected { peer: to })
    }

    fn recv(&self, from: Rank) -> Result<Message, CommError> {
        self.receiver(from)?
            .recv()
            .map_err(|_| CommError::Disconnected { peer: from })
    }
}

impl std::fmt::Debug for MeshEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshEndpoint")
            .field("rank", &self.rank)
            .field("workers", &self.workers)
            .finish()
    }
}
