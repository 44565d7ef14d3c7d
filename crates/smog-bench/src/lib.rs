//! Shared fixtures for the smog benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use smog_comm::ChannelMesh;
use smog_core::Rank;
use smog_engine::{StencilWorld, WorkerConfig};
use smog_grid::FullGrid;
use smog_test_utils::{random_board, SmogRules};

/// A distributed, ready-to-step single-worker world over a seeded
/// random board.
pub fn solo_world(size: usize, seed: u64) -> StencilWorld {
    let mut endpoints = ChannelMesh::connect(1);
    let mut world = StencilWorld::new(WorkerConfig {
        size,
        rank: Rank(0),
        workers: 1,
        comm: Box::new(endpoints.remove(0)),
        rules: Box::new(SmogRules::default()),
        initial: Some(random_board(seed, size, 0.4, 150)),
    })
    .expect("valid bench config");
    world.distribute().expect("distribute");
    world
}

/// A seeded random board for distribution benchmarks.
pub fn bench_board(size: usize, seed: u64) -> FullGrid {
    random_board(seed, size, 0.4, 150)
}
