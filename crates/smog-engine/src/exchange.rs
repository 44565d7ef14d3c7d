//! Ghost-row exchange between row-adjacent workers.
//!
//! Runs once per step, before any cell update. The four phases execute
//! in a fixed order on every worker; under a blocking (rendezvous)
//! transport the order is deadlock-free because the first band starts at
//! phase 2 and the last band starts phase 4 early, unwinding the send
//! chains from each end of the rank order.
//!
//! Phases (per worker):
//! 1. send own first owned row to the previous rank, unless first band
//! 2. receive the next rank's first owned row into ghost-high, unless last
//! 3. send own last owned row to the next rank, unless last band
//! 4. receive the previous rank's last owned row into ghost-low, unless first
//!
//! Each phase moves both layers, cells before pollution, so four row
//! messages flow per directional edge per step.

use smog_comm::{Layer, Message, Transport};
use smog_core::Rank;
use smog_grid::BandGrid;

use crate::error::StepError;

/// Exchange ghost rows with the row-adjacent neighbours.
///
/// Blocks until all required neighbour data has arrived; on return, the
/// band's ghost rows hold the neighbours' pre-step border rows and the
/// stencil may read a consistent snapshot. The caller skips this entirely
/// for single-worker runs.
pub(crate) fn exchange_borders(
    grid: &mut BandGrid,
    comm: &dyn Transport,
) -> Result<(), StepError> {
    let rank = comm.rank();
    let workers = comm.workers();
    let size = grid.cols();
    let first_band = rank.0 == 0;
    let last_band = rank.0 + 1 == workers;

    // Phase 1: first owned row flows upward.
    if !first_band {
        let prev = Rank(rank.0 - 1);
        comm.send(
            prev,
            Message::Row {
                layer: Layer::Cells,
                values: grid.cells().first_owned().to_vec(),
            },
        )?;
        comm.send(
            prev,
            Message::Row {
                layer: Layer::Pollution,
                values: grid.pollution().first_owned().to_vec(),
            },
        )?;
    }

    // Phase 2: the next band's first owned row becomes our ghost-high.
    if !last_band {
        let next = Rank(rank.0 + 1);
        let cells = comm.recv(next)?.expect_row(Layer::Cells, size)?;
        let pollution = comm.recv(next)?.expect_row(Layer::Pollution, size)?;
        grid.cells_mut().set_ghost_high(&cells)?;
        grid.pollution_mut().set_ghost_high(&pollution)?;
    }

    // Phase 3: last owned row flows downward.
    if !last_band {
        let next = Rank(rank.0 + 1);
        comm.send(
            next,
            Message::Row {
                layer: Layer::Cells,
                values: grid.cells().last_owned().to_vec(),
            },
        )?;
        comm.send(
            next,
            Message::Row {
                layer: Layer::Pollution,
                values: grid.pollution().last_owned().to_vec(),
            },
        )?;
    }

    // Phase 4: the previous band's last owned row becomes our ghost-low.
    if !first_band {
        let prev = Rank(rank.0 - 1);
        let cells = comm.recv(prev)?.expect_row(Layer::Cells, size)?;
        let pollution = comm.recv(prev)?.expect_row(Layer::Pollution, size)?;
        grid.cells_mut().set_ghost_low(&cells)?;
        grid.pollution_mut().set_ghost_low(&pollution)?;
    }

    Ok(())
}

/// Border rows this rank sends and receives per exchange (both layers).
///
/// Purely a function of the rank's position in the band order; used for
/// the traffic counters in the step metrics.
pub(crate) fn edge_traffic(rank: Rank, workers: usize) -> (u64, u64) {
    let mut sent = 0;
    let mut received = 0;
    if workers > 1 {
        if rank.0 > 0 {
            sent += 2; // phase 1
            received += 2; // phase 4
        }
        if rank.0 + 1 < workers {
            received += 2; // phase 2
            sent += 2; // phase 3
        }
    }
    (sent, received)
}
