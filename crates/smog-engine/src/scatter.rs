//! Initial distribution of the board (root to workers).
//!
//! The root sends each non-root worker its band assignment followed by
//! the padded rows `[first - 1, last + 1)` of both layers, cells before
//! pollution, one row per frame. Padding rows ride along so the
//! outermost bands' ghost rows hold the fixed boundary rows from the
//! start; nothing a non-root worker held beforehand survives.
//!
//! The root never messages itself: its own band is carved straight out
//! of the full grid.

use smog_comm::{Layer, Message, Transport};
use smog_core::{Rank, RowRange};
use smog_grid::{BandGrid, FullGrid};

use crate::error::StepError;

/// Root side: ship every non-root worker its band and padded rows.
pub(crate) fn scatter_root(
    full: &FullGrid,
    plan: &[RowRange],
    comm: &dyn Transport,
) -> Result<(), StepError> {
    for (worker, range) in plan.iter().enumerate().skip(1) {
        let to = Rank(worker);
        comm.send(to, Message::Band(*range))?;
        let (lo, hi) = range.padded();
        for row in lo..hi {
            comm.send(
                to,
                Message::Row {
                    layer: Layer::Cells,
                    values: full.cells_row(row).to_vec(),
                },
            )?;
            comm.send(
                to,
                Message::Row {
                    layer: Layer::Pollution,
                    values: full.pollution_row(row).to_vec(),
                },
            )?;
        }
    }
    Ok(())
}

/// Worker side: block until the root delivers our band, then build the
/// local grid from the padded rows.
pub(crate) fn receive_band(size: usize, comm: &dyn Transport) -> Result<BandGrid, StepError> {
    let range = comm.recv(Rank::ROOT)?.expect_band()?;
    range.validate(size)?;

    let (lo, hi) = range.padded();
    let mut cell_rows = Vec::with_capacity(hi - lo);
    let mut pollution_rows = Vec::with_capacity(hi - lo);
    for _ in lo..hi {
        cell_rows.push(comm.recv(Rank::ROOT)?.expect_row(Layer::Cells, size)?);
        pollution_rows.push(comm.recv(Rank::ROOT)?.expect_row(Layer::Pollution, size)?);
    }
    Ok(BandGrid::new(range, size, &cell_rows, &pollution_rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smog_comm::ChannelMesh;
    use smog_core::band_plan;
    use std::thread;

    fn numbered_grid(size: usize) -> FullGrid {
        let mut grid = FullGrid::new(size).unwrap();
        for row in 0..size {
            for col in 0..size {
                grid.set_cell(row, col, (row * size + col) as i32);
                grid.set_pollution(row, col, 1000 + (row * size + col) as i32);
            }
        }
        grid
    }

    #[test]
    fn workers_receive_their_padded_bands() {
        let size = 8;
        let plan = band_plan(size, 2);
        let full = numbered_grid(size);

        let mut endpoints = ChannelMesh::connect(2);
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let handle = thread::spawn(move || receive_band(size, &ep1).unwrap());
        scatter_root(&full, &plan, &ep0).unwrap();
        let band = handle.join().unwrap();

        assert_eq!(band.range(), plan[1]);
        let (lo, hi) = plan[1].padded();
        for row in lo..hi {
            assert_eq!(band.cells().row(row).unwrap(), full.cells_row(row));
            assert_eq!(band.pollution().row(row).unwrap(), full.pollution_row(row));
        }
    }

    #[test]
    fn three_worker_scatter_covers_every_band() {
        let size = 9;
        let plan = band_plan(size, 3);
        let full = numbered_grid(size);

        let mut endpoints = ChannelMesh::connect(3);
        let ep2 = endpoints.pop().unwrap();
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let h1 = thread::spawn(move || receive_band(size, &ep1).unwrap());
        let h2 = thread::spawn(move || receive_band(size, &ep2).unwrap());
        scatter_root(&full, &plan, &ep0).unwrap();

        let band1 = h1.join().unwrap();
        let band2 = h2.join().unwrap();
        assert_eq!(band1.range(), plan[1]);
        assert_eq!(band2.range(), plan[2]);
        // The last band's ghost-high is the fixed bottom boundary row.
        assert_eq!(band2.cells().row(size - 1).unwrap(), full.cells_row(size - 1));
    }

    #[test]
    fn receive_band_rejects_malformed_range() {
        let size = 8;
        let mut endpoints = ChannelMesh::connect(2);
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let handle = thread::spawn(move || receive_band(size, &ep1));
        ep0.send(Rank(1), Message::Band(RowRange { first: 0, last: 4 }))
            .unwrap();
        assert!(matches!(
            handle.join().unwrap(),
            Err(StepError::InvalidBand(_))
        ));
    }

    #[test]
    fn receive_band_rejects_wrong_frame_kind() {
        let size = 8;
        let mut endpoints = ChannelMesh::connect(2);
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let handle = thread::spawn(move || receive_band(size, &ep1));
        ep0.send(
            Rank(1),
            Message::Row {
                layer: Layer::Cells,
                values: vec![0; size],
            },
        )
        .unwrap();
        assert!(matches!(handle.join().unwrap(), Err(StepError::Comm(_))));
    }
}
