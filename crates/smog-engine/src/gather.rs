//! Final collection of the board (workers to root).
//!
//! Each non-root worker announces its band and ships its owned rows
//! (never the ghost rows); the root overwrites the rows it does not own,
//! having first written its own band back. The root validates every
//! announced band against the plan before sizing any writes from it.

use smog_comm::{Layer, Message, Transport};
use smog_core::{Rank, RowRange};
use smog_grid::{BandGrid, FullGrid};

use crate::error::StepError;

/// Root side: reassemble the full grid from every worker's owned rows.
pub(crate) fn gather_root(
    full: &mut FullGrid,
    own: &BandGrid,
    plan: &[RowRange],
    comm: &dyn Transport,
) -> Result<(), StepError> {
    // Self special-case first: the root is a normal compute worker too.
    let range = own.range();
    for row in range.first..range.last {
        full.write_cells_row(row, own.cells().row(row)?)?;
        full.write_pollution_row(row, own.pollution().row(row)?)?;
    }

    let size = full.size();
    for (worker, expected) in plan.iter().enumerate().skip(1) {
        let from = Rank(worker);
        let got = comm.recv(from)?.expect_band()?;
        if got != *expected {
            return Err(StepError::BandMismatch {
                peer: from,
                expected: *expected,
                got,
            });
        }
        for row in got.first..got.last {
            let cells = comm.recv(from)?.expect_row(Layer::Cells, size)?;
            full.write_cells_row(row, &cells)?;
            let pollution = comm.recv(from)?.expect_row(Layer::Pollution, size)?;
            full.write_pollution_row(row, &pollution)?;
        }
    }
    Ok(())
}

/// Worker side: announce our band and ship the owned rows to the root.
pub(crate) fn send_band(band: &BandGrid, comm: &dyn Transport) -> Result<(), StepError> {
    let range = band.range();
    comm.send(Rank::ROOT, Message::Band(range))?;
    for row in range.first..range.last {
        comm.send(
            Rank::ROOT,
            Message::Row {
                layer: Layer::Cells,
                values: band.cells().row(row)?.to_vec(),
            },
        )?;
        comm.send(
            Rank::ROOT,
            Message::Row {
                layer: Layer::Pollution,
                values: band.pollution().row(row)?.to_vec(),
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scatter::{receive_band, scatter_root};
    use smog_comm::ChannelMesh;
    use smog_core::band_plan;
    use std::thread;

    fn numbered_grid(size: usize) -> FullGrid {
        let mut grid = FullGrid::new(size).unwrap();
        for row in 0..size {
            for col in 0..size {
                grid.set_cell(row, col, (row * size + col) as i32);
                grid.set_pollution(row, col, -((row * size + col) as i32));
            }
        }
        grid
    }

    #[test]
    fn scatter_then_gather_reproduces_the_board() {
        let size = 10;
        let workers = 3;
        let plan = band_plan(size, workers);
        let original = numbered_grid(size);

        let mut endpoints = ChannelMesh::connect(workers);
        let ep2 = endpoints.pop().unwrap();
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let h1 = thread::spawn(move || {
            let band = receive_band(size, &ep1).unwrap();
            send_band(&band, &ep1).unwrap();
        });
        let h2 = thread::spawn(move || {
            let band = receive_band(size, &ep2).unwrap();
            send_band(&band, &ep2).unwrap();
        });

        let mut full = original.clone();
        scatter_root(&full, &plan, &ep0).unwrap();
        let own = BandGrid::from_full(&full, plan[0]).unwrap();

        // Wipe the interior to prove the gather restores every owned row.
        for row in 1..size - 1 {
            full.write_cells_row(row, &vec![0; size]).unwrap();
            full.write_pollution_row(row, &vec![0; size]).unwrap();
        }

        gather_root(&mut full, &own, &plan, &ep0).unwrap();
        h1.join().unwrap();
        h2.join().unwrap();

        assert_eq!(full, original);
    }

    #[test]
    fn gather_rejects_band_disagreeing_with_plan() {
        let size = 8;
        let plan = band_plan(size, 2);

        let mut endpoints = ChannelMesh::connect(2);
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let handle = thread::spawn(move || {
            ep1.send(
                Rank::ROOT,
                Message::Band(RowRange { first: 2, last: 7 }),
            )
            .unwrap();
        });

        let mut full = numbered_grid(size);
        let own = BandGrid::from_full(&full, plan[0]).unwrap();
        let result = gather_root(&mut full, &own, &plan, &ep0);
        assert!(matches!(
            result,
            Err(StepError::BandMismatch {
                peer: Rank(1),
                ..
            })
        ));
        handle.join().unwrap();
    }

    #[test]
    fn send_band_ships_owned_rows_only() {
        let size = 6;
        let plan = band_plan(size, 2);

        let mut endpoints = ChannelMesh::connect(2);
        let ep1 = endpoints.pop().unwrap();
        let ep0 = endpoints.pop().unwrap();

        let full = numbered_grid(size);
        let band1 = BandGrid::from_full(&full, plan[1]).unwrap();

        let handle = thread::spawn(move || send_band(&band1, &ep1).unwrap());

        let announced = ep0.recv(Rank(1)).unwrap().expect_band().unwrap();
        assert_eq!(announced, plan[1]);
        for row in announced.first..announced.last {
            let cells = ep0
                .recv(Rank(1))
                .unwrap()
                .expect_row(Layer::Cells, size)
                .unwrap();
            assert_eq!(cells, full.cells_row(row));
            let pollution = ep0
                .recv(Rank(1))
                .unwrap()
                .expect_row(Layer::Pollution, size)
                .unwrap();
            assert_eq!(pollution, full.pollution_row(row));
        }
        // The ghost rows were not shipped: the next frame would be from a
        // finished sender, and the endpoint observes the disconnect.
        handle.join().unwrap();
        assert!(ep0.recv(Rank(1)).is_err());
    }
}
