//! Double-buffered worker-band storage.
//!
//! A [`RowBand`] holds one layer (cells or pollution) of a worker's band:
//! the owned rows plus one ghost row on each side, stored twice. The two
//! slots alternate between the "current" role (readable, holds the
//! published generation) and the "staging" role (writable, receives the
//! next generation). [`RowBand::swap`] toggles the roles in O(1).
//!
//! The per-step lifecycle is:
//! 1. ghost rows are refreshed in the current slot (border exchange)
//! 2. the stencil reads current rows and writes staging rows
//!    (via [`RowBand::split_step`])
//! 3. `swap()` publishes the staging slot
//!
//! Both slots are seeded identically at construction, so rows the stencil
//! never writes (the fixed boundary rows living in the outermost ghost
//! slots, and the boundary columns of every row) keep their initial
//! values in whichever slot is active.

use crate::error::GridError;
use crate::full::FullGrid;
use smog_core::RowRange;

/// One layer of a worker's band, double-buffered.
#[derive(Clone, Debug)]
pub struct RowBand {
    range: RowRange,
    cols: usize,
    /// Two identically-shaped slots of `(range.len() + 2) * cols` values.
    slots: [Vec<i32>; 2],
    /// Index of the slot holding the published generation.
    active: usize,
}

impl RowBand {
    /// Build a band from its padded rows.
    ///
    /// `rows` must contain `range.len() + 2` rows of `cols` values each:
    /// the ghost-low row, the owned rows in order, the ghost-high row.
    /// Both slots are seeded with the same data.
    pub fn new(range: RowRange, cols: usize, rows: &[Vec<i32>]) -> Result<Self, GridError> {
        let expected = range.len() + 2;
        if rows.len() != expected {
            return Err(GridError::RowCountMismatch {
                expected,
                got: rows.len(),
            });
        }
        let mut flat = Vec::with_capacity(expected * cols);
        for row in rows {
            if row.len() != cols {
                return Err(GridError::RowLengthMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        Ok(Self {
            range,
            cols,
            slots: [flat.clone(), flat],
            active: 0,
        })
    }

    /// The owned row range (global indices).
    pub fn range(&self) -> RowRange {
        self.range
    }

    /// Column count (the grid dimension).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Offset of a global row into a slot. Valid rows span the padded
    /// range `[first - 1, last]`.
    fn offset(&self, row: usize) -> Result<usize, GridError> {
        let (lo, hi) = self.range.padded();
        if row < lo || row >= hi {
            return Err(GridError::RowOutOfBand {
                row,
                range: self.range,
            });
        }
        Ok((row - lo) * self.cols)
    }

    /// Read a row of the published generation.
    pub fn row(&self, row: usize) -> Result<&[i32], GridError> {
        let off = self.offset(row)?;
        Ok(&self.slots[self.active][off..off + self.cols])
    }

    /// The first owned row of the published generation (sent to the
    /// previous-ranked worker during exchange).
    pub fn first_owned(&self) -> &[i32] {
        // Local layout: ghost-low at index 0, owned rows from index 1.
        let off = self.cols;
        &self.slots[self.active][off..off + self.cols]
    }

    /// The last owned row of the published generation (sent to the
    /// next-ranked worker during exchange).
    pub fn last_owned(&self) -> &[i32] {
        let off = self.range.len() * self.cols;
        &self.slots[self.active][off..off + self.cols]
    }

    /// Overwrite the ghost-low row (global row `first - 1`) of the
    /// published generation with a neighbour's row.
    pub fn set_ghost_low(&mut self, values: &[i32]) -> Result<(), GridError> {
        if values.len() != self.cols {
            return Err(GridError::RowLengthMismatch {
                expected: self.cols,
                got: values.len(),
            });
        }
        self.slots[self.active][..self.cols].copy_from_slice(values);
        Ok(())
    }

    /// Overwrite the ghost-high row (global row `last`) of the published
    /// generation with a neighbour's row.
    pub fn set_ghost_high(&mut self, values: &[i32]) -> Result<(), GridError> {
        if values.len() != self.cols {
            return Err(GridError::RowLengthMismatch {
                expected: self.cols,
                got: values.len(),
            });
        }
        let off = (self.range.len() + 1) * self.cols;
        self.slots[self.active][off..off + self.cols].copy_from_slice(values);
        Ok(())
    }

    /// Split into a read view of the published slot and a write view of
    /// the staging slot, for one stencil pass.
    ///
    /// The borrow checker guarantees the pass cannot alias: reads come
    /// only from the current generation, writes land only in staging.
    pub fn split_step(&mut self) -> (CurrentRows<'_>, NextRows<'_>) {
        let (a, b) = self.slots.split_at_mut(1);
        let (current, staging) = if self.active == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        };
        (
            CurrentRows {
                data: current,
                range: self.range,
                cols: self.cols,
            },
            NextRows {
                data: staging,
                range: self.range,
                cols: self.cols,
            },
        )
    }

    /// Publish the staging slot (O(1) index toggle).
    pub fn swap(&mut self) {
        self.active ^= 1;
    }
}

/// Read-only view of a band's published generation.
pub struct CurrentRows<'a> {
    data: &'a [i32],
    range: RowRange,
    cols: usize,
}

impl CurrentRows<'_> {
    /// Value at `(row, col)`. `row` may be any stored row, ghost rows
    /// included.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` falls outside the stored span. The stencil
    /// only addresses rows `[first - 1, last]` and columns `[0, cols)`,
    /// which are always in range.
    pub fn at(&self, row: usize, col: usize) -> i32 {
        let (lo, hi) = self.range.padded();
        assert!(lo <= row && row < hi, "row {row} outside band {}", self.range);
        assert!(col < self.cols, "col {col} outside {} columns", self.cols);
        self.data[(row - lo) * self.cols + col]
    }

    /// A full stored row.
    pub fn row(&self, row: usize) -> Result<&[i32], GridError> {
        let (lo, hi) = self.range.padded();
        if row < lo || row >= hi {
            return Err(GridError::RowOutOfBand {
                row,
                range: self.range,
            });
        }
        let off = (row - lo) * self.cols;
        Ok(&self.data[off..off + self.cols])
    }
}

/// Write view of a band's staging generation.
///
/// Only owned rows are writable; ghost rows of the staging slot are
/// refreshed by the next border exchange after publication, never by the
/// stencil.
pub struct NextRows<'a> {
    data: &'a mut [i32],
    range: RowRange,
    cols: usize,
}

impl NextRows<'_> {
    /// Mutable access to an owned staging row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not owned by the band.
    pub fn row_mut(&mut self, row: usize) -> &mut [i32] {
        assert!(
            self.range.contains(row),
            "staging write to row {row} outside owned band {}",
            self.range
        );
        let off = (row - (self.range.first - 1)) * self.cols;
        &mut self.data[off..off + self.cols]
    }
}

/// A worker's slice of the grid: both layers, swapped together.
#[derive(Clone, Debug)]
pub struct BandGrid {
    cells: RowBand,
    pollution: RowBand,
}

impl BandGrid {
    /// Build a band grid from padded rows of both layers.
    pub fn new(
        range: RowRange,
        cols: usize,
        cell_rows: &[Vec<i32>],
        pollution_rows: &[Vec<i32>],
    ) -> Result<Self, GridError> {
        Ok(Self {
            cells: RowBand::new(range, cols, cell_rows)?,
            pollution: RowBand::new(range, cols, pollution_rows)?,
        })
    }

    /// Carve a band (padded with its ghost rows) out of a full grid.
    ///
    /// Used by the root, which owns the full grid and special-cases
    /// itself during scatter.
    pub fn from_full(full: &FullGrid, range: RowRange) -> Result<Self, GridError> {
        range
            .validate(full.size())
            .map_err(|_| GridError::BandOutOfGrid {
                range,
                size: full.size(),
            })?;
        let (lo, hi) = range.padded();
        let mut cell_rows = Vec::with_capacity(hi - lo);
        let mut pollution_rows = Vec::with_capacity(hi - lo);
        for row in lo..hi {
            cell_rows.push(full.cells_row(row).to_vec());
            pollution_rows.push(full.pollution_row(row).to_vec());
        }
        Self::new(range, full.size(), &cell_rows, &pollution_rows)
    }

    /// The owned row range.
    pub fn range(&self) -> RowRange {
        self.cells.range()
    }

    /// Column count (the grid dimension).
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// The cells layer.
    pub fn cells(&self) -> &RowBand {
        &self.cells
    }

    /// The pollution layer.
    pub fn pollution(&self) -> &RowBand {
        &self.pollution
    }

    /// Mutable access to the cells layer (ghost-row refresh).
    pub fn cells_mut(&mut self) -> &mut RowBand {
        &mut self.cells
    }

    /// Mutable access to the pollution layer (ghost-row refresh).
    pub fn pollution_mut(&mut self) -> &mut RowBand {
        &mut self.pollution
    }

    /// Both layers mutably, for one stencil pass over the band.
    pub fn layers_mut(&mut self) -> (&mut RowBand, &mut RowBand) {
        (&mut self.cells, &mut self.pollution)
    }

    /// Publish the staging generation of both layers atomically.
    pub fn swap(&mut self) {
        self.cells.swap();
        self.pollution.swap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rows(values: &[&[i32]]) -> Vec<Vec<i32>> {
        values.iter().map(|r| r.to_vec()).collect()
    }

    fn small_band() -> RowBand {
        // Band owning rows [1, 3) of a 4-column grid, padded rows 0..=3.
        let range = RowRange { first: 1, last: 3 };
        RowBand::new(
            range,
            4,
            &rows(&[
                &[0, 0, 0, 0],
                &[1, 2, 3, 4],
                &[5, 6, 7, 8],
                &[9, 9, 9, 9],
            ]),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_wrong_row_count() {
        let range = RowRange { first: 1, last: 3 };
        let result = RowBand::new(range, 4, &rows(&[&[0, 0, 0, 0]]));
        assert_eq!(
            result.unwrap_err(),
            GridError::RowCountMismatch {
                expected: 4,
                got: 1
            }
        );
    }

    #[test]
    fn new_rejects_short_row() {
        let range = RowRange { first: 1, last: 2 };
        let result = RowBand::new(range, 4, &rows(&[&[0, 0, 0, 0], &[1, 2], &[0, 0, 0, 0]]));
        assert_eq!(
            result.unwrap_err(),
            GridError::RowLengthMismatch {
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn row_reads_published_generation() {
        let band = small_band();
        assert_eq!(band.row(0).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(band.row(1).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(band.row(2).unwrap(), &[5, 6, 7, 8]);
        assert_eq!(band.row(3).unwrap(), &[9, 9, 9, 9]);
        assert!(band.row(4).is_err());
    }

    #[test]
    fn first_and_last_owned_rows() {
        let band = small_band();
        assert_eq!(band.first_owned(), &[1, 2, 3, 4]);
        assert_eq!(band.last_owned(), &[5, 6, 7, 8]);
    }

    #[test]
    fn ghost_writes_land_in_published_slot() {
        let mut band = small_band();
        band.set_ghost_low(&[7, 7, 7, 7]).unwrap();
        band.set_ghost_high(&[8, 8, 8, 8]).unwrap();
        assert_eq!(band.row(0).unwrap(), &[7, 7, 7, 7]);
        assert_eq!(band.row(3).unwrap(), &[8, 8, 8, 8]);
    }

    #[test]
    fn ghost_write_rejects_wrong_length() {
        let mut band = small_band();
        assert_eq!(
            band.set_ghost_low(&[1, 2]).unwrap_err(),
            GridError::RowLengthMismatch {
                expected: 4,
                got: 2
            }
        );
    }

    #[test]
    fn staging_writes_become_visible_after_swap() {
        let mut band = small_band();
        {
            let (current, mut next) = band.split_step();
            assert_eq!(current.at(1, 0), 1);
            next.row_mut(1).copy_from_slice(&[10, 20, 30, 40]);
        }
        // Staging not yet published.
        assert_eq!(band.row(1).unwrap(), &[1, 2, 3, 4]);
        band.swap();
        assert_eq!(band.row(1).unwrap(), &[10, 20, 30, 40]);
    }

    #[test]
    fn both_slots_seeded_identically() {
        let mut band = small_band();
        // Without any staging writes, a swap exposes the same data.
        band.swap();
        assert_eq!(band.row(0).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(band.row(1).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(band.row(3).unwrap(), &[9, 9, 9, 9]);
    }

    #[test]
    #[should_panic(expected = "outside owned band")]
    fn staging_rejects_ghost_row_write() {
        let mut band = small_band();
        let (_, mut next) = band.split_step();
        next.row_mut(0);
    }

    #[test]
    fn band_grid_swaps_both_layers_together() {
        let range = RowRange { first: 1, last: 2 };
        let padded = rows(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]);
        let mut grid = BandGrid::new(range, 3, &padded, &padded).unwrap();
        {
            let (cells, pollution) = grid.layers_mut();
            let (_, mut c_next) = cells.split_step();
            c_next.row_mut(1).copy_from_slice(&[2, 2, 2]);
            let (_, mut p_next) = pollution.split_step();
            p_next.row_mut(1).copy_from_slice(&[3, 3, 3]);
        }
        grid.swap();
        assert_eq!(grid.cells().row(1).unwrap(), &[2, 2, 2]);
        assert_eq!(grid.pollution().row(1).unwrap(), &[3, 3, 3]);
    }

    #[test]
    fn from_full_copies_padded_rows() {
        let mut full = FullGrid::new(5).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                full.set_cell(row, col, (row * 5 + col) as i32);
                full.set_pollution(row, col, 100 + (row * 5 + col) as i32);
            }
        }
        let range = RowRange { first: 2, last: 4 };
        let band = BandGrid::from_full(&full, range).unwrap();
        assert_eq!(band.cells().row(1).unwrap(), full.cells_row(1));
        assert_eq!(band.cells().row(2).unwrap(), full.cells_row(2));
        assert_eq!(band.pollution().row(4).unwrap(), full.pollution_row(4));
    }

    proptest! {
        /// Alternating staging writes and swaps never leak an unpublished
        /// generation: a read after `k` swaps sees the value written `k`
        /// publications ago.
        #[test]
        fn swap_publishes_exactly_one_generation(writes in prop::collection::vec(0i32..1000, 1..20)) {
            let range = RowRange { first: 1, last: 2 };
            let mut band = RowBand::new(
                range,
                2,
                &[vec![0, 0], vec![0, 0], vec![0, 0]],
            ).unwrap();

            let mut published = 0i32;
            for &value in &writes {
                {
                    let (_, mut next) = band.split_step();
                    next.row_mut(1).fill(value);
                }
                // Still the previous generation until the swap.
                prop_assert_eq!(band.row(1).unwrap()[0], published);
                band.swap();
                prop_assert_eq!(band.row(1).unwrap()[0], value);
                published = value;
            }
        }
    }
}
