//! The stencil computation over one band.

use smog_core::Rules;
use smog_grid::{BandGrid, CurrentRows};

/// Moore neighbourhood: N, S, W, E, NW, NE, SW, SE.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Count alive (non-zero) cells among the 8 neighbours of `(row, col)`.
///
/// `row` must be an owned row and `col` an interior column, so every
/// neighbour lands inside the stored band (ghost rows included) and no
/// bounds branching is needed.
fn live_neighbours(cells: &CurrentRows<'_>, row: usize, col: usize) -> u32 {
    MOORE_OFFSETS
        .iter()
        .filter(|&&(dr, dc)| {
            let r = (row as isize + dr) as usize;
            let c = (col as isize + dc) as usize;
            cells.at(r, c) != 0
        })
        .count() as u32
}

/// Compute the next generation for every owned row and interior column,
/// writing into the staging slots. Does not swap; the caller publishes
/// after timing the pass.
///
/// Returns the number of cells updated.
pub(crate) fn compute_band(grid: &mut BandGrid, rules: &dyn Rules) -> u64 {
    let cols = grid.cols();
    let range = grid.range();
    let (cells, pollution) = grid.layers_mut();
    let (c_cur, mut c_next) = cells.split_step();
    let (p_cur, mut p_next) = pollution.split_step();

    let mut updated = 0u64;
    for row in range.first..range.last {
        let c_row = c_next.row_mut(row);
        let p_row = p_next.row_mut(row);
        for col in 1..cols - 1 {
            let state = c_cur.at(row, col);
            let pollution = p_cur.at(row, col);

            c_row[col] = rules.cell_next_state(state, live_neighbours(&c_cur, row, col), pollution);

            // Orthogonal and diagonal sums stay separate; rule-sets may
            // weight them differently.
            let orthogonal = p_cur.at(row - 1, col)
                + p_cur.at(row + 1, col)
                + p_cur.at(row, col - 1)
                + p_cur.at(row, col + 1);
            let diagonal = p_cur.at(row - 1, col - 1)
                + p_cur.at(row - 1, col + 1)
                + p_cur.at(row + 1, col - 1)
                + p_cur.at(row + 1, col + 1);
            p_row[col] = rules.next_pollution(state, pollution, orthogonal, diagonal);
            updated += 1;
        }
    }
    updated
}
