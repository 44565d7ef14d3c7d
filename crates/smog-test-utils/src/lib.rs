//! Reference rule-sets and fixtures for smog development.
//!
//! Provides concrete [`Rules`] implementations (the engine itself ships
//! none), seeded random boards, well-known patterns, and a serial
//! whole-grid reference stepper that the distributed engine is
//! bit-compared against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smog_core::Rules;
use smog_grid::FullGrid;

/// Classic Conway transition: born on 3, survives on 2 or 3.
fn conway(state: i32, live: u32) -> i32 {
    if state != 0 {
        i32::from(live == 2 || live == 3)
    } else {
        i32::from(live == 3)
    }
}

/// Conway's Game of Life with an inert pollution layer.
///
/// Pollution values are carried through unchanged, and life ignores
/// them. `max_pollution` is 1 so the average-pollution normalisation
/// stays well-defined on boards that carry no pollution at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRules;

impl Rules for ConwayRules {
    fn cell_next_state(&self, state: i32, live_neighbours: u32, _pollution: i32) -> i32 {
        conway(state, live_neighbours)
    }

    fn next_pollution(&self, _state: i32, pollution: i32, _orthogonal: i32, _diagonal: i32) -> i32 {
        pollution
    }

    fn max_pollution(&self) -> i32 {
        1
    }
}

/// Life coupled to a pollution field.
///
/// Living cells emit pollution; pollution diffuses towards the
/// neighbourhood average with orthogonal neighbours weighted twice as
/// strongly as diagonal ones; cells above the toxicity threshold die
/// regardless of their neighbour count. All arithmetic is integral, so
/// runs are exactly reproducible.
#[derive(Clone, Copy, Debug)]
pub struct SmogRules {
    /// Upper bound on pollution values.
    pub max: i32,
    /// Pollution level above which a cell cannot survive.
    pub toxic_threshold: i32,
    /// Pollution a living cell adds to its own square each step.
    pub emission: i32,
}

impl Default for SmogRules {
    fn default() -> Self {
        Self {
            max: 255,
            toxic_threshold: 200,
            emission: 16,
        }
    }
}

impl SmogRules {
    pub fn max_pollution(&self) -> i32 {
        self.max
    }
}

impl Rules for SmogRules {
    fn cell_next_state(&self, state: i32, live_neighbours: u32, pollution: i32) -> i32 {
        if pollution > self.toxic_threshold {
            return 0;
        }
        conway(state, live_neighbours)
    }

    fn next_pollution(&self, state: i32, pollution: i32, orthogonal: i32, diagonal: i32) -> i32 {
        let inflow = (orthogonal - 4 * pollution) / 8 + (diagonal - 4 * pollution) / 16;
        let emitted = if state != 0 { self.emission } else { 0 };
        (pollution + inflow + emitted).clamp(0, self.max)
    }

    fn max_pollution(&self) -> i32 {
        self.max
    }
}

/// Rules that change nothing. Useful for exercising the exchange and
/// buffer plumbing without any state evolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRules;

impl Rules for IdentityRules {
    fn cell_next_state(&self, state: i32, _live_neighbours: u32, _pollution: i32) -> i32 {
        state
    }

    fn next_pollution(&self, _state: i32, pollution: i32, _orthogonal: i32, _diagonal: i32) -> i32 {
        pollution
    }

    fn max_pollution(&self) -> i32 {
        1
    }
}

/// A board with the classic glider in its top-left interior corner.
///
/// # Panics
///
/// Panics if `size < 5` (the pattern needs rows 1 to 3 plus a boundary).
pub fn glider_board(size: usize) -> FullGrid {
    assert!(size >= 5, "glider needs a 5x5 board at least");
    let mut grid = FullGrid::new(size).expect("size checked above");
    for (row, col) in [(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)] {
        grid.set_cell(row, col, 1);
    }
    grid
}

/// A deterministic random board: interior cells are alive with
/// probability `density` and carry pollution uniform in `0..=max_pollution`.
/// The boundary ring stays zero. The same seed always produces the same
/// board.
pub fn random_board(seed: u64, size: usize, density: f64, max_pollution: i32) -> FullGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = FullGrid::new(size).expect("caller supplies size >= 3");
    for row in 1..size - 1 {
        for col in 1..size - 1 {
            if rng.random_bool(density) {
                grid.set_cell(row, col, 1);
            }
            grid.set_pollution(row, col, rng.random_range(0..=max_pollution));
        }
    }
    grid
}

/// Serial whole-grid reference step.
///
/// An independent implementation of the stencil semantics: every
/// interior cell of `grid` advances one generation under `rules`. The
/// distributed engine must be bit-identical to repeated application of
/// this function.
pub fn reference_step(grid: &FullGrid, rules: &dyn Rules) -> FullGrid {
    let size = grid.size();
    let mut next = grid.clone();
    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let state = grid.cell(row, col);
            let pollution = grid.pollution_at(row, col);

            let mut live = 0u32;
            for (dr, dc) in [
                (-1i32, 0i32),
                (1, 0),
                (0, -1),
                (0, 1),
                (-1, -1),
                (-1, 1),
                (1, -1),
                (1, 1),
            ] {
                let r = (row as i32 + dr) as usize;
                let c = (col as i32 + dc) as usize;
                if grid.cell(r, c) != 0 {
                    live += 1;
                }
            }
            next.set_cell(row, col, rules.cell_next_state(state, live, pollution));

            let orthogonal = grid.pollution_at(row - 1, col)
                + grid.pollution_at(row + 1, col)
                + grid.pollution_at(row, col - 1)
                + grid.pollution_at(row, col + 1);
            let diagonal = grid.pollution_at(row - 1, col - 1)
                + grid.pollution_at(row - 1, col + 1)
                + grid.pollution_at(row + 1, col - 1)
                + grid.pollution_at(row + 1, col + 1);
            next.set_pollution(
                row,
                col,
                rules.next_pollution(state, pollution, orthogonal, diagonal),
            );
        }
    }
    next
}

/// Apply [`reference_step`] `steps` times.
pub fn reference_run(grid: &FullGrid, rules: &dyn Rules, steps: usize) -> FullGrid {
    let mut current = grid.clone();
    for _ in 0..steps {
        current = reference_step(&current, rules);
    }
    current
}
