//! Grid operations of the stochastic fire automaton.
//!
//! A generation is computed in two passes:
//! 1. [`neighbor_counts`] — count the burning 4-connected neighbors of
//!    every cell, reading only the old grid.
//! 2. [`transition`] — decide each cell's next state and age from its old
//!    state, old age and neighbor count.
//!
//! The first pass must finish for the whole grid before the second starts.
//! Updating cells in place while scanning would let a cell see a neighbor's
//! already-updated state and change the ignition/extinguish probabilities.
//!
//! Every operation here returns fresh grids and leaves its inputs untouched.

use rand::Rng;

use crate::{
    config::{Params, check_probability},
    grid::{AgeGrid, Grid, NeighborCounts, assert_sizes_match},
};

/// Counts the burning orthogonal neighbors of every cell.
///
/// Out-of-bounds neighbors do not count; the grid is not toroidal.
///
/// ### Parameters
/// - `grid` - The pre-transition grid.
///
/// ### Returns
/// A [`NeighborCounts`] of the same size with values in `0..=4`.
pub fn neighbor_counts(grid: &Grid) -> NeighborCounts {
    let mut counts = NeighborCounts::new(grid.size());
    for (row, col, &on) in grid.indexed() {
        if !on {
            continue;
        }
        for (nr, nc) in grid.orthogonal_neighbors(row, col) {
            counts.set(nr, nc, counts.get(nr, nc) + 1);
        }
    }
    counts
}

/// Computes the next grid and age grid from a complete neighbor count snapshot.
///
/// For a burning cell, in order:
/// 1. If `age + 1 >= lifespan` it goes out (no random draw).
/// 2. Else, with `k > 0` burning neighbors, one draw `u` in `[0, 1)` is taken
///    and the cell goes out if `u > (1 - s)^k`.
/// 3. Otherwise it keeps burning with `age + 1`.
///
/// For an off cell with `k > 0`, one draw `u` is taken and the cell ignites
/// with age `1` if `u < 1 - (1 - a)^k`. Off cells with `k == 0` stay off
/// without drawing.
///
/// ### Parameters
/// - `grid` - The pre-transition grid.
/// - `ages` - Ages co-indexed with `grid`.
/// - `counts` - Output of [`neighbor_counts`] for `grid`.
/// - `params` - Spread/extinguish probabilities and lifespan.
/// - `rng` - Source of the per-cell uniform draws.
///
/// ### Panics
/// Panics if the three squares are not co-sized or `params` is invalid.
pub fn transition<R: Rng + ?Sized>(
    grid: &Grid,
    ages: &AgeGrid,
    counts: &NeighborCounts,
    params: &Params,
    rng: &mut R,
) -> (Grid, AgeGrid) {
    assert_sizes_match(grid, ages);
    assert!(
        grid.same_size(counts),
        "neighbor counts do not match the {n}x{n} grid",
        n = grid.size()
    );
    if let Err(e) = params.validate() {
        panic!("invalid step parameters: {e}");
    }

    let size = grid.size();
    let mut next = Grid::new(size);
    let mut next_ages = AgeGrid::new(size);

    for (row, col, &on) in grid.indexed() {
        let age = *ages.get(row, col);
        let k = i32::from(*counts.get(row, col));

        let next_age = if on {
            if age.saturating_add(1) >= params.lifespan {
                0
            } else if k > 0 && rng.random::<f64>() > (1.0 - params.prob_extinguish).powi(k) {
                0
            } else {
                age + 1
            }
        } else if k == 0 {
            0
        } else {
            let prob_ignite = 1.0 - (1.0 - params.prob_spread).powi(k);
            if rng.random::<f64>() < prob_ignite {
                1
            } else {
                0
            }
        };

        if next_age > 0 {
            next.set(row, col, true);
            next_ages.set(row, col, next_age);
        }
    }

    (next, next_ages)
}

/// Advances the automaton by one generation.
///
/// Runs [`neighbor_counts`] over the whole grid, then [`transition`].
/// The caller is responsible for bumping its generation counter.
///
/// ### Panics
/// Panics if `grid` and `ages` differ in size or `params` is invalid.
pub fn step<R: Rng + ?Sized>(
    grid: &Grid,
    ages: &AgeGrid,
    params: &Params,
    rng: &mut R,
) -> (Grid, AgeGrid) {
    assert_sizes_match(grid, ages);
    let counts = neighbor_counts(grid);
    transition(grid, ages, &counts, params, rng)
}

/// Flips one cell. A cell turned on gets age `1`, a cell turned off age `0`.
///
/// ### Panics
/// Panics if `(row, col)` is out of bounds or the grids are not co-sized.
pub fn toggle_cell(grid: &Grid, ages: &AgeGrid, row: usize, col: usize) -> (Grid, AgeGrid) {
    assert_sizes_match(grid, ages);
    let mut next = grid.clone();
    let mut next_ages = ages.clone();

    let on = !*grid.get(row, col);
    next.set(row, col, on);
    next_ages.set(row, col, if on { 1 } else { 0 });

    (next, next_ages)
}

/// Produces a fresh grid where each cell burns independently with
/// probability `density`, ages `1` where burning.
///
/// A cell is on iff its draw `u` in `[0, 1)` satisfies `u > 1 - density`.
///
/// ### Panics
/// Panics if `density` is not in `[0, 1]`.
pub fn randomize<R: Rng + ?Sized>(size: usize, density: f64, rng: &mut R) -> (Grid, AgeGrid) {
    if let Err(e) = check_probability("density", density) {
        panic!("invalid randomize density: {e}");
    }
    let threshold = 1.0 - density;
    let grid = Grid::from_fn(size, |_, _| rng.random::<f64>() > threshold);
    let ages = AgeGrid::from_fn(size, |r, c| u32::from(*grid.get(r, c)));
    (grid, ages)
}

/// All-off grid and all-zero ages of the given size.
pub fn clear(size: usize) -> (Grid, AgeGrid) {
    (Grid::new(size), AgeGrid::new(size))
}

/// Discards everything and starts over at `size`. Same as [`clear`].
pub fn resize(size: usize) -> (Grid, AgeGrid) {
    clear(size)
}
