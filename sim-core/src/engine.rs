//! Stateful owner of the grid pair and the generation counter.

use log::{debug, trace};
use rand::Rng;

use crate::{
    config::Params,
    grid::{AgeGrid, Grid},
    rules,
    types::{Age, Generation},
};

/// The live automaton: a [`Grid`], its [`AgeGrid`] and the generation count.
///
/// Both grids are only ever replaced as a whole by the operations below,
/// each of which delegates to the pure functions in [`rules`]. Since every
/// mutating method takes `&mut self`, two steps can never overlap and no
/// reader can observe a half-computed generation.
///
/// Running or pausing is not a property of the engine; a host runs the
/// simulation by calling [`SimulationEngine::step`] periodically.
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    grid: Grid,
    ages: AgeGrid,
    generation: Generation,
}

impl SimulationEngine {
    /// Creates an all-off engine of side `size` at generation `0`.
    pub fn new(size: usize) -> Self {
        let (grid, ages) = rules::clear(size);
        Self {
            grid,
            ages,
            generation: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ages(&self) -> &AgeGrid {
        &self.ages
    }

    /// Returns `true` if `(row, col)` is burning. Panics when out of bounds.
    pub fn is_on(&self, row: usize, col: usize) -> bool {
        *self.grid.get(row, col)
    }

    /// Age of `(row, col)`, `0` when the cell is off. Panics when out of bounds.
    pub fn age(&self, row: usize, col: usize) -> Age {
        *self.ages.get(row, col)
    }

    pub fn burning_count(&self) -> usize {
        self.grid.count_on()
    }

    /// Advances one generation and increments the counter by exactly one,
    /// whether or not any cell changed.
    ///
    /// ### Panics
    /// Panics if `params` is invalid (see [`Params::validate`]).
    pub fn step<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) {
        let (grid, ages) = rules::step(&self.grid, &self.ages, params, rng);
        self.grid = grid;
        self.ages = ages;
        self.generation += 1;
        trace!(
            "generation {}: {} burning",
            self.generation,
            self.burning_count()
        );
    }

    /// Flips one cell. The generation counter is left alone.
    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        let (grid, ages) = rules::toggle_cell(&self.grid, &self.ages, row, col);
        self.grid = grid;
        self.ages = ages;
    }

    /// Refills the current grid at random and resets the generation.
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let (grid, ages) = rules::randomize(self.size(), density, rng);
        self.grid = grid;
        self.ages = ages;
        self.generation = 0;
        debug!(
            "randomized {n}x{n} grid at density {density}: {} burning",
            self.burning_count(),
            n = self.size()
        );
    }

    /// Turns every cell off and resets the generation.
    pub fn clear(&mut self) {
        let (grid, ages) = rules::clear(self.size());
        self.grid = grid;
        self.ages = ages;
        self.generation = 0;
        debug!("cleared {n}x{n} grid", n = self.size());
    }

    /// Discards all state and starts over as an all-off `size×size` grid.
    pub fn resize(&mut self, size: usize) {
        let (grid, ages) = rules::resize(size);
        self.grid = grid;
        self.ages = ages;
        self.generation = 0;
        debug!("resized grid to {size}x{size}");
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DEFAULT_DENSITY, grid::off_cells_have_zero_age};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn new_engine_is_blank() {
        let engine = SimulationEngine::new(10);
        assert_eq!(engine.size(), 10);
        assert_eq!(engine.ages().size(), 10);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.burning_count(), 0);
    }

    #[test]
    fn default_engine_uses_reference_size() {
        assert_eq!(SimulationEngine::default().size(), 20);
    }

    #[test]
    fn generation_counts_every_step() {
        let mut engine = SimulationEngine::new(5);
        let mut rng = StdRng::seed_from_u64(4);

        // An empty grid never changes, but each step still counts.
        for expected in 1..=25 {
            engine.step(&Params::default(), &mut rng);
            assert_eq!(engine.generation(), expected);
        }
        assert_eq!(engine.burning_count(), 0);
    }

    #[test]
    fn clear_resize_and_randomize_reset_generation() {
        let mut engine = SimulationEngine::new(8);
        let mut rng = StdRng::seed_from_u64(10);
        let p = Params::default();

        engine.step(&p, &mut rng);
        engine.step(&p, &mut rng);
        engine.randomize(DEFAULT_DENSITY, &mut rng);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.size(), 8);

        engine.step(&p, &mut rng);
        engine.clear();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.burning_count(), 0);

        engine.step(&p, &mut rng);
        engine.resize(13);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.size(), 13);
        assert_eq!(engine.ages().size(), 13);
    }

    #[test]
    fn toggle_does_not_touch_generation() {
        let mut engine = SimulationEngine::new(4);
        let mut rng = StdRng::seed_from_u64(0);
        engine.step(&Params::default(), &mut rng);

        engine.toggle_cell(2, 2);
        assert!(engine.is_on(2, 2));
        assert_eq!(engine.age(2, 2), 1);
        assert_eq!(engine.generation(), 1);

        engine.toggle_cell(2, 2);
        assert!(!engine.is_on(2, 2));
        assert_eq!(engine.age(2, 2), 0);
    }

    #[test]
    fn resize_discards_burning_cells() {
        let mut engine = SimulationEngine::new(10);
        engine.toggle_cell(0, 0);
        engine.toggle_cell(9, 9);

        engine.resize(10);
        assert_eq!(engine.burning_count(), 0);
        assert!(engine.ages().iter().all(|&a| a == 0));
    }

    #[test]
    fn burning_cell_ages_until_lifespan() {
        let mut engine = SimulationEngine::new(5);
        let mut rng = StdRng::seed_from_u64(6);
        let p = Params::new(0.0, 0.0, 4).unwrap();
        engine.toggle_cell(2, 2);

        engine.step(&p, &mut rng);
        assert_eq!(engine.age(2, 2), 2);
        engine.step(&p, &mut rng);
        assert_eq!(engine.age(2, 2), 3);
        // age + 1 == L: forced out.
        engine.step(&p, &mut rng);
        assert!(!engine.is_on(2, 2));
        assert_eq!(engine.age(2, 2), 0);
    }

    #[test]
    fn long_run_keeps_invariants() {
        let mut engine = SimulationEngine::new(30);
        let mut rng = StdRng::seed_from_u64(2024);
        let p = Params::new(0.3, 0.1, 12).unwrap();
        engine.randomize(DEFAULT_DENSITY, &mut rng);

        for _ in 0..200 {
            engine.step(&p, &mut rng);
            assert_eq!(engine.grid().size(), engine.ages().size());
            assert!(off_cells_have_zero_age(engine.grid(), engine.ages()));
        }
        assert_eq!(engine.generation(), 200);
    }

    #[test]
    #[should_panic]
    fn toggle_out_of_bounds_panics() {
        let mut engine = SimulationEngine::new(3);
        engine.toggle_cell(3, 3);
    }
}
