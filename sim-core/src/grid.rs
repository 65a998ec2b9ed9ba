use crate::types::Age;

/// A square, row-major buffer of per-cell values.
///
/// All grids the automaton works with (cell states, ages, neighbor
/// counts) are `N×N` and co-indexed, so they share this one storage type.
/// Cell `(row, col)` lives at `cells[row * size + col]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Square<T> {
    size: usize,
    cells: Vec<T>,
}

/// Burning (`true`) / off (`false`) state of every cell.
pub type Grid = Square<bool>;

/// Per-cell age, co-indexed with a [`Grid`].
pub type AgeGrid = Square<Age>;

/// Number of burning 4-connected neighbors of every cell (`0..=4`).
pub type NeighborCounts = Square<u8>;

impl<T: Clone + Default> Square<T> {
    /// Creates a `size×size` buffer filled with `T::default()`.
    ///
    /// ### Parameters
    /// - `size` - Side length of the square.
    ///
    /// ### Returns
    /// A new [`Square`] holding `size * size` default values.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size * size],
        }
    }
}

impl<T> Square<T> {
    /// Builds a buffer by calling `f(row, col)` for every cell in row-major order.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Self { size, cells }
    }

    /// Builds a buffer from nested rows.
    ///
    /// ### Panics
    /// Panics if any row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), size, "row {i} does not match square size {size}");
            cells.extend(row);
        }
        Self { size, cells }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.in_bounds(row, col),
            "cell ({row}, {col}) out of bounds for {n}x{n} grid",
            n = self.size
        );
        row * self.size + col
    }

    /// Returns a reference to the value at `(row, col)`.
    ///
    /// ### Panics
    /// Panics if `(row, col)` is outside the square.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.cells[self.index(row, col)]
    }

    /// Overwrites the value at `(row, col)`.
    ///
    /// ### Panics
    /// Panics if `(row, col)` is outside the square.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let i = self.index(row, col);
        self.cells[i] = value;
    }

    /// Iterates over all values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Iterates over `(row, col, &value)` in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let size = self.size.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / size, i % size, v))
    }

    /// Returns the orthogonal (up/down/left/right) neighbors of `(row, col)`
    /// that fall inside the square. The grid does not wrap around.
    pub fn orthogonal_neighbors(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let size = self.size;
        let up = row.checked_sub(1).map(|r| (r, col));
        let down = (row + 1 < size).then_some((row + 1, col));
        let left = col.checked_sub(1).map(|c| (row, c));
        let right = (col + 1 < size).then_some((row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// Returns `true` if `other` has the same side length.
    #[inline]
    pub fn same_size<U>(&self, other: &Square<U>) -> bool {
        self.size == other.size
    }
}

impl Grid {
    /// Number of burning cells.
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}

/// Checks that every off cell of `grid` has age `0` in `ages`.
///
/// ### Panics
/// Panics if the two squares have different sizes.
pub fn off_cells_have_zero_age(grid: &Grid, ages: &AgeGrid) -> bool {
    assert_sizes_match(grid, ages);
    grid.cells
        .iter()
        .zip(&ages.cells)
        .all(|(&on, &age)| on || age == 0)
}

/// Fails fast when a grid and its age grid are not co-sized.
pub(crate) fn assert_sizes_match(grid: &Grid, ages: &AgeGrid) {
    assert!(
        grid.same_size(ages),
        "grid is {g}x{g} but age grid is {a}x{a}",
        g = grid.size(),
        a = ages.size()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_default() {
        let grid = Grid::new(4);
        let ages = AgeGrid::new(4);

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.iter().count(), 16);
        assert!(grid.iter().all(|&on| !on));
        assert!(ages.iter().all(|&a| a == 0));
    }

    #[test]
    fn get_and_set_use_row_major_layout() {
        let mut ages = AgeGrid::new(3);
        ages.set(1, 2, 7);

        assert_eq!(*ages.get(1, 2), 7);
        assert_eq!(*ages.get(2, 1), 0);

        let seven_at: Vec<(usize, usize)> = ages
            .indexed()
            .filter(|&(_, _, &a)| a == 7)
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(seven_at, vec![(1, 2)]);
    }

    #[test]
    #[should_panic]
    fn get_panics_out_of_bounds() {
        let grid = Grid::new(3);
        grid.get(3, 0);
    }

    #[test]
    fn from_rows_and_from_fn_agree() {
        let a = Grid::from_rows(vec![vec![true, false], vec![false, true]]);
        let b = Grid::from_fn(2, |r, c| r == c);

        assert_eq!(a, b);
        assert_eq!(a.count_on(), 2);
    }

    #[test]
    #[should_panic]
    fn from_rows_rejects_ragged_input() {
        Grid::from_rows(vec![vec![true, false], vec![false]]);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let grid = Grid::new(3);

        let mut corner: Vec<_> = grid.orthogonal_neighbors(0, 0).collect();
        corner.sort();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);

        let mut edge: Vec<_> = grid.orthogonal_neighbors(2, 1).collect();
        edge.sort();
        assert_eq!(edge, vec![(1, 1), (2, 0), (2, 2)]);

        assert_eq!(grid.orthogonal_neighbors(1, 1).count(), 4);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1);
        assert_eq!(grid.orthogonal_neighbors(0, 0).count(), 0);
    }

    #[test]
    fn off_cells_have_zero_age_detects_stale_age() {
        let grid = Grid::from_rows(vec![vec![true, false], vec![false, false]]);
        let mut ages = AgeGrid::from_rows(vec![vec![3, 0], vec![0, 0]]);
        assert!(off_cells_have_zero_age(&grid, &ages));

        ages.set(1, 1, 2);
        assert!(!off_cells_have_zero_age(&grid, &ages));
    }

    #[test]
    #[should_panic]
    fn mismatched_sizes_panic() {
        assert_sizes_match(&Grid::new(2), &AgeGrid::new(3));
    }
}
