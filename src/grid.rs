use thiserror::Error;

use crate::Age;

/// Access outside the grid's dimensions.
///
/// This is an internal error, not bad input: the loader and the engine only
/// ever touch cells they have bounds-checked, so seeing one of these means an
/// indexing bug upstream.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// A bounded rectangular field of cell ages, stored row-major.
///
/// The grid is the sole unit of ownership: each generation the engine builds
/// a brand-new grid and the old one is dropped, so no cell is ever mutated
/// across a generation boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Age>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Self::default();
        grid.resize(rows, cols);

        grid
    }

    /// Build a grid from a row-major cell buffer.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Age>) -> Self {
        assert_eq!(cells.len(), rows * cols, "cell buffer does not match dimensions");

        Self { rows, cols, cells }
    }

    /// Reallocate storage to `rows x cols`, zeroing every cell.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(rows * cols, 0);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Age, OutOfBounds> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }

        Ok(self.cells[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, age: Age) -> Result<(), OutOfBounds> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }

        self.cells[row * self.cols + col] = age;

        Ok(())
    }

    /// Infallible access for loops that have already checked bounds.
    pub(crate) fn at(&self, row: usize, col: usize) -> Age {
        debug_assert!(self.in_bounds(row, col));

        self.cells[row * self.cols + col]
    }

    /// Row-major iteration over `((row, col), age)`.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Age)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &age)| ((i / self.cols, i % self.cols), age))
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> OutOfBounds {
        OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use super::OutOfBounds;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(3, 4);

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert!(grid.iter().all(|(_, age)| age == 0));
    }

    #[test]
    fn resize_zeroes_previous_contents() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 1, 7).unwrap();

        grid.resize(2, 2);

        assert_eq!(grid.get(1, 1), Ok(0));
    }

    #[test]
    fn get_and_set_round_trip() {
        let mut grid = Grid::new(5, 5);

        grid.set(2, 3, 4).unwrap();

        assert_eq!(grid.get(2, 3), Ok(4));
        assert_eq!(grid.get(3, 2), Ok(0));
    }

    #[test]
    fn access_outside_dimensions_fails() {
        let mut grid = Grid::new(2, 3);

        let err = OutOfBounds {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3,
        };

        assert_eq!(grid.get(2, 0), Err(err));
        assert_eq!(grid.set(2, 0, 1), Err(err));
        assert!(!grid.in_bounds(2, 0));
        assert!(!grid.in_bounds(0, 3));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::from_cells(2, 2, vec![1, 2, 3, 4]);

        let cells: Vec<_> = grid.iter().collect();

        assert_eq!(
            cells,
            vec![((0, 0), 1), ((0, 1), 2), ((1, 0), 3), ((1, 1), 4)]
        );
    }
}
