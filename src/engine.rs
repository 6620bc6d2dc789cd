use crate::Age;
use crate::grid::Grid;

/// Advance the colony by one generation.
///
/// The new grid is computed entirely from the old one, so no cell ever sees
/// an already-updated neighbor. Survivor ages are not clamped; only the
/// stability check treats ages at or above the cap specially.
pub fn advance(grid: &Grid) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut cells = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            let age = grid.at(row, col);
            let neighbors = live_neighbors(grid, row, col);

            cells.push(next_age(age, neighbors));
        }
    }

    Grid::from_cells(rows, cols, cells)
}

/// The birth/aging/death rule for a single location.
fn next_age(age: Age, neighbors: u8) -> Age {
    match neighbors {
        // Loneliness.
        0 | 1 => 0,
        // Stable neighborhood: survivors age, empty locations stay empty.
        2 if age == 0 => 0,
        2 => age + 1,
        // Birth, or survival.
        3 => age + 1,
        // Overcrowding.
        _ => 0,
    }
}

/// Count live cells among the 8 in-bounds neighbors of `(row, col)`.
///
/// Out-of-bounds positions are skipped outright, so edge and corner cells
/// have fewer possible neighbors rather than phantom dead ones.
fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;

    for dr in -1..=1isize {
        for dc in -1..=1isize {
            if dr == 0 && dc == 0 {
                continue;
            }

            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };

            if !grid.in_bounds(r, c) {
                continue;
            }

            if grid.at(r, c) >= 1 {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::grid::Grid;

    use super::advance;
    use super::next_age;

    #[test]
    fn isolated_cell_dies_of_loneliness() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, 1).unwrap();

        let next = advance(&grid);

        assert!(next.iter().all(|(_, age)| age == 0));
    }

    #[test]
    fn blinker_rotates() {
        // Horizontal triple at row 2, cols 1..=3.
        let mut grid = Grid::new(5, 5);
        for col in 1..=3 {
            grid.set(2, col, 1).unwrap();
        }

        let next = advance(&grid);

        // The outer cells are born at age 1; the pivot survives with two
        // neighbors and ages to 2.
        let mut expected = Grid::new(5, 5);
        expected.set(1, 2, 1).unwrap();
        expected.set(2, 2, 2).unwrap();
        expected.set(3, 2, 1).unwrap();

        assert_eq!(next, expected);
    }

    #[test]
    fn corner_cells_have_three_possible_neighbors() {
        // A 2x2 block in the corner: every cell has exactly 3 live neighbors
        // and survives. Nothing outside the grid is counted.
        let grid = Grid::from_cells(3, 3, vec![1, 1, 0, 1, 1, 0, 0, 0, 0]);

        let next = advance(&grid);

        assert_eq!(next, Grid::from_cells(3, 3, vec![2, 2, 0, 2, 2, 0, 0, 0, 0]));
    }

    #[test]
    fn rule_table() {
        for age in [0, 1, 5] {
            assert_eq!(next_age(age, 0), 0);
            assert_eq!(next_age(age, 1), 0);
            assert_eq!(next_age(age, 4), 0);
            assert_eq!(next_age(age, 8), 0);
        }

        assert_eq!(next_age(0, 2), 0);
        assert_eq!(next_age(3, 2), 4);

        assert_eq!(next_age(0, 3), 1);
        assert_eq!(next_age(3, 3), 4);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..10, 1usize..10).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(0u32..6, rows * cols)
                .prop_map(move |cells| Grid::from_cells(rows, cols, cells))
        })
    }

    proptest! {
        #[test]
        fn advance_is_deterministic(grid in arb_grid()) {
            prop_assert_eq!(advance(&grid), advance(&grid));
        }

        #[test]
        fn cells_either_die_or_age_by_one(grid in arb_grid()) {
            let next = advance(&grid);

            for ((row, col), age) in grid.iter() {
                let new = next.get(row, col).unwrap();

                prop_assert!(new == 0 || new == age + 1);
            }
        }
    }
}
