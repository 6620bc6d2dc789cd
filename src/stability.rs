use crate::Age;
use crate::engine;
use crate::grid::Grid;

/// Check whether the colony has settled.
///
/// A grid is stable once every location is either dead in both this
/// generation and the next, or alive in both with its current age at or
/// above `max_age`. Any birth or death anywhere, or any survivor still under
/// the age cap, makes the generation unstable.
///
/// Note this is stricter than a plain "nothing changed" fixed point: a still
/// life of young cells keeps counting as unstable until all of its cells have
/// aged out. Kept for compatibility with the reference simulation.
pub fn is_stable(grid: &Grid, max_age: Age) -> bool {
    let next = engine::advance(grid);

    for ((row, col), age) in grid.iter() {
        match (age, next.at(row, col)) {
            // Dead on both sides of the generation boundary.
            (0, 0) => {}
            // A birth or a death.
            (0, _) | (_, 0) => return false,
            // A survivor still settling toward the cap.
            (age, _) if age < max_age => return false,
            _ => {}
        }
    }

    true
}
