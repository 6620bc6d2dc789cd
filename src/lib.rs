pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod sim;
pub mod snapshot;
pub mod stability;

mod parse_util;

/// Number of consecutive generations a cell has survived. `0` is a dead cell.
pub type Age = u32;

/// Default survival-age cap, shared by the randomizer's age range and the
/// stability check.
pub const DEFAULT_MAX_AGE: Age = 12;
