use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;
use std::path::PathBuf;

use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::Age;
use crate::grid::Grid;
use crate::parse_util;
use crate::parse_util::ConvertError;

/// Dimension range for randomly seeded colonies, applied independently to
/// rows and columns.
pub const RANDOM_DIMS: RangeInclusive<usize> = 40..=60;

/// Chance that a randomly seeded cell starts out alive.
pub const LIVE_CHANCE: f64 = 0.5;

/// A malformed snapshot. Recoverable: the caller re-prompts for another
/// source rather than aborting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing {0} line")]
    MissingLine(&'static str),

    #[error("bad {name} count: {source}")]
    BadCount {
        name: &'static str,
        source: ConvertError,
    },

    #[error("expected {expected} data rows, found {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("row {row} holds {len} cells, expected {cols}")]
    ShortRow { row: usize, len: usize, cols: usize },

    #[error("unrecognized cell {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not open snapshot {path:?}: {source}")]
    NotFound { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Parse the colony snapshot format.
///
/// Leading lines starting with `#` are comments. The next two lines carry the
/// row and column counts, then each of the following `rows` lines maps its
/// first `cols` characters through `'-'` (dead) and `'X'` (alive, age 1).
pub fn parse(text: &str) -> Result<Grid, FormatError> {
    let mut rest = text;

    // Leading comment lines
    loop {
        let (Some(line), remaining) = parse_util::take_line(rest) else {
            break;
        };

        if !line.starts_with('#') {
            break;
        }

        rest = remaining;
    }

    let (rows, rest) = read_count("row count", rest)?;
    let (cols, mut rest) = read_count("column count", rest)?;

    let mut cells = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        let (Some(line), remaining) = parse_util::take_line(rest) else {
            return Err(FormatError::MissingRows {
                expected: rows,
                found: row,
            });
        };
        rest = remaining;

        // Only the first `cols` characters are significant; trailing content
        // on a data line is ignored.
        let mut chars = line.chars();

        for col in 0..cols {
            let Some(ch) = chars.next() else {
                return Err(FormatError::ShortRow {
                    row,
                    len: col,
                    cols,
                });
            };

            match ch {
                '-' => cells.push(0),
                'X' => cells.push(1),
                ch => return Err(FormatError::BadCell { row, col, ch }),
            }
        }
    }

    Ok(Grid::from_cells(rows, cols, cells))
}

fn read_count<'a>(name: &'static str, text: &'a str) -> Result<(usize, &'a str), FormatError> {
    let (Some(line), rest) = parse_util::take_line(text) else {
        return Err(FormatError::MissingLine(name));
    };

    let count = parse_util::convert(line.trim())
        .map_err(|source| FormatError::BadCount { name, source })?;

    Ok((count, rest))
}

/// Load a colony snapshot from disk.
pub fn load(path: &Path) -> Result<Grid, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let grid = parse(&text)?;

    info!(rows = grid.rows(), cols = grid.cols(), ?path, "loaded colony snapshot");

    Ok(grid)
}

/// Serialize a grid in the snapshot format.
///
/// The format only distinguishes dead from alive, so ages above 1 collapse to
/// `'X'`. Reloading the result yields the same dimensions and liveness, with
/// every live cell back at age 1.
pub fn to_text(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.cols() + 1) * (grid.rows() + 2));

    out.push_str(&grid.rows().to_string());
    out.push('\n');
    out.push_str(&grid.cols().to_string());
    out.push('\n');

    for ((_, col), age) in grid.iter() {
        out.push(if age == 0 { '-' } else { 'X' });

        if col + 1 == grid.cols() {
            out.push('\n');
        }
    }

    out
}

/// Seed a colony of random dimensions.
///
/// Each dimension is uniform over [`RANDOM_DIMS`]. Each cell stays dead with
/// probability [`LIVE_CHANCE`], otherwise its age is uniform in
/// `1..max_age` — never `max_age` itself, so a fresh colony is never born
/// already stable.
pub fn random<R: Rng>(rng: &mut R, max_age: Age) -> Grid {
    debug_assert!(max_age >= 2);

    let rows = rng.gen_range(RANDOM_DIMS);
    let cols = rng.gen_range(RANDOM_DIMS);

    let cells = (0..rows * cols)
        .map(|_| {
            if rng.gen_bool(LIVE_CHANCE) {
                rng.gen_range(1..max_age)
            } else {
                0
            }
        })
        .collect();

    info!(rows, cols, "seeded random colony");

    Grid::from_cells(rows, cols, cells)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::DEFAULT_MAX_AGE;
    use crate::grid::Grid;

    use super::FormatError;
    use super::RANDOM_DIMS;

    #[test]
    fn parse_skips_comments_and_maps_cells() {
        let text = "# A tiny colony.\n# Second comment.\n2\n3\nX-X\n--X\n";

        let grid = super::parse(text).unwrap();

        assert_eq!(grid, Grid::from_cells(2, 3, vec![1, 0, 1, 0, 0, 1]));
    }

    #[test]
    fn parse_rejects_unparseable_counts() {
        let err = super::parse("two\n3\n").unwrap_err();

        assert!(matches!(err, FormatError::BadCount { name: "row count", .. }));
    }

    #[test]
    fn parse_rejects_unrecognized_cell() {
        let err = super::parse("2\n2\nX-\n-?\n").unwrap_err();

        assert_eq!(err, FormatError::BadCell { row: 1, col: 1, ch: '?' });
    }

    #[test]
    fn parse_rejects_short_row() {
        let err = super::parse("1\n4\nXX\n").unwrap_err();

        assert_eq!(err, FormatError::ShortRow { row: 0, len: 2, cols: 4 });
    }

    #[test]
    fn parse_rejects_missing_rows() {
        let err = super::parse("3\n2\nXX\n").unwrap_err();

        assert_eq!(err, FormatError::MissingRows { expected: 3, found: 1 });
    }

    #[test]
    fn parse_ignores_trailing_characters_on_data_rows() {
        let grid = super::parse("1\n2\nX- trailing junk\n").unwrap();

        assert_eq!(grid, Grid::from_cells(1, 2, vec![1, 0]));
    }

    #[test]
    fn round_trip_collapses_ages_to_liveness() {
        // The text format is lossy: any age >= 1 serializes as 'X' and comes
        // back as age 1.
        let grid = Grid::from_cells(2, 2, vec![0, 1, 5, 0]);

        let text = super::to_text(&grid);
        assert_eq!(text, "2\n2\n-X\nX-\n");

        let reloaded = super::parse(&text).unwrap();
        assert_eq!(reloaded, Grid::from_cells(2, 2, vec![0, 1, 1, 0]));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = super::load(std::path::Path::new("no/such/colony.txt")).unwrap_err();

        assert!(matches!(err, super::SnapshotError::NotFound { .. }));
    }

    #[test]
    fn random_respects_dimension_and_age_ranges() {
        let mut rng = StdRng::seed_from_u64(7);

        let grid = super::random(&mut rng, DEFAULT_MAX_AGE);

        assert!(RANDOM_DIMS.contains(&grid.rows()));
        assert!(RANDOM_DIMS.contains(&grid.cols()));
        assert!(grid.iter().all(|(_, age)| age < DEFAULT_MAX_AGE));
        assert!(grid.iter().any(|(_, age)| age > 0));
    }
}
