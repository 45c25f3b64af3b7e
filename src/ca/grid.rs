//! Binary grid snapshots.
//!
//! A [`Grid`] is one frame of an observed sequence: a `width × height`
//! matrix of live/dead cells stored row-major. The engine only ever sees
//! already-binarized grids; [`Grid::from_luma`] is provided for hosts that
//! decode raster frames themselves.

use crate::error::{Result, RuleFindError};
use rand::Rng;
use std::fmt;

/// Side length of the square frames the rule finder is usually fed.
pub const DEFAULT_GRID_SIZE: usize = 200;

/// Single-channel intensity above which a pixel counts as a live cell.
pub const BINARIZATION_THRESHOLD: u8 = 127;

/// A `width × height` matrix of boolean cell states.
///
/// # Examples
///
/// ```
/// use ca_rulefind::ca::Grid;
///
/// let grid = Grid::from_ascii(
///     "....\n\
///      .##.\n\
///      .##.\n\
///      ....",
/// )
/// .unwrap();
/// assert_eq!(grid.dimensions(), (4, 4));
/// assert_eq!(grid.live_count(), 4);
/// assert!(grid.get(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Creates a grid from row-major cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        let len = cell_count(width, height)?;
        if cells.len() != len {
            return Err(RuleFindError::InvalidGrid(format!(
                "expected {len} cells for {width}x{height}, got {}",
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        cell_count(width, height)?;
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Binarizes a single-channel row-major raster.
    ///
    /// A cell is alive iff its intensity is strictly greater than
    /// `threshold` (see [`BINARIZATION_THRESHOLD`]).
    pub fn from_luma(width: usize, height: usize, pixels: &[u8], threshold: u8) -> Result<Self> {
        Self::from_cells(
            width,
            height,
            pixels.iter().map(|&p| p > threshold).collect(),
        )
    }

    /// Parses rows of `#`/`O`/`1` (alive) and `.`/`0` (dead).
    ///
    /// Surrounding whitespace on each line is ignored; blank lines are
    /// skipped. All rows must have the same length.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(cell_count(width, height)?);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(RuleFindError::InvalidGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for c in row.chars() {
                cells.push(match c {
                    '#' | 'O' | '1' => true,
                    '.' | '0' => false,
                    other => {
                        return Err(RuleFindError::InvalidGrid(format!(
                            "unexpected character {other:?} in row {y}"
                        )))
                    }
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a grid where each cell is alive with probability `density`.
    pub fn random<R: Rng>(width: usize, height: usize, density: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(RuleFindError::InvalidGrid(format!(
                "density must be in [0, 1], got {density}"
            )));
        }
        Self::from_fn(width, height, |_, _| rng.random_bool(density))
    }

    /// Grid width (number of columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major cell states.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Returns the state of cell `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[y * self.width + x]
    }

    /// Sets the state of cell `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[y * self.width + x] = alive;
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of cells whose state differs from `other`.
    ///
    /// # Panics
    /// Panics if the grids have different dimensions.
    pub fn diff_count(&self, other: &Grid) -> usize {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "grids must have equal dimensions"
        );
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Number of cells in a `width × height` grid, rejecting empty or
/// unaddressable dimensions.
fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RuleFindError::InvalidGrid(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        RuleFindError::InvalidGrid(format!("{width}x{height} grid overflows the cell count"))
    })
}

/// Wire form of [`Grid`]; deserialization goes through [`Grid::from_cells`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = RuleFindError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::from_cells(raw.width, raw.height, raw.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_is_all_dead() {
        let grid = Grid::new(5, 3).unwrap();
        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!(grid.cells().len(), 15);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(RuleFindError::InvalidGrid(_))));
        assert!(matches!(Grid::new(4, 0), Err(RuleFindError::InvalidGrid(_))));
    }

    #[test]
    fn test_from_cells_length_checked() {
        let err = Grid::from_cells(3, 3, vec![false; 8]).unwrap_err();
        assert!(err.to_string().contains("expected 9 cells"));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            Grid::from_cells(usize::MAX, 2, Vec::with_capacity(0)),
            Err(RuleFindError::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::new(usize::MAX, usize::MAX),
            Err(RuleFindError::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::from_fn(usize::MAX, 3, |_, _| false),
            Err(RuleFindError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_ascii_single_line_glider() {
        let grid = Grid::from_ascii(
            ".#......\n..#.....\n###.....\n........\n........\n........\n........\n........",
        )
        .unwrap();
        assert_eq!(grid.dimensions(), (8, 8));
        assert_eq!(grid.live_count(), 5);
        assert!(grid.get(0, 2) && grid.get(1, 2) && grid.get(2, 2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_shape() {
        let grid: Grid =
            serde_json::from_str(r#"{"width":2,"height":2,"cells":[true,false,false,true]}"#)
                .unwrap();
        assert_eq!(grid.live_count(), 2);
        assert_eq!(serde_json::from_str::<Grid>(&serde_json::to_string(&grid).unwrap()).unwrap(), grid);

        let short = serde_json::from_str::<Grid>(r#"{"width":4,"height":4,"cells":[true,false]}"#);
        assert!(short.unwrap_err().to_string().contains("expected 16 cells"));

        let empty = serde_json::from_str::<Grid>(r#"{"width":0,"height":3,"cells":[]}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::from_fn(3, 2, |x, y| x == 2 && y == 1).unwrap();
        assert_eq!(grid.cells(), &[false, false, false, false, false, true]);
        assert!(grid.get(2, 1));
    }

    #[test]
    fn test_from_luma_threshold_is_strict() {
        let grid = Grid::from_luma(4, 1, &[0, 127, 128, 255], BINARIZATION_THRESHOLD).unwrap();
        assert_eq!(grid.cells(), &[false, false, true, true]);
    }

    #[test]
    fn test_ascii_display_roundtrip() {
        let text = ".#.\n##.\n..#";
        let grid = Grid::from_ascii(text).unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_ascii_ragged_rows_rejected() {
        assert!(Grid::from_ascii("..\n...").is_err());
        assert!(Grid::from_ascii("..\n.x").is_err());
        assert!(Grid::from_ascii("").is_err());
    }

    #[test]
    fn test_random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Grid::random(8, 8, 0.0, &mut rng).unwrap().live_count(), 0);
        assert_eq!(Grid::random(8, 8, 1.0, &mut rng).unwrap().live_count(), 64);
        assert!(Grid::random(8, 8, 1.5, &mut rng).is_err());
    }

    #[test]
    fn test_diff_count() {
        let a = Grid::from_ascii("#.\n..").unwrap();
        let b = Grid::from_ascii("##\n.#").unwrap();
        assert_eq!(a.diff_count(&b), 2);
        assert_eq!(a.diff_count(&a), 0);
    }
}
