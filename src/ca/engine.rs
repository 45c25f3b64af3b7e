//! The cellular-automaton step function.
//!
//! Every cell counts its live neighbors over the 8-cell Moore neighborhood
//! on a torus (edges wrap to the opposite side) and looks up its next state
//! in a [`RuleTable`]. Each step reads exactly eight neighbors per cell and
//! never mutates its input.

use super::grid::Grid;
use super::rule::RuleTable;

/// Number of live cells among the 8 toroidal neighbors of `(x, y)`.
///
/// # Panics
/// Panics if the coordinates are out of bounds.
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> usize {
    let (w, h) = grid.dimensions();
    assert!(x < w && y < h, "cell ({x}, {y}) out of bounds");
    let cells = grid.cells();

    // Offsets are shifted by one so -1 becomes `w - 1` (resp. `h - 1`).
    let mut count = 0;
    for oy in 0..3 {
        for ox in 0..3 {
            if ox == 1 && oy == 1 {
                continue;
            }
            let nx = (x + w + ox - 1) % w;
            let ny = (y + h + oy - 1) % h;
            count += cells[ny * w + nx] as usize;
        }
    }
    count
}

/// Applies `rule` to every cell of `grid`, returning the next grid.
///
/// # Examples
///
/// ```
/// use ca_rulefind::ca::{apply, Grid, RuleTable};
///
/// let blinker = Grid::from_ascii(
///     ".....\n\
///      ..#..\n\
///      ..#..\n\
///      ..#..\n\
///      .....",
/// )
/// .unwrap();
/// let next = apply(&blinker, &RuleTable::life());
/// assert_eq!(next.to_string(), ".....\n.....\n.###.\n.....\n.....");
/// ```
pub fn apply(grid: &Grid, rule: &RuleTable) -> Grid {
    let mut out = grid.clone();
    apply_into(grid, rule, &mut out);
    out
}

/// Applies `rule` to `grid`, writing the result into `out`.
///
/// # Panics
/// Panics if `out` has different dimensions from `grid`.
pub fn apply_into(grid: &Grid, rule: &RuleTable, out: &mut Grid) {
    assert_eq!(
        grid.dimensions(),
        out.dimensions(),
        "output grid must match input dimensions"
    );
    let cells = out.cells_mut();
    for_each_prediction(grid, rule, |i, next| cells[i] = next);
}

/// Runs `steps` generations from `initial`.
///
/// Returns `steps + 1` frames, the first being a copy of `initial`.
pub fn simulate(initial: &Grid, rule: &RuleTable, steps: usize) -> Vec<Grid> {
    let mut frames = Vec::with_capacity(steps + 1);
    frames.push(initial.clone());
    for _ in 0..steps {
        let next = apply(&frames[frames.len() - 1], rule);
        frames.push(next);
    }
    frames
}

/// Calls `f(index, next_state)` for every cell in row-major order.
///
/// Wrapped neighbor rows and columns are resolved once per row/column so the
/// inner loop is eight plain reads and a table lookup.
#[inline]
pub(crate) fn for_each_prediction<F>(grid: &Grid, rule: &RuleTable, mut f: F)
where
    F: FnMut(usize, bool),
{
    let (w, h) = grid.dimensions();
    let cells = grid.cells();

    for y in 0..h {
        let up = ((y + h - 1) % h) * w;
        let row = y * w;
        let down = ((y + 1) % h) * w;

        for x in 0..w {
            let left = (x + w - 1) % w;
            let right = (x + 1) % w;

            let count = cells[up + left] as usize
                + cells[up + x] as usize
                + cells[up + right] as usize
                + cells[row + left] as usize
                + cells[row + right] as usize
                + cells[down + left] as usize
                + cells[down + x] as usize
                + cells[down + right] as usize;

            f(row + x, rule.next_state(cells[row + x], count));
        }
    }
}
