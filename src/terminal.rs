//! Terminal-state detection over a grid snapshot.
//!
//! A position admits a legal move iff some cell is empty or some pair
//! of equal tiles is adjacent. Checking each cell against its neighbor
//! below and to the right covers both axes without double-scanning.

/// True if no move in any direction can change the grid.
///
/// The snapshot must be square: every row as long as `grid.len()`.
/// `GridEngine` snapshots always are; hand-built input is the caller's
/// responsibility, and a ragged slice will index out of bounds.
///
/// ```
/// let stuck = vec![
///     vec![2, 4, 2, 4],
///     vec![4, 2, 4, 2],
///     vec![2, 4, 2, 4],
///     vec![4, 2, 4, 2],
/// ];
/// assert!(twenty48_core::terminal::is_terminal(&stuck));
/// ```
pub fn is_terminal(grid: &[Vec<u32>]) -> bool {
    let n = grid.len();
    for row in 0..n {
        for col in 0..n {
            let val = grid[row][col];
            if val == 0 {
                return false;
            }
            if row + 1 < n && grid[row + 1][col] == val {
                return false;
            }
            if col + 1 < n && grid[row][col + 1] == val {
                return false;
            }
        }
    }
    true
}
