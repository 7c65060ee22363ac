use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::terminal;

/// Running score. Grows only by the value of each newly merged tile.
pub type Score = u64;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in input-scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Vertical moves transform columns; horizontal moves transform rows.
    #[inline]
    fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Down/Right slide toward index N-1, so the compacted line is
    /// written back reflected.
    #[inline]
    fn is_reversed(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

/// Outcome of a single `apply_move`: whether any cell changed, and the
/// score after the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub changed: bool,
    pub score: Score,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("row length {got} does not match grid size {expected}")]
    RaggedRow { expected: usize, got: usize },
}

/// An N×N 2048 grid plus score, mutated in place by moves and spawns.
///
/// The engine owns all game state; callers observe it through the
/// read-only accessors and drive it with `apply_move`/`spawn_tile` (or
/// the combined `step`). Randomness is always injected, so a seeded
/// `StdRng` gives fully reproducible games.
pub struct GridEngine {
    grid: Vec<Vec<u32>>,
    score: Score,
    size: usize,
}

impl GridEngine {
    /// Create a `size`×`size` game with two random tiles already placed.
    ///
    /// ```
    /// use twenty48_core::engine::GridEngine;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let engine = GridEngine::new(4, &mut rng).unwrap();
    /// assert_eq!(engine.count_empty(), 14);
    /// assert_eq!(engine.score(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidSize(size));
        }
        let mut engine = GridEngine {
            grid: vec![vec![0; size]; size],
            score: 0,
            size,
        };
        engine.spawn_tile(rng);
        engine.spawn_tile(rng);
        Ok(engine)
    }

    /// Construct an engine from an explicit layout, score 0.
    ///
    /// Escape hatch for tests and tools that need a known position.
    /// The input must be square and non-empty.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if size == 0 {
            return Err(EngineError::InvalidSize(size));
        }
        for row in &rows {
            if row.len() != size {
                return Err(EngineError::RaggedRow {
                    expected: size,
                    got: row.len(),
                });
            }
        }
        Ok(GridEngine {
            grid: rows,
            score: 0,
            size,
        })
    }

    /// Start a fresh game on the same grid size: all cells cleared,
    /// score zeroed, two new random tiles.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.grid.iter_mut() {
            row.fill(0);
        }
        self.score = 0;
        self.spawn_tile(rng);
        self.spawn_tile(rng);
    }

    /// Slide and merge all tiles toward `direction`.
    ///
    /// Each line orthogonal to the move is compacted independently: its
    /// non-zero values are collected in ascending index order, merged in
    /// a single pass (equal adjacent pair -> one doubled tile, doubled
    /// value added to the score, no re-merge within the pass), padded
    /// with zeros, and written back — reflected for Down/Right so the
    /// tiles end up packed against the far edge.
    ///
    /// Never fails; a move that cannot change the grid reports
    /// `changed: false` and leaves the score untouched.
    ///
    /// ```
    /// use twenty48_core::engine::{Direction, GridEngine};
    /// let mut engine = GridEngine::from_rows(vec![
    ///     vec![2, 0, 2, 4],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    /// ]).unwrap();
    /// let result = engine.apply_move(Direction::Left);
    /// assert!(result.changed);
    /// assert_eq!(result.score, 4);
    /// assert_eq!(engine.grid()[0], vec![4, 4, 0, 0]);
    /// ```
    pub fn apply_move(&mut self, direction: Direction) -> MoveResult {
        let n = self.size;
        let vertical = direction.is_vertical();
        let reversed = direction.is_reversed();
        let mut changed = false;

        for line in 0..n {
            let mut stack = Vec::with_capacity(n);
            for idx in 0..n {
                let (row, col) = if vertical { (idx, line) } else { (line, idx) };
                let val = self.grid[row][col];
                if val != 0 {
                    stack.push(val);
                }
            }

            let merged = self.merge_stack(&stack);

            for idx in 0..n {
                let (row, col) = if vertical { (idx, line) } else { (line, idx) };
                let val = merged[if reversed { n - 1 - idx } else { idx }];
                if self.grid[row][col] != val {
                    self.grid[row][col] = val;
                    changed = true;
                }
            }
        }

        MoveResult {
            changed,
            score: self.score,
        }
    }

    /// Single merge pass over a compacted stack, near end at index 0.
    /// Accrues score and pads the result to the grid size.
    fn merge_stack(&mut self, stack: &[u32]) -> Vec<u32> {
        let mut merged = Vec::with_capacity(self.size);
        let mut idx = 0;
        while idx < stack.len() {
            if idx + 1 < stack.len() && stack[idx] == stack[idx + 1] {
                let doubled = stack[idx] * 2;
                merged.push(doubled);
                self.score += Score::from(doubled);
                idx += 2;
            } else {
                merged.push(stack[idx]);
                idx += 1;
            }
        }
        merged.resize(self.size, 0);
        merged
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns `false` without touching the grid when no cell is empty.
    ///
    /// ```
    /// use twenty48_core::engine::GridEngine;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut engine = GridEngine::from_rows(vec![vec![0, 2], vec![4, 8]]).unwrap();
    /// assert!(engine.spawn_tile(&mut rng));
    /// assert!(!engine.spawn_tile(&mut rng)); // grid now full
    /// ```
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empties: Vec<(usize, usize)> = (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .filter(|&(row, col)| self.grid[row][col] == 0)
            .collect();
        if empties.is_empty() {
            return false;
        }
        let (row, col) = empties[rng.gen_range(0..empties.len())];
        self.grid[row][col] = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        true
    }

    /// Convenience: like `spawn_tile` but uses the thread-local RNG.
    pub fn spawn_tile_thread(&mut self) -> bool {
        let mut rng = rand::thread_rng();
        self.spawn_tile(&mut rng)
    }

    /// Apply a move and, if it changed the grid, spawn a tile — the
    /// standard per-input sequence a caller would otherwise do by hand.
    pub fn step<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> MoveResult {
        let result = self.apply_move(direction);
        if result.changed {
            self.spawn_tile(rng);
        }
        result
    }

    /// Read-only view of the grid, rows in order.
    #[inline]
    pub fn grid(&self) -> &[Vec<u32>] {
        &self.grid
    }

    /// Current score.
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Grid side length, fixed for the engine's lifetime.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Count the empty cells.
    pub fn count_empty(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&val| val == 0)
            .count()
    }

    /// Highest tile value on the grid (0 when empty).
    pub fn highest_tile(&self) -> u32 {
        self.grid
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// True if no move in any direction can change the grid: every cell
    /// is occupied and no two equal tiles are adjacent.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        terminal::is_terminal(&self.grid)
    }
}

impl fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridEngine")
            .field("size", &self.size)
            .field("score", &self.score)
            .field("grid", &self.grid)
            .finish()
    }
}

impl fmt::Display for GridEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8);
        writeln!(f)?;
        for (row_idx, row) in self.grid.iter().enumerate() {
            if row_idx > 0 {
                writeln!(f, "{}", rule)?;
            }
            let cells: Vec<_> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: &u32) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
