//! twenty48-core: the grid mechanics of the 2048 puzzle
//!
//! This crate provides:
//! - A `GridEngine` owning an N×N tile grid and the running score, with
//!   directional slide/merge (`apply_move`), random tile spawning
//!   (`spawn_tile`), and convenience stepping (`step`)
//! - A terminal-state predicate (`terminal` module) deciding whether any
//!   legal move remains
//!
//! Quick start:
//! ```
//! use twenty48_core::engine::{Direction, GridEngine};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut engine = GridEngine::new(4, &mut rng).unwrap();
//! let result = engine.step(Direction::Left, &mut rng);
//! assert_eq!(result.score, engine.score());
//! assert!(!engine.is_terminal());
//! ```
//!
//! The engine never reads ambient randomness unless asked to: every
//! spawning method takes `&mut impl Rng`, with `_thread` variants for
//! callers that don't need reproducibility.
pub mod engine;
pub mod terminal;
