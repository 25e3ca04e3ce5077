//! Greedy heuristic search for the 3x3 sliding puzzle.
//!
//! - `puzzle`: tile arrangements ([`PuzzleState`]), the adjacency table,
//!   Manhattan-distance heuristic and inversion-parity solvability test.
//! - `engine`: [`SearchEngine`], which walks from a random solvable root
//!   toward the goal one decision at a time, backtracking out of dead ends.

pub mod engine;
pub mod error;
pub mod puzzle;

pub use engine::{SearchEngine, Snapshot, StepOutcome, StepReport};
pub use error::SearchError;
pub use puzzle::{Move, PuzzleState, Tiles, GOAL};
