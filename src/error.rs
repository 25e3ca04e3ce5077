use thiserror::Error;

use crate::puzzle::Tiles;

/// Failures the search engine surfaces to its caller.
///
/// Informational conditions such as "already solved" or "no forward move"
/// are not errors; they are reported through [`crate::StepOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid arrangement {0:?}: expected a permutation of 0..=8")]
    InvalidArrangement(Vec<u8>),

    #[error("arrangement {0:?} is not solvable")]
    Unsolvable(Tiles),

    #[error("no move available and no earlier state to backtrack to (depth {depth})")]
    Exhausted { depth: usize },

    #[error("goal not reached within {limit} steps")]
    StepLimit { limit: usize },
}
