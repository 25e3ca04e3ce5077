use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::puzzle::{Move, PuzzleState, Tiles};

/// What a call to [`SearchEngine::step`] (or a run) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The goal was already reached; nothing changed.
    AlreadySolved,
    /// Committed to a new state that is not the goal.
    Advanced,
    /// Committed to the goal.
    Solved,
    /// Every candidate was filtered out; returned to the previous state.
    Backtracked,
}

/// Read-only view of the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tiles: Tiles,
    pub depth: usize,
    pub heuristic: usize,
    pub is_done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    /// Direction a tile slid into the blank, if the current state changed.
    pub movement: Option<Move>,
    pub snapshot: Snapshot,
    /// Decision cycles spent producing this report.
    pub steps: usize,
}

/// Greedy best-first walk over puzzle states with single-step backtracking.
///
/// `history` is the committed path from the root; its last entry is always
/// the current state. `visited` holds every arrangement committed since the
/// last reset, including ones popped by backtracking, so a dead end is never
/// entered twice.
pub struct SearchEngine<R = SmallRng> {
    rng: R,
    history: Vec<PuzzleState>,
    visited: HashSet<Tiles>,
}

impl SearchEngine<SmallRng> {
    /// Engine seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Deterministic engine: the same seed yields the same roots and the
    /// same search.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for SearchEngine<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let root = solvable_root(&mut rng);
        let mut engine = Self {
            rng,
            history: Vec::new(),
            visited: HashSet::new(),
        };
        engine.restart_from(root);
        engine
    }

    /// Starts the search from a caller-chosen root.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Unsolvable`] if `root` has odd inversion parity.
    pub fn from_root(root: PuzzleState, rng: R) -> Result<Self, SearchError> {
        if !root.is_solvable() {
            return Err(SearchError::Unsolvable(*root.tiles()));
        }
        let mut engine = Self {
            rng,
            history: Vec::new(),
            visited: HashSet::new(),
        };
        engine.restart_from(root);
        Ok(engine)
    }

    pub fn current(&self) -> &PuzzleState {
        self.history
            .last()
            .expect("history always holds at least the root")
    }

    pub fn history(&self) -> &[PuzzleState] {
        &self.history
    }

    pub fn is_done(&self) -> bool {
        self.current().is_goal()
    }

    pub fn snapshot(&self) -> Snapshot {
        let current = self.current();
        Snapshot {
            tiles: *current.tiles(),
            depth: current.depth(),
            heuristic: current.heuristic(),
            is_done: current.is_goal(),
        }
    }

    /// One child per neighbor of the blank, in adjacency-table order.
    pub fn successors(&self) -> Vec<PuzzleState> {
        let current = self.current();
        let blank = current.blank_position();

        current
            .neighbors()
            .iter()
            .map(|&neighbor| {
                let mut child = PuzzleState::from_parent(current);
                child.swap(neighbor, blank);
                child
            })
            .collect()
    }

    /// Runs one decision cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Exhausted`] when no candidate survives and the
    /// current state is the root.
    pub fn step(&mut self) -> Result<StepReport, SearchError> {
        if self.is_done() {
            return Ok(self.report(StepOutcome::AlreadySolved, None, 0));
        }

        let parent_depth = self.current().depth();
        let from = self.current().blank_position();

        let mut candidates: Vec<PuzzleState> = self
            .successors()
            .into_iter()
            .filter(|candidate| {
                candidate.is_solvable() && !self.visited.contains(candidate.tiles())
            })
            .collect();

        if candidates.is_empty() {
            return self.backtrack();
        }

        // Ranked by the parent's depth, not the child's. Stable, so ties keep
        // adjacency order.
        candidates.sort_by_key(|candidate| candidate.heuristic() + parent_depth);

        let index = candidates
            .iter()
            .position(PuzzleState::is_goal)
            .unwrap_or(0);
        let chosen = candidates.swap_remove(index);

        debug!(
            surviving = candidates.len() + 1,
            heuristic = chosen.heuristic(),
            depth = chosen.depth(),
            "advancing"
        );

        let movement = Move::between(from, chosen.blank_position());
        self.visited.insert(*chosen.tiles());
        self.history.push(chosen);

        if self.is_done() {
            info!(
                depth = self.current().depth(),
                visited = self.visited.len(),
                "puzzle solved"
            );
            Ok(self.report(StepOutcome::Solved, movement, 1))
        } else {
            Ok(self.report(StepOutcome::Advanced, movement, 1))
        }
    }

    /// Steps until the goal is reached. Unbounded.
    pub fn run_to_completion(&mut self) -> Result<StepReport, SearchError> {
        self.run(None)
    }

    /// Steps until the goal is reached or `limit` cycles have been spent.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::StepLimit`] if the goal was not reached in time.
    pub fn run_bounded(&mut self, limit: usize) -> Result<StepReport, SearchError> {
        self.run(Some(limit))
    }

    /// Discards the search and starts over from a fresh solvable root.
    pub fn reset(&mut self) {
        let root = solvable_root(&mut self.rng);
        self.restart_from(root);
        info!(heuristic = self.current().heuristic(), "engine reset");
    }

    fn run(&mut self, limit: Option<usize>) -> Result<StepReport, SearchError> {
        if self.is_done() {
            return Ok(self.report(StepOutcome::AlreadySolved, None, 0));
        }

        let mut steps = 0;
        loop {
            if let Some(limit) = limit {
                if steps >= limit {
                    return Err(SearchError::StepLimit { limit });
                }
            }

            let mut report = self.step()?;
            steps += 1;

            if report.outcome == StepOutcome::Solved {
                report.steps = steps;
                return Ok(report);
            }
        }
    }

    fn backtrack(&mut self) -> Result<StepReport, SearchError> {
        if self.history.len() < 2 {
            return Err(SearchError::Exhausted {
                depth: self.current().depth(),
            });
        }

        let from = self.current().blank_position();
        self.history.pop();
        let movement = Move::between(from, self.current().blank_position());

        debug!(
            depth = self.current().depth(),
            path = self.history.len(),
            "no forward move, backtracking"
        );

        Ok(self.report(StepOutcome::Backtracked, movement, 1))
    }

    fn restart_from(&mut self, root: PuzzleState) {
        self.history.clear();
        self.visited.clear();
        self.visited.insert(*root.tiles());
        self.history.push(root);
    }

    fn report(&self, outcome: StepOutcome, movement: Option<Move>, steps: usize) -> StepReport {
        StepReport {
            outcome,
            movement,
            snapshot: self.snapshot(),
            steps,
        }
    }
}

fn solvable_root<R: Rng + ?Sized>(rng: &mut R) -> PuzzleState {
    loop {
        let candidate = PuzzleState::random(rng);
        if candidate.is_solvable() {
            return candidate;
        }
        debug!(tiles = ?candidate.tiles(), "rejected unsolvable root");
    }
}
