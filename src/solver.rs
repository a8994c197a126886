pub mod greedy;
pub mod opener;
pub mod single_crane;

use crate::{
    problem::{Input, Schedule},
    terminal::SimulationError,
};

pub trait Solver {
    fn solve(&self, input: &Input) -> Result<SolverResult, SimulationError>;
}

/// How a strategy's turn loop ended. Only `Complete` guarantees that every
/// container was collected; the other two carry a usable partial schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every container reached its collected list.
    Complete,
    /// No further task could be generated although containers remain.
    DeadEnd,
    /// The configured turn ceiling was reached.
    TurnLimit,
}

#[derive(Debug, Clone)]
pub struct SolverResult {
    schedule: Schedule,
    outcome: Outcome,
    remaining: usize,
}

impl SolverResult {
    fn new(schedule: Schedule, outcome: Outcome, remaining: usize) -> Self {
        Self {
            schedule,
            outcome,
            remaining,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn turns(&self) -> usize {
        self.schedule.turns()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == Outcome::Complete
    }

    /// Lower is better: turn count, with uncollected containers dominating.
    pub fn score(&self) -> usize {
        self.turns() + 10_000 * self.remaining
    }
}
