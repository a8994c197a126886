//! Simulation of a small grid container terminal and a greedy multi-crane
//! scheduler that produces a per-crane, per-turn action schedule moving every
//! container from its arrival lane to its exit lane.
//!
//! The library exposes the simulation engine ([`terminal::Terminal`]) and two
//! strategies implementing [`solver::Solver`]; picking between them is left to
//! the caller (see `src/main.rs`).

pub mod common;
pub mod grid;
pub mod problem;
pub mod solver;
pub mod terminal;

pub use common::ChangeMinMax;
pub use problem::{Action, Config, Container, Input, Schedule};
pub use solver::{greedy::GreedySolver, single_crane::SingleCraneSolver};
pub use solver::{Outcome, Solver, SolverResult};
pub use terminal::{SimulationError, Terminal};
