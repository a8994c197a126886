mod task_assign;
mod task_execute;
mod task_gen;

use rand_pcg::Pcg64Mcg;

use crate::{
    grid::Map2d,
    problem::{Action, Config, Input, Schedule},
    terminal::{CraneStatus, SimulationError, Terminal},
};

use super::{opener, Outcome, Solver, SolverResult};

use task_gen::Task;

/// Adaptive multi-crane strategy: after the scripted opener, every turn
/// regenerates the task pool from the current board, hands the cheapest
/// tasks to free cranes and picks one collision-checked step per crane.
pub struct GreedySolver {
    config: Config,
}

impl GreedySolver {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Solver for GreedySolver {
    fn solve(&self, input: &Input) -> Result<SolverResult, SimulationError> {
        let n = input.n();
        let mut rng = Pcg64Mcg::new(self.config.seed as u128);
        let mut term = Terminal::new(input);
        let mut schedule = Schedule::new(n);
        let mut tasks: Vec<Task> = vec![];

        opener::run(&mut term, &mut schedule)?;

        let outcome = loop {
            if term.all_collected() {
                break Outcome::Complete;
            }

            if term.turn() >= self.config.max_turn {
                break Outcome::TurnLimit;
            }

            term.intake();

            let wanted = term.next_wanted();
            tasks.clear();
            task_gen::generate(&term, &wanted, &mut tasks);

            let all_idle = term
                .cranes()
                .iter()
                .all(|crane| !crane.exists() || crane.status() == CraneStatus::Free);

            if tasks.is_empty() && all_idle {
                eprintln!(
                    "greedy stalled at turn {} with {} containers left",
                    term.turn(),
                    term.remaining()
                );
                term.trace();
                break Outcome::DeadEnd;
            }

            for id in 0..n {
                let crane = &term.cranes()[id];

                if crane.exists() && crane.status() == CraneStatus::Free {
                    task_assign::try_assign(&mut term, id, &mut tasks);
                }
            }

            let mut next_pos = Map2d::with_default(n);
            let mut actions = Vec::with_capacity(n);

            for id in 0..n {
                let action = task_execute::select(&term, id, &next_pos, &mut rng);

                if action != Action::Inert {
                    next_pos[term.cranes()[id].pos() + action.delta()] = true;
                }

                actions.push(action);
            }

            schedule.push(&actions);
            term.resolve(&actions)?;
            term.collect();
        };

        Ok(SolverResult::new(schedule, outcome, term.remaining()))
    }
}
