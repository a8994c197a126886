use itertools::iproduct;

use super::{opener, Outcome, Solver, SolverResult};
use crate::{
    grid::Coord,
    problem::{Action, Config, Input, Schedule},
    terminal::{SimulationError, Terminal},
};

/// Scripted baseline: after the opener the Small cranes retire, and the Large
/// crane alone ferries containers to the exit column in export order. Always
/// safe, rarely fast; serves as the fallback schedule.
pub struct SingleCraneSolver {
    config: Config,
}

impl SingleCraneSolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn step(
        &self,
        term: &mut Terminal,
        schedule: &mut Schedule,
        action: Action,
    ) -> Result<(), SimulationError> {
        let mut actions = vec![Action::Inert; term.n()];
        actions[0] = action;

        term.intake();
        schedule.push(&actions);
        term.resolve(&actions)?;
        term.collect();
        Ok(())
    }

    /// Walk the Large crane to `goal`, vertical leg first.
    fn walk(
        &self,
        term: &mut Terminal,
        schedule: &mut Schedule,
        goal: Coord,
    ) -> Result<(), SimulationError> {
        while term.cranes()[0].pos().row() != goal.row() {
            let action = if goal.row() > term.cranes()[0].pos().row() {
                Action::Down
            } else {
                Action::Up
            };
            self.step(term, schedule, action)?;
        }

        while term.cranes()[0].pos().col() != goal.col() {
            let action = if goal.col() > term.cranes()[0].pos().col() {
                Action::Right
            } else {
                Action::Left
            };
            self.step(term, schedule, action)?;
        }

        Ok(())
    }

    fn ferry(
        &self,
        term: &mut Terminal,
        schedule: &mut Schedule,
        from: Coord,
        to: Coord,
    ) -> Result<(), SimulationError> {
        self.walk(term, schedule, from)?;
        self.step(term, schedule, Action::Catch)?;
        self.walk(term, schedule, to)?;
        self.step(term, schedule, Action::Release)
    }
}

impl Solver for SingleCraneSolver {
    fn solve(&self, input: &Input) -> Result<SolverResult, SimulationError> {
        let n = input.n();
        let mut term = Terminal::new(input);
        let mut schedule = Schedule::new(n);
        opener::run(&mut term, &mut schedule)?;

        // Retire the fleet; only the Large crane works from here on.
        {
            let mut actions = vec![Action::Bomb; n];
            actions[0] = Action::Wait;

            term.intake();
            schedule.push(&actions);
            term.resolve(&actions)?;
            term.collect();
        }

        let outcome = loop {
            if term.all_collected() {
                break Outcome::Complete;
            }

            if term.turn() >= self.config.max_turn {
                break Outcome::TurnLimit;
            }

            let wanted = term.next_wanted();

            // First exportable container on the board, row-major order.
            let target = iproduct!(0..n, 0..n - 1).find_map(|(row, col)| {
                let coord = Coord::new(row, col);
                let container = term.container_at(coord)?;
                (wanted[term.goal_row(container)] == Some(container)).then_some((container, coord))
            });

            let Some((container, catch_cell)) = target else {
                eprintln!(
                    "single crane: no exportable container on the board (turn {})",
                    term.turn()
                );
                break Outcome::DeadEnd;
            };

            let goal = term.goal(container);
            self.ferry(&mut term, &mut schedule, catch_cell, goal)?;

            // Pull entrance containers into the cell just vacated so the
            // lanes behind them keep flowing.
            for lane in 0..n {
                let entrance = Coord::new(lane, 0);

                if term.container_at(entrance).is_some()
                    && term.queue_len(lane) > 0
                    && term.container_at(catch_cell).is_none()
                {
                    self.ferry(&mut term, &mut schedule, entrance, catch_cell)?;
                }
            }
        };

        let remaining = term.remaining();
        Ok(SolverResult::new(schedule, outcome, remaining))
    }
}
