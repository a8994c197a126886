use crate::{
    problem::{Action, Schedule},
    terminal::{SimulationError, Terminal},
};

/// Scripted opening shared by both strategies: every crane catches at its
/// entrance, carries the container `j` cells to the right, releases and walks
/// back, for `j` from n-2 down to 1. Afterwards each lane's first n-2
/// arrivals sit spread across columns 1..=n-2 and every crane is back at its
/// entrance. Degenerates to a no-op for n = 2.
pub fn run(term: &mut Terminal, schedule: &mut Schedule) -> Result<(), SimulationError> {
    let n = term.n();

    for j in (1..=n.saturating_sub(2)).rev() {
        let drop_turn = j + 1;
        let last_turn = drop_turn + j;

        for k in 0..=last_turn {
            term.intake();

            let action = if k == 0 {
                Action::Catch
            } else if k <= j {
                Action::Right
            } else if k == drop_turn {
                Action::Release
            } else {
                Action::Left
            };

            let actions = vec![action; n];
            schedule.push(&actions);
            term.resolve(&actions)?;
            term.collect();
        }
    }

    Ok(())
}
