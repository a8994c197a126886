use crate::{
    common::ChangeMinMax,
    problem::Input,
    terminal::{CraneKind, Terminal},
};

use super::task_gen::Task;

/// Commit a free crane to the cheapest compatible task, if any.
///
/// Cost is the Manhattan distance to the catch cell, plus a prohibitive
/// penalty for re-catching the container this crane just put down so that
/// it does not shuttle the same box back and forth. The chosen task and
/// every other task sharing its catch cell are removed from the pool.
pub fn try_assign(term: &mut Terminal, crane_id: usize, tasks: &mut Vec<Task>) {
    let crane = &term.cranes()[crane_id];
    let crane_pos = crane.pos();
    let crane_kind = crane.kind();
    let last_released = crane.last_released();

    let mut best: Option<Task> = None;
    let mut best_cost = usize::MAX;

    for &task in tasks.iter() {
        // A task can outlive its container when another crane snatched it
        // or an earlier release covered the cell.
        let Some(container) = term.container_at(task.catch()) else {
            continue;
        };

        if task.large_only() && !Input::is_large_crane(crane_id) {
            continue;
        }

        let mut cost = crane_pos.dist(&task.catch());

        if last_released == Some(container) {
            cost += match crane_kind {
                CraneKind::Large => 1000,
                CraneKind::Small => 1_000_000,
            };
        }

        if best_cost.change_min(cost) {
            best = Some(task);
        }
    }

    if let Some(task) = best {
        term.assign(crane_id, task.catch(), task.release());
        tasks.retain(|other| other.catch() != task.catch());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::Coord,
        problem::{Action, Input},
        terminal::CraneStatus,
    };

    fn sorted_input() -> Input {
        Input::new(vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 14, 15],
        ])
    }

    #[test]
    fn picks_the_nearest_live_task() {
        let input = sorted_input();
        let mut term = Terminal::new(&input);
        term.intake();

        // Containers sit at (0, 0) and (2, 0); crane 1 starts at (1, 0),
        // equidistant, so the first task in the pool wins.
        let mut tasks = vec![
            Task::new(Coord::new(2, 0), Coord::new(2, 1), false),
            Task::new(Coord::new(0, 0), Coord::new(0, 1), false),
        ];
        try_assign(&mut term, 1, &mut tasks);

        let crane = &term.cranes()[1];
        assert_eq!(crane.status(), CraneStatus::PreCatch);
        assert_eq!(crane.catch_target(), Coord::new(2, 0));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].catch(), Coord::new(0, 0));
    }

    #[test]
    fn small_cranes_never_take_export_tasks() {
        let input = sorted_input();
        let mut term = Terminal::new(&input);
        term.intake();

        let mut tasks = vec![Task::new(Coord::new(1, 0), Coord::new(1, 3), true)];
        try_assign(&mut term, 1, &mut tasks);

        assert_eq!(term.cranes()[1].status(), CraneStatus::Free);
        assert_eq!(tasks.len(), 1);

        try_assign(&mut term, 0, &mut tasks);
        assert_eq!(term.cranes()[0].status(), CraneStatus::PreCatch);
        assert!(tasks.is_empty());
    }

    #[test]
    fn stale_tasks_are_ignored() {
        let input = sorted_input();
        let mut term = Terminal::new(&input);
        term.intake();

        // (1, 1) never held a container.
        let mut tasks = vec![Task::new(Coord::new(1, 1), Coord::new(1, 2), false)];
        try_assign(&mut term, 1, &mut tasks);

        assert_eq!(term.cranes()[1].status(), CraneStatus::Free);
    }

    #[test]
    fn just_released_container_repels_its_crane() {
        let input = sorted_input();
        let mut term = Terminal::new(&input);
        let wait = Action::Wait;

        // Crane 1 carries container 4 one cell right and drops it.
        term.intake();
        term.resolve(&[wait, Action::Catch, wait, wait]).unwrap();
        term.collect();
        term.intake();
        term.resolve(&[wait, Action::Right, wait, wait]).unwrap();
        term.collect();
        term.intake();
        term.resolve(&[wait, Action::Release, wait, wait]).unwrap();
        term.collect();

        assert_eq!(term.cranes()[1].last_released(), Some(crate::problem::Container::new(4)));

        // The adjacent just-dropped box loses to a container three cells
        // away because of the re-catch penalty.
        let mut tasks = vec![
            Task::new(Coord::new(1, 1), Coord::new(1, 2), false),
            Task::new(Coord::new(3, 0), Coord::new(3, 1), false),
        ];
        try_assign(&mut term, 1, &mut tasks);

        assert_eq!(term.cranes()[1].catch_target(), Coord::new(3, 0));
    }

    #[test]
    fn erases_rivals_sharing_the_catch_cell() {
        let input = sorted_input();
        let mut term = Terminal::new(&input);
        term.intake();

        let mut tasks = vec![
            Task::new(Coord::new(1, 0), Coord::new(1, 1), false),
            Task::new(Coord::new(1, 0), Coord::new(2, 0), false),
            Task::new(Coord::new(0, 0), Coord::new(0, 1), false),
        ];
        try_assign(&mut term, 1, &mut tasks);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].catch(), Coord::new(0, 0));
    }
}
