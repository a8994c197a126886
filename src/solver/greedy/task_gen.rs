use itertools::iproduct;

use crate::{
    grid::{Coord, CoordDiff},
    problem::Container,
    terminal::{CraneStatus, Terminal},
};

/// An ephemeral relocation order: catch here, release there. Regenerated from
/// scratch every turn and consumed the moment a crane commits to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    catch: Coord,
    release: Coord,
    large_only: bool,
}

impl Task {
    pub const fn new(catch: Coord, release: Coord, large_only: bool) -> Self {
        Self {
            catch,
            release,
            large_only,
        }
    }

    pub const fn catch(&self) -> Coord {
        self.catch
    }

    pub const fn release(&self) -> Coord {
        self.release
    }

    pub const fn large_only(&self) -> bool {
        self.large_only
    }
}

/// Conflict resolver: a cell is reserved if it is the catch or release cell
/// of a pending task, or the pending target of a committed crane. With
/// `skip_large_jobs` the pending-task check ignores export tasks so that
/// their source containers stay visible to the reshuffle rules; crane
/// reservations are never skipped.
pub fn is_reserved(term: &Terminal, tasks: &[Task], coord: Coord, skip_large_jobs: bool) -> bool {
    for task in tasks {
        if skip_large_jobs && task.large_only {
            continue;
        }

        if task.catch == coord || task.release == coord {
            return true;
        }
    }

    for crane in term.cranes() {
        if !crane.exists() || crane.status() == CraneStatus::Free {
            continue;
        }

        if matches!(crane.status(), CraneStatus::PreCatch | CraneStatus::CatchNow)
            && crane.catch_target() == coord
        {
            return true;
        }

        if crane.release_target() == coord {
            return true;
        }
    }

    false
}

/// Generate this turn's candidate tasks from the post-intake grid.
///
/// Three rules in fixed priority order: export the next wanted container of
/// any lane to its exit cell (Large only), pull a container vertically into
/// an adjacent empty cell when that brings it closer to its exit lane or its
/// own lane is still backed up, and shift a container one cell right into an
/// empty neighbor. Earlier candidates reserve their cells against later ones;
/// a pass never re-scans.
pub fn generate(term: &Terminal, wanted: &[Option<Container>], tasks: &mut Vec<Task>) {
    let n = term.n();

    // Export rule.
    for (row, col) in iproduct!(0..n, 0..n - 1) {
        let coord = Coord::new(row, col);

        if is_reserved(term, tasks, coord, false) {
            continue;
        }

        let Some(container) = term.container_at(coord) else {
            continue;
        };

        if wanted[term.goal_row(container)] == Some(container) {
            tasks.push(Task::new(coord, term.goal(container), true));
        }
    }

    // Vertical reshuffle rule.
    for (row, col) in iproduct!(0..n, 0..n - 1) {
        let coord = Coord::new(row, col);

        if is_reserved(term, tasks, coord, false)
            || term.container_at(coord).is_some()
            || term.crane_at(coord).is_some()
        {
            continue;
        }

        for dr in [1, -1] {
            let adjacent = coord + CoordDiff::new(dr, 0);

            if !adjacent.in_map(n) {
                continue;
            }

            let Some(container) = term.container_at(adjacent) else {
                continue;
            };

            if is_reserved(term, tasks, adjacent, true) {
                continue;
            }

            let goal_row = term.goal_row(container);
            let closer = goal_row.abs_diff(row) < goal_row.abs_diff(adjacent.row());

            if closer || term.queue_len(adjacent.row()) > 0 {
                tasks.push(Task::new(adjacent, coord, false));
                break;
            }
        }
    }

    // Horizontal advance rule.
    for (row, col) in iproduct!(0..n, 1..n - 1) {
        let coord = Coord::new(row, col);

        if is_reserved(term, tasks, coord, false)
            || term.container_at(coord).is_some()
            || term.crane_at(coord).is_some()
        {
            continue;
        }

        let left = Coord::new(row, col - 1);

        if term.container_at(left).is_some() && !is_reserved(term, tasks, left, true) {
            tasks.push(Task::new(left, coord, false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Action, Input};

    // Lane 0 arrives container 4 first and lane 1 arrives container 0
    // first, so the first exports cross lanes.
    fn crossed_input() -> Input {
        Input::new(vec![
            vec![4, 1, 2, 3],
            vec![0, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 14, 15],
        ])
    }

    fn generated(term: &Terminal) -> Vec<Task> {
        let mut tasks = vec![];
        generate(term, &term.next_wanted(), &mut tasks);
        tasks
    }

    #[test]
    fn export_rule_targets_the_wanted_containers() {
        let input = crossed_input();
        let mut term = Terminal::new(&input);
        term.intake();

        // (1, 0) holds container 0, wanted by lane 0; (0, 0) holds 4,
        // wanted by lane 1.
        let tasks = generated(&term);
        assert!(tasks
            .iter()
            .any(|t| t.large_only()
                && t.catch() == Coord::new(1, 0)
                && t.release() == Coord::new(0, 3)));
        assert!(tasks
            .iter()
            .any(|t| t.large_only()
                && t.catch() == Coord::new(0, 0)
                && t.release() == Coord::new(1, 3)));
    }

    #[test]
    fn export_rule_skips_containers_out_of_order() {
        let input = Input::new(vec![
            vec![1, 0, 2, 3],
            vec![4, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 14, 15],
        ]);
        let mut term = Terminal::new(&input);
        term.intake();

        // (0, 0) holds container 1 but lane 0 wants 0 first.
        let tasks = generated(&term);
        assert!(tasks
            .iter()
            .all(|t| !(t.large_only() && t.catch() == Coord::new(0, 0))));
        assert!(tasks
            .iter()
            .any(|t| t.large_only() && t.catch() == Coord::new(1, 0)));
    }

    #[test]
    fn vertical_rule_pulls_a_container_toward_its_lane() {
        let input = crossed_input();
        let mut term = Terminal::new(&input);

        // Park container 0 (exit lane 0) at (1, 1) with crane 1, then step
        // the crane out of the way.
        let wait = Action::Wait;
        term.intake();
        term.resolve(&[wait, Action::Catch, wait, wait]).unwrap();
        term.collect();
        term.intake();
        term.resolve(&[wait, Action::Right, wait, wait]).unwrap();
        term.collect();
        term.intake();
        term.resolve(&[wait, Action::Release, wait, wait]).unwrap();
        term.collect();
        term.intake();
        term.resolve(&[wait, Action::Down, wait, wait]).unwrap();
        term.collect();

        // (0, 1) is empty and crane-free; moving 0 up from (1, 1) brings it
        // strictly closer to lane 0.
        let tasks = generated(&term);
        assert!(tasks
            .iter()
            .any(|t| !t.large_only()
                && t.catch() == Coord::new(1, 1)
                && t.release() == Coord::new(0, 1)));
    }

    #[test]
    fn reserved_cells_block_later_candidates() {
        let input = crossed_input();
        let mut term = Terminal::new(&input);
        term.intake();

        let mut tasks = generated(&term);
        let count = tasks.len();
        assert!(count > 0);
        // A second pass over the same board adds nothing: every candidate
        // collides with its own first-pass reservation.
        generate(&term, &term.next_wanted(), &mut tasks);
        assert_eq!(tasks.len(), count);
    }

    #[test]
    fn committed_crane_targets_are_reserved() {
        let input = crossed_input();
        let mut term = Terminal::new(&input);
        term.intake();
        term.assign(1, Coord::new(1, 0), Coord::new(1, 1));

        assert!(is_reserved(&term, &[], Coord::new(1, 0), false));
        assert!(is_reserved(&term, &[], Coord::new(1, 1), false));
        // Skip-large mode never skips crane reservations.
        assert!(is_reserved(&term, &[], Coord::new(1, 0), true));
        assert!(!is_reserved(&term, &[], Coord::new(0, 1), false));
    }

    #[test]
    fn skip_large_mode_exposes_export_sources_to_reshuffles() {
        let tasks = vec![Task::new(Coord::new(0, 0), Coord::new(0, 3), true)];
        let input = crossed_input();
        let term = Terminal::new(&input);

        assert!(is_reserved(&term, &tasks, Coord::new(0, 0), false));
        assert!(!is_reserved(&term, &tasks, Coord::new(0, 0), true));
    }

    #[test]
    fn horizontal_rule_shifts_into_empty_cells() {
        let input = crossed_input();
        let mut term = Terminal::new(&input);
        term.intake();
        // Cranes step off the entrance column; (0, 1) ends up empty and
        // crane-free with container 4 to its left.
        term.resolve(&[Action::Down, Action::Right, Action::Right, Action::Right])
            .unwrap();
        term.collect();

        let tasks = generated(&term);
        assert!(tasks
            .iter()
            .any(|t| !t.large_only()
                && t.catch() == Coord::new(0, 0)
                && t.release() == Coord::new(0, 1)));
    }
}
