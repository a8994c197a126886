use rand::{seq::SliceRandom, Rng};

use crate::{
    grid::{Coord, Map2d},
    problem::{Action, Input},
    terminal::{CraneKind, CraneStatus, Terminal},
};

use super::task_gen::is_reserved;

const MOVES: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

/// Choose this turn's action for one crane.
///
/// `next_pos` is the provisional occupancy table of cranes that already
/// chose their moves this turn; a destination counts as free only if it is
/// clear on both the current board and the provisional one. Blocked Small
/// cranes wander (dropping their cargo first when that is safe) so they stop
/// shadowing the Large crane; the Large crane just waits out the jam.
pub fn select(
    term: &Terminal,
    crane_id: usize,
    next_pos: &Map2d<bool>,
    rng: &mut impl Rng,
) -> Action {
    let crane = &term.cranes()[crane_id];

    if !crane.exists() {
        return Action::Inert;
    }

    let pos = crane.pos();

    match crane.status() {
        CraneStatus::Free => {
            debug_assert!(crane.holding().is_none());

            if term.placed_count() < term.live_crane_count() && !Input::is_large_crane(crane_id) {
                return Action::Bomb;
            }

            random_walk(term, pos, next_pos, rng, true)
        }
        CraneStatus::PreCatch => {
            if let Some(action) = route(term, pos, crane.catch_target(), next_pos, rng) {
                return action;
            }

            if pos == crane.catch_target() {
                return Action::Catch;
            }

            match crane.kind() {
                CraneKind::Small => random_walk(term, pos, next_pos, rng, true),
                CraneKind::Large => Action::Wait,
            }
        }
        CraneStatus::CatchNow => Action::Catch,
        CraneStatus::PreRelease => {
            if let Some(action) = route(term, pos, crane.release_target(), next_pos, rng) {
                return action;
            }

            if pos == crane.release_target() {
                return Action::Release;
            }

            match crane.kind() {
                CraneKind::Small => {
                    if crane.holding().is_some() && can_release_here(term, pos) {
                        return Action::Release;
                    }

                    random_walk(term, pos, next_pos, rng, crane.holding().is_none())
                }
                CraneKind::Large => Action::Wait,
            }
        }
        CraneStatus::ReleaseNow => Action::Release,
    }
}

/// Step toward `target` along a randomly ordered pair of axes. Returns None
/// when the crane is already there or every on-axis step is occupied.
fn route(
    term: &Terminal,
    pos: Coord,
    target: Coord,
    next_pos: &Map2d<bool>,
    rng: &mut impl Rng,
) -> Option<Action> {
    let vertical_first = rng.gen_range(0..2) == 0;

    for k in 0..2 {
        if (k == 0) == vertical_first && target.row() != pos.row() {
            let action = if target.row() > pos.row() {
                Action::Down
            } else {
                Action::Up
            };

            if is_open(term, pos + action.delta(), next_pos) {
                return Some(action);
            }
        }

        if (k == 0) != vertical_first && target.col() != pos.col() {
            let action = if target.col() > pos.col() {
                Action::Right
            } else {
                Action::Left
            };

            if is_open(term, pos + action.delta(), next_pos) {
                return Some(action);
            }
        }
    }

    None
}

/// Wander into a random open neighbor. With no open neighbor the crane
/// detonates if it may, otherwise it holds position.
fn random_walk(
    term: &Terminal,
    pos: Coord,
    next_pos: &Map2d<bool>,
    rng: &mut impl Rng,
    can_bomb: bool,
) -> Action {
    let mut moves = MOVES;
    moves.shuffle(rng);

    for action in moves {
        if is_open(term, pos + action.delta(), next_pos) {
            return action;
        }
    }

    if can_bomb {
        Action::Bomb
    } else {
        Action::Wait
    }
}

fn is_open(term: &Terminal, coord: Coord, next_pos: &Map2d<bool>) -> bool {
    coord.in_map(term.n()) && term.crane_at(coord).is_none() && !next_pos[coord]
}

/// An early drop is safe only onto a container-free cell that no crane has
/// claimed and that is not in the exit column, where a stray container
/// would be collected into the wrong lane.
fn can_release_here(term: &Terminal, pos: Coord) -> bool {
    pos.col() != term.n() - 1
        && term.container_at(pos).is_none()
        && !is_reserved(term, &[], pos, false)
}
