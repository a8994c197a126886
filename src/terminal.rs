use std::collections::VecDeque;

use thiserror::Error;

use crate::{
    grid::{Coord, Map2d},
    problem::{Action, Container, Input},
};

/// Fatal invariant violations. Every variant is a scheduling bug, not a
/// recoverable condition; dead-ends and turn-ceiling exhaustion are reported
/// through [`crate::solver::Outcome`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("turn {turn}: crane {crane} moved off the grid")]
    MoveOffGrid { turn: usize, crane: usize },
    #[error("turn {turn}: crane {crane} caught at {coord} but the cell holds no container")]
    CatchEmptyCell {
        turn: usize,
        crane: usize,
        coord: Coord,
    },
    #[error("turn {turn}: crane {crane} caught while already holding a container")]
    CatchWhileHolding { turn: usize, crane: usize },
    #[error("turn {turn}: crane {crane} released at {coord} but the cell is occupied")]
    ReleaseOccupied {
        turn: usize,
        crane: usize,
        coord: Coord,
    },
    #[error("turn {turn}: crane {crane} released while holding nothing")]
    ReleaseEmptyHanded { turn: usize, crane: usize },
    #[error("turn {turn}: crane {crane} self-destructed while holding a container")]
    BombWhileHolding { turn: usize, crane: usize },
    #[error("turn {turn}: crane {crane} received an action after self-destruction")]
    ActionAfterDestruction { turn: usize, crane: usize },
    #[error("turn {turn}: live crane {crane} was given the inert sentinel")]
    InertWhileAlive { turn: usize, crane: usize },
    #[error("turn {turn}: cranes {first} and {second} both moved into {coord}")]
    CraneCollision {
        turn: usize,
        first: usize,
        second: usize,
        coord: Coord,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneKind {
    Large,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneStatus {
    /// No assignment.
    Free,
    /// En route to the catch target.
    PreCatch,
    /// Standing on the catch target, about to catch.
    CatchNow,
    /// Carrying, en route to the release target.
    PreRelease,
    /// Standing on the release target, about to release.
    ReleaseNow,
}

#[derive(Debug, Clone)]
pub struct Crane {
    id: usize,
    kind: CraneKind,
    pos: Coord,
    exists: bool,
    holding: Option<Container>,
    status: CraneStatus,
    catch_target: Coord,
    release_target: Coord,
    last_released: Option<Container>,
}

impl Crane {
    fn new(id: usize, pos: Coord) -> Self {
        let kind = if Input::is_large_crane(id) {
            CraneKind::Large
        } else {
            CraneKind::Small
        };

        Self {
            id,
            kind,
            pos,
            exists: true,
            holding: None,
            status: CraneStatus::Free,
            catch_target: pos,
            release_target: pos,
            last_released: None,
        }
    }

    pub const fn id(&self) -> usize {
        self.id
    }

    pub const fn kind(&self) -> CraneKind {
        self.kind
    }

    pub const fn pos(&self) -> Coord {
        self.pos
    }

    pub const fn exists(&self) -> bool {
        self.exists
    }

    pub const fn holding(&self) -> Option<Container> {
        self.holding
    }

    pub const fn status(&self) -> CraneStatus {
        self.status
    }

    pub const fn catch_target(&self) -> Coord {
        self.catch_target
    }

    pub const fn release_target(&self) -> Coord {
        self.release_target
    }

    pub const fn last_released(&self) -> Option<Container> {
        self.last_released
    }
}

/// Head-count of containers by lifecycle stage; always sums to n².
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Census {
    pub queued: usize,
    pub placed: usize,
    pub carried: usize,
    pub collected: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.queued + self.placed + self.carried + self.collected
    }
}

/// The terminal state and its three-phase per-turn update.
///
/// A turn is `intake` (admit queued containers), `resolve` (apply one action
/// per crane against a double-buffered occupancy grid), `collect` (sweep the
/// exit column), in that order.
#[derive(Debug, Clone)]
pub struct Terminal {
    n: usize,
    turn: usize,
    cranes: Vec<Crane>,
    crane_pos: Map2d<Option<usize>>,
    container_pos: Map2d<Option<Container>>,
    queues: Vec<VecDeque<Container>>,
    collected: Vec<Vec<Container>>,
}

impl Terminal {
    pub fn new(input: &Input) -> Self {
        let n = input.n();
        let cranes = (0..n).map(|i| Crane::new(i, Coord::new(i, 0))).collect();
        let mut crane_pos = Map2d::with_default(n);

        for i in 0..n {
            crane_pos[Coord::new(i, 0)] = Some(i);
        }

        let queues = input
            .containers()
            .iter()
            .map(|row| row.iter().copied().collect())
            .collect();

        Self {
            n,
            turn: 0,
            cranes,
            crane_pos,
            container_pos: Map2d::with_default(n),
            queues,
            collected: vec![vec![]; n],
        }
    }

    pub const fn n(&self) -> usize {
        self.n
    }

    pub const fn turn(&self) -> usize {
        self.turn
    }

    pub fn cranes(&self) -> &[Crane] {
        &self.cranes
    }

    pub fn crane_at(&self, coord: Coord) -> Option<usize> {
        self.crane_pos[coord]
    }

    pub fn container_at(&self, coord: Coord) -> Option<Container> {
        self.container_pos[coord]
    }

    pub fn queue_len(&self, lane: usize) -> usize {
        self.queues[lane].len()
    }

    pub fn collected(&self) -> &[Vec<Container>] {
        &self.collected
    }

    pub const fn goal_row(&self, container: Container) -> usize {
        container.index() / self.n
    }

    pub const fn goal(&self, container: Container) -> Coord {
        Coord::new(self.goal_row(container), self.n - 1)
    }

    pub fn placed_count(&self) -> usize {
        self.container_pos.iter().filter(|c| c.is_some()).count()
    }

    pub fn live_crane_count(&self) -> usize {
        self.cranes.iter().filter(|c| c.exists).count()
    }

    pub fn census(&self) -> Census {
        Census {
            queued: self.queues.iter().map(|q| q.len()).sum(),
            placed: self.placed_count(),
            carried: self.cranes.iter().filter(|c| c.holding.is_some()).count(),
            collected: self.collected.iter().map(|c| c.len()).sum(),
        }
    }

    pub fn all_collected(&self) -> bool {
        self.collected.iter().map(|c| c.len()).sum::<usize>() == self.n * self.n
    }

    pub fn remaining(&self) -> usize {
        self.n * self.n - self.collected.iter().map(|c| c.len()).sum::<usize>()
    }

    /// Per exit lane, the smallest id not yet collected (the next container
    /// that lane's export order requires).
    pub fn next_wanted(&self) -> Vec<Option<Container>> {
        let mut done = vec![false; self.n * self.n];

        for lane in self.collected.iter() {
            for container in lane.iter() {
                done[container.index()] = true;
            }
        }

        (0..self.n)
            .map(|lane| {
                (lane * self.n..(lane + 1) * self.n)
                    .find(|&id| !done[id])
                    .map(Container::new)
            })
            .collect()
    }

    /// Commit a crane to a catch/release pair.
    pub fn assign(&mut self, crane: usize, catch: Coord, release: Coord) {
        let crane = &mut self.cranes[crane];
        debug_assert!(crane.exists && crane.status == CraneStatus::Free);
        crane.catch_target = catch;
        crane.release_target = release;
        crane.status = CraneStatus::PreCatch;
    }

    /// Intake phase: advance the turn counter, then admit each lane's front
    /// container if its entrance cell holds no container and no loaded crane.
    /// An empty-handed crane passing through does not block intake.
    pub fn intake(&mut self) {
        self.turn += 1;

        for lane in 0..self.n {
            let entrance = Coord::new(lane, 0);

            if self.container_pos[entrance].is_some() {
                continue;
            }

            let blocked = self.crane_pos[entrance]
                .map_or(false, |id| self.cranes[id].holding.is_some());

            if !blocked {
                if let Some(front) = self.queues[lane].pop_front() {
                    self.container_pos[entrance] = Some(front);
                }
            }
        }
    }

    /// Resolve phase: apply one action per crane. All next positions go into
    /// a fresh occupancy grid before the old one is dropped, so no crane's
    /// move observes a half-applied turn.
    pub fn resolve(&mut self, actions: &[Action]) -> Result<(), SimulationError> {
        debug_assert_eq!(actions.len(), self.cranes.len());
        let turn = self.turn;
        let mut next_crane_pos: Map2d<Option<usize>> = Map2d::with_default(self.n);

        for (id, &action) in actions.iter().enumerate() {
            if !self.cranes[id].exists {
                if action != Action::Inert {
                    return Err(SimulationError::ActionAfterDestruction { turn, crane: id });
                }

                continue;
            }

            if action == Action::Inert {
                return Err(SimulationError::InertWhileAlive { turn, crane: id });
            }

            let next = self.cranes[id].pos + action.delta();

            if !next.in_map(self.n) {
                return Err(SimulationError::MoveOffGrid { turn, crane: id });
            }

            if action == Action::Bomb {
                if self.cranes[id].holding.is_some() {
                    return Err(SimulationError::BombWhileHolding { turn, crane: id });
                }

                // Vanishes: no entry in the new occupancy grid.
                self.cranes[id].exists = false;
                continue;
            }

            if let Some(first) = next_crane_pos[next] {
                return Err(SimulationError::CraneCollision {
                    turn,
                    first,
                    second: id,
                    coord: next,
                });
            }

            next_crane_pos[next] = Some(id);
            self.cranes[id].pos = next;

            match action {
                Action::Catch => {
                    if self.cranes[id].holding.is_some() {
                        return Err(SimulationError::CatchWhileHolding { turn, crane: id });
                    }

                    let container = self.container_pos[next].take().ok_or(
                        SimulationError::CatchEmptyCell {
                            turn,
                            crane: id,
                            coord: next,
                        },
                    )?;
                    self.cranes[id].holding = Some(container);

                    if matches!(
                        self.cranes[id].status,
                        CraneStatus::PreCatch | CraneStatus::CatchNow
                    ) {
                        self.cranes[id].status = CraneStatus::PreRelease;
                    }
                }
                Action::Release => {
                    // Validate before taking so a rejected release leaves
                    // the crane still holding its container.
                    let Some(container) = self.cranes[id].holding else {
                        return Err(SimulationError::ReleaseEmptyHanded { turn, crane: id });
                    };

                    if self.container_pos[next].is_some() {
                        return Err(SimulationError::ReleaseOccupied {
                            turn,
                            crane: id,
                            coord: next,
                        });
                    }

                    self.cranes[id].holding = None;
                    self.container_pos[next] = Some(container);
                    self.cranes[id].last_released = Some(container);

                    if matches!(
                        self.cranes[id].status,
                        CraneStatus::PreRelease | CraneStatus::ReleaseNow
                    ) {
                        self.cranes[id].status = CraneStatus::Free;
                    }
                }
                _ => {}
            }

            // Arrival transitions, checked after the move so next turn's
            // selector sees CatchNow/ReleaseNow.
            let crane = &mut self.cranes[id];

            match crane.status {
                CraneStatus::PreCatch if crane.pos == crane.catch_target => {
                    crane.status = CraneStatus::CatchNow;
                }
                CraneStatus::PreRelease if crane.pos == crane.release_target => {
                    crane.status = CraneStatus::ReleaseNow;
                }
                _ => {}
            }
        }

        self.crane_pos = next_crane_pos;
        Ok(())
    }

    /// Collect phase: sweep the exit column into the per-lane collected
    /// lists. Runs after resolve so a release straight into the exit column
    /// is collected the same turn.
    pub fn collect(&mut self) {
        for row in 0..self.n {
            let exit = Coord::new(row, self.n - 1);

            if let Some(container) = self.container_pos[exit].take() {
                self.collected[row].push(container);
            }
        }
    }

    /// Occupancy dump for debugging; advisory only.
    pub fn trace(&self) {
        eprintln!("turn {}", self.turn);

        for (lane, collected) in self.collected.iter().enumerate() {
            let ids = collected.iter().map(|c| c.index().to_string());
            eprintln!(
                " collected {}: {}",
                lane,
                ids.collect::<Vec<_>>().join(", ")
            );
        }

        eprintln!("container map:");

        for row in 0..self.n {
            let mut line = String::new();

            for col in 0..self.n {
                match self.container_pos[Coord::new(row, col)] {
                    Some(c) => line.push_str(&format!("{:>2}|", c.index())),
                    None => line.push_str("  |"),
                }
            }

            eprintln!("{}", line);
        }

        eprintln!("crane map:");

        for row in 0..self.n {
            let mut line = String::new();

            for col in 0..self.n {
                match self.crane_pos[Coord::new(row, col)] {
                    Some(id) => line.push_str(&format!("{:>2}|", id)),
                    None => line.push_str("  |"),
                }
            }

            eprintln!("{}", line);
        }
    }
}
