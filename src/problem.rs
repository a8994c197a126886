use std::fmt::Display;

use proconio::input;

use crate::grid::{Coord, CoordDiff};

/// A problem instance: the arrival order of containers for each lane.
///
/// Row `i` of the matrix is lane `i`'s arrival queue, front first. The ids
/// form a permutation of `0..n*n`, and `id / n` is the exit lane of a
/// container.
#[derive(Debug, Clone)]
pub struct Input {
    n: usize,
    containers: Vec<Vec<Container>>,
}

impl Input {
    pub fn new(matrix: Vec<Vec<usize>>) -> Self {
        let n = matrix.len();
        assert!((2..=128).contains(&n), "grid size out of range: {}", n);
        assert!(matrix.iter().all(|row| row.len() == n));

        let mut seen = vec![false; n * n];

        for &id in matrix.iter().flatten() {
            assert!(id < n * n && !seen[id], "ids must be a permutation of 0..n^2");
            seen[id] = true;
        }

        let containers = matrix
            .into_iter()
            .map(|row| row.into_iter().map(Container::new).collect())
            .collect();

        Self { n, containers }
    }

    pub fn read_input() -> Self {
        input! {
            n: usize,
            a: [[usize; n]; n],
        }

        Self::new(a)
    }

    pub const fn n(&self) -> usize {
        self.n
    }

    pub fn containers(&self) -> &[Vec<Container>] {
        &self.containers
    }

    pub const fn is_large_crane(crane: usize) -> bool {
        crane == 0
    }

    /// Exit lane of a container.
    pub const fn goal_row(&self, container: Container) -> usize {
        container.index() / self.n
    }

    /// Exit cell of a container.
    pub const fn goal(&self, container: Container) -> Coord {
        Coord::new(self.goal_row(container), self.n - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Container(u16);

impl Container {
    pub const fn new(index: usize) -> Self {
        Self(index as u16)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Knobs shared by both strategies.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Hard upper bound on simulated turns.
    pub max_turn: usize,
    /// Seed for the scheduler's tie-break randomness.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_turn: 10_000,
            seed: 42,
        }
    }
}

/// One crane action for one turn.
///
/// `Inert` is the sentinel for a crane that has already self-destructed; it
/// is omitted from the printed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Catch,
    Release,
    Up,
    Down,
    Left,
    Right,
    Wait,
    Bomb,
    Inert,
}

impl Action {
    pub const fn delta(&self) -> CoordDiff {
        match self {
            Self::Up => CoordDiff::new(-1, 0),
            Self::Down => CoordDiff::new(1, 0),
            Self::Left => CoordDiff::new(0, -1),
            Self::Right => CoordDiff::new(0, 1),
            _ => CoordDiff::new(0, 0),
        }
    }
}

/// The action table: one row of actions per crane, in ascending crane id
/// order, one column per turn.
#[derive(Debug, Clone)]
pub struct Schedule {
    lines: Vec<Vec<Action>>,
}

impl Schedule {
    pub fn new(cranes: usize) -> Self {
        Self {
            lines: vec![vec![]; cranes],
        }
    }

    pub fn push(&mut self, actions: &[Action]) {
        debug_assert_eq!(actions.len(), self.lines.len());

        for (line, &action) in self.lines.iter_mut().zip(actions.iter()) {
            line.push(action);
        }
    }

    /// Number of recorded turns.
    pub fn turns(&self) -> usize {
        self.lines.first().map_or(0, |line| line.len())
    }

    /// The actions of turn `t`, one per crane.
    pub fn turn(&self, t: usize) -> Vec<Action> {
        self.lines.iter().map(|line| line[t]).collect()
    }

    pub fn lines(&self) -> &[Vec<Action>] {
        &self.lines
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            for action in line.iter() {
                match action {
                    Action::Catch => write!(f, "P")?,
                    Action::Release => write!(f, "Q")?,
                    Action::Up => write!(f, "U")?,
                    Action::Down => write!(f, "D")?,
                    Action::Left => write!(f, "L")?,
                    Action::Right => write!(f, "R")?,
                    Action::Wait => write!(f, ".")?,
                    Action::Bomb => write!(f, "B")?,
                    Action::Inert => {}
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
