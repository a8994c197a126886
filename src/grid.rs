use std::{
    fmt::Display,
    ops::{Add, AddAssign, Index, IndexMut},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
        }
    }

    pub const fn row(&self) -> usize {
        self.row as usize
    }

    pub const fn col(&self) -> usize {
        self.col as usize
    }

    pub fn in_map(&self, size: usize) -> bool {
        self.row < size as u8 && self.col < size as u8
    }

    pub const fn to_index(&self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    /// Manhattan distance.
    pub const fn dist(&self, other: &Self) -> usize {
        self.row.abs_diff(other.row) as usize + self.col.abs_diff(other.col) as usize
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordDiff {
    dr: i8,
    dc: i8,
}

impl CoordDiff {
    pub const fn new(dr: isize, dc: isize) -> Self {
        Self {
            dr: dr as i8,
            dc: dc as i8,
        }
    }

    pub const fn dr(&self) -> isize {
        self.dr as isize
    }

    pub const fn dc(&self) -> isize {
        self.dc as isize
    }
}

impl Add<CoordDiff> for Coord {
    type Output = Coord;

    fn add(self, rhs: CoordDiff) -> Self::Output {
        Coord {
            row: self.row.wrapping_add_signed(rhs.dr),
            col: self.col.wrapping_add_signed(rhs.dc),
        }
    }
}

impl AddAssign<CoordDiff> for Coord {
    fn add_assign(&mut self, rhs: CoordDiff) {
        self.row = self.row.wrapping_add_signed(rhs.dr);
        self.col = self.col.wrapping_add_signed(rhs.dc);
    }
}

pub const ADJACENTS: [CoordDiff; 4] = [
    CoordDiff::new(-1, 0),
    CoordDiff::new(0, 1),
    CoordDiff::new(1, 0),
    CoordDiff::new(0, -1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map2d<T> {
    size: usize,
    map: Vec<T>,
}

impl<T> Map2d<T> {
    pub fn new(map: Vec<T>, size: usize) -> Self {
        debug_assert!(size * size == map.len());
        Self { size, map }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.iter()
    }
}

impl<T: Default + Clone> Map2d<T> {
    pub fn with_default(size: usize) -> Self {
        let map = vec![T::default(); size * size];
        Self { size, map }
    }
}

impl<T> Index<Coord> for Map2d<T> {
    type Output = T;

    #[inline]
    fn index(&self, coordinate: Coord) -> &Self::Output {
        &self.map[coordinate.to_index(self.size)]
    }
}

impl<T> IndexMut<Coord> for Map2d<T> {
    #[inline]
    fn index_mut(&mut self, coordinate: Coord) -> &mut Self::Output {
        &mut self.map[coordinate.to_index(self.size)]
    }
}

impl<T> Index<usize> for Map2d<T> {
    type Output = [T];

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        let begin = row * self.size;
        let end = begin + self.size;
        &self.map[begin..end]
    }
}

impl<T> IndexMut<usize> for Map2d<T> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let begin = row * self.size;
        let end = begin + self.size;
        &mut self.map[begin..end]
    }
}
