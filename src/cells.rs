use std::convert::{From, TryFrom};
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// The four sides of a square cell. The discriminant doubles as the index of the side's wall flag.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl CompassPrimary {
    /// Every direction, in the order neighbour candidates are gathered.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    #[inline(always)]
    fn wall_index(self) -> usize {
        self as usize
    }
}

/// A grid position. `x` is the column (0 at the left), `y` is the row (0 at the top).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> Self {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// From caller supplied signed row and column numbers, e.g. from the command line.
    /// None if either is negative or too large to be a coordinate.
    pub fn from_signed_row_column(row: i64, column: i64) -> Option<Self> {
        match (u32::try_from(row), u32::try_from(column)) {
            (Ok(y), Ok(x)) => Some(Cartesian2DCoordinate::new(x, y)),
            _ => None,
        }
    }

    #[inline]
    pub fn row(&self) -> RowIndex {
        RowIndex(self.y as usize)
    }

    #[inline]
    pub fn column(&self) -> ColumnIndex {
        ColumnIndex(self.x as usize)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would be negative or not representable; the grid decides
    /// whether it is inside its bounds.
    pub fn offset(&self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }

    /// The direction to travel from `self` to reach an orthogonally adjacent `other`.
    pub fn direction_to(&self, other: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

/// One grid position: four boundary walls and the visited mark used while carving.
///
/// Walls are never cleared on a single cell. The `Grid` clears the matching pair on both
/// neighbouring cells together.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
        }
    }
}

impl Cell {
    #[inline]
    pub fn has_wall(&self, side: CompassPrimary) -> bool {
        self.walls[side.wall_index()]
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The sides that still have a wall, in North, East, South, West order.
    pub fn walls(&self) -> impl Iterator<Item = CompassPrimary> + '_ {
        CompassPrimary::ALL.iter().cloned().filter(move |side| self.has_wall(*side))
    }

    pub fn walls_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall).count()
    }

    #[inline]
    pub(crate) fn remove_wall(&mut self, side: CompassPrimary) {
        self.walls[side.wall_index()] = false;
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cells_are_closed_and_unvisited() {
        let cell = Cell::default();
        assert!(!cell.is_visited());
        assert_eq!(cell.walls_count(), 4);
        assert_eq!(cell.walls().collect::<Vec<_>>(), CompassPrimary::ALL.to_vec());
    }

    #[test]
    fn removing_a_wall_only_touches_that_side() {
        let mut cell = Cell::default();
        cell.remove_wall(CompassPrimary::East);
        assert!(!cell.has_wall(CompassPrimary::East));
        assert!(cell.has_wall(CompassPrimary::North));
        assert!(cell.has_wall(CompassPrimary::South));
        assert!(cell.has_wall(CompassPrimary::West));
        assert_eq!(cell.walls_count(), 3);
    }

    #[test]
    fn opposites() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
        assert_eq!(CompassPrimary::North.opposite(), CompassPrimary::South);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
    }

    #[test]
    fn offsets_stop_at_zero() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::East), Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::South), Some(Cartesian2DCoordinate::new(0, 1)));

        let far = Cartesian2DCoordinate::new(u32::MAX, u32::MAX);
        assert_eq!(far.offset(CompassPrimary::East), None);
        assert_eq!(far.offset(CompassPrimary::South), None);
    }

    #[test]
    fn direction_to_adjacent_only() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(gc(1, 1).direction_to(gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(gc(1, 1).direction_to(gc(2, 1)), Some(CompassPrimary::East));
        assert_eq!(gc(1, 1).direction_to(gc(1, 2)), Some(CompassPrimary::South));
        assert_eq!(gc(1, 1).direction_to(gc(0, 1)), Some(CompassPrimary::West));
        assert_eq!(gc(1, 1).direction_to(gc(1, 1)), None);
        assert_eq!(gc(1, 1).direction_to(gc(2, 2)), None);
        assert_eq!(gc(0, 0).direction_to(gc(3, 0)), None);
    }

    #[test]
    fn signed_row_column() {
        assert_eq!(Cartesian2DCoordinate::from_signed_row_column(2, 5),
                   Some(Cartesian2DCoordinate::new(5, 2)));
        assert_eq!(Cartesian2DCoordinate::from_signed_row_column(-1, 0), None);
        assert_eq!(Cartesian2DCoordinate::from_signed_row_column(0, -7), None);
        assert_eq!(Cartesian2DCoordinate::from_signed_row_column(i64::from(u32::MAX) + 1, 0), None);
        assert_eq!(Cartesian2DCoordinate::from_signed_row_column(0, i64::from(u32::MAX)),
                   Some(Cartesian2DCoordinate::new(u32::MAX, 0)));
    }

    #[test]
    fn row_column_indices() {
        let coord = Cartesian2DCoordinate::from_row_column_indices(RowIndex(3), ColumnIndex(7));
        assert_eq!(coord, Cartesian2DCoordinate::new(7, 3));
        assert_eq!(coord.row(), RowIndex(3));
        assert_eq!(coord.column(), ColumnIndex(7));
    }
}
