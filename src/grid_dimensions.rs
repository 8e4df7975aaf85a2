use std::convert::TryFrom;

use rand::Rng;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// Validated size of a rectangular grid: at least one row and one column, every coordinate
/// representable as a `u32` and the cell count representable as a `usize`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl RectGridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<RectGridDimensions> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        let addressable = r <= u32::MAX as usize && c <= u32::MAX as usize;
        let size_ok = r.checked_mul(c).is_some();

        if r == 0 || c == 0 || !addressable || !size_ok {
            bail!(ErrorKind::InvalidDimensions(saturating_i64(r), saturating_i64(c)));
        }

        Ok(RectGridDimensions { rows, columns })
    }

    /// Accept dimensions straight from a caller that deals in signed integers (e.g. the command line).
    /// Zero or negative values are rejected before anything is built.
    pub fn from_signed(rows: i64, columns: i64) -> Result<RectGridDimensions> {
        if rows <= 0 || columns <= 0 {
            bail!(ErrorKind::InvalidDimensions(rows, columns));
        }
        match (usize::try_from(rows), usize::try_from(columns)) {
            (Ok(r), Ok(c)) => RectGridDimensions::new(RowsCount(r), ColumnsCount(c)),
            _ => {
                bail!(ErrorKind::InvalidDimensions(rows, columns));
            }
        }
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Cells count and the number of orthogonally adjacent cell pairs, i.e. the number of
    /// interior walls that could ever be carved.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (RowsCount(r), ColumnsCount(c)) = (self.rows, self.columns);
        let horizontal_pairs = r * (c - 1);
        let vertical_pairs = c * (r - 1);
        (self.size(), EdgesCount(horizontal_pairs + vertical_pairs))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Inverse of `grid_coordinate_to_index`. The index is not bounds checked.
    #[inline]
    pub fn coordinate_from_row_major_index(&self, index: usize) -> Cartesian2DCoordinate {
        let width = self.columns.0;
        Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size().0);
        self.coordinate_from_row_major_index(index)
    }
}

fn saturating_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn dims(rows: usize, columns: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    fn is_invalid_dimensions(result: Result<RectGridDimensions>) -> bool {
        match result {
            Err(Error(ErrorKind::InvalidDimensions(..), _)) => true,
            _ => false,
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(is_invalid_dimensions(RectGridDimensions::new(RowsCount(0), ColumnsCount(5))));
        assert!(is_invalid_dimensions(RectGridDimensions::new(RowsCount(5), ColumnsCount(0))));
        assert!(is_invalid_dimensions(RectGridDimensions::new(RowsCount(0), ColumnsCount(0))));
    }

    #[test]
    fn negative_dimensions_rejected() {
        assert!(is_invalid_dimensions(RectGridDimensions::from_signed(5, -1)));
        assert!(is_invalid_dimensions(RectGridDimensions::from_signed(-3, 4)));
        assert!(is_invalid_dimensions(RectGridDimensions::from_signed(0, 5)));
        assert!(RectGridDimensions::from_signed(3, 4).is_ok());
    }

    #[test]
    fn unaddressable_dimensions_rejected() {
        let too_wide = u32::MAX as usize + 1;
        assert!(is_invalid_dimensions(RectGridDimensions::new(RowsCount(1), ColumnsCount(too_wide))));
        assert!(is_invalid_dimensions(RectGridDimensions::new(RowsCount(usize::MAX),
                                                              ColumnsCount(usize::MAX))));
    }

    #[test]
    fn invalid_dimensions_message_names_the_sizes() {
        let err = RectGridDimensions::from_signed(5, -1).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("5 x -1"), "{}", message);
    }

    #[test]
    fn size_and_graph_size() {
        let d = dims(3, 4);
        assert_eq!(d.size(), NodesCount(12));
        assert_eq!(d.rows(), RowsCount(3));
        assert_eq!(d.columns(), ColumnsCount(4));
        // 3 rows of 3 horizontal pairs + 4 columns of 2 vertical pairs
        assert_eq!(d.graph_size(), (NodesCount(12), EdgesCount(17)));
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let d = dims(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| d.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(d.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(d.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);

        for index in 0..9 {
            let coord = d.coordinate_from_row_major_index(index);
            assert_eq!(d.grid_coordinate_to_index(coord), Some(index));
        }
    }

    #[test]
    fn non_square_index_layout() {
        // 2 rows, 5 columns: index 7 is row 1, column 2
        let d = dims(2, 5);
        assert_eq!(d.coordinate_from_row_major_index(7), Cartesian2DCoordinate::new(2, 1));
        assert!(d.is_valid_coordinate(Cartesian2DCoordinate::new(4, 1)));
        assert!(!d.is_valid_coordinate(Cartesian2DCoordinate::new(1, 4)));
    }

    #[test]
    fn random_cell() {
        let d = dims(4, 6);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            let coord = d.random_cell(&mut rng);
            assert!(d.is_valid_coordinate(coord));
        }
    }
}
