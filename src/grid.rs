use std::error;
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary};
use crate::errors::*;
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIterType, RectBatchIter, RectGridCellIter};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;
type LinkPairSmallVec = SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 2]>;

/// A rectangular grid of cells stored row major.
///
/// Every wall between two neighbouring cells is recorded on both cells. The only way to open a
/// passage is `carve_passage` (or `link`), which clears both flags together, so the two sides
/// can never disagree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dimensions: RectGridDimensions,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CellLinkError::InvalidGridCoordinate => "coordinate outside the grid",
            CellLinkError::SelfLink => "a cell cannot be linked to itself",
            CellLinkError::NotNeighbours => "only adjacent cells can be linked",
        };
        write!(f, "cell link failed: {}", reason)
    }
}

impl error::Error for CellLinkError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows(), self.columns(), self.links_count())
    }
}

impl Grid {
    /// A fully walled, unvisited grid.
    pub fn new(dimensions: RectGridDimensions) -> Grid {
        let NodesCount(nodes) = dimensions.size();
        Grid {
            dimensions,
            cells: vec![Cell::default(); nodes],
        }
    }

    pub fn with_dimensions(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        Ok(Grid::new(RectGridDimensions::new(rows, columns)?))
    }

    /// Put every cell back to its initial state: all walls present, not visited.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::default();
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_visited)
    }

    /// Mark a cell visited. Returns false if the coordinate is invalid.
    pub(crate) fn mark_visited(&mut self, coord: Cartesian2DCoordinate) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.cells[index].mark_visited();
            true
        } else {
            false
        }
    }

    /// Open the passage between `coord` and its neighbour in `direction`, clearing the wall on
    /// both cells. Returns the neighbour's coordinate.
    pub fn carve_passage(&mut self,
                         coord: Cartesian2DCoordinate,
                         direction: CompassPrimary)
                         -> std::result::Result<Cartesian2DCoordinate, CellLinkError> {

        let a_index = self.grid_coordinate_to_index(coord)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let b_index = self.grid_coordinate_to_index(neighbour)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;

        self.cells[a_index].remove_wall(direction);
        self.cells[b_index].remove_wall(direction.opposite());
        Ok(neighbour)
    }

    /// Link two adjacent cells by carving the wall between them. Linking twice is harmless.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let direction = a.direction_to(b).ok_or(CellLinkError::NotNeighbours)?;
        self.carve_passage(a, direction).map(|_| ())
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        self.cell(coord).map(|cell| {
            CompassPrimary::ALL
                .iter()
                .filter(|dir| !cell.has_wall(**dir))
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .collect()
        })
    }

    /// Number of open passages, each shared wall pair counted once.
    pub fn links_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [CompassPrimary::East, CompassPrimary::South]
                    .iter()
                    .filter(|dir| self.is_neighbour_linked(coord, **dir))
                    .count()
            })
            .sum()
    }

    /// Cells that are to the North, East, South or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        a.direction_to(b).map_or(false, |dir| self.is_neighbour_linked(a, dir))
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.cell(coord).map_or(false, |cell| !cell.has_wall(direction))
    }

    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.grid_coordinate_to_index(coord)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Row, self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Column, self.dimensions)
    }

    /// Every open passage as a (west or north cell, east or south cell) pair, in row major order.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter(move |dir| self.is_neighbour_linked(coord, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
                .collect::<LinkPairSmallVec>()
        })
    }

    /// The open passages as an undirected graph. Node weights are the cell coordinates and node
    /// indices follow the row major cell order.
    pub fn to_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges_hint)) = self.dimensions.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges_hint);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// The open passages as plain text: a `cells passages` header line, then one `a b` line per
    /// passage, with cells numbered from 1 in row major order.
    pub fn edge_list_text(&self) -> String {
        let mut output = format!("{} {}\n", self.size(), self.links_count());
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                output.push_str(&format!("{} {}\n", a_index + 1, b_index + 1));
            }
        }
        output
    }
}
