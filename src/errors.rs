// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
#![allow(deprecated)]

use crate::cells::Cartesian2DCoordinate;
use crate::grid::CellLinkError;

error_chain! {

    foreign_links {
        CellLink(CellLinkError);
    }

    errors {
        InvalidDimensions(rows: i64, columns: i64) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {} x {}: rows and columns must both be positive and addressable",
                    rows, columns)
        }
        InvalidStartCoordinate(coord: Cartesian2DCoordinate) {
            description("start coordinate outside the grid")
            display("start coordinate {} is outside the grid", coord)
        }
        RandomSourceOutOfRange(index: usize, candidates: usize) {
            description("random source answered outside the requested range")
            display("random source picked index {} from {} neighbour candidates", index, candidates)
        }
        InvalidCellSize(cell_side_pixels: usize) {
            description("invalid cell side length")
            display("cell side of {} pixels is zero or too large to address the maze in pixels",
                    cell_side_pixels)
        }
    }
}
