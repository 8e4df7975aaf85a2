use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnsCount, RowsCount};


/// Source of uniformly distributed integers the maze generators draw their choices from.
///
/// Any `rand::Rng` is a `RandomSource`. Tests and callers wanting a reproducible maze can script
/// the answers instead.
pub trait RandomSource {
    /// A value drawn uniformly from the closed interval `[low, high]`.
    fn uniform_int(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..=high)
    }
}

/// A fast, weak rng that reproduces the same maze for the same seed.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// A fast, weak rng seeded from the operating system.
pub fn weak_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// Build a perfect maze of `rows` by `columns` cells, carving from the top left cell.
///
/// Fails with `InvalidDimensions` before anything is built if either dimension is zero or too
/// large to address.
pub fn generate<R>(rows: RowsCount, columns: ColumnsCount, rng: &mut R) -> Result<Grid>
    where R: RandomSource + ?Sized
{
    let dimensions = RectGridDimensions::new(rows, columns)?;
    generate_from(dimensions, Cartesian2DCoordinate::new(0, 0), rng)
}

/// Build a perfect maze, carving from a caller chosen start cell.
pub fn generate_from<R>(dimensions: RectGridDimensions,
                        start: Cartesian2DCoordinate,
                        rng: &mut R)
                        -> Result<Grid>
    where R: RandomSource + ?Sized
{
    let mut grid = Grid::new(dimensions);
    recursive_backtracker(&mut grid, start, rng)?;
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomised depth first walk: from the cell on top of the stack pick, uniformly at random,
/// one of its unvisited neighbours, knock down the wall between them and push the neighbour.
/// When the top cell has no unvisited neighbours it is popped (a dead end, so backtrack).
/// The walk ends when the stack is empty, by which point every cell has been visited exactly
/// once and the open passages form a spanning tree of the grid.
///
/// The stack lives on the heap so arbitrarily large grids cannot exhaust the call stack.
///
/// Candidates are gathered North, East, South, West and filtered down to the valid unvisited
/// ones before `rng` is asked for a single index in `[0, candidates - 1]`. The draw is uniform
/// over the real choices, not over all four directions.
///
/// The grid is reset first, any previous maze on it is discarded. If `rng` answers outside the
/// range it was asked for the grid is reset again and `RandomSourceOutOfRange` returned, so a
/// failed run never leaves a partial maze behind.
pub fn recursive_backtracker<R>(grid: &mut Grid,
                                start: Cartesian2DCoordinate,
                                rng: &mut R)
                                -> Result<()>
    where R: RandomSource + ?Sized
{
    if !grid.is_valid_coordinate(start) {
        bail!(ErrorKind::InvalidStartCoordinate(start));
    }

    grid.reset();

    let mut stack: Vec<Cartesian2DCoordinate> = Vec::with_capacity(grid.size());
    grid.mark_visited(start);
    stack.push(start);

    let mut passages = 0;
    while let Some(&current) = stack.last() {

        let candidates = unvisited_neighbours(grid, current);
        if candidates.is_empty() {
            trace!("dead end at {}, backtracking", current);
            let _ = stack.pop();
            continue;
        }

        let sample = rng.uniform_int(0, candidates.len() - 1);
        let direction = match candidates.get(sample) {
            Some(direction) => *direction,
            None => {
                grid.reset();
                bail!(ErrorKind::RandomSourceOutOfRange(sample, candidates.len()));
            }
        };

        let next = grid.carve_passage(current, direction)?;
        grid.mark_visited(next);
        stack.push(next);
        passages += 1;
    }

    debug!("recursive backtracker carved {} passages over {} cells from {}",
           passages,
           grid.size(),
           start);
    Ok(())
}

fn unvisited_neighbours(grid: &Grid, coord: Cartesian2DCoordinate) -> SmallVec<[CompassPrimary; 4]> {
    CompassPrimary::ALL
        .iter()
        .cloned()
        .filter(|dir| {
            grid.neighbour_at_direction(coord, *dir)
                .map_or(false, |neighbour| !grid.is_visited(neighbour))
        })
        .collect()
}
