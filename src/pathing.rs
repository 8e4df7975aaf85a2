use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, CheckedAdd, One, Unsigned, Zero};
use petgraph::algo::{connected_components, is_cyclic_undirected};
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::{CoordinateSmallVec, Grid};
use crate::utils;
use crate::utils::FnvHashMap;


// Stands in for a generic type parameter alias over the unsigned integer a distance is counted in.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add<Output = Self> + CheckedAdd + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T> MaxDistance for T
    where T: Zero + One + Bounded + Unsigned + Add<Output = T> + CheckedAdd + Debug + Clone + Copy + Display + LowerHex + Ord
{
}


/// Flood fill distances from one start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// None if the start is outside the grid, or if some reachable cell is further away than
    /// `MaxDistanceT` can count.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        // Every passage is one step, so the first time a cell is reached is via a shortest route.
        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links: CoordinateSmallVec = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        let next_distance = distance_to_cell.checked_add(&MaxDistanceT::one())?;
                        distances.insert(*link_coordinate, next_distance);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// Number of cells reached from the start, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// The cells at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted_by_key(|coord| (coord.y, coord.x))
            .collect()
    }
}

/// Walk back from `end_point` towards the start, always stepping to a linked neighbour closer
/// to the start. Returns the path start to end inclusive, or None if the end is unreachable.
pub fn shortest_path<MaxDistanceT>(grid: &Grid,
                                   distances_from_start: &Distances<MaxDistanceT>,
                                   end_point: Cartesian2DCoordinate)
                                   -> Option<Vec<Cartesian2DCoordinate>>
    where MaxDistanceT: MaxDistance
{
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .reduce(|closest_accumulator, closest_candidate| {
                if closest_candidate.1 < closest_accumulator.1 {
                    closest_candidate
                } else {
                    closest_accumulator
                }
            });

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // No linked neighbour gets any closer, the distances belong to some other maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path of a perfect maze: flood from the top left, take the furthest cell as the
/// path start, flood again and take the furthest cell from there as the end.
///
/// On a grid that is not a perfect maze this is merely some long path.
pub fn dijkstra_longest_path<MaxDistanceT>(grid: &Grid) -> Option<Vec<Cartesian2DCoordinate>>
    where MaxDistanceT: MaxDistance
{
    let arbitrary_start_point = Cartesian2DCoordinate::new(0, 0);
    let first_distances = Distances::<MaxDistanceT>::new(grid, arbitrary_start_point)?;

    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;
    let distances_from_start = Distances::<MaxDistanceT>::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

/// Is the grid a perfect maze: every cell connected and no loops, i.e. the open passages form a
/// spanning tree.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = grid.to_graph();
    graph.edge_count() + 1 == graph.node_count() &&
    connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}
