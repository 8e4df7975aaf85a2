//! **perfect_mazes** builds perfect mazes (every cell reachable, no loops) on rectangular grids
//! with a randomised depth first backtracker, and exposes the walls for rendering and route finding.

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;
