#[macro_use]
extern crate error_chain;

use std::{
    fs::File,
    io,
    io::prelude::*,
};

use docopt::Docopt;
use log::info;
use perfect_mazes::{
    cells::Cartesian2DCoordinate,
    generators,
    grid::Grid,
    grid_dimensions::RectGridDimensions,
    grid_displays::{self, PathDisplay, StartEndPointsDisplay},
    grid_traits::GridDisplay,
    pathing,
    renderers,
};
use serde_derive::Deserialize;
use smallvec::smallvec;

const USAGE: &str = "Perfect mazes

Usage:
    maze_driver -h | --help
    maze_driver [text] [options]
    maze_driver segments [options]

Commands:
    text                   Print the maze with box drawing characters (the default).
    segments               Print one `x1 y1 x2 y2` line per wall, for drawing the maze elsewhere.

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of rows in the grid [default: 15].
    --columns=<c>          Number of columns in the grid [default: 20].
    --seed=<s>             Seed for a reproducible maze. A fresh random maze is built if not given.
    --start-row=<r>        Row of the cell the carving starts from [default: 0].
    --start-column=<c>     Column of the cell the carving starts from [default: 0].
    --show-distances       Show the distance from the start cell to every other cell, in hex.
    --show-path            Show the longest path through the maze.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) at the ends of the longest path.
    --text-out=<path>      Output file path for the text rendering instead of stdout.
    --cell-pixels=<n>      Pixel length of one cell side for wall segments [default: 40].
    --shared-walls-once    Emit a wall shared by two cells only once.
    --segments-out=<path>  Output file path for the wall segments instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_text: bool,
    cmd_segments: bool,
    flag_rows: i64,
    flag_columns: i64,
    flag_seed: Option<u64>,
    flag_start_row: i64,
    flag_start_column: i64,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_cell_pixels: usize,
    flag_shared_walls_once: bool,
    flag_segments_out: String,
    flag_save_edges: String,
}

// Create the Error, ErrorKind, ResultExt, and Result types for the driver.
// Library errors are linked in so `?` works on them directly.
mod errors {
    #![allow(deprecated)]
    error_chain! {

        links {
            Mazes(::perfect_mazes::errors::Error, ::perfect_mazes::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

quick_main!(run);

fn run() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let dimensions = RectGridDimensions::from_signed(args.flag_rows, args.flag_columns)?;
    let start = start_coordinate(&args)?;

    let mut rng = match args.flag_seed {
        Some(seed) => generators::seeded_rng(seed),
        None => generators::weak_rng(),
    };
    info!("generating a {} x {} maze from {} (seed: {:?})",
          args.flag_rows,
          args.flag_columns,
          start,
          args.flag_seed);

    let maze_grid = generators::generate_from(dimensions, start, &mut rng)?;

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.cmd_segments {
        let options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .shared_walls_once(args.flag_shared_walls_once)
            .build()?;
        let segments = render_segments(&maze_grid, &options)?;
        write_output(&segments, &args.flag_segments_out)
            .chain_err(|| format!("Failed to write wall segments to {}", args.flag_segments_out))?;
    } else {
        let text = render_maze_text(&maze_grid, &args, start)?;
        write_output(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn start_coordinate(args: &MazeArgs) -> Result<Cartesian2DCoordinate> {
    match Cartesian2DCoordinate::from_signed_row_column(args.flag_start_row, args.flag_start_column) {
        Some(coord) => Ok(coord),
        None => {
            bail!("start cell (row {}, column {}) is outside the grid",
                  args.flag_start_row,
                  args.flag_start_column);
        }
    }
}

/// Decide how the cell bodies are filled in:
/// - distances from the start cell to all other cells
/// - the longest path through the maze, optionally with its ends marked
/// - only the ends of the longest path
/// - nothing
fn render_maze_text(maze_grid: &Grid,
                    args: &MazeArgs,
                    start: Cartesian2DCoordinate)
                    -> Result<String> {

    if args.flag_show_distances {
        let distances = pathing::Distances::<u32>::new(maze_grid, start)
            .ok_or("Maze distances do not fit the distance type.")?;
        return Ok(grid_displays::render_text(maze_grid, Some(&distances)));
    }

    if !(args.flag_show_path || args.flag_mark_start_end) {
        return Ok(maze_grid.to_string());
    }

    let longest_path = pathing::dijkstra_longest_path::<u32>(maze_grid).unwrap_or_default();
    let (first, last) = match (longest_path.first(), longest_path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(maze_grid.to_string()),
    };

    if args.flag_show_path && !args.flag_mark_start_end {
        let display_path = PathDisplay::new(&longest_path);
        Ok(grid_displays::render_text(maze_grid, Some(&display_path)))
    } else if args.flag_show_path {
        let display_path = PathWithEndsDisplay {
            path: PathDisplay::new(&longest_path),
            ends: StartEndPointsDisplay::new(smallvec![first], smallvec![last]),
        };
        Ok(grid_displays::render_text(maze_grid, Some(&display_path)))
    } else {
        let display_start_end_points = StartEndPointsDisplay::new(smallvec![first], smallvec![last]);
        Ok(grid_displays::render_text(maze_grid, Some(&display_start_end_points)))
    }
}

struct PathWithEndsDisplay {
    path: PathDisplay,
    ends: StartEndPointsDisplay,
}

impl GridDisplay for PathWithEndsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        let end_marker = self.ends.render_cell_body(coord);
        if end_marker.trim().is_empty() {
            self.path.render_cell_body(coord)
        } else {
            end_marker
        }
    }
}

fn render_segments(maze_grid: &Grid, options: &renderers::RenderOptions) -> Result<String> {
    let (width, height) = renderers::image_dimensions(maze_grid, options)?;
    info!("wall segments cover {} x {} pixels", width.0, height.0);

    let segments = renderers::wall_segments(maze_grid, options)?;
    Ok(renderers::segments_text(&segments))
}

/// Print to stdout when no file name is given.
fn write_output(data: &str, file_name: &str) -> io::Result<()> {
    if file_name.is_empty() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(data.as_bytes())?;
        handle.flush()
    } else {
        let mut f = File::create(file_name)?;
        f.write_all(data.as_bytes())
    }
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph_data = maze_grid.edge_list_text();
    write_output(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("saved {} passages to {}", maze_grid.links_count(), file_path);

    Ok(())
}
