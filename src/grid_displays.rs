use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::{CoordinateSmallVec, Grid};
use crate::grid_traits::GridDisplay;
use crate::pathing::{Distances, MaxDistance};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;
use crate::utils::FnvHashSet;


impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            let body = format!("{:^3x}", d);
            if body.len() > 3 {
                // Past 0xfff the cell body would push the walls out of line.
                String::from("+++")
            } else {
                body
            }
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}


impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, None))
    }
}

/// Draw the maze with box drawing glyphs. Each cell is 3 glyphs wide, its body filled in by
/// `grid_display` when given.
pub fn render_text(grid: &Grid, grid_display: Option<&dyn GridDisplay>) -> String {
    const WALL_L: &str = "╴";
    const WALL_R: &str = "╶";
    const WALL_U: &str = "╵";
    const WALL_D: &str = "╷";
    const WALL_LR_3: &str = "───";
    const WALL_LR: &str = "─";
    const WALL_UD: &str = "│";
    const WALL_LD: &str = "┐";
    const WALL_RU: &str = "└";
    const WALL_LU: &str = "┘";
    const WALL_RD: &str = "┌";
    const WALL_LRU: &str = "┴";
    const WALL_LRD: &str = "┬";
    const WALL_LRUD: &str = "┼";
    const WALL_RUD: &str = "├";
    const WALL_LUD: &str = "┤";
    const DEFAULT_CELL_BODY: &str = "   ";

    let ColumnsCount(columns_count) = grid.columns();
    let RowsCount(rows_count) = grid.rows();

    // Start by special case rendering the text for the north most boundary
    let mut output = String::from(WALL_RD);
    if let Some(first_grid_row) = grid.iter_row().next() {
        for (index, coord) in first_grid_row.iter().enumerate() {
            output.push_str(WALL_LR_3);
            if grid.is_neighbour_linked(*coord, CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if index == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
    }
    output.push('\n');

    for (index_row, row) in grid.iter_row().enumerate() {

        let is_last_row = index_row == (rows_count - 1);

        // Starts of by special case rendering the west most boundary of the row
        // The top section of the cell is done by the previous row.
        let mut row_middle_section_render = String::from(WALL_UD);
        let mut row_bottom_section_render = String::new();

        for (index_column, cell_coord) in row.into_iter().enumerate() {

            let is_first_column = index_column == 0;
            let is_last_column = index_column == (columns_count - 1);
            let east_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::East);
            let south_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::South);

            // Each cell uses the southern wall of the cell above it as its own northern wall,
            // so only the cell body, its eastern boundary and its southern boundary (minus the
            // south west corner) are drawn here.
            match grid_display {
                Some(displayer) => row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord)),
                None => row_middle_section_render.push_str(DEFAULT_CELL_BODY),
            }
            row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

            if is_first_column {
                row_bottom_section_render.push_str(if is_last_row {
                    WALL_RU
                } else if south_open {
                    WALL_UD
                } else {
                    WALL_RUD
                });
            }
            row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => {
                    let access_se_from_east =
                        grid.neighbour_at_direction(cell_coord, CompassPrimary::East)
                            .map_or(false, |c| grid.is_neighbour_linked(c, CompassPrimary::South));
                    let access_se_from_south =
                        grid.neighbour_at_direction(cell_coord, CompassPrimary::South)
                            .map_or(false, |c| grid.is_neighbour_linked(c, CompassPrimary::East));
                    let show_right_section = !access_se_from_east;
                    let show_down_section = !access_se_from_south;
                    let show_up_section = !east_open;
                    let show_left_section = !south_open;

                    match (show_left_section,
                           show_right_section,
                           show_up_section,
                           show_down_section) {
                        (true, true, true, true) => WALL_LRUD,
                        (true, true, true, false) => WALL_LRU,
                        (true, true, false, true) => WALL_LRD,
                        (true, false, true, true) => WALL_LUD,
                        (false, true, true, true) => WALL_RUD,
                        (true, true, false, false) => WALL_LR,
                        (false, false, true, true) => WALL_UD,
                        (false, true, true, false) => WALL_RU,
                        (true, false, false, true) => WALL_LD,
                        (true, false, true, false) => WALL_LU,
                        (false, true, false, true) => WALL_RD,
                        (true, false, false, false) => WALL_L,
                        (false, true, false, false) => WALL_R,
                        (false, false, true, false) => WALL_U,
                        (false, false, false, true) => WALL_D,
                        _ => " ",
                    }
                }
            };

            row_bottom_section_render.push_str(corner);
        }

        output.push_str(&row_middle_section_render);
        output.push('\n');
        output.push_str(&row_bottom_section_render);
        output.push('\n');
    }

    output
}
