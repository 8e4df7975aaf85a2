use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, Height, RowsCount, Width};

/// Pixel length of one cell side: an 800 x 600 screen holds 20 x 15 cells.
pub const DEFAULT_CELL_SIDE_PIXELS: usize = 40;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Point {
        Point { x, y }
    }
}

/// One wall to draw: a straight line along the `side` edge of `cell`'s square.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WallSegment {
    pub cell: Cartesian2DCoordinate,
    pub side: CompassPrimary,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions {
    cell_side_pixels_length: usize,
    shared_walls_once: bool,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            cell_side_pixels_length: DEFAULT_CELL_SIDE_PIXELS,
            shared_walls_once: false,
        }
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder { options: RenderOptions::default() }
    }

    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: usize) -> RenderOptionsBuilder {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }

    /// Only emit a wall shared by two cells once: every cell draws its east and south walls,
    /// north and west walls are drawn only on the outer boundary.
    pub fn shared_walls_once(mut self, shared_walls_once: bool) -> RenderOptionsBuilder {
        self.options.shared_walls_once = shared_walls_once;
        self
    }

    /// Fails with `InvalidCellSize` for a zero cell side.
    pub fn build(self) -> Result<RenderOptions> {
        if self.options.cell_side_pixels_length == 0 {
            bail!(ErrorKind::InvalidCellSize(0));
        }
        Ok(self.options)
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }
}

/// Pixel extent of the whole maze.
///
/// Fails with `InvalidCellSize` when the extent does not fit a `usize`. Every wall coordinate is
/// within the extent, so a maze that passes this check can be drawn without overflow.
pub fn image_dimensions(grid: &Grid, options: &RenderOptions) -> Result<(Width, Height)> {
    let (ColumnsCount(columns), RowsCount(rows)) = (grid.columns(), grid.rows());
    let cell_side = options.cell_side_pixels_length;
    match (columns.checked_mul(cell_side), rows.checked_mul(cell_side)) {
        (Some(width), Some(height)) if cell_side > 0 => Ok((Width(width), Height(height))),
        _ => {
            bail!(ErrorKind::InvalidCellSize(cell_side));
        }
    }
}

/// The line segments an external renderer draws for the maze, one per wall flag still set, in
/// row major cell order and North, East, South, West order within a cell.
pub fn wall_segments(grid: &Grid, options: &RenderOptions) -> Result<Vec<WallSegment>> {
    image_dimensions(grid, options)?;
    let cell_side = options.cell_side_pixels_length;
    let mut segments = Vec::with_capacity(grid.size() * 2 + grid.rows().0 + grid.columns().0);

    for coord in grid.iter() {
        let cell = match grid.cell(coord) {
            Some(cell) => cell,
            None => continue,
        };

        let x1 = coord.x as usize * cell_side;
        let y1 = coord.y as usize * cell_side;
        let x2 = x1 + cell_side;
        let y2 = y1 + cell_side;

        for side in cell.walls() {
            let on_boundary = grid.neighbour_at_direction(coord, side).is_none();
            let drawn_by_neighbour = match side {
                CompassPrimary::North | CompassPrimary::West => !on_boundary,
                CompassPrimary::East | CompassPrimary::South => false,
            };
            if options.shared_walls_once && drawn_by_neighbour {
                continue;
            }

            let (start, end) = match side {
                CompassPrimary::North => (Point::new(x1, y1), Point::new(x2, y1)),
                CompassPrimary::East => (Point::new(x2, y1), Point::new(x2, y2)),
                CompassPrimary::South => (Point::new(x1, y2), Point::new(x2, y2)),
                CompassPrimary::West => (Point::new(x1, y1), Point::new(x1, y2)),
            };
            segments.push(WallSegment {
                cell: coord,
                side,
                start,
                end,
            });
        }
    }

    Ok(segments)
}

/// One `x1 y1 x2 y2` line per segment.
pub fn segments_text(segments: &[WallSegment]) -> String {
    let mut output = String::with_capacity(segments.len() * 16);
    for segment in segments {
        output.push_str(&format!("{} {} {} {}\n",
                                 segment.start.x,
                                 segment.start.y,
                                 segment.end.x,
                                 segment.end.y));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate, seeded_rng};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn single_cell_square() {
        let g = Grid::with_dimensions(RowsCount(1), ColumnsCount(1)).unwrap();
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(10).build().unwrap();
        let segments = wall_segments(&g, &options).unwrap();
        let lines = segments.iter().map(|s| (s.side, s.start, s.end)).collect::<Vec<_>>();
        assert_eq!(lines,
                   vec![(CompassPrimary::North, Point::new(0, 0), Point::new(10, 0)),
                        (CompassPrimary::East, Point::new(10, 0), Point::new(10, 10)),
                        (CompassPrimary::South, Point::new(0, 10), Point::new(10, 10)),
                        (CompassPrimary::West, Point::new(0, 0), Point::new(0, 10))]);
        assert!(segments.iter().all(|s| s.cell == gc(0, 0)));
    }

    #[test]
    fn cell_squares_offset_by_row_and_column() {
        let g = Grid::with_dimensions(RowsCount(2), ColumnsCount(3)).unwrap();
        let segments = wall_segments(&g, &RenderOptions::default()).unwrap();
        assert_eq!(segments.len(), 6 * 4);

        let south_of_last = segments.iter()
            .find(|s| s.cell == gc(2, 1) && s.side == CompassPrimary::South)
            .unwrap();
        assert_eq!(south_of_last.start, Point::new(80, 80));
        assert_eq!(south_of_last.end, Point::new(120, 80));
    }

    #[test]
    fn one_segment_per_wall_flag() {
        let g = generate(RowsCount(15), ColumnsCount(20), &mut seeded_rng(12)).unwrap();
        let segments = wall_segments(&g, &RenderOptions::default()).unwrap();
        let flags: usize = g.iter().map(|coord| g.cell(coord).unwrap().walls_count()).sum();
        assert_eq!(segments.len(), flags);
        // Every removed pair takes two flags away from the 4 per cell.
        assert_eq!(flags, 4 * g.size() - 2 * g.links_count());
    }

    #[test]
    fn shared_walls_drawn_once() {
        let (rows, columns) = (6, 9);
        let g = generate(RowsCount(rows), ColumnsCount(columns), &mut seeded_rng(31)).unwrap();
        let options = RenderOptionsBuilder::new().shared_walls_once(true).build().unwrap();
        let segments = wall_segments(&g, &options).unwrap();

        let boundary = 2 * rows + 2 * columns;
        let interior_pairs = rows * (columns - 1) + columns * (rows - 1);
        let interior_walls = interior_pairs - g.links_count();
        assert_eq!(segments.len(), boundary + interior_walls);

        let mut unique = segments.iter().map(|s| (s.start, s.end)).collect::<Vec<_>>();
        unique.sort_by_key(|&(a, b)| (a.x, a.y, b.x, b.y));
        unique.dedup();
        assert_eq!(unique.len(), segments.len());
    }

    #[test]
    fn image_extent() {
        let g = Grid::with_dimensions(RowsCount(15), ColumnsCount(20)).unwrap();
        assert_eq!(image_dimensions(&g, &RenderOptions::default()).unwrap(),
                   (Width(800), Height(600)));
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(7).build().unwrap();
        assert_eq!(image_dimensions(&g, &options).unwrap(), (Width(140), Height(105)));
    }

    fn is_invalid_cell_size<T>(result: Result<T>) -> bool {
        match result {
            Err(Error(ErrorKind::InvalidCellSize(..), _)) => true,
            _ => false,
        }
    }

    #[test]
    fn zero_cell_side_rejected() {
        assert!(is_invalid_cell_size(RenderOptionsBuilder::new().cell_side_pixels_length(0).build()));
    }

    #[test]
    fn cell_side_too_large_for_the_maze_rejected() {
        let g = generate(RowsCount(2), ColumnsCount(2), &mut seeded_rng(5)).unwrap();
        let options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(usize::MAX / 2 + 1)
            .build()
            .unwrap();
        assert!(is_invalid_cell_size(image_dimensions(&g, &options)));
        assert!(is_invalid_cell_size(wall_segments(&g, &options)));

        // The largest side that still fits draws the far corner at exactly usize::MAX - 1.
        let options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(usize::MAX / 2)
            .build()
            .unwrap();
        let segments = wall_segments(&g, &options).unwrap();
        let far = segments.iter().map(|s| s.end.x.max(s.end.y)).max().unwrap();
        assert_eq!(far, (usize::MAX / 2) * 2);
    }

    #[test]
    fn segment_lines() {
        let g = Grid::with_dimensions(RowsCount(1), ColumnsCount(1)).unwrap();
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(10).build().unwrap();
        let text = segments_text(&wall_segments(&g, &options).unwrap());
        assert_eq!(text, "0 0 10 0\n10 0 10 10\n0 10 10 10\n0 0 0 10\n");
        assert_eq!(segments_text(&[]), "");
    }
}
