use std::fmt;

use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::GridCoord;
use crate::cell::Cell;

/// Smallest accepted side length.
pub const MIN_SIDE: GridCoord = 1;

/// Largest accepted side length.
pub const MAX_SIDE: GridCoord = 512;

// Moore neighborhood, clockwise from the top left.
const NEIGHBOR_OFFSETS: [(GridCoord, GridCoord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {cols}x{rows} outside accepted range {MIN_SIDE}..={MAX_SIDE}")]
    Dimensions { cols: GridCoord, rows: GridCoord },
}

/// A bounded, non-wrapping Life grid.
///
/// Cells live in a flat row-major buffer (`index = y * cols + x`) and are
/// created dead. The cell count is `cols * rows` from construction until a
/// [`resize`], which tears the whole grid down and rebuilds it dead —
/// resizing never preserves state.
///
/// [`resize`]: Grid::resize
pub struct Grid {
    cells: Vec<Cell>,
    cols: GridCoord,
    rows: GridCoord,
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Both dimensions must fall in `MIN_SIDE..=MAX_SIDE`; anything else is
    /// a configuration error and no grid is built.
    pub fn new(cols: GridCoord, rows: GridCoord) -> Result<Self, GridError> {
        check_dims(cols, rows)?;

        Ok(Self {
            cells: alloc_cells(cols, rows),
            cols,
            rows,
            generation: 0,
        })
    }

    pub fn cols(&self) -> GridCoord {
        self.cols
    }

    pub fn rows(&self) -> GridCoord {
        self.rows
    }

    /// Completed generation advances since construction or the last resize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The cell at `(x, y)`, or `None` if either coordinate is out of range.
    ///
    /// Absent neighbors are an ordinary `None`, never a placeholder cell.
    pub fn cell_at(&self, x: GridCoord, y: GridCoord) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Count the living cells among the 8 Moore neighbors of `(x, y)`.
    ///
    /// Offsets that land outside the grid contribute nothing, so edge and
    /// corner cells naturally see fewer neighbors. The cell's own state is
    /// never counted.
    pub fn count_living_neighbors(&self, x: GridCoord, y: GridCoord) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.cell_at(x + dx, y + dy))
            .filter(|c| c.is_alive())
            .count() as u8
    }

    /// Advance every cell one generation, synchronously.
    ///
    /// Runs in two passes. The prepare pass counts each cell's neighbors
    /// against the current generation and records the B3/S23 outcome in the
    /// cell's scratch state; the commit pass promotes every scratch state at
    /// once. Neighbor counts therefore never observe an already-updated
    /// cell, which is the property that makes this Life and not some other
    /// automaton.
    pub fn advance(&mut self) {
        for i in 0..self.cells.len() {
            let cell = self.cells[i];
            let n = self.count_living_neighbors(cell.x(), cell.y());

            let alive = match (cell.is_alive(), n) {
                // survival
                (true, 2 | 3) => true,
                // underpopulation or overpopulation
                (true, _) => false,
                // birth
                (false, 3) => true,
                (false, _) => false,
            };

            self.cells[i].prepare(alive);
        }

        for cell in &mut self.cells {
            cell.commit();
        }

        self.generation += 1;

        trace!(generation = self.generation, "advanced");
    }

    /// Flip the alive state of the cell at `(x, y)`.
    ///
    /// Returns whether a cell existed there; out-of-range coordinates change
    /// nothing and report `false`.
    pub fn toggle(&mut self, x: GridCoord, y: GridCoord) -> bool {
        let Some(i) = self.index_of(x, y) else {
            return false;
        };

        self.cells[i].toggle();
        true
    }

    /// Throw the grid away and rebuild it dead at the new dimensions.
    ///
    /// On a dimension error the current grid is left untouched.
    pub fn resize(&mut self, cols: GridCoord, rows: GridCoord) -> Result<(), GridError> {
        check_dims(cols, rows)?;

        debug!(cols, rows, "grid rebuilt");

        self.cells = alloc_cells(cols, rows);
        self.cols = cols;
        self.rows = rows;
        self.generation = 0;

        Ok(())
    }

    /// Kill every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        debug!("grid cleared");

        for cell in &mut self.cells {
            cell.kill();
        }
    }

    fn index_of(&self, x: GridCoord, y: GridCoord) -> Option<usize> {
        if (0..self.cols).contains(&x) && (0..self.rows).contains(&y) {
            Some((y * self.cols + x) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    /// One text row per grid row, `#` for alive and `.` for dead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            if y > 0 {
                writeln!(f)?;
            }

            for x in 0..self.cols {
                let alive = self.cell_at(x, y).is_some_and(Cell::is_alive);
                f.write_str(if alive { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}

fn check_dims(cols: GridCoord, rows: GridCoord) -> Result<(), GridError> {
    let side = MIN_SIDE..=MAX_SIDE;

    if side.contains(&cols) && side.contains(&rows) {
        Ok(())
    } else {
        Err(GridError::Dimensions { cols, rows })
    }
}

fn alloc_cells(cols: GridCoord, rows: GridCoord) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((cols * rows) as usize);

    for y in 0..rows {
        for x in 0..cols {
            cells.push(Cell::dead(x, y));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cols: GridCoord, rows: GridCoord, live: &[(GridCoord, GridCoord)]) -> Grid {
        let mut grid = Grid::new(cols, rows).unwrap();

        for &(x, y) in live {
            assert!(grid.toggle(x, y));
        }

        grid
    }

    #[test]
    fn construction_rejects_bad_dimensions() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(-3, 10).is_err());
        assert!(Grid::new(10, MAX_SIDE + 1).is_err());

        assert!(Grid::new(MIN_SIDE, MIN_SIDE).is_ok());
        assert!(Grid::new(MAX_SIDE, MAX_SIDE).is_ok());
    }

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(8, 5).unwrap();

        assert_eq!(grid.cells().count(), 40);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn cell_at_is_none_outside_bounds() {
        let grid = Grid::new(4, 4).unwrap();

        assert!(grid.cell_at(0, 0).is_some());
        assert!(grid.cell_at(3, 3).is_some());

        assert!(grid.cell_at(4, 0).is_none());
        assert!(grid.cell_at(0, 4).is_none());
        assert!(grid.cell_at(-1, 0).is_none());
        assert!(grid.cell_at(0, -1).is_none());
    }

    #[test]
    fn cells_know_their_position() {
        let grid = Grid::new(3, 2).unwrap();

        let cell = grid.cell_at(2, 1).unwrap();
        assert_eq!((cell.x(), cell.y()), (2, 1));
    }

    #[test]
    fn toggle_flips_exactly_one_cell() {
        let mut grid = Grid::new(4, 4).unwrap();

        assert!(grid.toggle(1, 2));
        assert!(grid.cell_at(1, 2).unwrap().is_alive());
        assert_eq!(grid.population(), 1);

        assert!(grid.toggle(1, 2));
        assert!(!grid.cell_at(1, 2).unwrap().is_alive());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_out_of_bounds_reports_not_found() {
        let mut grid = Grid::new(4, 4).unwrap();

        assert!(!grid.toggle(4, 0));
        assert!(!grid.toggle(-1, 3));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn neighbor_count_ignores_self() {
        let grid = grid_with(5, 5, &[(2, 2)]);

        assert_eq!(grid.count_living_neighbors(2, 2), 0);
    }

    #[test]
    fn neighbor_count_interior() {
        // ring of 8 around (2, 2)
        let ring = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ];
        let grid = grid_with(5, 5, &ring);

        assert_eq!(grid.count_living_neighbors(2, 2), 8);
    }

    #[test]
    fn neighbor_count_at_corner() {
        let grid = grid_with(4, 4, &[(1, 0), (0, 1), (1, 1)]);

        // a corner has only 3 in-bounds neighbors, all live here
        assert_eq!(grid.count_living_neighbors(0, 0), 3);
    }

    #[test]
    fn neighbor_count_does_not_wrap() {
        // live cells hug the right edge; the left edge must not see them
        let grid = grid_with(5, 5, &[(4, 1), (4, 2), (4, 3)]);

        assert_eq!(grid.count_living_neighbors(0, 2), 0);
    }

    #[test]
    fn lone_cell_dies() {
        let mut grid = grid_with(5, 5, &[(2, 2)]);

        grid.advance();
        assert_eq!(grid.population(), 0);

        grid.advance();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let mut grid = grid_with(5, 5, &[(1, 1), (2, 1), (1, 2)]);

        grid.advance();
        assert!(grid.cell_at(2, 2).unwrap().is_alive());
    }

    #[test]
    fn live_cell_with_four_neighbors_dies() {
        let mut grid = grid_with(5, 5, &[(2, 2), (1, 1), (3, 1), (1, 3), (3, 3)]);

        grid.advance();
        assert!(!grid.cell_at(2, 2).unwrap().is_alive());
    }

    #[test]
    fn advance_counts_against_the_old_generation() {
        // A blinker flips in one pass. A buggy in-place update would kill
        // (1, 2) before (2, 2) is counted and produce something else.
        let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);

        grid.advance();

        for (x, y) in [(2, 1), (2, 2), (2, 3)] {
            assert!(grid.cell_at(x, y).unwrap().is_alive(), "({x}, {y})");
        }
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn advance_bumps_generation() {
        let mut grid = Grid::new(4, 4).unwrap();

        grid.advance();
        grid.advance();
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn resize_is_destructive() {
        let mut grid = grid_with(8, 8, &[(1, 1), (2, 2), (3, 3)]);
        grid.advance();

        grid.resize(6, 3).unwrap();

        assert_eq!((grid.cols(), grid.rows()), (6, 3));
        assert_eq!(grid.cells().count(), 18);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn failed_resize_leaves_grid_untouched() {
        let mut grid = grid_with(8, 8, &[(1, 1)]);

        assert!(grid.resize(0, 3).is_err());

        assert_eq!((grid.cols(), grid.rows()), (8, 8));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn clear_kills_everything_in_place() {
        let mut grid = grid_with(8, 8, &[(1, 1), (5, 5)]);

        grid.clear();

        assert_eq!((grid.cols(), grid.rows()), (8, 8));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn display_draws_rows() {
        let grid = grid_with(3, 2, &[(0, 0), (2, 1)]);

        assert_eq!(grid.to_string(), "#..\n..#");
    }
}
