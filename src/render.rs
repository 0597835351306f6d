use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;

use crate::GridCoord;
use crate::cell::Cell;
use crate::grid::Grid;
use crate::sim::Sim;

// Green for live cells, grey for dead ones.
const COLOR_ALIVE: Color = Color::Rgb { r: 0, g: 120, b: 0 };
const COLOR_DEAD: Color = Color::Rgb {
    r: 90,
    g: 90,
    b: 90,
};
const COLOR_STATUS: Color = Color::White;

/// Terminal renderer for the grid.
///
/// Each cell is a colored block glyph followed by one column of spacing, so
/// a cell occupies `CELL_COLS` x 1 character cells — roughly square at the
/// usual terminal aspect. The renderer owns this footprint, and with it the
/// pointer-to-grid conversion.
pub struct Renderer {
    alive: Color,
    dead: Color,
}

impl Renderer {
    /// Character columns per cell. One block glyph plus one of spacing.
    pub const CELL_COLS: u16 = 2;

    pub fn new() -> Self {
        Self {
            alive: COLOR_ALIVE,
            dead: COLOR_DEAD,
        }
    }

    /// Queue a full frame: every cell, then the status line. The caller
    /// flushes once per frame.
    pub fn draw(&self, out: &mut impl Write, grid: &Grid, sim: &Sim) -> io::Result<()> {
        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for cell in grid.cells() {
            if cell.x() == 0 && cell.y() > 0 {
                queue!(out, cursor::MoveToNextLine(1))?;
            }

            self.draw_cell(out, cell)?;
        }

        queue!(
            out,
            cursor::MoveToNextLine(2),
            style::SetForegroundColor(COLOR_STATUS),
            style::Print(status_line(grid, sim)),
            style::ResetColor,
        )?;

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        let color = if cell.is_alive() {
            self.alive
        } else {
            self.dead
        };

        queue!(out, style::SetForegroundColor(color), style::Print("█ "))
    }

    /// Convert a pointer position in screen cells to grid coordinates.
    ///
    /// This is a plain floor division by the cell footprint; the result may
    /// lie outside the grid, which [`Grid::toggle`] reports as not found.
    pub fn grid_pos(&self, col: u16, row: u16) -> (GridCoord, GridCoord) {
        ((col / Self::CELL_COLS) as GridCoord, row as GridCoord)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of run state, also mirrored into the terminal title.
pub fn status_line(grid: &Grid, sim: &Sim) -> String {
    let state = if sim.is_running() { "running" } else { "paused" };

    format!(
        "{} | gen {} | pop {} | {}x{}",
        state,
        grid.generation(),
        grid.population(),
        grid.cols(),
        grid.rows(),
    )
}
