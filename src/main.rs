use std::io;
use std::thread;
use std::time;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifegrid::GridCoord;
use lifegrid::events::Event;
use lifegrid::events::convert_event;
use lifegrid::grid::Grid;
use lifegrid::render::Renderer;
use lifegrid::render::status_line;
use lifegrid::sim::Sim;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

const START_SIDE: GridCoord = 32;

// Density keys double or halve a side within this range.
const ZOOM_MIN_SIDE: GridCoord = 8;
const ZOOM_MAX_SIDE: GridCoord = 256;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut grid = Grid::new(START_SIDE, START_SIDE).context("Failed to build starting grid")?;
    seed_blinker(&mut grid);

    let mut sim = Sim::new();
    let renderer = Renderer::new();

    info!(cols = START_SIDE, rows = START_SIDE, "starting");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide,
    )?;

    let res = run(&mut stdout, &mut grid, &mut sim, &renderer);

    execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
    )?;
    terminal::disable_raw_mode()?;

    res
}

fn run(
    stdout: &mut io::Stdout,
    grid: &mut Grid,
    sim: &mut Sim,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    loop {
        let t = time::SystemTime::now();

        // Poll input for at most one frame budget
        let event = if event::poll(FRAMETIME)? {
            convert_event(event::read()?)
        } else {
            None
        };

        match event {
            None => {}
            Some(Event::Exit) => break,
            Some(Event::TogglePause) => {
                if sim.is_running() {
                    sim.stop();
                } else {
                    sim.start();
                }
            }
            Some(Event::Step) => sim.step(grid),
            Some(Event::Click { col, row }) => {
                let (x, y) = renderer.grid_pos(col, row);
                grid.toggle(x, y);
            }
            Some(Event::ZoomIn) => rescale(grid, 2),
            Some(Event::ZoomOut) => rescale(grid, -2),
            Some(Event::Clear) => grid.clear(),
        }

        sim.tick(grid);

        renderer.draw(stdout, grid, sim)?;
        execute!(stdout, terminal::SetTitle(status_line(grid, sim)))?;

        let dt = t.elapsed()?;
        thread::sleep(FRAMETIME.saturating_sub(dt));
    }

    Ok(())
}

/// Double (`factor = 2`) or halve (`factor = -2`) both sides, clamped.
///
/// Resizing is destructive: the new grid comes back all dead.
fn rescale(grid: &mut Grid, factor: GridCoord) {
    let scale = |side: GridCoord| {
        let side = if factor > 0 { side * factor } else { side / -factor };
        side.clamp(ZOOM_MIN_SIDE, ZOOM_MAX_SIDE)
    };

    let (cols, rows) = (scale(grid.cols()), scale(grid.rows()));

    if (cols, rows) != (grid.cols(), grid.rows()) {
        // bounds are clamped above, so this cannot fail
        let _ = grid.resize(cols, rows);
    }
}

/// Seed a small oscillator so the board isn't empty on startup.
fn seed_blinker(grid: &mut Grid) {
    for (x, y) in [(1, 1), (1, 2), (1, 3)] {
        grid.toggle(x, y);
    }
}
