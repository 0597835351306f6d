use tracing::debug;

use crate::grid::Grid;

/// Frames between generation advances.
///
/// At the 60 fps loop this is one generation per second.
pub const DEFAULT_CADENCE: u32 = 60;

/// Run/pause state plus the frame counter that throttles the grid.
///
/// The loop calls [`tick`] once per rendered frame; the grid only advances
/// every `cadence` frames, so simulation speed is decoupled from the render
/// and input rate. `Sim` never holds the grid itself — the loop passes in
/// whichever grid is currently active.
///
/// [`tick`]: Sim::tick
pub struct Sim {
    running: bool,
    frame: u32,
    cadence: u32,
}

impl Sim {
    pub fn new() -> Self {
        Self::with_cadence(DEFAULT_CADENCE)
    }

    pub fn with_cadence(cadence: u32) -> Self {
        Self {
            running: false,
            frame: 0,
            cadence: cadence.max(1),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume the simulation. A no-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            debug!("sim running");
        }

        self.running = true;
    }

    /// Pause the simulation. A no-op if already paused.
    pub fn stop(&mut self) {
        if self.running {
            debug!("sim paused");
        }

        self.running = false;
    }

    /// Advance the frame counter; advance the grid when it wraps.
    ///
    /// While paused this moves nothing, not even the counter. Returns
    /// whether the grid advanced.
    pub fn tick(&mut self, grid: &mut Grid) -> bool {
        if !self.running {
            return false;
        }

        self.frame = (self.frame + 1) % self.cadence;
        if self.frame != 0 {
            return false;
        }

        grid.advance();
        true
    }

    /// Advance exactly one generation, regardless of the running state.
    pub fn step(&mut self, grid: &mut Grid) {
        grid.advance();
    }
}

impl Default for Sim {
    fn default() -> Self {
        Self::new()
    }
}
