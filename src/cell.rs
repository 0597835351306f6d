use crate::GridCoord;

/// A single grid slot.
///
/// The position is fixed at construction; only the alive state ever changes.
/// `next_alive` is scratch space for the two-phase generation advance: the
/// prepare pass writes it, the commit pass consumes and clears it. The
/// mutators are `pub(crate)` so that nothing outside [`Grid`] can observe a
/// half-advanced cell.
///
/// [`Grid`]: crate::grid::Grid
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    x: GridCoord,
    y: GridCoord,
    alive: bool,
    next_alive: bool,
}

impl Cell {
    pub(crate) const fn dead(x: GridCoord, y: GridCoord) -> Self {
        Self {
            x,
            y,
            alive: false,
            next_alive: false,
        }
    }

    pub fn x(&self) -> GridCoord {
        self.x
    }

    pub fn y(&self) -> GridCoord {
        self.y
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn toggle(&mut self) {
        self.alive = !self.alive;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// Record the state this cell takes in the next generation.
    pub(crate) fn prepare(&mut self, alive: bool) {
        self.next_alive = alive;
    }

    /// Promote the prepared state and clear the scratch flag.
    pub(crate) fn commit(&mut self) {
        self.alive = self.next_alive;
        self.next_alive = false;
    }
}
