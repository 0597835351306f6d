pub mod cell;
pub mod events;
pub mod grid;
pub mod render;
pub mod sim;

/// Signed grid coordinate.
///
/// Coordinates are signed so that the neighbor offsets of an edge cell can
/// go negative and resolve to "no cell" instead of wrapping around.
pub type GridCoord = i32;
