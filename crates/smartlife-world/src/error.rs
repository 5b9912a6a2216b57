//! Error types for the `smartlife-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use smartlife_types::Position;

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Grid dimensions must both be positive.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A position outside the grid was used where a valid one is required.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// Attempted to occupy a position that already holds a cell.
    #[error("position {0} is already occupied")]
    Occupied(Position),

    /// The grid has more cells than can be allocated.
    #[error("a {width}x{height} grid cannot be allocated")]
    TooLarge {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}
