//! Grid coordinates and movement directions.
//!
//! Coordinates are signed so that offsets and out-of-grid probes (vision
//! windows reaching past the border, movement off the edge) can be
//! represented directly. Validity against a concrete grid is decided by the
//! grid, never here.

use serde::{Deserialize, Serialize};

/// An `(x, y)` grid coordinate. `x` runs along the width, `y` along the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, bounded by the grid width.
    pub x: i32,
    /// Row, bounded by the grid height.
    pub y: i32,
}

impl Position {
    /// The tombstone position `(-1, -1)`.
    pub const INVALID: Self = Self { x: -1, y: -1 };

    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this position by `(dx, dy)`.
    ///
    /// Returns `None` if either coordinate would overflow `i32`.
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y })
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the nine movement choices available to a cell each tick.
///
/// The numeric move codes are part of the external contract: callers
/// submit one integer per live cell and [`Direction::from_code`] decodes
/// them. Any code outside `0..=8` means [`Direction::Stay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Code 0: `y - 1`.
    Up,
    /// Code 1: `y + 1`.
    Down,
    /// Code 2: `x - 1`.
    Left,
    /// Code 3: `x + 1`.
    Right,
    /// Code 4: `x - 1, y - 1`.
    UpLeft,
    /// Code 5: `x + 1, y - 1`.
    UpRight,
    /// Code 6: `x - 1, y + 1`.
    DownLeft,
    /// Code 7: `x + 1, y + 1`.
    DownRight,
    /// Code 8 (and every unknown code): no movement.
    Stay,
}

impl Direction {
    /// All directions, indexed by their move code.
    pub const ALL: [Self; 9] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
        Self::Stay,
    ];

    /// Decode a move code. Unknown codes decode to [`Direction::Stay`].
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            3 => Self::Right,
            4 => Self::UpLeft,
            5 => Self::UpRight,
            6 => Self::DownLeft,
            7 => Self::DownRight,
            _ => Self::Stay,
        }
    }

    /// The canonical move code of this direction.
    pub const fn code(self) -> i32 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::UpLeft => 4,
            Self::UpRight => 5,
            Self::DownLeft => 6,
            Self::DownRight => 7,
            Self::Stay => 8,
        }
    }

    /// The `(dx, dy)` displacement of this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
            Self::Stay => (0, 0),
        }
    }

    /// The position reached by taking this step from `from`.
    pub const fn apply(self, from: Position) -> Option<Position> {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }
}
