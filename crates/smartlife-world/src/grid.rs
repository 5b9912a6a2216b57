//! The occupancy grid.
//!
//! A [`Grid`] is a dense `height x width` matrix stored row-major in a flat
//! `Vec`. Each entry holds the [`SlotId`] of the cell occupying it, so the
//! grid doubles as the position -> cell index. "Is there a live cell at
//! `(x, y)`" is simply `occupant(x, y).is_some()`.
//!
//! Every read and write goes through [`Grid::index`]. It is the only place
//! that turns a [`Position`] into storage offset `y * width + x`, and it
//! rejects anything outside `0 <= x < width`, `0 <= y < height`.

use smartlife_types::{Position, SlotId};

use crate::error::WorldError;

/// Row-major occupancy matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns; bounds `x`.
    width: i32,
    /// Number of rows; bounds `y`.
    height: i32,
    /// `width` as a storage stride.
    stride: usize,
    /// Occupant of each position, row-major.
    occupants: Vec<Option<SlotId>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is not
    /// positive, or [`WorldError::TooLarge`] if the cell storage cannot be
    /// allocated.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let stride = usize::try_from(width).map_err(|_negative| WorldError::InvalidDimensions {
            width,
            height,
        })?;
        let rows = usize::try_from(height).map_err(|_negative| WorldError::InvalidDimensions {
            width,
            height,
        })?;
        let area = stride
            .checked_mul(rows)
            .ok_or(WorldError::TooLarge { width, height })?;

        let mut occupants = Vec::new();
        occupants
            .try_reserve_exact(area)
            .map_err(|_alloc| WorldError::TooLarge { width, height })?;
        occupants.resize(area, None);

        Ok(Self {
            width,
            height,
            stride,
            occupants,
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of positions (`width * height`).
    pub const fn area(&self) -> usize {
        self.occupants.len()
    }

    /// Whether `position` lies inside the grid.
    pub const fn is_valid(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Row-major offset of `position`, or `None` if it is outside the grid.
    ///
    /// Offsets follow [`Grid::positions`] order, so callers may use them to
    /// index their own per-position side tables.
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.is_valid(position) {
            return None;
        }
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        y.checked_mul(self.stride)?.checked_add(x)
    }

    /// Like [`Grid::index`], but reports an out-of-bounds position as an error.
    fn checked_index(&self, position: Position) -> Result<usize, WorldError> {
        self.index(position).ok_or(WorldError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })
    }

    /// The slot occupying `position`, if any. Out-of-grid positions are empty.
    pub fn occupant(&self, position: Position) -> Option<SlotId> {
        let index = self.index(position)?;
        self.occupants.get(index).copied().flatten()
    }

    /// Whether a live cell sits at `position`. Out-of-grid positions are
    /// reported as unoccupied.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupant(position).is_some()
    }

    /// Whether `position` is a valid, unoccupied grid position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` is outside the grid.
    pub fn is_empty_at(&self, position: Position) -> Result<bool, WorldError> {
        let index = self.checked_index(position)?;
        Ok(self.occupants.get(index).is_some_and(Option::is_none))
    }

    /// Record `slot` as the occupant of `position`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an invalid position, or
    /// [`WorldError::Occupied`] if another cell is already there.
    pub fn occupy(&mut self, position: Position, slot: SlotId) -> Result<(), WorldError> {
        let index = self.checked_index(position)?;
        let entry = self
            .occupants
            .get_mut(index)
            .ok_or(WorldError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })?;
        if entry.is_some() {
            return Err(WorldError::Occupied(position));
        }
        *entry = Some(slot);
        Ok(())
    }

    /// Clear `position`, returning the slot that was there.
    ///
    /// Invalid or already-empty positions return `None`.
    pub fn vacate(&mut self, position: Position) -> Option<SlotId> {
        let index = self.index(position)?;
        self.occupants.get_mut(index)?.take()
    }

    /// Clear every position.
    pub fn clear(&mut self) {
        self.occupants.fill(None);
    }

    /// Number of occupied positions.
    pub fn population(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    /// All grid positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Copy of the occupancy matrix as `rows[y][x]`.
    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.occupants
            .chunks(self.stride)
            .map(|row| row.iter().map(Option::is_some).collect())
            .collect()
    }
}
