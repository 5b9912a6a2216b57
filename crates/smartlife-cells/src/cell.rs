//! The mutable state of a single cell.
//!
//! A [`Cell`] has no knowledge of the grid. It only enforces its own
//! invariant: a cell whose energy is driven to zero or below is dead.
//! Every energy mutation goes through [`Cell::set_energy`] so that rule
//! lives in exactly one place.

use smartlife_types::{CellId, CellSnapshot, Position};

use crate::error::CellError;

/// Energy a freshly placed cell starts with.
pub const STARTING_ENERGY: f64 = 1.0;

/// A single agent on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Public identity, allocated by the arena.
    id: CellId,
    /// Current grid coordinate.
    position: Position,
    /// Whether the cell is alive.
    alive: bool,
    /// Ticks survived since placement.
    age: u32,
    /// Current energy. Zero whenever `alive` is false.
    energy: f64,
}

impl Cell {
    /// Create a live cell with age 0 and [`STARTING_ENERGY`].
    pub const fn new(id: CellId, position: Position) -> Self {
        Self {
            id,
            position,
            alive: true,
            age: 0,
            energy: STARTING_ENERGY,
        }
    }

    /// The cell's public identity.
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// The cell's grid coordinate.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the cell is alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Ticks survived since placement.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Current energy.
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Move the cell. The caller keeps the grid in sync.
    pub const fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Set the cell's energy.
    ///
    /// A value `<= 0` (or NaN) clamps energy to 0 and kills the cell.
    pub fn set_energy(&mut self, energy: f64) {
        if energy > 0.0 {
            self.energy = energy;
        } else {
            self.energy = 0.0;
            self.alive = false;
        }
    }

    /// Set the alive flag.
    ///
    /// Killing a live cell tombstones it: energy drops to 0, the position
    /// becomes [`Position::INVALID`] and the id becomes
    /// [`CellId::TOMBSTONE`]. The engine removes dead cells instead, so this
    /// exists for callers that keep dead records around.
    pub fn set_alive(&mut self, alive: bool) {
        if self.alive && !alive {
            self.energy = 0.0;
            self.position = Position::INVALID;
            self.id = CellId::TOMBSTONE;
        }
        self.alive = alive;
    }

    /// Add one tick to the cell's age.
    pub fn increase_age(&mut self) -> Result<(), CellError> {
        self.age = self
            .age
            .checked_add(1)
            .ok_or_else(|| CellError::ArithmeticOverflow {
                context: String::from("age increment overflow"),
            })?;
        Ok(())
    }

    /// Subtract `amount` from energy, with the death clamp applied.
    pub fn consume_energy(&mut self, amount: f64) {
        self.set_energy(self.energy - amount);
    }

    /// Add `amount` to energy, with the death clamp applied.
    pub fn restore_energy(&mut self, amount: f64) {
        self.set_energy(self.energy + amount);
    }

    /// Plain-data copy of this cell.
    pub const fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
            age: self.age,
            energy: self.energy,
        }
    }
}
