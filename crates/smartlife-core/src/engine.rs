//! The simulation engine: construction, placement, seeding, and position
//! queries.
//!
//! A [`SimulationEngine`] owns a fixed-size [`Grid`], the [`CellArena`] of
//! live cells, the active [`RuleConfig`], its [`ConfigSource`], and a seeded
//! random number generator. The grid and the arena are two views of the
//! same population and are only ever changed together, through
//! [`SimulationEngine::spawn`] and [`SimulationEngine::remove_slot`].
//!
//! Tick logic lives in [`crate::tick`] and [`crate::movement`]; read-only
//! observation lives in [`crate::observation`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smartlife_cells::{Cell, CellArena};
use smartlife_types::{CellId, Position, SlotId};
use smartlife_world::Grid;
use tracing::{debug, info, warn};

use crate::config::ConfigSource;
use crate::error::EngineError;
use crate::rules::RuleConfig;

/// Random placement attempts allowed per requested cell in
/// [`SimulationEngine::initialize_random`].
pub const SEED_ATTEMPTS_PER_CELL: usize = 10;

/// A bounded grid of cells evolving under configurable rules.
#[derive(Debug)]
pub struct SimulationEngine {
    /// Occupancy, position -> slot.
    pub(crate) grid: Grid,
    /// Live cells, slot -> cell.
    pub(crate) cells: CellArena,
    /// Rules in effect.
    pub(crate) rules: RuleConfig,
    /// Where rules come from.
    source: Box<dyn ConfigSource>,
    /// Randomness for seeding and the maintenance pass.
    pub(crate) rng: SmallRng,
    /// Ticks run since the last seeding.
    pub(crate) tick: u64,
}

impl SimulationEngine {
    /// Create an empty engine seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] for non-positive dimensions
    /// or a grid too large to allocate, or [`EngineError::InvalidRules`] if
    /// `source` yields unusable rules.
    pub fn new(
        width: i32,
        height: i32,
        source: Box<dyn ConfigSource>,
    ) -> Result<Self, EngineError> {
        Self::with_rng(width, height, source, SmallRng::from_os_rng())
    }

    /// Create an empty engine whose randomness is fully determined by
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`SimulationEngine::new`].
    pub fn with_seed(
        width: i32,
        height: i32,
        source: Box<dyn ConfigSource>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(width, height, source, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        width: i32,
        height: i32,
        source: Box<dyn ConfigSource>,
        rng: SmallRng,
    ) -> Result<Self, EngineError> {
        let grid = Grid::new(width, height)?;
        let rules = RuleConfig::from_source(source.as_ref())
            .map_err(|source| EngineError::InvalidRules { source })?;

        info!(width, height, vision = rules.vision_radius, "engine created");

        Ok(Self {
            grid,
            cells: CellArena::new(),
            rules,
            source,
            rng,
            tick: 0,
        })
    }

    /// Grid width.
    pub const fn width(&self) -> i32 {
        self.grid.width()
    }

    /// Grid height.
    pub const fn height(&self) -> i32 {
        self.grid.height()
    }

    /// The rules currently in effect.
    pub const fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Ticks run since the engine was created or last seeded.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The cell at `position`, if one is there.
    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        self.grid
            .occupant(position)
            .and_then(|slot| self.cells.get(slot))
    }

    /// Whether `position` lies inside the grid.
    pub const fn is_valid_position(&self, position: Position) -> bool {
        self.grid.is_valid(position)
    }

    /// Whether `position` is a valid position with no live cell.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if `position` is outside the
    /// grid.
    pub fn is_position_empty(&self, position: Position) -> Result<bool, EngineError> {
        Ok(self.grid.is_empty_at(position)?)
    }

    /// Valid, empty positions within Chebyshev distance `distance` of
    /// `center`, excluding `center`, row-major. A negative distance yields
    /// nothing.
    pub fn get_empty_neighbors(&self, center: Position, distance: i32) -> Vec<Position> {
        self.grid.empty_neighbors(center, distance)
    }

    /// Place a new cell at `position`.
    ///
    /// A no-op returning `None` if the position is invalid or already
    /// occupied.
    ///
    /// The new cell reuses the most recently freed arena slot when there is
    /// one, so it can come before older cells in live-cell order (and in the
    /// move list expected by [`SimulationEngine::update_with_moves`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cell`] if the arena cannot grow.
    pub fn place_cell(&mut self, position: Position) -> Result<Option<CellId>, EngineError> {
        if !self.grid.is_valid(position) || self.grid.is_occupied(position) {
            return Ok(None);
        }
        self.spawn(position).map(Some)
    }

    /// Remove the cell at `position`, returning it.
    ///
    /// A no-op returning `None` if the position is invalid or empty.
    pub fn remove_cell(&mut self, position: Position) -> Option<Cell> {
        let slot = self.grid.occupant(position)?;
        self.remove_slot(slot, position)
    }

    /// Clear all cells and place up to `count` cells at uniformly random
    /// empty positions.
    ///
    /// Placement gives up after `count * SEED_ATTEMPTS_PER_CELL` attempts or
    /// once the grid is full, so fewer than `count` cells may be placed.
    /// Cell ids restart from 0. Returns the number placed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cell`] if the arena cannot grow.
    pub fn initialize_random(&mut self, count: usize) -> Result<usize, EngineError> {
        self.grid.clear();
        self.cells.clear();
        self.tick = 0;

        let target = count.min(self.grid.area());
        let budget = count.saturating_mul(SEED_ATTEMPTS_PER_CELL);
        let (width, height) = (self.grid.width(), self.grid.height());

        let mut attempts: usize = 0;
        while self.cells.len() < target && attempts < budget {
            attempts = attempts.saturating_add(1);
            let position = Position::new(
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            if !self.grid.is_occupied(position) {
                self.spawn(position)?;
            }
        }

        let placed = self.cells.len();
        if placed < count {
            warn!(requested = count, placed, attempts, "random seeding fell short");
        }
        info!(requested = count, placed, "grid seeded");
        Ok(placed)
    }

    /// Re-read the configuration source and replace the rules.
    ///
    /// On any failure the previous rules remain in effect.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigUnavailable`] if the source cannot be
    /// re-read, or [`EngineError::InvalidRules`] if the new values fail
    /// validation.
    pub fn reload_config(&mut self) -> Result<(), EngineError> {
        if let Err(source) = self.source.reload() {
            warn!(error = %source, "config reload failed, keeping previous rules");
            return Err(EngineError::ConfigUnavailable { source });
        }
        let rules = match RuleConfig::from_source(self.source.as_ref()) {
            Ok(rules) => rules,
            Err(source) => {
                warn!(error = %source, "reloaded rules invalid, keeping previous rules");
                return Err(EngineError::InvalidRules { source });
            }
        };
        if rules != self.rules {
            info!(
                survival_min = rules.survival_min,
                survival_max = rules.survival_max,
                birth_min = rules.birth_min,
                birth_max = rules.birth_max,
                vision = rules.vision_radius,
                "rules reloaded"
            );
        }
        self.rules = rules;
        Ok(())
    }

    /// Insert a cell into the arena and the grid. The position must be
    /// valid and empty.
    pub(crate) fn spawn(&mut self, position: Position) -> Result<CellId, EngineError> {
        let (slot, id) = self.cells.insert(position)?;
        if let Err(e) = self.grid.occupy(position, slot) {
            self.cells.remove(slot);
            return Err(e.into());
        }
        Ok(id)
    }

    /// Remove the cell in `slot` from the arena and vacate `position`.
    pub(crate) fn remove_slot(&mut self, slot: SlotId, position: Position) -> Option<Cell> {
        if self.grid.occupant(position) == Some(slot) {
            self.grid.vacate(position);
        } else {
            debug!(%slot, %position, "removing cell not indexed at its position");
        }
        self.cells.remove(slot)
    }
}
