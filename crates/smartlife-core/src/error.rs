//! Error types for the simulation engine.
//!
//! Query operations (`get_*`, `is_valid_position`) never fail. Placement and
//! removal are lenient no-ops on bad positions. The variants here cover the
//! operations that do reject input: construction, emptiness checks, the
//! movement tick, and configuration reloads.

use smartlife_cells::CellError;
use smartlife_types::Position;
use smartlife_world::WorldError;

use crate::config::ConfigError;

/// Errors that can occur in engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A constructor or operation received an argument it cannot accept.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// A position-taking operation that requires a valid position got one
    /// outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// The move list does not have one entry per live cell.
    #[error("move list has {actual} entries but there are {expected} live cells")]
    LengthMismatch {
        /// Number of live cells.
        expected: usize,
        /// Length of the supplied move list.
        actual: usize,
    },

    /// The configuration collaborator could not be read or re-read.
    #[error("configuration unavailable: {source}")]
    ConfigUnavailable {
        /// The underlying configuration error.
        source: ConfigError,
    },

    /// The configuration was readable but its rule values are unusable.
    #[error("invalid rule configuration: {source}")]
    InvalidRules {
        /// The validation failure.
        source: ConfigError,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        source: WorldError,
    },

    /// A cell operation failed.
    #[error("cell error: {source}")]
    Cell {
        /// The underlying cell error.
        #[from]
        source: CellError,
    },
}

impl From<WorldError> for EngineError {
    fn from(source: WorldError) -> Self {
        match source {
            WorldError::OutOfBounds {
                position,
                width,
                height,
            } => Self::OutOfBounds {
                position,
                width,
                height,
            },
            WorldError::InvalidDimensions { .. } | WorldError::TooLarge { .. } => {
                Self::InvalidArgument {
                    reason: source.to_string(),
                }
            }
            WorldError::Occupied(_) => Self::World { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_errors_map_onto_engine_errors() {
        let position = Position::new(7, 0);
        let err = EngineError::from(WorldError::OutOfBounds {
            position,
            width: 3,
            height: 3,
        });
        assert!(matches!(err, EngineError::OutOfBounds { position: p, .. } if p == position));

        let err = EngineError::from(WorldError::TooLarge {
            width: i32::MAX,
            height: 2,
        });
        assert!(matches!(err, EngineError::InvalidArgument { .. }));

        let err = EngineError::from(WorldError::Occupied(position));
        assert!(matches!(err, EngineError::World { .. }));
    }
}
