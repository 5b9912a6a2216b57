//! Plain-data records handed back to callers.
//!
//! These carry no behaviour. They exist so that a binding layer or a
//! logging sink can read engine state without borrowing the engine.

use serde::{Deserialize, Serialize};

use crate::ids::CellId;

/// A read-only copy of one live cell, as returned by the live-cell listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// The cell's public identity.
    pub id: CellId,
    /// Column of the cell.
    pub x: i32,
    /// Row of the cell.
    pub y: i32,
    /// Ticks survived since placement.
    pub age: u32,
    /// Current energy, always positive for a live cell.
    pub energy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_with_flat_fields() {
        let snap = CellSnapshot {
            id: CellId(4),
            x: 1,
            y: 2,
            age: 3,
            energy: 0.5,
        };
        let value = serde_json::to_value(&snap).ok();
        let expected = serde_json::json!({"id": 4, "x": 1, "y": 2, "age": 3, "energy": 0.5});
        assert_eq!(value, Some(expected));
    }
}
