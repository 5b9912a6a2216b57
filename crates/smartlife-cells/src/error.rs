//! Error types for the smartlife-cells crate.
//!
//! Cell operations never panic. Counter overflow and arena exhaustion are
//! reported through [`CellError`] so the engine can surface them.

/// Errors that can occur during cell state operations.
#[derive(Debug, thiserror::Error)]
pub enum CellError {
    /// An arithmetic overflow occurred while updating a counter.
    #[error("arithmetic overflow in cell computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// The arena cannot address any more slots.
    #[error("cell arena exhausted: {slots} slots in use")]
    ArenaFull {
        /// Number of slots already allocated.
        slots: usize,
    },
}
