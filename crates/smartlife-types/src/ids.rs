//! Identifier newtypes.
//!
//! Cells carry two identifiers with different lifetimes:
//!
//! - [`CellId`] is the public identity of a cell. It is allocated from a
//!   monotonic counter and never handed out twice within one seeding epoch.
//! - [`SlotId`] is the cell's storage slot in the arena. Slots are recycled
//!   through a free list, so a `SlotId` is only meaningful while the cell
//!   that owns it is alive.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an unsigned integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Public identity of a cell, strictly increasing in allocation order.
    CellId(u64)
}

define_id! {
    /// Index of a cell's storage slot in the cell arena.
    SlotId(u32)
}

impl CellId {
    /// Sentinel id carried by a tombstoned cell.
    pub const TOMBSTONE: Self = Self(u64::MAX);

    /// Whether this id is the tombstone sentinel.
    pub const fn is_tombstone(self) -> bool {
        self.0 == u64::MAX
    }
}

impl SlotId {
    /// Return the slot as a `usize` index into arena storage.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_sentinel() {
        assert!(CellId::TOMBSTONE.is_tombstone());
        assert!(!CellId(0).is_tombstone());
    }

    #[test]
    fn ids_order_by_value() {
        assert!(CellId(3) < CellId(4));
        assert_eq!(SlotId(7).index(), 7);
        assert_eq!(CellId::from(9).into_inner(), 9);
    }

    #[test]
    fn serializes_transparently_as_tuple_struct() {
        let json = serde_json::to_string(&CellId(12));
        assert_eq!(json.ok().as_deref(), Some("12"));
    }
}
