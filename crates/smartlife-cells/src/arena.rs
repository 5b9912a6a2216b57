//! Slot arena owning every live cell.
//!
//! Cells live in a `Vec<Option<Cell>>` indexed by [`SlotId`]. Removing a
//! cell leaves a hole that is pushed onto a free list and reused by the next
//! insertion, so insert, remove and lookup are all O(1).
//!
//! Iteration runs in ascending slot order. That order is the "live-cell
//! order" the engine exposes to callers: observation vectors, the live-cell
//! listing and the per-cell move list all line up with it.
//!
//! Cell ids are independent of slots. They come from a monotonic counter
//! that only [`CellArena::clear`] resets.

use smartlife_types::{CellId, Position, SlotId};

use crate::cell::Cell;
use crate::error::CellError;

/// Storage for all live cells.
#[derive(Debug, Clone, Default)]
pub struct CellArena {
    /// Cell storage; `None` marks a free slot.
    slots: Vec<Option<Cell>>,
    /// Free slots available for reuse (LIFO).
    free: Vec<SlotId>,
    /// Next id to hand out.
    next_id: u64,
    /// Number of occupied slots.
    live: usize,
}

impl CellArena {
    /// Create an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            next_id: 0,
            live: 0,
        }
    }

    /// Create an empty arena with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Allocate a new live cell at `position`.
    ///
    /// Returns the slot the cell was stored in and its freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::ArithmeticOverflow`] if the id counter is
    /// exhausted, or [`CellError::ArenaFull`] if no slot index remains.
    pub fn insert(&mut self, position: Position) -> Result<(SlotId, CellId), CellError> {
        let id = CellId(self.next_id);
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CellError::ArithmeticOverflow {
                context: String::from("cell id counter overflow"),
            })?;

        let slot = if let Some(slot) = self.free.pop() {
            if let Some(entry) = self.slots.get_mut(slot.index()) {
                *entry = Some(Cell::new(id, position));
            }
            slot
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_overflow| CellError::ArenaFull {
                slots: self.slots.len(),
            })?;
            self.slots.push(Some(Cell::new(id, position)));
            SlotId(index)
        };

        self.next_id = next_id;
        self.live = self.live.saturating_add(1);
        Ok((slot, id))
    }

    /// Remove and return the cell in `slot`, freeing the slot.
    ///
    /// Returns `None` if the slot is already free or out of range.
    pub fn remove(&mut self, slot: SlotId) -> Option<Cell> {
        let cell = self.slots.get_mut(slot.index())?.take()?;
        self.free.push(slot);
        self.live = self.live.saturating_sub(1);
        Some(cell)
    }

    /// Borrow the cell in `slot`.
    pub fn get(&self, slot: SlotId) -> Option<&Cell> {
        self.slots.get(slot.index())?.as_ref()
    }

    /// Mutably borrow the cell in `slot`.
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Cell> {
        self.slots.get_mut(slot.index())?.as_mut()
    }

    /// Iterate over live cells in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Cell)> {
        (0_u32..)
            .zip(self.slots.iter())
            .filter_map(|(index, entry)| entry.as_ref().map(|cell| (SlotId(index), cell)))
    }

    /// Slots of all live cells, in iteration order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.iter().map(|(slot, _)| slot).collect()
    }

    /// Number of live cells.
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Whether the arena holds no live cells.
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The id the next inserted cell will receive.
    pub const fn next_id(&self) -> CellId {
        CellId(self.next_id)
    }

    /// Drop every cell and restart id allocation at 0.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.next_id = 0;
        self.live = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn insert_allocates_increasing_ids() {
        let mut arena = CellArena::new();
        let (_, a) = arena.insert(Position::new(0, 0)).unwrap();
        let (_, b) = arena.insert(Position::new(1, 0)).unwrap();
        assert_eq!(a, CellId(0));
        assert_eq!(b, CellId(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut arena = CellArena::new();
        let (slot, _) = arena.insert(Position::new(0, 0)).unwrap();
        let (_, second) = arena.insert(Position::new(1, 0)).unwrap();
        assert!(arena.remove(slot).is_some());
        let (reused_slot, third) = arena.insert(Position::new(2, 0)).unwrap();
        assert_eq!(reused_slot, slot);
        assert!(third > second);
    }

    #[test]
    fn remove_twice_is_noop() {
        let mut arena = CellArena::new();
        let (slot, _) = arena.insert(Position::new(0, 0)).unwrap();
        assert!(arena.remove(slot).is_some());
        assert!(arena.remove(slot).is_none());
        assert!(arena.is_empty());
    }

    #[test]
    fn iteration_follows_slot_order() {
        let mut arena = CellArena::new();
        let (first, _) = arena.insert(Position::new(0, 0)).unwrap();
        let (_, _) = arena.insert(Position::new(1, 0)).unwrap();
        let (_, _) = arena.insert(Position::new(2, 0)).unwrap();
        arena.remove(first);
        let (refill, _) = arena.insert(Position::new(3, 0)).unwrap();
        assert_eq!(refill, first);

        let xs: Vec<i32> = arena.iter().map(|(_, c)| c.position().x).collect();
        assert_eq!(xs, vec![3, 1, 2]);
        assert_eq!(arena.slot_ids(), vec![SlotId(0), SlotId(1), SlotId(2)]);
    }

    #[test]
    fn clear_restarts_ids() {
        let mut arena = CellArena::with_capacity(4);
        arena.insert(Position::new(0, 0)).unwrap();
        arena.insert(Position::new(1, 0)).unwrap();
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.next_id(), CellId(0));
        let (slot, id) = arena.insert(Position::new(0, 0)).unwrap();
        assert_eq!((slot, id), (SlotId(0), CellId(0)));
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut arena = CellArena::new();
        let (slot, _) = arena.insert(Position::new(0, 0)).unwrap();
        arena.get_mut(slot).unwrap().set_position(Position::new(5, 5));
        assert_eq!(arena.get(slot).unwrap().position(), Position::new(5, 5));
        assert!(arena.get(SlotId(9)).is_none());
    }
}
