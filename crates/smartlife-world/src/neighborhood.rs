//! Neighbourhood queries over the grid.
//!
//! There is no wraparound anywhere: a position past the border is simply
//! absent. It never counts as a neighbour, never shows up as an empty
//! neighbour, and reads as unoccupied (0.0) in a vision vector.

use smartlife_types::Position;

use crate::grid::Grid;

/// Offsets of the 8 Moore neighbours, row-major.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Every offset position of the square of radius `radius` around `center`,
/// row-major, center included.
///
/// Each item is `None` when the offset overflows `i32`. A negative radius
/// yields nothing.
pub fn window(center: Position, radius: i32) -> impl Iterator<Item = Option<Position>> {
    let radius = radius.max(-1);
    (-radius..=radius).flat_map(move |dy| (-radius..=radius).map(move |dx| center.offset(dx, dy)))
}

/// The coordinates within `distance` of `center` that lie in `0..limit`.
fn clip(center: i32, distance: i32, limit: i32) -> std::ops::RangeInclusive<i32> {
    let low = center.saturating_sub(distance).max(0);
    let high = center.saturating_add(distance).min(limit.saturating_sub(1));
    low..=high
}

impl Grid {
    /// Number of live cells among the 8 Moore neighbours of `position`.
    pub fn live_neighbors(&self, position: Position) -> u8 {
        let mut count: u8 = 0;
        for (dx, dy) in MOORE_OFFSETS {
            if let Some(neighbor) = position.offset(dx, dy)
                && self.is_occupied(neighbor)
            {
                count = count.saturating_add(1);
            }
        }
        count
    }

    /// Valid, empty positions within Chebyshev distance `distance` of
    /// `center`, excluding `center` itself, row-major.
    ///
    /// The scan is clipped to the grid first, so its cost is bounded by
    /// the grid area however large `distance` is. A negative distance
    /// yields an empty list.
    pub fn empty_neighbors(&self, center: Position, distance: i32) -> Vec<Position> {
        if distance < 0 {
            return Vec::new();
        }
        let x_range = clip(center.x, distance, self.width());
        let y_range = clip(center.y, distance, self.height());
        y_range
            .flat_map(|y| x_range.clone().map(move |x| Position::new(x, y)))
            .filter(|p| *p != center && !self.is_occupied(*p))
            .collect()
    }

    /// Flattened `(2r+1)^2` occupancy window around `center`, row-major.
    ///
    /// Occupied positions read 1.0; empty and out-of-grid positions read 0.0.
    pub fn vision_vector(&self, center: Position, radius: i32) -> Vec<f32> {
        window(center, radius)
            .map(|p| match p {
                Some(p) if self.is_occupied(p) => 1.0,
                _ => 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use smartlife_types::SlotId;

    use super::*;

    fn grid_with(width: i32, height: i32, live: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for (i, &(x, y)) in (0_u32..).zip(live) {
            grid.occupy(Position::new(x, y), SlotId(i)).unwrap();
        }
        grid
    }

    #[test]
    fn counts_all_eight_neighbours() {
        let live: Vec<(i32, i32)> = MOORE_OFFSETS.iter().map(|(dx, dy)| (2 + dx, 2 + dy)).collect();
        let grid = grid_with(5, 5, &live);
        assert_eq!(grid.live_neighbors(Position::new(2, 2)), 8);
    }

    #[test]
    fn center_is_not_its_own_neighbour() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(grid.live_neighbors(Position::new(1, 1)), 0);
    }

    #[test]
    fn corner_ignores_off_grid_positions() {
        let grid = grid_with(3, 3, &[(1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.live_neighbors(Position::new(0, 0)), 3);
    }

    #[test]
    fn window_size_and_order() {
        let cells: Vec<Position> = window(Position::new(0, 0), 1).flatten().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Position::new(-1, -1));
        assert_eq!(cells[1], Position::new(0, -1));
        assert_eq!(cells[4], Position::new(0, 0));
        assert_eq!(cells[8], Position::new(1, 1));
    }

    #[test]
    fn negative_window_is_empty() {
        assert_eq!(window(Position::new(0, 0), -1).count(), 0);
    }

    #[test]
    fn empty_neighbours_exclude_center_and_occupied() {
        let grid = grid_with(3, 3, &[(1, 1), (2, 2)]);
        let empty = grid.empty_neighbors(Position::new(1, 1), 1);
        assert_eq!(empty.len(), 7);
        assert!(!empty.contains(&Position::new(1, 1)));
        assert!(!empty.contains(&Position::new(2, 2)));
    }

    #[test]
    fn empty_neighbours_clip_at_border() {
        let grid = grid_with(3, 3, &[]);
        let empty = grid.empty_neighbors(Position::new(0, 0), 1);
        assert_eq!(
            empty,
            vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn huge_distance_is_clipped_to_the_grid() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        let empty = grid.empty_neighbors(Position::new(2, 2), i32::MAX);
        assert_eq!(empty.len(), 24);
        assert_eq!(empty.first(), Some(&Position::new(0, 0)));
        assert_eq!(empty.last(), Some(&Position::new(4, 4)));
    }

    #[test]
    fn off_grid_center_sees_only_in_range_positions() {
        let grid = grid_with(3, 3, &[]);
        assert_eq!(
            grid.empty_neighbors(Position::new(-1, -1), 1),
            vec![Position::new(0, 0)]
        );
        assert!(grid.empty_neighbors(Position::new(i32::MIN, 0), 2).is_empty());
    }

    #[test]
    fn negative_distance_gives_no_neighbours() {
        let grid = grid_with(3, 3, &[]);
        assert!(grid.empty_neighbors(Position::new(1, 1), -2).is_empty());
    }

    #[test]
    fn vision_vector_reads_off_grid_as_empty() {
        let grid = grid_with(2, 2, &[(0, 0), (1, 1)]);
        let v = grid.vision_vector(Position::new(0, 0), 1);
        assert_eq!(v.len(), 9);
        assert_eq!(v, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
