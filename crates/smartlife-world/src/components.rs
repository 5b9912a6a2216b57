//! Connected components and the bounding-box density metric.
//!
//! Live positions are grouped into 8-connected components with a
//! breadth-first flood fill. For each component, density is
//! `cells / bounding_box_area`; [`component_density`] averages that over
//! all components. A solid cluster scores 1.0 while a diagonal chain
//! scores close to 0, which the raw occupancy ratio cannot tell apart.

use std::collections::VecDeque;

use smartlife_types::Position;

use crate::grid::Grid;
use crate::neighborhood::MOORE_OFFSETS;

/// One 8-connected component of live positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// Number of live positions in the component.
    pub cells: usize,
    /// Smallest column touched.
    pub min_x: i32,
    /// Largest column touched.
    pub max_x: i32,
    /// Smallest row touched.
    pub min_y: i32,
    /// Largest row touched.
    pub max_y: i32,
}

impl Component {
    /// An empty component whose bounding box starts at `seed`.
    const fn seeded(seed: Position) -> Self {
        Self {
            cells: 0,
            min_x: seed.x,
            max_x: seed.x,
            min_y: seed.y,
            max_y: seed.y,
        }
    }

    /// Grow the component by one position.
    fn absorb(&mut self, position: Position) {
        self.cells = self.cells.saturating_add(1);
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
    }

    /// Area of the axis-aligned bounding box, in positions.
    pub fn bounding_box_area(&self) -> u64 {
        let w = u64::from(self.max_x.abs_diff(self.min_x)).saturating_add(1);
        let h = u64::from(self.max_y.abs_diff(self.min_y)).saturating_add(1);
        w.saturating_mul(h)
    }

    /// `cells / bounding_box_area`, in `(0, 1]`.
    pub fn density(&self) -> f64 {
        let area = usize::try_from(self.bounding_box_area()).unwrap_or(usize::MAX);
        ratio(self.cells, area)
    }
}

/// `numerator / denominator` as a float, 0.0 when the denominator is 0.
///
/// Counts are converted through `u32`, saturating, which is exact for every
/// grid this simulation can allocate in practice.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let n = u32::try_from(numerator).map_or(f64::from(u32::MAX), f64::from);
    let d = u32::try_from(denominator).map_or(f64::from(u32::MAX), f64::from);
    n / d
}

/// Partition the live positions of `grid` into 8-connected components.
///
/// Components are returned in the row-major order of their first position.
pub fn connected_components(grid: &Grid) -> Vec<Component> {
    let mut visited = vec![false; grid.area()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for (seed_index, seed) in grid.positions().enumerate() {
        if !grid.is_occupied(seed) || visited.get(seed_index).copied().unwrap_or(true) {
            continue;
        }
        if let Some(flag) = visited.get_mut(seed_index) {
            *flag = true;
        }

        let mut component = Component::seeded(seed);
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            component.absorb(current);
            for (dx, dy) in MOORE_OFFSETS {
                let Some(next) = current.offset(dx, dy) else {
                    continue;
                };
                if !grid.is_occupied(next) {
                    continue;
                }
                let Some(flag) = grid.index(next).and_then(|i| visited.get_mut(i)) else {
                    continue;
                };
                if !*flag {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Mean per-component density, or 0.0 when the grid is empty.
pub fn component_density(grid: &Grid) -> f64 {
    let components = connected_components(grid);
    if components.is_empty() {
        return 0.0;
    }
    let total: f64 = components.iter().map(Component::density).sum();
    let count = u32::try_from(components.len()).map_or(f64::from(u32::MAX), f64::from);
    total / count
}
