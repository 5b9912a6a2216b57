//! End-to-end scenarios for the simulation engine.
//!
//! Each test builds an engine from an in-memory configuration, sets up a
//! known pattern, runs one or more ticks through the public API, and checks
//! the resulting grid, live-cell listing, and metrics.

// Panicking on failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::cell::RefCell;
use std::rc::Rc;

use smartlife_cells::DeathCause;
use smartlife_core::config::ConfigError;
use smartlife_core::rules::keys;
use smartlife_core::{ConfigSource, EngineError, KeyValueStore, RuleConfig, SimulationEngine};
use smartlife_types::{Direction, Position};

/// Classic thresholds with every random vital mechanic switched off.
fn still_rules() -> RuleConfig {
    RuleConfig {
        restore_probability: 0.0,
        death_rate: 0.0,
        ..RuleConfig::default()
    }
}

/// Rules under which nobody is born and nobody dies of neighbour counts.
fn frozen_rules() -> RuleConfig {
    RuleConfig {
        survival_min: 0,
        survival_max: 8,
        birth_min: 9,
        birth_max: 9,
        ..still_rules()
    }
}

fn engine(rules: &RuleConfig, width: i32, height: i32, seed: u64) -> SimulationEngine {
    SimulationEngine::with_seed(width, height, Box::new(KeyValueStore::from(rules)), seed).unwrap()
}

fn place_all(engine: &mut SimulationEngine, live: &[(i32, i32)]) {
    for &(x, y) in live {
        engine.place_cell(Position::new(x, y)).unwrap();
    }
}

fn live_positions(engine: &SimulationEngine) -> Vec<(i32, i32)> {
    let mut out: Vec<(i32, i32)> = engine.cells().iter().map(|c| (c.x, c.y)).collect();
    out.sort_unstable();
    out
}

/// Population, grid and live-cell listing agree, and every cell is in
/// bounds with non-negative energy.
fn assert_consistent(engine: &SimulationEngine) {
    let grid_count = engine.grid_state().iter().flatten().filter(|b| **b).count();
    let cells = engine.cells();
    assert_eq!(engine.population(), grid_count);
    assert_eq!(cells.len(), grid_count);
    for cell in &cells {
        assert!(engine.is_valid_position(Position::new(cell.x, cell.y)));
        assert!(cell.energy >= 0.0);
        assert!(!engine.is_position_empty(Position::new(cell.x, cell.y)).unwrap());
    }
}

/// A configuration source whose values the test can change after the
/// engine has taken ownership of it.
#[derive(Debug, Clone, Default)]
struct SharedStore(Rc<RefCell<KeyValueStore>>);

impl ConfigSource for SharedStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.0.borrow().get_int(key, default)
    }

    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.0.borrow().get_double(key, default)
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[test]
fn block_is_a_still_life() {
    let mut e = engine(&still_rules(), 6, 6, 1);
    let block = [(2, 2), (3, 2), (2, 3), (3, 3)];
    place_all(&mut e, &block);

    for _ in 0..3 {
        let summary = e.update().unwrap();
        assert_eq!(summary.births, 0);
        assert_eq!(summary.total_deaths(), 0);
    }
    let mut expected = block.to_vec();
    expected.sort_unstable();
    assert_eq!(live_positions(&e), expected);
    assert_consistent(&e);
}

#[test]
fn lone_cell_dies_of_isolation() {
    let mut e = engine(&still_rules(), 5, 5, 1);
    place_all(&mut e, &[(2, 2)]);
    let summary = e.update().unwrap();
    assert_eq!(summary.deaths.get(&DeathCause::Isolation), Some(&1));
    assert_eq!(e.population(), 0);
    assert!(e.cells().is_empty());
}

#[test]
fn three_neighbours_give_birth() {
    let mut e = engine(&still_rules(), 5, 5, 1);
    // An L-tromino: (1,1) is empty with exactly three live neighbours.
    place_all(&mut e, &[(0, 0), (1, 0), (0, 1)]);
    e.update().unwrap();
    assert!(!e.is_position_empty(Position::new(1, 1)).unwrap());
    let newborn = e.cells().into_iter().find(|c| (c.x, c.y) == (1, 1)).unwrap();
    assert_eq!(newborn.energy, 1.0);
    assert_eq!(newborn.age, 1);
    assert_consistent(&e);
}

#[test]
fn contested_target_goes_to_the_stronger_cell() {
    let shared = SharedStore::default();
    let boosted = RuleConfig {
        restore_probability: 1.0,
        restore_amount: 0.5,
        ..frozen_rules()
    };
    *shared.0.borrow_mut() = KeyValueStore::from(&boosted);

    let mut e = SimulationEngine::with_seed(7, 5, Box::new(shared.clone()), 4).unwrap();
    place_all(&mut e, &[(2, 2)]);
    e.update().unwrap();
    assert_eq!(e.cells()[0].energy, 1.5);

    shared.0.borrow_mut().set_double(keys::RESTORE_PROB, 0.0);
    e.reload_config().unwrap();
    assert_eq!(e.rules().restore_probability, 0.0);

    place_all(&mut e, &[(4, 2)]);
    let summary = e
        .update_with_moves(&[Direction::Right.code(), Direction::Left.code()])
        .unwrap();

    assert_eq!(summary.deaths.get(&DeathCause::ConflictLost), Some(&1));
    assert_eq!(live_positions(&e), vec![(3, 2)]);
    let winner = &e.cells()[0];
    assert_eq!(winner.id.into_inner(), 0);
    assert!((winner.energy - 1.4).abs() < 1e-12);
    assert!(e.is_position_empty(Position::new(4, 2)).unwrap());
    assert_consistent(&e);
}

#[test]
fn reload_with_invalid_values_keeps_previous_rules() {
    let shared = SharedStore::default();
    *shared.0.borrow_mut() = KeyValueStore::from(&still_rules());
    let mut e = SimulationEngine::with_seed(5, 5, Box::new(shared.clone()), 2).unwrap();
    let before = *e.rules();

    shared.0.borrow_mut().set_int(keys::VISION, -1);
    assert!(matches!(
        e.reload_config(),
        Err(EngineError::InvalidRules { .. })
    ));
    assert_eq!(*e.rules(), before);

    shared.0.borrow_mut().set_int(keys::VISION, before.vision_radius);
    shared.0.borrow_mut().set_double(keys::RESTORE_PROB, 2.0);
    assert!(matches!(
        e.reload_config(),
        Err(EngineError::InvalidRules { .. })
    ));
    assert_eq!(*e.rules(), before);

    // The engine keeps ticking under the rules it already had.
    place_all(&mut e, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
    assert_eq!(e.update().unwrap().restored, 0);
    assert_eq!(e.population(), 4);
}

#[test]
fn huge_neighbour_distance_is_bounded_by_the_grid() {
    let mut e = engine(&still_rules(), 5, 5, 1);
    place_all(&mut e, &[(2, 2), (4, 0)]);
    let found = e.get_empty_neighbors(Position::new(2, 2), i32::MAX);
    assert_eq!(found.len(), 23);
    assert!(found.iter().all(|p| e.is_position_empty(*p).unwrap()));
    assert!(e.get_empty_neighbors(Position::new(2, 2), -1).is_empty());
}

#[test]
fn oversized_grid_is_an_error_not_a_panic() {
    let result = SimulationEngine::with_seed(
        i32::MAX,
        i32::MAX,
        Box::new(KeyValueStore::from(&still_rules())),
        1,
    );
    assert!(matches!(result, Err(EngineError::InvalidArgument { .. })));
}

#[test]
fn equal_energy_conflict_goes_to_the_first_mover() {
    let mut e = engine(&frozen_rules(), 5, 5, 2);
    place_all(&mut e, &[(1, 2), (3, 2)]);
    e.update_with_moves(&[Direction::Right.code(), Direction::Left.code()])
        .unwrap();
    let cells = e.cells();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].id.into_inner(), 0);
    assert_eq!((cells[0].x, cells[0].y), (2, 2));
}

#[test]
fn cells_do_not_follow_into_vacated_positions() {
    let mut e = engine(&frozen_rules(), 5, 1, 2);
    place_all(&mut e, &[(1, 0), (2, 0)]);
    // The second cell moves right; the first tries to follow into (2,0),
    // which was occupied before the move.
    e.update_with_moves(&[Direction::Right.code(), Direction::Right.code()])
        .unwrap();
    assert_eq!(live_positions(&e), vec![(1, 0), (3, 0)]);
}

#[test]
fn off_grid_and_unknown_moves_stay_put() {
    let mut e = engine(&frozen_rules(), 3, 3, 2);
    place_all(&mut e, &[(0, 0), (2, 2)]);
    e.update_with_moves(&[Direction::Up.code(), 42]).unwrap();
    assert_eq!(live_positions(&e), vec![(0, 0), (2, 2)]);
    assert!(e.cells().iter().all(|c| (c.energy - 0.9).abs() < 1e-12));
}

#[test]
fn movement_cost_can_exhaust_cells() {
    let rules = RuleConfig {
        energy_consumption: 1.0,
        ..frozen_rules()
    };
    let mut e = engine(&rules, 4, 4, 2);
    place_all(&mut e, &[(0, 0), (3, 3)]);
    let summary = e.update_with_moves(&[8, 8]).unwrap();
    assert_eq!(summary.deaths.get(&DeathCause::Exhaustion), Some(&2));
    assert_eq!(e.population(), 0);
}

#[test]
fn wrong_move_count_changes_nothing() {
    let mut e = engine(&frozen_rules(), 4, 4, 2);
    place_all(&mut e, &[(0, 0), (1, 1)]);
    let before = e.cells();
    let result = e.update_with_moves(&[Direction::Down.code()]);
    assert!(matches!(
        result,
        Err(EngineError::LengthMismatch {
            expected: 2,
            actual: 1
        })
    ));
    assert_eq!(e.cells(), before);
    assert_eq!(e.tick(), 0);
}

#[test]
fn strip_has_full_component_density() {
    let mut e = engine(&still_rules(), 10, 10, 1);
    place_all(&mut e, &[(3, 4), (4, 4), (5, 4)]);
    assert_eq!(e.component_density(), 1.0);
    assert!((e.density() - 3.0 / 100.0).abs() < 1e-12);
}

#[test]
fn remove_twice_is_the_same_as_once() {
    let mut e = engine(&still_rules(), 4, 4, 1);
    place_all(&mut e, &[(1, 1), (2, 2)]);
    assert!(e.remove_cell(Position::new(1, 1)).is_some());
    let after_once = e.cells();
    assert!(e.remove_cell(Position::new(1, 1)).is_none());
    assert_eq!(e.cells(), after_once);
    assert_consistent(&e);
}

#[test]
fn identical_engines_evolve_identically() {
    let run = || {
        let mut e = engine(&still_rules(), 12, 12, 77);
        e.initialize_random(40).unwrap();
        for _ in 0..5 {
            e.update().unwrap();
        }
        e.grid_state()
    };
    assert_eq!(run(), run());
}

#[test]
fn invariants_hold_through_random_play() {
    let rules = RuleConfig {
        restore_probability: 0.3,
        death_rate: 0.02,
        ..RuleConfig::default()
    };
    let mut e = engine(&rules, 16, 16, 123);
    e.initialize_random(90).unwrap();
    assert_consistent(&e);
    for round in 0_i32..20 {
        let moves: Vec<i32> = (0..e.population())
            .map(|i| i32::try_from(i).unwrap().wrapping_add(round).rem_euclid(9))
            .collect();
        e.update_with_moves(&moves).unwrap();
        assert_consistent(&e);
        e.update().unwrap();
        assert_consistent(&e);
    }
}

#[test]
fn observation_vectors_line_up_with_cells() {
    let rules = RuleConfig {
        vision_radius: 2,
        ..still_rules()
    };
    let mut e = engine(&rules, 8, 8, 3);
    e.initialize_random(10).unwrap();
    let states = e.cell_states();
    assert_eq!(states.len(), e.cells().len());
    for state in &states {
        assert_eq!(state.len(), 25);
        // The centre of the window is the cell itself.
        assert_eq!(state[12], 1.0);
    }
}
