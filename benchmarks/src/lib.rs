//! Shared helpers for ferry benchmark suites.

use ferry_harness::config::PuzzleConfigV1;
use ferry_harness::worlds::river_crossing::RiverCrossingWorld;
use ferry_kernel::carrier::position::PositionStateV1;

/// A river-crossing puzzle with `cargo` items whose neighbours conflict.
///
/// Item `i` conflicts with item `i + 1`, so the instance grows like the
/// classic puzzle but with a `2^(cargo + 1)` state space.
///
/// # Panics
///
/// Panics if the generated config is invalid (`boat_capacity == 0`).
/// Benchmark setup failures are fatal.
#[must_use]
pub fn conflict_chain(cargo: usize, boat_capacity: usize) -> RiverCrossingWorld {
    let mut entities = vec!["Keeper".to_string()];
    entities.extend((0..cargo).map(|i| format!("item{i}")));
    let conflicts = (1..cargo)
        .map(|i| [format!("item{}", i - 1), format!("item{i}")])
        .collect();
    PuzzleConfigV1 {
        puzzle_id: format!("chain_{cargo}_cap_{boat_capacity}"),
        entities,
        boat_capacity,
        conflicts,
        ..PuzzleConfigV1::fox_goose_grain()
    }
    .into_world()
    .expect("benchmark puzzle config is valid")
}

/// Every single-entity toggle of `state`, labelled by index.
#[must_use]
pub fn hypercube_moves(state: &PositionStateV1) -> Vec<(PositionStateV1, String)> {
    (0..state.dimension())
        .filter_map(|i| Some((state.with_toggled(&[i])?, format!("toggle {i}"))))
        .collect()
}

/// Hypercube legality: no two adjacent entities may both be at the
/// destination unless the first entity is there too.
#[must_use]
pub fn hypercube_is_legal(state: &PositionStateV1) -> bool {
    let positions = state.positions();
    let Some(&anchor) = positions.first() else {
        return true;
    };
    anchor == 1 || positions.windows(2).skip(1).all(|w| !(w[0] == 1 && w[1] == 1))
}
