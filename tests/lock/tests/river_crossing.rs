//! River-crossing acceptance tests.
//!
//! The canonical fox/goose/grain instance, its variants, and agreement with
//! the all-pairs oracle on larger configured puzzles.

use ferry_harness::config::PuzzleConfigV1;
use ferry_harness::contract::PuzzleWorldV1;
use ferry_harness::render::{render_outcome, NO_SOLUTION};
use ferry_harness::runner::run_search;
use ferry_harness::worlds::river_crossing::RiverCrossingWorld;
use ferry_kernel::carrier::position::PositionStateV1;
use ferry_search::contract::{GoalV1, SearchWorldV1};
use ferry_search::error::PathError;
use ferry_search::path::shortest_path;
use ferry_search::policy::SearchPolicyV1;
use ferry_search::search::search;
use lock_tests::oracle::{all_pairs, replay_labels};
use lock_tests::synthetic::all_binary_states;

const CANONICAL: [&str; 7] = [
    "Farmer carries the goose",
    "Farmer crosses alone",
    "Farmer carries the fox",
    "Farmer carries the goose",
    "Farmer carries the grain",
    "Farmer crosses alone",
    "Farmer carries the goose",
];

fn solve(world: &RiverCrossingWorld) -> Result<Vec<String>, PathError> {
    shortest_path(world, world.initial_state(), &GoalV1::State(world.goal_state()))
}

// ---------------------------------------------------------------------------
// Canonical instance
// ---------------------------------------------------------------------------

#[test]
fn canonical_instance_takes_seven_moves() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let labels = solve(&world).unwrap();
    assert_eq!(labels, CANONICAL);
}

#[test]
fn every_state_on_the_canonical_path_is_legal() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let result = search(
        &world,
        world.initial_state(),
        &GoalV1::State(world.goal_state()),
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let states = result.solution_states().unwrap();
    assert_eq!(states.len(), 8);
    assert_eq!(states.first(), Some(&world.initial_state()));
    assert_eq!(states.last(), Some(&world.goal_state()));
    for s in &states {
        assert!(world.is_legal(s), "illegal state {s} on solution path");
    }
    for pair in states.windows(2) {
        let changed = (0..4).filter(|&i| pair[0].get(i) != pair[1].get(i)).count();
        assert!((1..=2).contains(&changed), "{} -> {} is not one crossing", pair[0], pair[1]);
        assert_ne!(pair[0].get(0), pair[1].get(0), "mover must cross every move");
    }

    // The labels alone reproduce the same states.
    let replayed = replay_labels(
        &world,
        &world.initial_state(),
        &result.solution_labels().unwrap(),
    );
    assert_eq!(replayed, Some(states));
}

#[test]
fn canonical_search_counters() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let report = run_search(&world, &SearchPolicyV1::default()).unwrap();
    let m = &report.graph.metadata;
    assert_eq!(m.total_expansions, 9);
    assert!(m.total_states_visited <= 10, "only 10 of 16 states are safe");
    assert!(m.total_illegal_rejected > 0);
    assert_eq!(m.world_id, "fox_goose_grain");
}

#[test]
fn rendered_solution_is_numbered() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let lines = render_outcome(&solve(&world));
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "1. Farmer carries the goose");
    assert_eq!(lines[4], "5. Farmer carries the grain");
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

#[test]
fn two_seat_boat_needs_three_moves() {
    let world = PuzzleConfigV1 {
        boat_capacity: 2,
        ..PuzzleConfigV1::fox_goose_grain()
    }
    .into_world()
    .unwrap();
    assert_eq!(
        solve(&world).unwrap(),
        vec![
            "Farmer carries the goose",
            "Farmer crosses alone",
            "Farmer carries the fox and the grain",
        ]
    );
}

#[test]
fn mutual_hostility_has_no_solution() {
    let world = PuzzleConfigV1 {
        conflicts: vec![
            ["fox".into(), "goose".into()],
            ["goose".into(), "grain".into()],
            ["fox".into(), "grain".into()],
        ],
        ..PuzzleConfigV1::fox_goose_grain()
    }
    .into_world()
    .unwrap();
    let outcome = solve(&world);
    assert_eq!(outcome, Err(PathError::NotFound));
    assert_eq!(render_outcome(&outcome), vec![NO_SOLUTION]);
}

#[test]
fn return_trip_reverses_the_puzzle() {
    let world = PuzzleConfigV1 {
        initial: Some(vec![1, 1, 1, 1]),
        goal: Some(vec![0, 0, 0, 0]),
        ..PuzzleConfigV1::fox_goose_grain()
    }
    .into_world()
    .unwrap();
    assert_eq!(solve(&world).unwrap(), CANONICAL);
}

#[test]
fn predicate_goal_stops_at_first_satisfying_state() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let grain_across = |s: &PositionStateV1| s.get(3) == Some(1);
    let labels = shortest_path(
        &world,
        world.initial_state(),
        &GoalV1::Predicate(&grain_across),
    )
    .unwrap();
    let states = replay_labels(&world, &world.initial_state(), &labels).unwrap();
    assert_eq!(states.last().and_then(|s| s.get(3)), Some(1));
    assert!(states[..states.len() - 1].iter().all(|s| s.get(3) == Some(0)));
}

// ---------------------------------------------------------------------------
// Agreement with the all-pairs oracle
// ---------------------------------------------------------------------------

fn assert_matches_oracle(config: PuzzleConfigV1) {
    let world = config.into_world().unwrap();
    #[allow(clippy::cast_possible_truncation)]
    let dimension = world.entities().len() as u32;
    let oracle = all_pairs(&world, all_binary_states(dimension));
    let expected = oracle.distance(&world.initial_state(), &world.goal_state());

    match solve(&world) {
        Ok(labels) => {
            assert_eq!(Some(labels.len() as u32), expected, "{}", world.puzzle_id());
            let states = replay_labels(&world, &world.initial_state(), &labels).unwrap();
            assert_eq!(states.last(), Some(&world.goal_state()));
        }
        Err(PathError::NotFound) => assert_eq!(expected, None, "{}", world.puzzle_id()),
        Err(e) => panic!("{}: unexpected error {e}", world.puzzle_id()),
    }
}

#[test]
fn larger_puzzles_match_floyd_warshall() {
    let names = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    let pair = |a: &str, b: &str| [a.to_string(), b.to_string()];

    let chain = PuzzleConfigV1 {
        puzzle_id: "chain_of_five".into(),
        entities: names(&["Keeper", "a", "b", "c", "d", "e"]),
        boat_capacity: 2,
        conflicts: vec![pair("a", "b"), pair("b", "c"), pair("c", "d"), pair("d", "e")],
        ..PuzzleConfigV1::fox_goose_grain()
    };
    let star = PuzzleConfigV1 {
        puzzle_id: "star".into(),
        entities: names(&["Keeper", "hub", "x", "y", "z"]),
        boat_capacity: 1,
        conflicts: vec![pair("hub", "x"), pair("hub", "y"), pair("hub", "z")],
        ..PuzzleConfigV1::fox_goose_grain()
    };
    let wide = PuzzleConfigV1 {
        puzzle_id: "wide_boat".into(),
        entities: names(&["Keeper", "p", "q", "r", "s"]),
        boat_capacity: 3,
        conflicts: vec![pair("p", "q"), pair("r", "s"), pair("p", "s")],
        ..PuzzleConfigV1::fox_goose_grain()
    };

    for config in [PuzzleConfigV1::fox_goose_grain(), chain, star, wide] {
        assert_matches_oracle(config);
    }
}
