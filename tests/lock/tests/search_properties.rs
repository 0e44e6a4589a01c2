//! Engine properties: empty paths, legality enforcement, visited-set
//! correctness, fail-fast preconditions and in-process determinism.

use ferry_harness::contract::PuzzleWorldV1;
use ferry_harness::runner::run_search;
use ferry_harness::worlds::explicit_graph::ExplicitGraphWorld;
use ferry_harness::worlds::river_crossing::RiverCrossingWorld;
use ferry_kernel::carrier::position::PositionStateV1;
use ferry_search::contract::{GoalV1, SearchWorldV1};
use ferry_search::error::{PathError, SearchError};
use ferry_search::graph::{CandidateOutcomeV1, DeadEndReasonV1, TerminationReasonV1};
use ferry_search::path::find_shortest_path;
use ferry_search::policy::SearchPolicyV1;
use ferry_search::search::search;
use lock_tests::synthetic::{random_binary_graph, state_from_index, GraphShape};

fn s(bits: &[u8]) -> PositionStateV1 {
    PositionStateV1::new(bits.to_vec())
}

fn toggles(state: &PositionStateV1) -> Vec<(PositionStateV1, String)> {
    (0..state.dimension())
        .filter_map(|i| Some((state.with_toggled(&[i])?, format!("toggle {i}"))))
        .collect()
}

// ---------------------------------------------------------------------------
// Empty path
// ---------------------------------------------------------------------------

#[test]
fn initial_equal_to_goal_returns_empty_sequence() {
    let start = s(&[1, 0, 1]);
    let labels = find_shortest_path(start.clone(), start, toggles, |_| true).unwrap();
    assert!(labels.is_empty());
}

#[test]
fn initial_equal_to_goal_expands_nothing() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let goal = GoalV1::State(world.initial_state());
    let result = search(&world, world.initial_state(), &goal, &SearchPolicyV1::default()).unwrap();
    assert_eq!(result.graph.metadata.total_expansions, 0);
    assert_eq!(result.solution_labels(), Some(Vec::new()));
    assert_eq!(
        result.graph.metadata.termination_reason,
        TerminationReasonV1::GoalReached { node_id: 0 }
    );
}

// ---------------------------------------------------------------------------
// Legality enforcement
// ---------------------------------------------------------------------------

#[test]
fn goal_behind_illegal_states_is_not_found() {
    // Every route from 00 to 11 passes through 01 or 10, both forbidden.
    let labels = find_shortest_path(s(&[0, 0]), s(&[1, 1]), toggles, |st| {
        st.get(0) == st.get(1)
    });
    assert_eq!(labels, Err(PathError::NotFound));
}

#[test]
fn illegal_shortcut_forces_a_detour() {
    let mut world = ExplicitGraphWorld::new("detour", s(&[0, 0]), s(&[1, 1]));
    world.add_edge(s(&[0, 0]), s(&[1, 0]), "shortcut");
    world.add_edge(s(&[1, 0]), s(&[1, 1]), "finish via shortcut");
    world.add_edge(s(&[0, 0]), s(&[0, 1]), "long way 1");
    world.add_edge(s(&[0, 1]), s(&[1, 2]), "long way 2");
    world.add_edge(s(&[1, 2]), s(&[1, 1]), "long way 3");
    world.forbid(s(&[1, 0]));

    let report = run_search(&world, &SearchPolicyV1::default()).unwrap();
    assert_eq!(
        report.outcome,
        Ok(vec![
            "long way 1".to_string(),
            "long way 2".to_string(),
            "long way 3".to_string()
        ])
    );
    let root_event = &report.graph.expansions[0];
    assert_eq!(root_event.candidates[0].outcome, CandidateOutcomeV1::Illegal);
}

#[test]
fn illegal_initial_state_fails_fast() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let start = s(&[1, 0, 0, 0]);
    let err = search(
        &world,
        start,
        &GoalV1::State(world.goal_state()),
        &SearchPolicyV1::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidInitialState { .. }));
}

#[test]
fn illegal_initial_state_fails_even_when_it_is_the_goal() {
    let labels = find_shortest_path(s(&[1]), s(&[1]), toggles, |st| st.get(0) == Some(0));
    assert!(matches!(labels, Err(PathError::InvalidInitialState { .. })));
}

#[test]
fn mismatched_goal_dimension_is_rejected() {
    let labels = find_shortest_path(s(&[0, 0]), s(&[1, 1, 1]), toggles, |_| true);
    assert_eq!(
        labels,
        Err(PathError::DimensionMismatch { initial: 2, goal: 3 })
    );
}

#[test]
fn childless_expansions_are_counted_as_dead_ends() {
    let mut world = ExplicitGraphWorld::new("dead_end", s(&[0, 0]), s(&[1, 1]));
    world.add_edge(s(&[0, 0]), s(&[1, 0]), "into the cul-de-sac");
    world.add_edge(s(&[0, 0]), s(&[0, 1]), "toward the goal");
    world.add_edge(s(&[0, 1]), s(&[1, 1]), "arrive");

    let report = run_search(&world, &SearchPolicyV1::default()).unwrap();
    assert_eq!(report.solution().map(<[String]>::len), Some(2));
    assert_eq!(report.graph.metadata.total_expansions, 3);
    assert_eq!(report.graph.metadata.total_dead_ends, 1);
    let reasons: Vec<_> = report
        .graph
        .expansions
        .iter()
        .map(|e| e.dead_end_reason)
        .collect();
    assert_eq!(reasons, vec![None, Some(DeadEndReasonV1::Exhaustive), None]);
}

// ---------------------------------------------------------------------------
// Visited set
// ---------------------------------------------------------------------------

#[test]
fn no_state_is_expanded_twice() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let report = run_search(&world, &SearchPolicyV1::default()).unwrap();
    let counts = report.graph.expansion_counts();
    assert_eq!(counts.len() as u64, report.graph.metadata.total_expansions);
    assert!(counts.values().all(|&c| c == 1));
    assert!(report.graph.metadata.total_duplicates_suppressed > 0);
}

#[test]
fn no_state_is_expanded_twice_on_exhaustive_searches() {
    let shape = GraphShape {
        dimension: 4,
        edge_percent: 40,
        forbid_percent: 25,
    };
    for seed in 0..30 {
        let world = random_binary_graph(seed, shape);
        // An unreachable goal forces the whole component to be explored.
        let never = |_: &PositionStateV1| false;
        let result = search(
            &world,
            state_from_index(4, 0),
            &GoalV1::Predicate(&never),
            &SearchPolicyV1::default(),
        )
        .unwrap();
        assert_eq!(
            result.graph.metadata.termination_reason,
            TerminationReasonV1::FrontierExhausted
        );
        let counts = result.graph.expansion_counts();
        assert!(counts.values().all(|&c| c == 1), "seed {seed}");
        assert_eq!(
            counts.len() as u64,
            result.graph.metadata.total_states_visited,
            "seed {seed}: every visited state is expanded exactly once"
        );
    }
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[test]
fn depth_budget_below_solution_length_is_not_not_found() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let report = run_search(&world, &SearchPolicyV1::bounded(u64::MAX, 6)).unwrap();
    assert_eq!(
        report.graph.metadata.termination_reason,
        TerminationReasonV1::DepthBudgetExceeded
    );
    assert!(matches!(report.outcome, Err(PathError::BudgetExhausted { .. })));

    let report = run_search(&world, &SearchPolicyV1::bounded(u64::MAX, 7)).unwrap();
    assert_eq!(report.solution().map(<[String]>::len), Some(7));
}

// ---------------------------------------------------------------------------
// Determinism (in-process)
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_produce_identical_bytes() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let first = run_search(&world, &SearchPolicyV1::default()).unwrap();
    for _ in 0..10 {
        let again = run_search(&world, &SearchPolicyV1::default()).unwrap();
        assert_eq!(again.outcome, first.outcome);
        assert_eq!(
            again.graph.to_canonical_json_bytes().unwrap(),
            first.graph.to_canonical_json_bytes().unwrap()
        );
        assert_eq!(again.digest, first.digest);
    }
}

#[test]
fn closure_api_agrees_with_world_api() {
    let world = RiverCrossingWorld::fox_goose_grain();
    let via_world = run_search(&world, &SearchPolicyV1::default())
        .unwrap()
        .outcome;
    let via_closures = find_shortest_path(
        world.initial_state(),
        world.goal_state(),
        |st: &PositionStateV1| {
            world
                .generate_moves(st)
                .into_iter()
                .map(|m| (m.state, m.label))
                .collect::<Vec<_>>()
        },
        |st| world.is_legal(st),
    );
    assert_eq!(via_closures, via_world);
}
