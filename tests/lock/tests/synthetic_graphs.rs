//! Completeness and optimality on seeded random graphs.
//!
//! For every small binary graph the engine must find a path exactly when
//! the depth-first oracle says the goal is reachable, and the path length
//! must equal the Floyd-Warshall distance.

use ferry_harness::contract::PuzzleWorldV1;
use ferry_harness::worlds::explicit_graph::ExplicitGraphWorld;
use ferry_search::contract::GoalV1;
use ferry_search::error::PathError;
use ferry_search::path::shortest_path;
use lock_tests::oracle::{all_pairs, reachable, replay_labels};
use lock_tests::synthetic::{all_binary_states, random_binary_graph, GraphShape};

const SEEDS: u64 = 200;

fn solve(world: &ExplicitGraphWorld) -> Result<Vec<String>, PathError> {
    shortest_path(world, world.initial_state(), &GoalV1::State(world.goal_state()))
}

fn check(seed: u64, shape: GraphShape) -> bool {
    let world = random_binary_graph(seed, shape);
    let initial = world.initial_state();
    let goal = world.goal_state();
    let reachable_goal = reachable(&world, &initial).contains(&goal);
    let distance =
        all_pairs(&world, all_binary_states(shape.dimension)).distance(&initial, &goal);
    if world.is_forbidden(&goal) {
        assert_eq!(distance, None, "seed {seed}: forbidden goal is reachable");
    }
    assert_eq!(
        reachable_goal,
        distance.is_some(),
        "seed {seed}: oracles disagree"
    );

    match solve(&world) {
        Ok(labels) => {
            assert!(reachable_goal, "seed {seed}: engine found an impossible path");
            assert_eq!(
                Some(labels.len() as u32),
                distance,
                "seed {seed}: path is not shortest"
            );
            let states = replay_labels(&world, &initial, &labels)
                .unwrap_or_else(|| panic!("seed {seed}: path does not replay"));
            assert_eq!(states.last(), Some(&goal), "seed {seed}");
            true
        }
        Err(PathError::NotFound) => {
            assert!(!reachable_goal, "seed {seed}: engine missed a reachable goal");
            false
        }
        Err(e) => panic!("seed {seed}: unexpected error {e}"),
    }
}

#[test]
fn three_entity_graphs_are_complete_and_optimal() {
    let shape = GraphShape {
        dimension: 3,
        edge_percent: 25,
        forbid_percent: 20,
    };
    let solved = (0..SEEDS).filter(|&seed| check(seed, shape)).count();
    // The sweep must exercise both outcomes to mean anything.
    assert!(solved > 0, "no instance was solvable");
    assert!(solved < SEEDS as usize, "no instance was unsolvable");
}

#[test]
fn sparse_and_dense_graphs_are_complete_and_optimal() {
    for (edge_percent, forbid_percent) in [(10, 0), (60, 40), (90, 10)] {
        let shape = GraphShape {
            dimension: 3,
            edge_percent,
            forbid_percent,
        };
        for seed in 0..50 {
            check(seed, shape);
        }
    }
}

#[test]
fn four_entity_graphs_are_optimal() {
    let shape = GraphShape {
        dimension: 4,
        edge_percent: 15,
        forbid_percent: 15,
    };
    for seed in 1000..1050 {
        check(seed, shape);
    }
}
