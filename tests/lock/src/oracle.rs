//! Independent answers for checking the search engine.
//!
//! Nothing here shares code with the engine's frontier or visited set:
//! reachability is a depth-first walk and distances come from
//! Floyd-Warshall over an explicit adjacency matrix.

use std::collections::{BTreeMap, BTreeSet};

use ferry_search::contract::SearchWorldV1;

/// Every state reachable from `from` through legal states, `from` included.
///
/// Empty if `from` itself is illegal.
pub fn reachable<W: SearchWorldV1>(world: &W, from: &W::State) -> BTreeSet<W::State> {
    let mut seen = BTreeSet::new();
    if !world.is_legal(from) {
        return seen;
    }
    let mut stack = vec![from.clone()];
    while let Some(state) = stack.pop() {
        if !seen.insert(state.clone()) {
            continue;
        }
        for m in world.generate_moves(&state) {
            if world.is_legal(&m.state) && !seen.contains(&m.state) {
                stack.push(m.state);
            }
        }
    }
    seen
}

/// Shortest move counts between every pair of legal states in a universe.
pub struct AllPairs<S> {
    index: BTreeMap<S, usize>,
    dist: Vec<Vec<Option<u32>>>,
}

impl<S: Ord> AllPairs<S> {
    /// Minimum number of legal moves from `from` to `to`, if any path exists.
    pub fn distance(&self, from: &S, to: &S) -> Option<u32> {
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        self.dist[i][j]
    }
}

/// Floyd-Warshall over the legal states of `universe`.
///
/// Moves leaving the universe are ignored; pass the complete state space.
pub fn all_pairs<W, I>(world: &W, universe: I) -> AllPairs<W::State>
where
    W: SearchWorldV1,
    I: IntoIterator<Item = W::State>,
{
    let legal: Vec<W::State> = universe
        .into_iter()
        .filter(|s| world.is_legal(s))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: BTreeMap<W::State, usize> = legal
        .iter()
        .enumerate()
        .map(|(i, s)| (s.clone(), i))
        .collect();

    let n = legal.len();
    let mut dist = vec![vec![None; n]; n];
    for (i, state) in legal.iter().enumerate() {
        dist[i][i] = Some(0);
        for m in world.generate_moves(state) {
            if let Some(&j) = index.get(&m.state) {
                if i != j {
                    dist[i][j] = Some(1);
                }
            }
        }
    }

    for k in 0..n {
        let through_k = dist[k].clone();
        for row in &mut dist {
            let Some(ik) = row[k] else { continue };
            for (cell, kj) in row.iter_mut().zip(&through_k) {
                let Some(kj) = kj else { continue };
                let via = ik + kj;
                match cell {
                    Some(d) if *d <= via => {}
                    _ => *cell = Some(via),
                }
            }
        }
    }

    AllPairs { index, dist }
}

/// Replay `labels` from `initial`, taking the first move with each label.
///
/// Returns every visited state (initial first), or `None` if a label is not
/// offered or leads to an illegal state.
pub fn replay_labels<W: SearchWorldV1>(
    world: &W,
    initial: &W::State,
    labels: &[String],
) -> Option<Vec<W::State>> {
    let mut states = vec![initial.clone()];
    let mut current = initial.clone();
    for label in labels {
        let next = world
            .generate_moves(&current)
            .into_iter()
            .find(|m| &m.label == label)?
            .state;
        if !world.is_legal(&next) {
            return None;
        }
        states.push(next.clone());
        current = next;
    }
    Some(states)
}
