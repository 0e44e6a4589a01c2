//! `RiverCrossingWorld`: transport puzzles with a single ferry.
//!
//! One entity (index 0, the mover) operates a boat between two banks. Each
//! crossing carries the mover plus up to `boat_capacity` other entities that
//! stand on the mover's bank. A state is safe when no conflict pair is left
//! together on a bank without the mover.
//!
//! Candidate order (and therefore tie-breaking between equally short
//! solutions): the mover alone first, then every passenger group of size
//! 1, 2, ..., `boat_capacity`, each size in ascending index order.

use ferry_kernel::carrier::position::{Bank, PositionStateV1};
use ferry_search::contract::{CandidateMoveV1, SearchWorldV1};
use serde::{Deserialize, Serialize};

use crate::contract::PuzzleWorldV1;

/// Index of the entity that operates the boat.
pub const MOVER: usize = 0;

/// How move labels are phrased.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyleV1 {
    /// `"Farmer carries the goose"`.
    #[default]
    Narrative,
    /// `"Farmer+goose -> destination"`.
    Terse,
}

/// A river-crossing puzzle instance.
///
/// Construct through [`crate::config::PuzzleConfigV1::into_world`], which
/// validates names and indices, or [`RiverCrossingWorld::fox_goose_grain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverCrossingWorld {
    puzzle_id: String,
    entities: Vec<String>,
    boat_capacity: usize,
    conflicts: Vec<(usize, usize)>,
    initial: PositionStateV1,
    goal: PositionStateV1,
    label_style: LabelStyleV1,
}

impl RiverCrossingWorld {
    /// Assemble a world from already-validated parts.
    pub(crate) fn from_parts(
        puzzle_id: String,
        entities: Vec<String>,
        boat_capacity: usize,
        conflicts: Vec<(usize, usize)>,
        initial: PositionStateV1,
        goal: PositionStateV1,
        label_style: LabelStyleV1,
    ) -> Self {
        Self {
            puzzle_id,
            entities,
            boat_capacity,
            conflicts,
            initial,
            goal,
            label_style,
        }
    }

    /// The classic puzzle: the farmer ferries a fox, a goose and a bag of
    /// grain across one at a time. The fox eats the goose and the goose eats
    /// the grain whenever the farmer is on the other bank.
    #[must_use]
    pub fn fox_goose_grain() -> Self {
        Self::from_parts(
            "fox_goose_grain".into(),
            vec!["Farmer".into(), "fox".into(), "goose".into(), "grain".into()],
            1,
            vec![(1, 2), (2, 3)],
            PositionStateV1::uniform(4, Bank::Origin.to_byte()),
            PositionStateV1::uniform(4, Bank::Destination.to_byte()),
            LabelStyleV1::Narrative,
        )
    }

    /// Same puzzle, different label phrasing.
    #[must_use]
    pub fn with_label_style(mut self, label_style: LabelStyleV1) -> Self {
        self.label_style = label_style;
        self
    }

    #[must_use]
    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    /// Entity names; index 0 is the mover.
    #[must_use]
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    #[must_use]
    pub fn boat_capacity(&self) -> usize {
        self.boat_capacity
    }

    /// Pairs that must not be left together without the mover.
    #[must_use]
    pub fn conflicts(&self) -> &[(usize, usize)] {
        &self.conflicts
    }

    /// The conflict pairs violated by `state`, in declaration order.
    #[must_use]
    pub fn violations(&self, state: &PositionStateV1) -> Vec<(usize, usize)> {
        let Some(mover) = state.get(MOVER) else {
            return Vec::new();
        };
        self.conflicts
            .iter()
            .copied()
            .filter(|&(a, b)| match (state.get(a), state.get(b)) {
                (Some(pa), Some(pb)) => pa == pb && pa != mover,
                _ => false,
            })
            .collect()
    }

    /// Cargo indices standing on the mover's bank.
    fn co_located(&self, state: &PositionStateV1, mover: Bank) -> Vec<usize> {
        (1..self.entities.len())
            .filter(|&i| state.bank(i) == Some(mover))
            .collect()
    }

    fn label(&self, passengers: &[usize], towards: Bank) -> String {
        let mover = &self.entities[MOVER];
        match self.label_style {
            LabelStyleV1::Narrative => {
                if passengers.is_empty() {
                    return format!("{mover} crosses alone");
                }
                let names: Vec<String> = passengers
                    .iter()
                    .map(|&i| format!("the {}", self.entities[i]))
                    .collect();
                format!("{mover} carries {}", join_with_and(&names))
            }
            LabelStyleV1::Terse => {
                let mut parts = vec![mover.as_str()];
                parts.extend(passengers.iter().map(|&i| self.entities[i].as_str()));
                let bank = match towards {
                    Bank::Origin => "origin",
                    Bank::Destination => "destination",
                };
                format!("{} -> {bank}", parts.join("+"))
            }
        }
    }
}

impl SearchWorldV1 for RiverCrossingWorld {
    type State = PositionStateV1;

    fn world_id(&self) -> &str {
        &self.puzzle_id
    }

    fn generate_moves(&self, state: &PositionStateV1) -> Vec<CandidateMoveV1<PositionStateV1>> {
        let Some(mover) = state.bank(MOVER) else {
            return Vec::new();
        };
        let towards = mover.opposite();
        let cargo = self.co_located(state, mover);

        let mut groups: Vec<Vec<usize>> = vec![Vec::new()];
        for size in 1..=self.boat_capacity.min(cargo.len()) {
            groups.extend(combinations(&cargo, size));
        }

        groups
            .into_iter()
            .filter_map(|group| {
                let mut toggled = Vec::with_capacity(group.len() + 1);
                toggled.push(MOVER);
                toggled.extend_from_slice(&group);
                let next = state.with_toggled(&toggled)?;
                Some(CandidateMoveV1::new(next, self.label(&group, towards)))
            })
            .collect()
    }

    fn is_legal(&self, state: &PositionStateV1) -> bool {
        state.dimension() == self.entities.len()
            && (0..state.dimension()).all(|i| state.bank(i).is_some())
            && self.violations(state).is_empty()
    }
}

impl PuzzleWorldV1 for RiverCrossingWorld {
    fn initial_state(&self) -> PositionStateV1 {
        self.initial.clone()
    }

    fn goal_state(&self) -> PositionStateV1 {
        self.goal.clone()
    }
}

/// All `size`-element subsets of `items`, in lexicographic order of position.
fn combinations(items: &[usize], size: usize) -> Vec<Vec<usize>> {
    fn extend(
        items: &[usize],
        start: usize,
        size: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for (i, &item) in items.iter().enumerate().skip(start) {
            current.push(item);
            extend(items, i + 1, size, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if size <= items.len() {
        extend(items, 0, size, &mut Vec::with_capacity(size), &mut out);
    }
    out
}

/// `["a"]` -> `"a"`, `["a", "b"]` -> `"a and b"`, `["a", "b", "c"]` -> `"a, b and c"`.
fn join_with_and(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
