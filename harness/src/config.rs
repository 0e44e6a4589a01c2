//! Puzzle configuration: river-crossing instances described as JSON.
//!
//! A config names the entities (index 0 is the mover), the boat capacity,
//! conflict pairs by name, and optionally the start and end banks and search
//! budgets. [`PuzzleConfigV1::into_world`] validates every reference before a
//! [`RiverCrossingWorld`] is built, so worlds never see dangling indices.
//!
//! ```json
//! {
//!   "puzzle_id": "fox_goose_grain",
//!   "entities": ["Farmer", "fox", "goose", "grain"],
//!   "conflicts": [["fox", "goose"], ["goose", "grain"]]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ferry_kernel::carrier::position::{Bank, PositionStateV1};
use ferry_kernel::proof::canon::{canonical_json_bytes, CanonError};
use ferry_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use ferry_search::policy::SearchPolicyV1;
use serde::{Deserialize, Serialize};

use crate::worlds::river_crossing::{LabelStyleV1, RiverCrossingWorld, MOVER};

/// Domain prefix for puzzle config digests.
pub const DOMAIN_PUZZLE_CONFIG: HashDomain = HashDomain::PuzzleConfig;

/// Failure to load or validate a puzzle config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read puzzle config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("puzzle config JSON error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("puzzle config lists no entities")]
    NoEntities,
    #[error("entity {name:?} is listed more than once")]
    DuplicateEntity { name: String },
    #[error("conflict references unknown entity {name:?}")]
    UnknownEntity { name: String },
    #[error("entity {name:?} conflicts with itself")]
    SelfConflict { name: String },
    #[error("the mover {name:?} cannot be part of a conflict")]
    MoverInConflict { name: String },
    #[error("boat_capacity must be at least 1")]
    ZeroCapacity,
    #[error("{field} has {actual} positions but there are {expected} entities")]
    PositionCount {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{field}[{index}] = {value} is not a bank (0 or 1)")]
    NotABank {
        field: &'static str,
        index: usize,
        value: u8,
    },
    #[error("search budgets in puzzle config must be at least 1")]
    ZeroBudget,
    #[error(transparent)]
    Canon(#[from] CanonError),
}

fn default_boat_capacity() -> usize {
    1
}

/// A river-crossing puzzle as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfigV1 {
    pub puzzle_id: String,
    /// Entity names. The first entry is the mover.
    pub entities: Vec<String>,
    /// Passengers per crossing, not counting the mover.
    #[serde(default = "default_boat_capacity")]
    pub boat_capacity: usize,
    /// Name pairs that may not share a bank without the mover.
    #[serde(default)]
    pub conflicts: Vec<[String; 2]>,
    /// Starting banks; everyone at the origin when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<u8>>,
    /// Target banks; everyone at the destination when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec<u8>>,
    #[serde(default)]
    pub label_style: LabelStyleV1,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_expansions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

impl PuzzleConfigV1 {
    /// The farmer, fox, goose and grain.
    #[must_use]
    pub fn fox_goose_grain() -> Self {
        Self {
            puzzle_id: "fox_goose_grain".into(),
            entities: vec!["Farmer".into(), "fox".into(), "goose".into(), "grain".into()],
            boat_capacity: 1,
            conflicts: vec![
                ["fox".into(), "goose".into()],
                ["goose".into(), "grain".into()],
            ],
            initial: None,
            goal: None,
            label_style: LabelStyleV1::Narrative,
            max_expansions: None,
            max_depth: None,
        }
    }

    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or missing required
    /// fields. Unknown fields are ignored.
    /// Semantic checks happen in [`PuzzleConfigV1::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check every name, index and budget.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Search budgets from the config; unbounded where not given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBudget`] if a budget is zero.
    pub fn policy(&self) -> Result<SearchPolicyV1, ConfigError> {
        let defaults = SearchPolicyV1::unbounded();
        let policy = SearchPolicyV1::bounded(
            self.max_expansions.unwrap_or(defaults.max_expansions),
            self.max_depth.unwrap_or(defaults.max_depth),
        );
        policy.validate().map_err(|_| ConfigError::ZeroBudget)?;
        Ok(policy)
    }

    /// Content digest of the config's canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config cannot be serialized.
    pub fn digest(&self) -> Result<ContentHash, ConfigError> {
        let value = serde_json::to_value(self)?;
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(DOMAIN_PUZZLE_CONFIG, &bytes))
    }

    /// Validate and build the world.
    ///
    /// # Errors
    ///
    /// Same as [`PuzzleConfigV1::validate`].
    pub fn into_world(self) -> Result<RiverCrossingWorld, ConfigError> {
        let resolved = self.resolve()?;
        Ok(RiverCrossingWorld::from_parts(
            self.puzzle_id,
            self.entities,
            self.boat_capacity,
            resolved.conflicts,
            resolved.initial,
            resolved.goal,
            self.label_style,
        ))
    }

    fn resolve(&self) -> Result<Resolved, ConfigError> {
        let Some(mover) = self.entities.get(MOVER) else {
            return Err(ConfigError::NoEntities);
        };
        let mut seen = BTreeSet::new();
        for name in &self.entities {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateEntity { name: name.clone() });
            }
        }
        if self.boat_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let index_of = |name: &str| {
            self.entities
                .iter()
                .position(|e| e == name)
                .ok_or_else(|| ConfigError::UnknownEntity { name: name.into() })
        };
        let mut conflicts = Vec::with_capacity(self.conflicts.len());
        for [a, b] in &self.conflicts {
            let (ia, ib) = (index_of(a.as_str())?, index_of(b.as_str())?);
            if ia == ib {
                return Err(ConfigError::SelfConflict { name: a.clone() });
            }
            if ia == MOVER || ib == MOVER {
                return Err(ConfigError::MoverInConflict {
                    name: mover.clone(),
                });
            }
            conflicts.push((ia, ib));
        }

        let n = self.entities.len();
        let initial = banks("initial", self.initial.as_deref(), n, Bank::Origin)?;
        let goal = banks("goal", self.goal.as_deref(), n, Bank::Destination)?;
        self.policy()?;

        Ok(Resolved {
            conflicts,
            initial,
            goal,
        })
    }
}

struct Resolved {
    conflicts: Vec<(usize, usize)>,
    initial: PositionStateV1,
    goal: PositionStateV1,
}

fn banks(
    field: &'static str,
    given: Option<&[u8]>,
    expected: usize,
    fill: Bank,
) -> Result<PositionStateV1, ConfigError> {
    let Some(given) = given else {
        return Ok(PositionStateV1::uniform(expected, fill.to_byte()));
    };
    if given.len() != expected {
        return Err(ConfigError::PositionCount {
            field,
            expected,
            actual: given.len(),
        });
    }
    if let Some((index, &value)) = given
        .iter()
        .enumerate()
        .find(|(_, v)| Bank::from_byte(**v).is_none())
    {
        return Err(ConfigError::NotABank {
            field,
            index,
            value,
        });
    }
    Ok(PositionStateV1::new(given.to_vec()))
}

/// Read and validate a puzzle config file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`PuzzleConfigV1::from_json_str`] and
/// [`PuzzleConfigV1::validate`].
pub fn load_puzzle_config(path: &Path) -> Result<PuzzleConfigV1, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = PuzzleConfigV1::from_json_str(&text)?;
    config.validate()?;
    tracing::debug!(
        puzzle_id = %config.puzzle_id,
        entities = config.entities.len(),
        path = %path.display(),
        "loaded puzzle config"
    );
    Ok(config)
}
