//! `PositionStateV1`: the immutable position vector searched over.
//!
//! # Layout
//!
//! One `u8` per mobile entity, in a fixed order chosen by the world. Index 0
//! is conventionally the mover (the farmer in a river-crossing puzzle). Each
//! value is drawn from a small finite domain; transport puzzles use the
//! binary [`Bank`] domain.
//!
//! # Equality semantics
//!
//! Equality, ordering and hashing cover the full vector. Two states are equal
//! iff every entity's position is equal, so states can be used directly as
//! `BTreeMap`/`HashMap` keys for visited-set bookkeeping.
//!
//! # Immutability
//!
//! There are no setters. Every derivation ([`PositionStateV1::with_position`],
//! [`PositionStateV1::with_toggled`]) returns a new value, so two frontier
//! entries can never alias the same mutable buffer.

/// One side of a river (or any two-valued location domain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Bank {
    /// Where every entity starts.
    Origin = 0,
    /// Where every entity must end up.
    Destination = 1,
}

impl Bank {
    /// Convert from raw byte. Returns `None` for values outside the domain.
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Origin),
            1 => Some(Self::Destination),
            _ => None,
        }
    }

    /// Convert to raw byte.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// The other bank.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Origin => Self::Destination,
            Self::Destination => Self::Origin,
        }
    }
}

/// Immutable, fixed-length vector of entity positions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionStateV1 {
    positions: Box<[u8]>,
}

impl PositionStateV1 {
    /// Build a state from raw position values.
    #[must_use]
    pub fn new(positions: Vec<u8>) -> Self {
        Self {
            positions: positions.into_boxed_slice(),
        }
    }

    /// Build a state with every entity at the same position.
    #[must_use]
    pub fn uniform(dimension: usize, value: u8) -> Self {
        Self::new(vec![value; dimension])
    }

    /// Build a binary-domain state from banks.
    #[must_use]
    pub fn from_banks(banks: &[Bank]) -> Self {
        Self::new(banks.iter().map(|b| b.to_byte()).collect())
    }

    /// Number of entities tracked.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.positions.len()
    }

    /// Raw position of entity `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.positions.get(index).copied()
    }

    /// Position of entity `index` as a [`Bank`].
    ///
    /// Returns `None` if the index is out of range or the value is not binary.
    #[must_use]
    pub fn bank(&self, index: usize) -> Option<Bank> {
        self.get(index).and_then(Bank::from_byte)
    }

    /// All positions in entity order.
    #[must_use]
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    /// Identity bytes used for fingerprinting.
    ///
    /// Layout: `dimension` as u32 LE, then one byte per entity. The length
    /// prefix keeps states of different dimension from sharing a fingerprint.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.positions.len());
        #[allow(clippy::cast_possible_truncation)]
        buf.extend_from_slice(&(self.positions.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.positions);
        buf
    }

    /// A new state with entity `index` moved to `value`.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn with_position(&self, index: usize, value: u8) -> Option<Self> {
        if index >= self.positions.len() {
            return None;
        }
        let mut next = self.positions.to_vec();
        next[index] = value;
        Some(Self::new(next))
    }

    /// A new state with every listed entity flipped to the opposite bank.
    ///
    /// Returns `None` if any index is out of range or holds a non-binary value.
    /// Duplicate indices flip once.
    #[must_use]
    pub fn with_toggled(&self, indices: &[usize]) -> Option<Self> {
        let mut next = self.positions.to_vec();
        let mut seen = vec![false; next.len()];
        for &index in indices {
            let flag = seen.get_mut(index)?;
            if *flag {
                continue;
            }
            *flag = true;
            let bank = Bank::from_byte(next[index])?;
            next[index] = bank.opposite().to_byte();
        }
        Some(Self::new(next))
    }
}

impl std::fmt::Display for PositionStateV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str(")")
    }
}
