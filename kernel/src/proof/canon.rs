//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! All digest flows that involve JSON route through [`canonical_json_bytes`].
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no extraneous whitespace.
//! 3. Numbers must be integers. Floats are rejected so that digests never
//!    depend on float formatting.
//! 4. Output is always valid UTF-8.
//!
//! Rule 1 relies on `serde_json::Map` being a `BTreeMap`, which holds as long
//! as the `preserve_order` feature stays disabled in this workspace.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON at {path}: {raw}")]
    NonIntegerNumber { path: String, raw: String },
    /// `serde_json` failed to write the value.
    #[error("canonical JSON serialization failed: {detail}")]
    Serialize { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an `i64` or
/// `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_non_integers(value, "$")?;
    serde_json::to_vec(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

fn reject_non_integers(value: &serde_json::Value, path: &str) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            Err(CanonError::NonIntegerNumber {
                path: path.to_string(),
                raw: n.to_string(),
            })
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                reject_non_integers(item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        serde_json::Value::Object(map) => {
            for (key, item) in map {
                reject_non_integers(item, &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
