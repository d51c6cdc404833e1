//! Common types used across store operations.

use serde::{Deserialize, Serialize};

/// Storage-assigned record identifier.
///
/// Backends assign ids that increase monotonically in insertion order, so
/// ordering by `RecordId` descending yields "most recently inserted first".
/// The sequence allocator depends on this property.
///
/// The type wraps a raw `i64` to prevent accidental misuse — passing an item
/// number where a record id is expected is a compile-time error.
///
/// # Examples
///
/// ```
/// use certiq_store::RecordId;
///
/// let id = RecordId::from(42);
/// assert_eq!(i64::from(id), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_round_trip() {
        let id = RecordId::from(7);
        assert_eq!(i64::from(id), 7);
    }

    #[test]
    fn test_record_id_ordering_matches_inner() {
        assert!(RecordId::from(1) < RecordId::from(2));
    }

    #[test]
    fn test_record_id_serde_is_transparent() {
        let id = RecordId::from(42);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "42");
        let back: RecordId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
