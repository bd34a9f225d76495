//! Search history record

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A previously searched city.
///
/// The `id` is assigned once at creation and never reused; no two entries
/// share the same `name` under case-insensitive comparison.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Opaque unique identifier
    pub id: String,
    /// City name, case preserved from first insertion
    pub name: String,
}

impl HistoryEntry {
    /// Create a new entry with a freshly assigned id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let first = HistoryEntry::new("Boston");
        let second = HistoryEntry::new("Boston");
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, second.name);
    }

    #[test]
    fn test_round_trips_through_json() {
        let entry = HistoryEntry::new("San Francisco");
        let json = serde_json::to_string(&entry).expect("serialization failed");
        let back: HistoryEntry = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(back, entry);
    }
}
