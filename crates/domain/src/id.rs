//! Typed identifier for persisted records.

use std::fmt;

use serde::Serialize;

/// Unique identifier for a [`DeviceRecord`](crate::record::DeviceRecord).
///
/// Assigned by the store at insertion time; strictly increasing in insertion
/// order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
