//! JSON wire codec for task snapshots.
//!
//! The snapshot is a bare JSON array of task records with no schema
//! version field.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot could not be encoded or decoded.
#[derive(Debug)]
pub enum SnapshotError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Decode(err) => write!(f, "failed to decode task snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Serializes the full task list.
pub fn encode_snapshot(tasks: &[Task]) -> Result<String, SnapshotError> {
    serde_json::to_string(tasks).map_err(SnapshotError::Encode)
}

/// Parses a stored snapshot, converting `createdAt` strings to timestamps.
///
/// Any structural mismatch rejects the whole snapshot.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Task>, SnapshotError> {
    serde_json::from_str(raw).map_err(SnapshotError::Decode)
}
