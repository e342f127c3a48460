//! Task domain model.
//!
//! # Responsibility
//! - Define the single persistent entity tracked by the store.
//! - Own the title-emptiness guard shared by every mutation path.
//!
//! # Invariants
//! - `id` is immutable after creation and never reused.
//! - `created_at` is captured once at creation and never changes.
//! - `title` is stored as entered; blankness is checked on the trimmed value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

/// A single to-do item.
///
/// Serialized with camelCase field names so the persisted snapshot keeps the
/// `{id, title, description, completed, createdAt}` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Optional free text; empty string when absent.
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    /// ISO-8601 UTC string on the wire, millisecond precision.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a not-yet-completed task.
    ///
    /// This constructor does not validate the title; the store applies
    /// `is_blank_title` before reaching here.
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at,
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `BlankTitle` when `title` is empty after trimming.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if is_blank_title(&self.title) {
            return Err(TaskValidationError::BlankTitle {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Returns `true` when `title` is empty or whitespace-only.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

/// Checks every record plus collection-level id uniqueness.
///
/// # Errors
/// Returns the first violation found, scanning in list order.
pub fn validate_snapshot(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id.as_str()) {
            return Err(TaskValidationError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

/// Record-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    BlankTitle { id: TaskId },
    DuplicateId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::BlankTitle { id } => write!(f, "task `{id}` has a blank title"),
            Self::DuplicateId(id) => write!(f, "task id `{id}` appears more than once"),
        }
    }
}

impl Error for TaskValidationError {}

/// Formats a timestamp the way snapshots store it.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::format_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|value| value.with_timezone(&Utc))
            .map_err(|err| de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}
