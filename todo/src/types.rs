//! Domain types for todo records.
//!
//! A record is created from a [`NewTodo`], changed through a [`TodoPatch`]
//! and searched with a [`TodoFilter`]. Every optional field in the inputs is
//! an `Option`: `None` means "not supplied", which is never the same thing
//! as an empty string or `false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a todo record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, never reused
    pub id: TodoId,
    /// Trimmed, never empty
    pub title: String,
    /// Trimmed when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the todo is completed
    pub completed: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
    /// When the todo was last changed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Title of the todo
    pub title: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTodo {
    /// Creates an input with just a title
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Adds a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update: only the fields that are `Some` change
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// Replacement title
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description (`Some("")` stores an empty description)
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement completion flag
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Sets the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// True when no field is supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Search criteria, combined with logical AND
///
/// Absent criteria impose no constraint, so `TodoFilter::default()` matches
/// every record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFilter {
    /// Case-insensitive substring of the title
    #[serde(default)]
    pub title: Option<String>,
    /// Case-insensitive substring of the description
    #[serde(default)]
    pub description: Option<String>,
    /// Exact completion flag
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TodoFilter {
    /// Requires the title to contain `needle`
    #[must_use]
    pub fn title(mut self, needle: impl Into<String>) -> Self {
        self.title = Some(needle.into());
        self
    }

    /// Requires the description to contain `needle`
    #[must_use]
    pub fn description(mut self, needle: impl Into<String>) -> Self {
        self.description = Some(needle.into());
        self
    }

    /// Requires the completion flag to equal `completed`
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Checks a record against every present criterion
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        let title_matches = self
            .title
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&todo.title, needle));

        // A missing description only satisfies an empty needle
        let description_matches = match (self.description.as_deref(), todo.description.as_deref()) {
            (None, _) => true,
            (Some(needle), Some(description)) => contains_ignore_case(description, needle),
            (Some(needle), None) => needle.is_empty(),
        };

        let completed_matches = self.completed.is_none_or(|completed| todo.completed == completed);

        title_matches && description_matches && completed_matches
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    fn todo(title: &str, description: Option<&str>, completed: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id: TodoId::from_uuid(Uuid::new_v4()),
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn todo_id_display_and_parse() {
        let id = TodoId::from_uuid(Uuid::new_v4());
        let parsed: TodoId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("nonexistent".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_serializes_camel_case_and_omits_missing_description() {
        let value = serde_json::to_value(todo("Buy milk", None, false)).unwrap();
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["completed"], false);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("description").is_none());
        assert!(value["id"].is_string());
    }

    #[test]
    fn todo_serializes_empty_description() {
        let value = serde_json::to_value(todo("Buy milk", Some(""), false)).unwrap();
        assert_eq!(value["description"], "");
    }

    #[test]
    fn patch_distinguishes_missing_from_empty() {
        let missing: TodoPatch = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(missing.description, None);

        let empty: TodoPatch = serde_json::from_str(r#"{"description":""}"#).unwrap();
        assert_eq!(empty.description, Some(String::new()));
        assert!(!empty.is_empty());

        assert!(TodoPatch::default().is_empty());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TodoFilter::default();
        assert!(filter.matches(&todo("a", None, false)));
        assert!(filter.matches(&todo("b", Some("d"), true)));
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let filter = TodoFilter::default().title("ING");
        assert!(filter.matches(&todo("Shopping", None, false)));
        assert!(!filter.matches(&todo("Cook", None, false)));
    }

    #[test]
    fn description_filter_never_matches_missing_description() {
        let filter = TodoFilter::default().description("milk");
        assert!(filter.matches(&todo("a", Some("Whole MILK"), false)));
        assert!(!filter.matches(&todo("a", None, false)));
        assert!(TodoFilter::default().description("").matches(&todo("a", None, false)));
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let filter = TodoFilter::default().title("ing").completed(false);
        assert!(filter.matches(&todo("Coding", None, false)));
        assert!(!filter.matches(&todo("Reading", None, true)));
        assert!(!filter.matches(&todo("Cook", None, false)));
    }
}
