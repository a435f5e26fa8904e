//! Task list domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ListId;
use super::theme::Theme;

/// A named collection of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    /// Unique identifier
    pub id: ListId,

    /// Display name; unique across all lists
    pub name: String,

    /// Render items with a completion glyph
    #[serde(default = "default_true")]
    pub bullet_points: bool,

    /// Display color key
    #[serde(default)]
    pub theme: Theme,

    /// When the list was created
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl TaskList {
    /// Creates a new list with the given (already unique) name
    pub fn new(name: impl Into<String>, bullet_points: bool, theme: Theme) -> Self {
        let now = Utc::now();
        let name = name.into();
        Self {
            id: ListId::new(&name, now),
            name,
            bullet_points,
            theme,
            created_at: now,
        }
    }
}

/// Resolves a desired list name against the names already in use.
///
/// Collisions get an incrementing numeric suffix: `"Name"`, `"Name 2"`,
/// `"Name 3"`, and so on until a free name is found. Never fails.
pub fn resolve_unique_name<'a>(
    desired: &str,
    taken: impl IntoIterator<Item = &'a str>,
) -> String {
    let taken: std::collections::HashSet<&str> = taken.into_iter().collect();

    let mut candidate = desired.to_string();
    let mut counter = 1;
    while taken.contains(candidate.as_str()) {
        counter += 1;
        candidate = format!("{} {}", desired, counter);
    }
    candidate
}
