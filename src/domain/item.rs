//! Item domain model
//!
//! Items are single task lines belonging to exactly one list for their
//! entire lifetime. Completion, priority, and archival are independent
//! flags; archival hides an item from the normal view without deleting it.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ItemId, ListId};

fn is_false(val: &bool) -> bool {
    !*val
}

/// A single task line within a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned at creation
    pub id: ItemId,

    /// The list this item belongs to
    pub list: ListId,

    /// Task text; may be empty while the user is still composing it
    #[serde(default)]
    pub text: String,

    /// When the item was created; secondary sort key
    pub created_at: DateTime<Utc>,

    /// Checked off
    #[serde(default, skip_serializing_if = "is_false")]
    pub completed: bool,

    /// Flagged; priority items sort ahead of the rest of the list
    #[serde(default, skip_serializing_if = "is_false")]
    pub priority: bool,

    /// Soft-deleted; hidden from the normal view but recoverable
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,

    /// Explicit ordering key; when set it takes precedence over
    /// priority and creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl Item {
    /// Creates a new item in the given list
    pub fn new(list: ListId, text: impl Into<String>) -> Self {
        let now = Utc::now();
        let text = text.into();
        Self {
            id: ItemId::new(&text, now),
            list,
            text,
            created_at: now,
            completed: false,
            priority: false,
            archived: false,
            sort_order: None,
        }
    }

    /// Flips the completion flag
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Flips the priority flag
    pub fn toggle_priority(&mut self) {
        self.priority = !self.priority;
    }

    /// Hides the item from the normal view, keeping it recoverable
    pub fn archive(&mut self) {
        self.archived = true;
    }

    /// Brings an archived item back into the normal view
    pub fn unarchive(&mut self) {
        self.archived = false;
    }

    /// Replaces the task text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns true if the item shows up in the normal list view
    pub fn is_visible(&self) -> bool {
        !self.archived
    }
}

/// Compares two items by their position within a list.
///
/// Explicit sort order comes first (unset counts as 0), then priority
/// items ahead of regular ones, then creation time, with the ID as a
/// deterministic tie-break.
pub fn cmp_list_order(a: &Item, b: &Item) -> Ordering {
    let ka = (a.sort_order.unwrap_or(0), !a.priority, a.created_at);
    let kb = (b.sort_order.unwrap_or(0), !b.priority, b.created_at);
    ka.cmp(&kb).then_with(|| a.id.cmp(&b.id))
}

/// Sorts a slice of items into list order
pub fn sort_in_list_order(items: &mut [Item]) {
    items.sort_by(cmp_list_order);
}
