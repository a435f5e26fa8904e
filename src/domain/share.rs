//! Share-text export
//!
//! Renders a list's visible items as a plain-text block suitable for
//! handing to any share target. The exact layout is a stable contract:
//! header line, starred priority section, unlabeled regular section,
//! completed section, each entry as a `• ` bullet line.

use super::item::{sort_in_list_order, Item};
use super::list::TaskList;

/// Fallback label for items whose text is still empty
const UNTITLED: &str = "Task";

/// Renders the share text for a list.
///
/// `items` is the list's item collection in any order; archived items
/// are skipped, everything else is laid out in list order.
pub fn share_text(list: &TaskList, items: &[Item]) -> String {
    let mut visible: Vec<Item> = items.iter().filter(|i| i.is_visible()).cloned().collect();
    sort_in_list_order(&mut visible);

    let mut out = format!("{}:\n", list.name);

    let priority: Vec<&Item> = visible.iter().filter(|i| i.priority && !i.completed).collect();
    let regular: Vec<&Item> = visible.iter().filter(|i| !i.priority && !i.completed).collect();
    let completed: Vec<&Item> = visible.iter().filter(|i| i.completed).collect();

    if !priority.is_empty() {
        out.push_str("PRIORITY TASKS ⭐️:\n");
        for item in &priority {
            out.push_str(&bullet_line(item));
        }
        out.push('\n');
    }

    if !regular.is_empty() {
        for item in &regular {
            out.push_str(&bullet_line(item));
        }
        out.push('\n');
    }

    if !completed.is_empty() {
        out.push_str("COMPLETED ✅ :\n");
        for item in &completed {
            out.push_str(&bullet_line(item));
        }
    }

    out
}

fn bullet_line(item: &Item) -> String {
    let text = if item.text.is_empty() {
        UNTITLED
    } else {
        item.text.as_str()
    };
    format!("• {}\n", text)
}
