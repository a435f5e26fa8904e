//! # Operations Layer
//!
//! Every mutation and query the application performs on lists and items,
//! behind one facade with an explicitly injected workspace. Nothing here
//! reads ambient state; callers construct an [`Ops`] over the workspace
//! they want to act on.
//!
//! ## Operation Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Lists | List lifecycle | `create_list`, `update_list`, `delete_lists` |
//! | Items | Item lifecycle | `add_item`, `commit_edit`, `toggle_completed` |
//! | Bulk | Whole-list sweeps | `delete_completed`, `reset_priorities`, `import_lines` |
//! | Queries | Read-only views | `items`, `pending`, `share_text` |
//!
//! ## Contracts
//!
//! - Duplicate list names are resolved with a numeric suffix, never an
//!   error; empty edit drafts delete their item.
//! - Operating on an ID that no longer exists is a harmless no-op,
//!   reported through `Option`/[`EditOutcome::Missing`].
//! - Bulk operations mutate in memory and persist with a single store
//!   write, so a failed write leaves the files untouched.
//! - After every committed mutation a [`Change`] event is delivered to
//!   observers registered with [`Ops::observe`]; re-render timing is the
//!   caller's business.

mod lists;
mod items;

use std::cell::RefCell;
use std::fmt;

use crate::domain::{ItemId, ListId};
use crate::storage::Workspace;

pub use items::EditOutcome;

/// A committed mutation, delivered to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    ListCreated(ListId),
    ListUpdated(ListId),
    ListRemoved(ListId),
    ItemAdded(ItemId),
    ItemUpdated(ItemId),
    ItemRemoved(ItemId),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::ListCreated(id) => write!(f, "list created: {}", id),
            Change::ListUpdated(id) => write!(f, "list updated: {}", id),
            Change::ListRemoved(id) => write!(f, "list removed: {}", id),
            Change::ItemAdded(id) => write!(f, "item added: {}", id),
            Change::ItemUpdated(id) => write!(f, "item updated: {}", id),
            Change::ItemRemoved(id) => write!(f, "item removed: {}", id),
        }
    }
}

/// Facade over all list and item operations for one workspace
pub struct Ops<'a> {
    workspace: &'a Workspace,
    observers: RefCell<Vec<Box<dyn Fn(&Change)>>>,
}

impl<'a> Ops<'a> {
    /// Creates an operations facade over a workspace
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Returns the underlying workspace
    pub fn workspace(&self) -> &Workspace {
        self.workspace
    }

    /// Registers a change observer
    pub fn observe(&self, observer: impl Fn(&Change) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Delivers a change to every observer
    fn emit(&self, change: Change) {
        for observer in self.observers.borrow().iter() {
            observer(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn observers_see_committed_changes() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::open(dir.path()).unwrap();
        let ops = Ops::new(&workspace);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ops.observe(move |change| sink.borrow_mut().push(change.clone()));

        let list = ops.create_list("Groceries", None, Some(Theme::Green)).unwrap();
        let item = ops.add_item(&list.id, "Milk").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Change::ListCreated(list.id.clone()));
        assert_eq!(seen[1], Change::ItemAdded(item.id.clone()));
    }

    #[test]
    fn change_display_names_the_entity() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::open(dir.path()).unwrap();
        let ops = Ops::new(&workspace);

        let list = ops.create_list("Groceries", None, None).unwrap();
        let text = Change::ListCreated(list.id.clone()).to_string();
        assert!(text.contains("list created"));
        assert!(text.contains(&list.id.to_string()));
    }
}
