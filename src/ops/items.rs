//! Item operations
//!
//! Single-item mutations are read-modify-persist sequences; whole-list
//! sweeps apply every change in memory and persist once. An ID that no
//! longer resolves is treated as a harmless no-op throughout.

use anyhow::{bail, Result};

use super::{Change, Ops};
use crate::domain::{self, sort_in_list_order, Item, ItemId, ListId, TaskList};

/// Outcome of committing an edit
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Non-empty draft: the text was saved
    Saved(Item),
    /// Empty draft: the item was deleted instead of kept blank
    Discarded,
    /// The item no longer exists; nothing happened
    Missing,
}

impl Ops<'_> {
    /// Returns a list's visible items in list order
    pub fn items(&self, list: &ListId) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .workspace()
            .item_store()
            .read_for_list(list)?
            .into_iter()
            .filter(Item::is_visible)
            .collect();
        sort_in_list_order(&mut items);
        Ok(items)
    }

    /// Returns a list's archived items, newest first
    pub fn archived_items(&self, list: &ListId) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .workspace()
            .item_store()
            .read_for_list(list)?
            .into_iter()
            .filter(|i| i.archived)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Outstanding items across all lists, oldest first.
    ///
    /// This is the summary feed: not completed, not archived, capped at
    /// `limit` entries.
    pub fn pending(&self, limit: usize) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .workspace()
            .item_store()
            .read_all()?
            .into_values()
            .filter(|i| !i.completed && i.is_visible())
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        items.truncate(limit);
        Ok(items)
    }

    /// Renders a list's share text
    pub fn share_text(&self, list: &TaskList) -> Result<String> {
        let items = self.workspace().item_store().read_for_list(&list.id)?;
        Ok(domain::share_text(list, &items))
    }

    /// Adds an item to a list.
    ///
    /// The text may be empty: a blank item is the start of an edit
    /// session, and [`Ops::commit_edit`] decides whether it survives.
    pub fn add_item(&self, list: &ListId, text: &str) -> Result<Item> {
        if self.workspace().list_store().find(list)?.is_none() {
            bail!("List not found: {}", list);
        }

        let item = Item::new(list.clone(), text);
        self.workspace().item_store().append(&item)?;

        self.emit(Change::ItemAdded(item.id.clone()));
        Ok(item)
    }

    /// Commits an edit session for an item.
    ///
    /// An empty draft deletes the item; anything else is saved. This is
    /// the single rule behind submit, tap-away, and abandoned drafts.
    pub fn commit_edit(&self, id: &ItemId, text: &str) -> Result<EditOutcome> {
        let store = self.workspace().item_store();
        let mut items = store.read_all()?;

        let Some(item) = items.get_mut(id) else {
            return Ok(EditOutcome::Missing);
        };

        if text.is_empty() {
            items.remove(id);
            store.write_all(&items)?;
            self.emit(Change::ItemRemoved(id.clone()));
            return Ok(EditOutcome::Discarded);
        }

        item.set_text(text);
        let saved = item.clone();
        store.write_all(&items)?;

        self.emit(Change::ItemUpdated(id.clone()));
        Ok(EditOutcome::Saved(saved))
    }

    /// Flips an item's completion flag; `None` if the item is gone
    pub fn toggle_completed(&self, id: &ItemId) -> Result<Option<Item>> {
        self.mutate_item(id, Item::toggle_completed)
    }

    /// Flips an item's priority flag; `None` if the item is gone
    pub fn toggle_priority(&self, id: &ItemId) -> Result<Option<Item>> {
        self.mutate_item(id, Item::toggle_priority)
    }

    /// Hides an item from the normal view, keeping it recoverable
    pub fn archive_item(&self, id: &ItemId) -> Result<Option<Item>> {
        self.mutate_item(id, Item::archive)
    }

    /// Recovers an archived item
    pub fn unarchive_item(&self, id: &ItemId) -> Result<Option<Item>> {
        self.mutate_item(id, Item::unarchive)
    }

    /// Recovers every archived item in a list; returns how many
    pub fn unarchive_all(&self, list: &ListId) -> Result<usize> {
        self.sweep(list, |item| {
            if item.archived {
                item.unarchive();
                Sweep::Keep(true)
            } else {
                Sweep::Keep(false)
            }
        })
    }

    /// Permanently removes an item; `None` if it was already gone.
    ///
    /// For archived items this is the only path to true removal.
    pub fn delete_item(&self, id: &ItemId) -> Result<Option<Item>> {
        let store = self.workspace().item_store();
        let mut items = store.read_all()?;

        let Some(item) = items.remove(id) else {
            return Ok(None);
        };
        store.write_all(&items)?;

        self.emit(Change::ItemRemoved(id.clone()));
        Ok(Some(item))
    }

    /// Removes every visible completed item in a list; returns how many.
    ///
    /// Archived items are left alone so they stay recoverable.
    pub fn delete_completed(&self, list: &ListId) -> Result<usize> {
        self.sweep(list, |item| {
            if item.completed && item.is_visible() {
                Sweep::Remove
            } else {
                Sweep::Keep(false)
            }
        })
    }

    /// Clears the priority flag on every item in a list; returns how many
    pub fn reset_priorities(&self, list: &ListId) -> Result<usize> {
        self.sweep(list, |item| {
            if item.priority {
                item.priority = false;
                Sweep::Keep(true)
            } else {
                Sweep::Keep(false)
            }
        })
    }

    /// Adds one item per non-empty line, persisting the batch once.
    ///
    /// This is the ingestion path for externally recognized text such as
    /// scanned-document output.
    pub fn import_lines(
        &self,
        list: &ListId,
        lines: impl IntoIterator<Item = String>,
    ) -> Result<Vec<Item>> {
        if self.workspace().list_store().find(list)?.is_none() {
            bail!("List not found: {}", list);
        }

        let imported: Vec<Item> = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Item::new(list.clone(), line))
            .collect();

        self.workspace().item_store().append_all(&imported)?;

        for item in &imported {
            self.emit(Change::ItemAdded(item.id.clone()));
        }
        Ok(imported)
    }

    /// Read-modify-persist for a single item; `None` when it is missing
    fn mutate_item(&self, id: &ItemId, mutate: impl FnOnce(&mut Item)) -> Result<Option<Item>> {
        let store = self.workspace().item_store();
        let mut items = store.read_all()?;

        let Some(item) = items.get_mut(id) else {
            return Ok(None);
        };

        mutate(item);
        let updated = item.clone();
        store.write_all(&items)?;

        self.emit(Change::ItemUpdated(id.clone()));
        Ok(Some(updated))
    }

    /// Applies a sweep to every item of a list, persisting once.
    ///
    /// Returns how many items were touched; nothing is written when the
    /// sweep changed nothing.
    fn sweep(&self, list: &ListId, mut visit: impl FnMut(&mut Item) -> Sweep) -> Result<usize> {
        let store = self.workspace().item_store();
        let mut items = store.read_all()?;

        let mut touched = Vec::new();
        let mut removed = Vec::new();

        items.retain(|id, item| {
            if &item.list != list {
                return true;
            }
            match visit(item) {
                Sweep::Keep(changed) => {
                    if changed {
                        touched.push(id.clone());
                    }
                    true
                }
                Sweep::Remove => {
                    removed.push(id.clone());
                    false
                }
            }
        });

        if touched.is_empty() && removed.is_empty() {
            return Ok(0);
        }
        store.write_all(&items)?;

        for id in &touched {
            self.emit(Change::ItemUpdated(id.clone()));
        }
        for id in &removed {
            self.emit(Change::ItemRemoved(id.clone()));
        }
        Ok(touched.len() + removed.len())
    }
}

/// Verdict of a sweep visit on one item
enum Sweep {
    /// Keep the item; the flag records whether it was modified
    Keep(bool),
    /// Drop the item from the store
    Remove,
}
