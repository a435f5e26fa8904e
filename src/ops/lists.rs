//! List operations
//!
//! Creation resolves name collisions with a numeric suffix instead of
//! failing; renames re-resolve uniqueness against every other list, so
//! the unique-name invariant holds at all times. Deleting lists cascades
//! to their items.

use anyhow::{bail, Result};

use super::{Change, Ops};
use crate::domain::{resolve_unique_name, ListId, TaskList, Theme};

impl Ops<'_> {
    /// Returns all lists, oldest first
    pub fn lists(&self) -> Result<Vec<TaskList>> {
        self.workspace().list_store().read_all()
    }

    /// Finds a list by ID string or exact name
    pub fn find_list(&self, selector: &str) -> Result<Option<TaskList>> {
        let lists = self.lists()?;

        if let Ok(id) = selector.parse::<ListId>() {
            if let Some(list) = lists.iter().find(|l| l.id == id) {
                return Ok(Some(list.clone()));
            }
        }

        Ok(lists.into_iter().find(|l| l.name == selector))
    }

    /// Creates a list, de-duplicating the name with a numeric suffix.
    ///
    /// Never fails on a duplicate name; `bullet_points` and `theme`
    /// default from the workspace config when not given.
    pub fn create_list(
        &self,
        name: &str,
        bullet_points: Option<bool>,
        theme: Option<Theme>,
    ) -> Result<TaskList> {
        let name = name.trim();
        if name.is_empty() {
            bail!("List name must not be empty");
        }

        let config = self.workspace().config();
        let bullet_points = bullet_points.unwrap_or(config.bullet_points);
        let theme = theme.unwrap_or_else(|| config.default_theme());

        let store = self.workspace().list_store();
        let mut lists = store.read_all()?;

        let unique = resolve_unique_name(name, lists.iter().map(|l| l.name.as_str()));
        let list = TaskList::new(unique, bullet_points, theme);

        lists.push(list.clone());
        store.write_all(&lists)?;

        self.emit(Change::ListCreated(list.id.clone()));
        Ok(list)
    }

    /// Applies a new name, bullet style, and theme in one update.
    ///
    /// Fields left as `None` keep their current value. A changed name is
    /// re-resolved for uniqueness against the other lists. Returns `None`
    /// when the list no longer exists.
    pub fn update_list(
        &self,
        id: &ListId,
        name: Option<&str>,
        bullet_points: Option<bool>,
        theme: Option<Theme>,
    ) -> Result<Option<TaskList>> {
        let store = self.workspace().list_store();
        let mut lists = store.read_all()?;

        let Some(pos) = lists.iter().position(|l| &l.id == id) else {
            return Ok(None);
        };

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                bail!("List name must not be empty");
            }
            if new_name != lists[pos].name {
                let others = lists
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != pos)
                    .map(|(_, l)| l.name.as_str());
                lists[pos].name = resolve_unique_name(new_name, others);
            }
        }
        if let Some(bullet_points) = bullet_points {
            lists[pos].bullet_points = bullet_points;
        }
        if let Some(theme) = theme {
            lists[pos].theme = theme;
        }

        let updated = lists[pos].clone();
        store.write_all(&lists)?;

        self.emit(Change::ListUpdated(updated.id.clone()));
        Ok(Some(updated))
    }

    /// Deletes lists and, by cascade, all of their items.
    ///
    /// Unknown IDs are skipped; an empty input is a no-op. Each store is
    /// persisted once. Returns how many lists were removed.
    pub fn delete_lists(&self, ids: &[ListId]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let list_store = self.workspace().list_store();
        let mut lists = list_store.read_all()?;

        let removed: Vec<ListId> = lists
            .iter()
            .filter(|l| ids.contains(&l.id))
            .map(|l| l.id.clone())
            .collect();
        if removed.is_empty() {
            return Ok(0);
        }

        lists.retain(|l| !removed.contains(&l.id));
        list_store.write_all(&lists)?;

        // Cascade: drop every item owned by a removed list
        let item_store = self.workspace().item_store();
        let mut items = item_store.read_all()?;
        let before = items.len();
        items.retain(|_, item| !removed.contains(&item.list));
        if items.len() != before {
            item_store.write_all(&items)?;
        }

        for id in &removed {
            self.emit(Change::ListRemoved(id.clone()));
        }
        Ok(removed.len())
    }
}
