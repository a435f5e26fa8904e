//! Daily CLI - A local-first personal checklist tool
//!
//! Daily keeps any number of named task lists, each holding ordered items
//! with completion, priority, and archival flags. Lists can be rendered,
//! exported as share-ready text, and summarized across all lists.

pub mod domain;
pub mod storage;
pub mod ops;
pub mod cli;

pub use domain::{Item, ItemId, ListId, TaskList, Theme};
