//! Edit-session state machine
//!
//! At most one item is being edited at a time. Starting a new session
//! hands back the previous one so the caller can commit it first; the
//! commit rule itself (empty draft deletes the item, anything else saves
//! it) lives in the operations layer.

use super::id::ItemId;

/// Tracks which item, if any, is currently being composed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No item is being edited
    #[default]
    Idle,
    /// One item's text is being composed
    Editing { item: ItemId, draft: String },
}

impl EditSession {
    /// Begins editing an item.
    ///
    /// Returns the interrupted session's `(item, draft)` when one was
    /// already active; the caller must commit it before proceeding.
    pub fn begin(&mut self, item: ItemId, initial: impl Into<String>) -> Option<(ItemId, String)> {
        let previous = self.take();
        *self = EditSession::Editing {
            item,
            draft: initial.into(),
        };
        previous
    }

    /// Replaces the draft text of the active session; no-op when idle
    pub fn update(&mut self, text: impl Into<String>) {
        if let EditSession::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// Ends the session, returning what must be committed
    pub fn take(&mut self) -> Option<(ItemId, String)> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing { item, draft } => Some((item, draft)),
        }
    }

    /// Returns the item currently being edited, if any
    pub fn editing(&self) -> Option<&ItemId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { item, .. } => Some(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_id(seed: &str) -> ItemId {
        ItemId::new(seed, Utc::now())
    }

    #[test]
    fn starts_idle() {
        let session = EditSession::default();
        assert_eq!(session, EditSession::Idle);
        assert!(session.editing().is_none());
    }

    #[test]
    fn begin_and_take() {
        let id = make_id("a");
        let mut session = EditSession::default();

        assert!(session.begin(id.clone(), "draft").is_none());
        assert_eq!(session.editing(), Some(&id));

        session.update("buy milk");
        assert_eq!(session.take(), Some((id, "buy milk".to_string())));
        assert_eq!(session, EditSession::Idle);
    }

    #[test]
    fn begin_interrupts_active_session() {
        let first = make_id("a");
        let second = make_id("b");
        let mut session = EditSession::default();

        session.begin(first.clone(), "half-typed");
        let interrupted = session.begin(second.clone(), "");

        assert_eq!(interrupted, Some((first, "half-typed".to_string())));
        assert_eq!(session.editing(), Some(&second));
    }

    #[test]
    fn update_while_idle_is_a_no_op() {
        let mut session = EditSession::default();
        session.update("stray text");
        assert_eq!(session, EditSession::Idle);
        assert!(session.take().is_none());
    }

    #[test]
    fn take_twice_returns_nothing() {
        let mut session = EditSession::default();
        session.begin(make_id("a"), "text");

        assert!(session.take().is_some());
        assert!(session.take().is_none());
    }
}
