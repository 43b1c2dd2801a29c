//! Notification Inbox
//!
//! Local notification list with optimistic changes that must be confirmed
//! or rolled back once the server answers.
//!
//! ```text
//!   apply locally ──► ChangeTicket ──► server ok    ──► confirm(ticket)
//!                                 └──► server error ──► rollback(ticket)
//! ```

use std::collections::HashMap;

use crate::filter::NotificationFilter;
use crate::model::{Id, Notification};

/// Handle for one optimistic change awaiting server confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTicket {
    seq: u64,
    ids: Vec<Id>,
}

impl ChangeTicket {
    /// Notifications touched by this change
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }
}

#[derive(Debug, Clone)]
enum Undo {
    /// Previous read flags
    Read(Vec<(Id, bool)>),
    /// Removed item and the index it occupied
    Delete { index: usize, item: Notification },
}

/// Fetched notifications plus pending local changes
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    items: Vec<Notification>,
    pending: HashMap<u64, Undo>,
    next_seq: u64,
}

impl NotificationInbox {
    pub fn new(items: Vec<Notification>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Swap in a fresh server list; pending changes are dropped
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
        self.pending.clear();
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn get(&self, id: Id) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn filtered(&self, filter: &NotificationFilter) -> Vec<&Notification> {
        filter.apply(&self.items)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` has a change the server has not confirmed yet
    pub fn is_pending(&self, id: Id) -> bool {
        self.pending.values().any(|undo| match undo {
            Undo::Read(prev) => prev.iter().any(|(pid, _)| *pid == id),
            Undo::Delete { item, .. } => item.id == id,
        })
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Mark one notification read. `None` when it is unknown or already read.
    pub fn mark_read(&mut self, id: Id) -> Option<ChangeTicket> {
        let item = self.items.iter_mut().find(|n| n.id == id && !n.read)?;
        item.read = true;
        Some(self.track(vec![id], Undo::Read(vec![(id, false)])))
    }

    /// Mark everything read. `None` when nothing was unread.
    pub fn mark_all_read(&mut self) -> Option<ChangeTicket> {
        let mut changed = Vec::new();
        for n in self.items.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed.push((n.id, false));
        }

        if changed.is_empty() {
            return None;
        }

        let ids = changed.iter().map(|(id, _)| *id).collect();
        Some(self.track(ids, Undo::Read(changed)))
    }

    /// Remove a notification locally
    pub fn delete(&mut self, id: Id) -> Option<ChangeTicket> {
        let index = self.items.iter().position(|n| n.id == id)?;
        let item = self.items.remove(index);
        Some(self.track(vec![id], Undo::Delete { index, item }))
    }

    /// Server accepted the change
    pub fn confirm(&mut self, ticket: &ChangeTicket) {
        self.pending.remove(&ticket.seq);
    }

    /// Server rejected the change; restore the previous local state
    pub fn rollback(&mut self, ticket: &ChangeTicket) {
        let Some(undo) = self.pending.remove(&ticket.seq) else {
            return;
        };

        match undo {
            Undo::Read(previous) => {
                for (id, was_read) in previous {
                    if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
                        n.read = was_read;
                    }
                }
            }
            Undo::Delete { index, item } => {
                let index = index.min(self.items.len());
                self.items.insert(index, item);
            }
        }

        tracing::debug!("Rolled back notification change for {:?}", ticket.ids);
    }

    fn track(&mut self, ids: Vec<Id>, undo: Undo) -> ChangeTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(seq, undo);
        ChangeTicket { seq, ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: Id, read: bool) -> Notification {
        Notification {
            id,
            user_id: 1,
            message: format!("notification {}", id),
            timestamp: Utc::now(),
            read,
            category: None,
        }
    }

    fn inbox() -> NotificationInbox {
        NotificationInbox::new(vec![note(1, false), note(2, true), note(3, false)])
    }

    fn read_flags(inbox: &NotificationInbox) -> Vec<(Id, bool)> {
        inbox.items().iter().map(|n| (n.id, n.read)).collect()
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut once = inbox();
        let ticket = once.mark_read(1);
        assert!(ticket.is_some());

        let mut twice = inbox();
        twice.mark_read(1);
        assert!(twice.mark_read(1).is_none());

        assert_eq!(read_flags(&once), read_flags(&twice));
        assert_eq!(once.unread_count(), 1);
    }

    #[test]
    fn test_mark_all_read() {
        let mut inbox = inbox();
        let ticket = inbox.mark_all_read().unwrap();
        assert_eq!(ticket.ids(), &[1, 3]);
        assert!(inbox.items().iter().all(|n| n.read));

        let snapshot = read_flags(&inbox);
        assert!(inbox.mark_all_read().is_none());
        assert_eq!(read_flags(&inbox), snapshot);
    }

    #[test]
    fn test_confirm_clears_pending() {
        let mut inbox = inbox();
        let ticket = inbox.mark_read(3).unwrap();
        assert!(inbox.is_pending(3));

        inbox.confirm(&ticket);
        assert!(!inbox.is_pending(3));
        assert!(inbox.get(3).unwrap().read);

        // Late rollback after confirmation is a no-op
        inbox.rollback(&ticket);
        assert!(inbox.get(3).unwrap().read);
    }

    #[test]
    fn test_rollback_restores_read_flags() {
        let mut inbox = inbox();
        let before = read_flags(&inbox);
        let ticket = inbox.mark_all_read().unwrap();

        inbox.rollback(&ticket);
        assert_eq!(read_flags(&inbox), before);
        assert!(!inbox.has_pending());
    }

    #[test]
    fn test_rollback_reinserts_deleted_item_in_place() {
        let mut inbox = inbox();
        let ticket = inbox.delete(2).unwrap();
        assert_eq!(inbox.len(), 2);
        assert!(inbox.is_pending(2));

        inbox.rollback(&ticket);
        let ids: Vec<Id> = inbox.items().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_interleaved_changes_roll_back_independently() {
        let mut inbox = inbox();
        let read = inbox.mark_read(1).unwrap();
        let delete = inbox.delete(3).unwrap();

        inbox.rollback(&read);
        inbox.confirm(&delete);

        assert!(!inbox.get(1).unwrap().read);
        assert!(inbox.get(3).is_none());
        assert!(!inbox.has_pending());
    }

    #[test]
    fn test_replace_drops_pending() {
        let mut inbox = inbox();
        inbox.mark_read(1);
        inbox.replace(vec![note(9, false)]);
        assert!(!inbox.has_pending());
        assert_eq!(inbox.unread_count(), 1);
        assert!(inbox.delete(42).is_none());
    }
}
