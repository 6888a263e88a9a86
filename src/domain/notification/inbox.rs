//! Per-user notification inbox.
//!
//! Newest first. The unread counter is kept in step with the entries so
//! reading it never scans the list.

use std::collections::VecDeque;

use crate::domain::foundation::NotificationId;

use super::Notification;

/// Ordered mailbox of notifications with an unread counter.
///
/// # Invariants
///
/// - `unread_count()` equals the number of entries with `read == false`
/// - each id appears at most once
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    entries: VecDeque<Notification>,
    unread: usize,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pushed notification at the front as unread.
    ///
    /// A notification whose id is already present refreshes the old entry
    /// in place. Its read flag and the unread counter are left alone, so a
    /// read entry never becomes unread again.
    pub fn receive(&mut self, mut notification: Notification) {
        if let Some(existing) = self.entries.iter_mut().find(|n| n.id == notification.id) {
            notification.read = existing.read;
            *existing = notification;
            return;
        }

        notification.read = false;
        self.entries.push_front(notification);
        self.unread += 1;
    }

    /// Marks one notification read. Returns false if it was unknown or
    /// already read.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.entries.iter_mut().find(|n| &n.id == id) {
            Some(entry) if !entry.read => {
                entry.read = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.read = true;
        }
        self.unread = 0;
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| &n.id == id)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.unread = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::notification::NotificationType;
    use proptest::prelude::*;

    fn notification(title: &str) -> Notification {
        Notification::new(
            UserId::new("u-1").unwrap(),
            NotificationType::Booking,
            title,
            "New booking request",
        )
    }

    fn actual_unread(inbox: &NotificationInbox) -> usize {
        inbox.iter().filter(|n| !n.read).count()
    }

    #[test]
    fn receive_prepends_and_counts() {
        let mut inbox = NotificationInbox::new();
        inbox.receive(notification("first"));
        inbox.receive(notification("second"));

        let titles: Vec<_> = inbox.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
        assert_eq!(inbox.unread_count(), 2);
    }

    #[test]
    fn receive_forces_unread() {
        let mut inbox = NotificationInbox::new();
        let mut n = notification("pre-read");
        n.read = true;
        inbox.receive(n);
        assert_eq!(inbox.unread_count(), 1);
        assert!(!inbox.iter().next().unwrap().read);
    }

    #[test]
    fn duplicate_receive_replaces_without_double_count() {
        let mut inbox = NotificationInbox::new();
        let n = notification("dup");
        inbox.receive(n.clone());
        inbox.receive(n);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn redelivery_of_read_entry_stays_read() {
        let mut inbox = NotificationInbox::new();
        let n = notification("again");
        inbox.receive(n.clone());
        inbox.mark_read(&n.id);

        let mut redelivered = n.clone();
        redelivered.title = "again (edited)".to_string();
        inbox.receive(redelivered);

        let entry = inbox.get(&n.id).unwrap();
        assert!(entry.read);
        assert_eq!(entry.title, "again (edited)");
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn mark_read_twice_decrements_once() {
        let mut inbox = NotificationInbox::new();
        let n = notification("x");
        let id = n.id;
        inbox.receive(n);
        inbox.receive(notification("y"));

        assert!(inbox.mark_read(&id));
        assert!(!inbox.mark_read(&id));
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn mark_read_unknown_id_is_noop() {
        let mut inbox = NotificationInbox::new();
        assert!(!inbox.mark_read(&NotificationId::new()));
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn mark_all_read_zeroes_count() {
        let mut inbox = NotificationInbox::new();
        inbox.receive(notification("a"));
        inbox.receive(notification("b"));
        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);
        assert!(inbox.iter().all(|n| n.read));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Receive,
        Redeliver(usize),
        MarkRead(usize),
        MarkAll,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Receive),
            1 => (0usize..16).prop_map(Op::Redeliver),
            2 => (0usize..16).prop_map(Op::MarkRead),
            1 => Just(Op::MarkAll),
        ]
    }

    proptest! {
        #[test]
        fn unread_count_matches_entries(ops in prop::collection::vec(op(), 0..64)) {
            let mut inbox = NotificationInbox::new();
            let mut seen: Vec<Notification> = Vec::new();

            for op in ops {
                let read_before: Vec<NotificationId> =
                    inbox.iter().filter(|n| n.read).map(|n| n.id).collect();

                match op {
                    Op::Receive => {
                        let n = notification("p");
                        seen.push(n.clone());
                        inbox.receive(n);
                    }
                    Op::Redeliver(i) => {
                        if let Some(n) = seen.get(i) {
                            inbox.receive(n.clone());
                        }
                    }
                    Op::MarkRead(i) => {
                        if let Some(n) = seen.get(i) {
                            inbox.mark_read(&n.id);
                        }
                    }
                    Op::MarkAll => inbox.mark_all_read(),
                }
                prop_assert_eq!(inbox.unread_count(), actual_unread(&inbox));
                prop_assert_eq!(inbox.len(), seen.len());
                for id in &read_before {
                    prop_assert!(inbox.get(id).map_or(false, |n| n.read));
                }
            }
        }
    }
}
