//! Notification feed shown under the navbar bell.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub user_name: String,
    /// Two-letter avatar initials.
    pub avatar: String,
    pub message: String,
    /// Relative time label, e.g. `"5 mins ago"`.
    pub time: String,
    pub unread: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    /// Counter on the bell.  Cleared the first time the panel opens.
    badge_count: usize,
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>, badge_count: usize) -> Self {
        Self { items, badge_count }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn badge_count(&self) -> usize {
        self.badge_count
    }

    pub fn unread(&self) -> usize {
        self.items.iter().filter(|n| n.unread).count()
    }

    /// Called when the panel goes from closed to open.
    pub fn mark_seen(&mut self) {
        self.badge_count = 0;
    }
}

pub fn seed_notifications() -> NotificationFeed {
    let rows: &[(u32, &str, &str, &str, &str, bool)] = &[
        (1, "Kate Young", "KY", "Great Shot Adam! Really enjoying the composition on this piece.", "5 mins ago", true),
        (2, "Brandon Newman", "BN", "Liked your photo: UI/UX Inspo", "21 mins ago", true),
        (3, "Dave Wood", "DW", "Liked your photo: Daily UI Challenge 048", "3hrs ago", false),
        (4, "Kate Young", "KY", "Liked your photo: Daily UI Challenge 048", "3hrs ago", false),
        (5, "Anna Lee", "AL", "Woah! Loving these colours! Keep it up", "1 day ago", false),
    ];
    let items = rows
        .iter()
        .map(|&(id, user_name, avatar, message, time, unread)| Notification {
            id,
            user_name: user_name.into(),
            avatar: avatar.into(),
            message: message.into(),
            time: time.into(),
            unread,
        })
        .collect();
    NotificationFeed::new(items, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_counts() {
        let mut feed = seed_notifications();
        assert_eq!(feed.items().len(), 5);
        assert_eq!(feed.unread(), 2);
        assert_eq!(feed.badge_count(), 3);
        feed.mark_seen();
        assert_eq!(feed.badge_count(), 0);
    }
}
