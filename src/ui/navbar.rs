//! Top bar: breadcrumb on the left, notification bell on the right, and the
//! notification panel that drops down from the bell.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::notify::NotificationFeed;

use super::breadcrumb::Breadcrumb;
use super::theme::Theme;

pub const NAVBAR_HEIGHT: u16 = 2;
const BELL: &str = "✉";
const PANEL_WIDTH: u16 = 46;
/// Header, two lines per item, footer.
const ITEM_HEIGHT: u16 = 2;

pub struct Navbar<'a> {
    trail: &'a [&'a str],
    feed: &'a NotificationFeed,
    open: bool,
}

impl<'a> Navbar<'a> {
    pub fn new(trail: &'a [&'a str], feed: &'a NotificationFeed, open: bool) -> Self {
        Self { trail, feed, open }
    }

    /// The clickable bell, including its counter.
    pub fn bell_area(area: Rect) -> Rect {
        let w = 6.min(area.width);
        Rect::new(area.right() - w, area.y, w, 1)
    }

    pub fn breadcrumb_area(area: Rect) -> Rect {
        Rect::new(
            area.x + 1,
            area.y,
            area.width.saturating_sub(8),
            1.min(area.height),
        )
    }

    /// Panel rectangle hanging from the bell, clipped to `bounds`.
    pub fn panel_area(area: Rect, feed: &NotificationFeed, bounds: Rect) -> Rect {
        let body = if feed.items().is_empty() {
            3
        } else {
            feed.items().len() as u16 * ITEM_HEIGHT + 1
        };
        let height = body + 4;
        let width = PANEL_WIDTH.min(bounds.width);
        let x = area.right().saturating_sub(width).max(bounds.x);
        Rect::new(x, area.y + 1, width, height).intersection(bounds)
    }

    /// The `×` in the panel header.
    pub fn close_hit(panel: Rect, col: u16, row: u16) -> bool {
        row == panel.y + 1 && col + 3 == panel.right()
    }
}

impl Widget for Navbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Breadcrumb::new(self.trail).render(Self::breadcrumb_area(area), buf);

        let bell = Self::bell_area(area);
        let style = if self.open {
            Theme::accent_style().add_modifier(Modifier::BOLD)
        } else {
            Theme::label_style()
        };
        buf.set_stringn(bell.x + 1, bell.y, BELL, 1, style);
        let count = self.feed.badge_count();
        if count > 0 {
            buf.set_stringn(bell.x + 2, bell.y, format!("{count:>2}"), 2, Theme::error_style());
        }
        if area.height > 1 {
            let rule = "─".repeat(usize::from(area.width));
            buf.set_stringn(area.x, area.y + 1, rule, usize::from(area.width), Theme::border_style());
        }
    }
}

// ───────────────────────────────────────── panel ─────────────

pub struct NotificationPanel<'a> {
    feed: &'a NotificationFeed,
}

impl<'a> NotificationPanel<'a> {
    pub fn new(feed: &'a NotificationFeed) -> Self {
        Self { feed }
    }
}

impl Widget for NotificationPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let title = match self.feed.unread() {
            0 => format!("{BELL} Notifications"),
            n => format!("{BELL} Notifications · {n} new"),
        };
        buf.set_stringn(inner.x + 1, inner.y, title, inner.width as usize, Theme::title_style());
        buf.set_stringn(inner.right().saturating_sub(2), inner.y, "×", 1, Theme::muted_style());

        let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height.saturating_sub(2));
        if self.feed.items().is_empty() {
            Paragraph::new(vec![
                Line::styled("No notifications yet", Theme::label_style().add_modifier(Modifier::BOLD)),
                Line::styled("When you get notifications, they'll show up here", Theme::muted_style()),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body, buf);
            return;
        }

        for (i, n) in self.feed.items().iter().enumerate() {
            let y = body.y + i as u16 * ITEM_HEIGHT;
            if y + 1 >= body.bottom() {
                break;
            }
            let marker = if n.unread { "●" } else { " " };
            let head = Line::from(vec![
                Span::styled(marker, Theme::accent_style()),
                Span::styled(format!(" {} ", n.avatar), Theme::nav_active_style()),
                Span::raw(" "),
                Span::styled(n.user_name.as_str(), Theme::label_style().add_modifier(Modifier::BOLD)),
            ]);
            buf.set_line(body.x, y, &head, body.width);
            let time_w = n.time.chars().count() as u16;
            if time_w + 1 < body.width {
                buf.set_stringn(body.right() - time_w - 1, y, &n.time, time_w as usize, Theme::muted_style());
            }
            buf.set_stringn(body.x + 6, y + 1, &n.message, body.width.saturating_sub(7) as usize, Theme::muted_style());
        }
        let footer_y = body.y + self.feed.items().len() as u16 * ITEM_HEIGHT;
        if footer_y < body.bottom() {
            buf.set_stringn(
                body.x + 1,
                footer_y,
                "See all incoming activity",
                body.width as usize,
                Theme::accent_style().add_modifier(Modifier::UNDERLINED),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::seed_notifications;
    use crate::ui::test_util::{buffer_text, row_text};

    #[test]
    fn bar_shows_trail_and_badge() {
        let feed = seed_notifications();
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, NAVBAR_HEIGHT));
        Navbar::new(&["Candidates", "Pipeline"], &feed, false).render(buf.area, &mut buf);
        let top = row_text(&buf, 0);
        assert!(top.starts_with(" Candidates / Pipeline"));
        assert!(top.ends_with("✉ 3  "));
        assert!(row_text(&buf, 1).starts_with("───"));
    }

    #[test]
    fn seen_feed_hides_counter() {
        let mut feed = seed_notifications();
        feed.mark_seen();
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 1));
        Navbar::new(&["Home"], &feed, true).render(buf.area, &mut buf);
        assert!(row_text(&buf, 0).ends_with("✉    "));
    }

    #[test]
    fn panel_lists_items_with_unread_markers() {
        let feed = seed_notifications();
        let bounds = Rect::new(0, 0, 60, 20);
        let bar = Rect::new(0, 0, 60, NAVBAR_HEIGHT);
        let panel = Navbar::panel_area(bar, &feed, bounds);
        assert_eq!(panel, Rect::new(14, 1, PANEL_WIDTH, 15));
        let mut buf = Buffer::empty(bounds);
        NotificationPanel::new(&feed).render(panel, &mut buf);
        assert!(row_text(&buf, 2).contains("✉ Notifications · 2 new"));
        assert!(Navbar::close_hit(panel, panel.right() - 3, 2));
        assert!(row_text(&buf, 4).contains("● KY  Kate Young"));
        assert!(row_text(&buf, 4).contains("5 mins ago"));
        assert!(row_text(&buf, 8).contains("  DW  Dave Wood"));
        assert!(buffer_text(&buf).contains("See all incoming activity"));
    }

    #[test]
    fn empty_panel() {
        let feed = NotificationFeed::default();
        let bounds = Rect::new(0, 0, 60, 20);
        let panel = Navbar::panel_area(Rect::new(0, 0, 60, 2), &feed, bounds);
        let mut buf = Buffer::empty(bounds);
        NotificationPanel::new(&feed).render(panel, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("No notifications yet"));
        assert!(!text.contains("new"));
    }

    #[test]
    fn panel_survives_tiny_areas() {
        let feed = seed_notifications();
        for w in 0..6 {
            for h in 0..4 {
                let mut buf = Buffer::empty(Rect::new(0, 0, 6, 4));
                NotificationPanel::new(&feed).render(Rect::new(0, 0, w, h), &mut buf);
            }
        }
    }
}
