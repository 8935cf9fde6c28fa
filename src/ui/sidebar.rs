//! Sidebar: logo, navigation buttons with nested sub-items, and the signed-in
//! user chip pinned to the bottom.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::theme::Theme;

pub const SIDEBAR_WIDTH: u16 = 24;
const USER_HEIGHT: u16 = 3;
/// Logo line plus a gap.
const NAV_TOP: u16 = 2;

/// A top-level navigation item.
#[derive(Debug, Clone, Copy)]
pub struct NavEntry {
    pub icon: &'static str,
    pub label: &'static str,
    pub sub_items: &'static [&'static str],
}

pub const NAV: &[NavEntry] = &[
    NavEntry {
        icon: "▤",
        label: "Pipeline",
        sub_items: &[],
    },
    NavEntry {
        icon: "◆",
        label: "Design System",
        sub_items: &["Controls", "Navigation", "Inputs", "Cards", "Charts"],
    },
];

/// Which entry (and sub-item) is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavSelection {
    pub entry: usize,
    pub sub: Option<usize>,
}

impl NavSelection {
    /// Selecting an entry with sub-items lands on its first one.
    pub fn entry(index: usize) -> Self {
        let sub = NAV
            .get(index)
            .filter(|e| !e.sub_items.is_empty())
            .map(|_| 0);
        Self { entry: index, sub }
    }

    pub fn sub_item(entry: usize, sub: usize) -> Self {
        Self {
            entry,
            sub: Some(sub),
        }
    }

    /// Breadcrumb trail for the current location.
    pub fn trail(&self) -> Vec<&'static str> {
        let Some(entry) = NAV.get(self.entry) else {
            return Vec::new();
        };
        let mut trail = vec![entry.label];
        if let Some(sub) = self.sub.and_then(|s| entry.sub_items.get(s)) {
            trail.push(sub);
        } else if entry.sub_items.is_empty() {
            trail.insert(0, "Candidates");
        }
        trail
    }
}

/// A button is active when it is itself active or when any of its
/// sub-items is.
pub fn button_active(is_active: bool, sub_active: &[bool]) -> bool {
    is_active || sub_active.iter().any(|a| *a)
}

/// Sub-items are listed only while one of them is active.
pub fn show_sub_items(sub_active: &[bool]) -> bool {
    sub_active.iter().any(|a| *a)
}

/// Click target inside the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Entry(usize),
    Sub(usize, usize),
}

/// One laid-out line of the nav list.
fn nav_rows(selection: NavSelection) -> Vec<NavTarget> {
    let mut rows = Vec::new();
    for (i, entry) in NAV.iter().enumerate() {
        rows.push(NavTarget::Entry(i));
        let sub_active: Vec<bool> = (0..entry.sub_items.len())
            .map(|j| selection.entry == i && selection.sub == Some(j))
            .collect();
        if show_sub_items(&sub_active) {
            rows.extend((0..entry.sub_items.len()).map(|j| NavTarget::Sub(i, j)));
        }
    }
    rows
}

// ───────────────────────────────────────── user chip ─────────

/// `"Kate Young"` → `"KY"`; single names give one letter.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

pub struct UserChip<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl Widget for UserChip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let avatar = format!(" {} ", initials(self.name));
        let room = area.width.saturating_sub(avatar.chars().count() as u16 + 1);
        let x = area.x + area.width - room;
        buf.set_stringn(area.x, area.y, &avatar, area.width as usize, Theme::nav_active_style());
        buf.set_stringn(
            x,
            area.y,
            self.name,
            room as usize,
            Theme::label_style().add_modifier(Modifier::BOLD),
        );
        if area.height > 1 {
            buf.set_stringn(x, area.y + 1, self.email, room as usize, Theme::muted_style());
        }
    }
}

// ───────────────────────────────────────── sidebar ───────────

pub struct Sidebar<'a> {
    selection: NavSelection,
    user: (&'a str, &'a str),
}

impl<'a> Sidebar<'a> {
    pub fn new(selection: NavSelection, user_name: &'a str, user_email: &'a str) -> Self {
        Self {
            selection,
            user: (user_name, user_email),
        }
    }

    pub fn hit(selection: NavSelection, area: Rect, col: u16, row: u16) -> Option<NavTarget> {
        if col < area.x || col >= area.right() || row < area.y + NAV_TOP {
            return None;
        }
        nav_rows(selection)
            .get(usize::from(row - area.y - NAV_TOP))
            .copied()
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < NAV_TOP + 1 {
            return;
        }
        buf.set_stringn(inner.x + 1, inner.y, "vu·deck", inner.width as usize, Theme::title_style());

        let sel = self.selection;
        for (row, target) in nav_rows(sel).into_iter().enumerate() {
            let y = inner.y + NAV_TOP + row as u16;
            if y + USER_HEIGHT >= inner.bottom() {
                break;
            }
            let line_area = Rect::new(inner.x, y, inner.width, 1);
            match target {
                NavTarget::Entry(i) => {
                    let entry = &NAV[i];
                    let sub_active: Vec<bool> = (0..entry.sub_items.len())
                        .map(|j| sel.entry == i && sel.sub == Some(j))
                        .collect();
                    let active = button_active(sel.entry == i && sel.sub.is_none(), &sub_active);
                    let style = if active {
                        Theme::nav_active_style()
                    } else {
                        Theme::label_style()
                    };
                    if active {
                        buf.set_style(line_area, style);
                    }
                    let line = Line::from(vec![
                        Span::styled(format!(" {} ", entry.icon), style),
                        Span::styled(entry.label, style),
                    ]);
                    buf.set_line(inner.x, y, &line, inner.width);
                }
                NavTarget::Sub(i, j) => {
                    let active = sel.entry == i && sel.sub == Some(j);
                    let (marker, style) = if active {
                        ("   ▎", Theme::accent_style().add_modifier(Modifier::BOLD))
                    } else {
                        ("    ", Theme::muted_style())
                    };
                    let line = Line::from(vec![
                        Span::styled(marker, Theme::accent_style()),
                        Span::styled(NAV[i].sub_items[j], style),
                    ]);
                    buf.set_line(inner.x, y, &line, inner.width);
                }
            }
        }

        let user_area = Rect::new(
            inner.x + 1,
            inner.bottom().saturating_sub(USER_HEIGHT - 1),
            inner.width.saturating_sub(1),
            USER_HEIGHT - 1,
        );
        UserChip {
            name: self.user.0,
            email: self.user.1,
        }
        .render(user_area, buf);
    }
}
