//! Status badges and the role picker badge.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::core::badge::{lookup, BadgeKind, BadgeSpec};
use crate::core::overlay::{Dismissible, OverlayEvent};

use super::theme::Theme;

// ───────────────────────────────────────── badge ─────────────

/// A coloured label looked up from the badge table.  Renders nothing when
/// the type/variant pair is unknown.
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    spec: Option<&'static BadgeSpec>,
    label: Option<&'a str>,
    left_icon: bool,
    right_icon: Option<&'a str>,
    dropdown: bool,
    progress: f32,
}

impl<'a> Badge<'a> {
    pub fn new(spec: Option<&'static BadgeSpec>) -> Self {
        Self {
            spec,
            label: None,
            left_icon: true,
            right_icon: None,
            dropdown: false,
            progress: 1.0,
        }
    }

    pub fn of(kind: BadgeKind, variant: &str) -> Self {
        Self::new(lookup(kind, variant))
    }

    /// Replace the table label.
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn left_icon(mut self, show: bool) -> Self {
        self.left_icon = show;
        self
    }

    pub fn right_icon(mut self, icon: &'a str) -> Self {
        self.right_icon = Some(icon);
        self
    }

    /// Trailing chevron, for badges that open a menu.
    pub fn dropdown(mut self, dropdown: bool) -> Self {
        self.dropdown = dropdown;
        self
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    fn text(&self) -> Option<String> {
        let spec = self.spec?;
        let mut s = String::from(" ");
        if self.left_icon {
            s.push_str(spec.icon);
            s.push(' ');
        }
        s.push_str(self.label.unwrap_or(spec.label));
        if let Some(icon) = self.right_icon {
            s.push(' ');
            s.push_str(icon);
        }
        if self.dropdown {
            s.push_str(" ▾");
        }
        s.push(' ');
        Some(s)
    }

    pub fn width(&self) -> u16 {
        self.text().map_or(0, |t| Line::raw(t).width() as u16)
    }
}

impl Widget for Badge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Some(spec), Some(text)) = (self.spec, self.text()) else {
            return;
        };
        if area.is_empty() {
            return;
        }
        let style = Style::default()
            .fg(Theme::badge_color(spec.color))
            .add_modifier(Modifier::REVERSED);
        buf.set_stringn(
            area.x,
            area.y,
            text,
            area.width as usize,
            Theme::reveal(style, self.progress),
        );
    }
}

// ───────────────────────────────────────── role badge ────────

/// Role picker: a role badge that opens a single-select list.
#[derive(Debug, Clone, Default)]
pub struct RoleBadgeState {
    /// Index into the role variants.
    pub selected: usize,
    pub highlighted: usize,
    pub disabled: bool,
    pub menu: Dismissible,
}

impl RoleBadgeState {
    pub fn roles() -> &'static [BadgeSpec] {
        BadgeKind::Role.variants()
    }

    pub fn current(&self) -> &'static BadgeSpec {
        let roles = Self::roles();
        &roles[self.selected.min(roles.len() - 1)]
    }

    /// Click or Enter on the badge itself.
    pub fn activate(&mut self) {
        if self.disabled {
            return;
        }
        if self.menu.handle(OverlayEvent::Toggle) && self.menu.is_open() {
            self.highlighted = self.selected;
        }
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < Self::roles().len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Pick a role; closes the list.
    pub fn select(&mut self, index: usize) {
        if index < Self::roles().len() {
            self.selected = index;
            self.menu.handle(OverlayEvent::Select);
        }
    }

    pub fn dismiss(&mut self, event: OverlayEvent) {
        self.menu.handle(event);
    }
}

pub struct RoleBadge<'a> {
    state: &'a RoleBadgeState,
    focused: bool,
}

impl<'a> RoleBadge<'a> {
    pub fn new(state: &'a RoleBadgeState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn badge(&self) -> Badge<'static> {
        Badge::new(Some(self.state.current())).dropdown(!self.state.disabled)
    }

    /// Area of the option list when open, anchored under the badge.
    pub fn menu_area(anchor: Rect, bounds: Rect) -> Rect {
        let height = RoleBadgeState::roles().len() as u16 + 2;
        let width = 14;
        let x = anchor.x.min(bounds.right().saturating_sub(width));
        Rect::new(x, anchor.y + 1, width, height).intersection(bounds)
    }

    /// Which option (if any) lies under a pointer inside the menu.
    pub fn option_at(menu: Rect, col: u16, row: u16) -> Option<usize> {
        let inner = menu.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(Position::new(col, row)) {
            return None;
        }
        let index = usize::from(row - inner.y);
        (index < RoleBadgeState::roles().len()).then_some(index)
    }

    /// Render the badge into `area` and the open list into `bounds`.
    pub fn render_with_menu(self, area: Rect, bounds: Rect, buf: &mut Buffer) {
        let badge = self.badge();
        let width = badge.width();
        badge.render(area, buf);
        if self.focused {
            let focus = Rect::new(area.x, area.y, width.min(area.width), 1);
            buf.set_style(focus, Style::default().add_modifier(Modifier::UNDERLINED));
        }
        if self.state.menu.is_open() {
            let menu = Self::menu_area(area, bounds);
            Clear.render(menu, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style());
            let inner = block.inner(menu);
            block.render(menu, buf);
            for (i, role) in RoleBadgeState::roles().iter().enumerate() {
                let y = inner.y + i as u16;
                if y >= inner.bottom() {
                    break;
                }
                let marker = if i == self.state.selected { "✓" } else { " " };
                let style = if i == self.state.highlighted {
                    Theme::selected_style()
                } else {
                    Style::default().fg(Theme::badge_color(role.color))
                };
                let line = Line::from(vec![
                    Span::raw(marker),
                    Span::raw(" "),
                    Span::raw(role.icon),
                    Span::raw(" "),
                    Span::raw(role.label),
                ]);
                buf.set_line(inner.x, y, &line, inner.width);
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            }
        }
    }
}

impl Widget for RoleBadge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = buf.area;
        self.render_with_menu(area, bounds, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn unknown_variant_renders_nothing() {
        let badge = Badge::of(BadgeKind::JobStatus, "archived");
        assert_eq!(badge.width(), 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        badge.render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), " ".repeat(10));
    }

    #[test]
    fn label_override_and_chevron() {
        let badge = Badge::of(BadgeKind::CandidateState, "accepted")
            .left_icon(false)
            .label("Hired")
            .dropdown(true);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        badge.render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), " Hired ▾  ");
        assert!(buf[(1, 0)].style().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn role_picker_opens_and_selects() {
        let mut state = RoleBadgeState::default();
        assert_eq!(state.current().label, "Owner");
        state.activate();
        assert!(state.menu.is_open());
        state.highlight_next();
        state.select(state.highlighted);
        assert!(!state.menu.is_open());
        assert_eq!(state.current().label, "Editor");
    }

    #[test]
    fn disabled_role_badge_never_opens() {
        let mut state = RoleBadgeState {
            disabled: true,
            ..Default::default()
        };
        state.activate();
        assert!(!state.menu.is_open());
    }

    #[test]
    fn escape_and_outside_click_close() {
        let mut state = RoleBadgeState::default();
        state.activate();
        state.dismiss(OverlayEvent::Escape);
        assert!(!state.menu.is_open());
        state.activate();
        state.dismiss(OverlayEvent::OutsidePointer);
        assert!(!state.menu.is_open());
    }

    #[test]
    fn open_menu_lists_roles() {
        let mut state = RoleBadgeState::default();
        state.activate();
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 6));
        RoleBadge::new(&state).render(Rect::new(0, 0, 20, 1), &mut buf);
        assert!(row_text(&buf, 2).contains("✓ ♛ Owner"));
        assert!(row_text(&buf, 3).contains("Editor"));
        let menu = RoleBadge::menu_area(Rect::new(0, 0, 20, 1), buf.area);
        assert_eq!(RoleBadge::option_at(menu, 2, 4), Some(2));
        assert_eq!(RoleBadge::option_at(menu, 2, 0), None);
    }
}
