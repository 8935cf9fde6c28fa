//! Dropdown input: a field that opens a single-select option list.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::Modifier,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::core::overlay::{Dismissible, OverlayEvent};

use super::theme::Theme;

/// Options shown before the list scrolls.
const MAX_VISIBLE: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    pub label: String,
    pub placeholder: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub highlighted: usize,
    pub menu: Dismissible,
}

impl DropdownState {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>, options: &[&str]) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Click or Enter on the field.
    pub fn activate(&mut self) {
        if self.menu.handle(OverlayEvent::Toggle) && self.menu.is_open() {
            self.highlighted = self.selected.unwrap_or(0);
        }
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < self.options.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = Some(index);
            self.menu.handle(OverlayEvent::Select);
        }
    }

    pub fn dismiss(&mut self, event: OverlayEvent) {
        self.menu.handle(event);
    }
}

pub struct Dropdown<'a> {
    state: &'a DropdownState,
    focused: bool,
}

impl<'a> Dropdown<'a> {
    pub fn new(state: &'a DropdownState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// List area under a field drawn at `field` (label + value lines).
    pub fn menu_area(state: &DropdownState, field: Rect, bounds: Rect) -> Rect {
        let rows = state.options.len().min(MAX_VISIBLE) as u16;
        Rect::new(field.x, field.y + 2, field.width, rows + 2).intersection(bounds)
    }

    pub fn option_at(state: &DropdownState, menu: Rect, col: u16, row: u16) -> Option<usize> {
        let inner = menu.inner(Margin::new(1, 1));
        if !inner.contains(Position::new(col, row)) {
            return None;
        }
        let index = list_offset(state) + usize::from(row - inner.y);
        (index < state.options.len()).then_some(index)
    }

    /// Render the field into `area` and, when open, the list clipped to
    /// `bounds`.
    pub fn render_with_menu(self, area: Rect, bounds: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let s = self.state;
        buf.set_stringn(area.x, area.y, &s.label, area.width as usize, Theme::label_style());
        if area.height < 2 {
            return;
        }
        let y = area.y + 1;
        let border = Theme::input_border_style(self.focused || s.menu.is_open(), false);
        buf.set_style(
            Rect::new(area.x, y, area.width, 1),
            border.add_modifier(Modifier::UNDERLINED),
        );
        let room = area.width.saturating_sub(2) as usize;
        match s.selected_label() {
            Some(v) => buf.set_stringn(area.x, y, v, room, Theme::label_style()),
            None => buf.set_stringn(area.x, y, &s.placeholder, room, Theme::muted_style()),
        };
        let chevron = if s.menu.is_open() { "▴" } else { "▾" };
        buf.set_stringn(area.right() - 1, y, chevron, 1, Theme::muted_style());

        if !s.menu.is_open() {
            return;
        }
        let menu = Self::menu_area(s, area, bounds);
        Clear.render(menu, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(menu);
        block.render(menu, buf);
        let offset = list_offset(s);
        for (row, (i, option)) in s.options.iter().enumerate().skip(offset).enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let marker = if s.selected == Some(i) { "✓ " } else { "  " };
            buf.set_stringn(inner.x, y, marker, 2, Theme::accent_style());
            buf.set_stringn(
                inner.x + 2,
                y,
                option,
                inner.width.saturating_sub(2) as usize,
                Theme::label_style(),
            );
            if i == s.highlighted {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), Theme::selected_style());
            }
        }
    }
}

/// First visible option, keeping the highlight on screen.
fn list_offset(state: &DropdownState) -> usize {
    (state.highlighted + 1).saturating_sub(MAX_VISIBLE)
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bounds = buf.area;
        self.render_with_menu(area, bounds, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    fn sample() -> DropdownState {
        DropdownState::new("Department", "Select a department", &["Design", "Engineering", "Sales"])
    }

    #[test]
    fn placeholder_until_selected() {
        let mut s = sample();
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 2));
        Dropdown::new(&s).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 1), "Select a department    ▾");
        s.activate();
        s.highlight_next();
        s.select(s.highlighted);
        assert_eq!(s.selected_label(), Some("Engineering"));
        assert!(!s.menu.is_open());
    }

    #[test]
    fn open_list_and_pick_with_pointer() {
        let mut s = sample();
        s.activate();
        let field = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 8));
        Dropdown::new(&s).render(field, &mut buf);
        assert!(row_text(&buf, 3).contains("Design"));
        let menu = Dropdown::menu_area(&s, field, buf.area);
        assert_eq!(Dropdown::option_at(&s, menu, 3, 5), Some(2));
        assert_eq!(Dropdown::option_at(&s, menu, 3, 6), None);
    }

    #[test]
    fn escape_closes_without_selecting() {
        let mut s = sample();
        s.activate();
        s.dismiss(OverlayEvent::Escape);
        assert!(!s.menu.is_open());
        assert_eq!(s.selected, None);
    }
}
