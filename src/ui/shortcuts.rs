//! Shortcuts bar above the pipeline table: filter button and selection count
//! on the left; search, secondary and primary actions on the right.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::button::{Button, ButtonVariant};
use super::inputs::{InputField, InputState, INPUT_HEIGHT};
use super::theme::Theme;

pub const SHORTCUTS_HEIGHT: u16 = INPUT_HEIGHT;
const SEARCH_WIDTH: u16 = 28;

const FILTER_LABEL: &str = "Filters";
const SECONDARY_LABEL: &str = "5 Active jobs";
const PRIMARY_LABEL: &str = "Create job";

fn filter_button() -> Button<'static> {
    Button::new(FILTER_LABEL)
        .variant(ButtonVariant::Secondary)
        .right_icon("⚲")
}

fn secondary_button() -> Button<'static> {
    Button::new(SECONDARY_LABEL)
        .variant(ButtonVariant::Secondary)
        .right_icon("→")
}

fn primary_button() -> Button<'static> {
    Button::new(PRIMARY_LABEL).right_icon("+")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutTarget {
    Filter,
    Search,
    Secondary,
    Primary,
}

/// Where each control sits.  Buttons share the search field's value line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutsGeometry {
    pub filter: Rect,
    pub count_x: u16,
    pub search: Rect,
    pub secondary: Rect,
    pub primary: Rect,
}

impl ShortcutsGeometry {
    pub fn new(area: Rect) -> Self {
        let y = area.y + 1.min(area.height.saturating_sub(1));
        let filter = Rect::new(area.x, y, filter_button().width().min(area.width), 1);

        let primary_w = primary_button().width();
        let secondary_w = secondary_button().width();
        let mut right = area.right();
        let mut take = |w: u16| {
            let x = right.saturating_sub(w).max(area.x);
            right = x.saturating_sub(1);
            x
        };
        let primary = Rect::new(take(primary_w), y, primary_w, 1);
        let secondary = Rect::new(take(secondary_w), y, secondary_w, 1);
        let search_x = take(SEARCH_WIDTH);
        let search = Rect::new(search_x, area.y, SEARCH_WIDTH, INPUT_HEIGHT.min(area.height));

        Self {
            filter,
            count_x: filter.right() + 1,
            search,
            secondary,
            primary,
        }
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<ShortcutTarget> {
        let pos = ratatui::layout::Position::new(col, row);
        [
            (self.filter, ShortcutTarget::Filter),
            (self.search, ShortcutTarget::Search),
            (self.secondary, ShortcutTarget::Secondary),
            (self.primary, ShortcutTarget::Primary),
        ]
        .into_iter()
        .find(|(r, _)| r.contains(pos))
        .map(|(_, t)| t)
    }
}

pub struct Shortcuts<'a> {
    pub selected_count: usize,
    pub search: &'a InputState,
    pub search_focused: bool,
}

impl Widget for Shortcuts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }
        let geo = ShortcutsGeometry::new(area);
        filter_button().render(geo.filter, buf);
        let count = format!("│ {} Candidate Selected", self.selected_count);
        let room = geo.search.x.saturating_sub(geo.count_x + 1) as usize;
        buf.set_stringn(geo.count_x, geo.filter.y, count, room, Theme::muted_style());

        InputField::new(self.search)
            .focused(self.search_focused)
            .render(geo.search, buf);
        secondary_button().render(geo.secondary, buf);
        primary_button().render(geo.primary, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::inputs::InputKind;
    use crate::ui::test_util::row_text;

    fn search() -> InputState {
        InputState::new(InputKind::Search, "Search").with_placeholder("Search candidates")
    }

    #[test]
    fn lays_out_left_and_right_groups() {
        let area = Rect::new(0, 0, 100, SHORTCUTS_HEIGHT);
        let geo = ShortcutsGeometry::new(area);
        assert_eq!(geo.filter.x, 0);
        assert_eq!(geo.primary.right(), 100);
        assert_eq!(geo.secondary.right() + 1, geo.primary.x);
        assert_eq!(geo.search.right() + 1, geo.secondary.x);
        assert_eq!(geo.hit(geo.primary.x, 1), Some(ShortcutTarget::Primary));
        assert_eq!(geo.hit(geo.search.x + 2, 1), Some(ShortcutTarget::Search));
        assert_eq!(geo.hit(1, 1), Some(ShortcutTarget::Filter));
        assert_eq!(geo.hit(1, 0), None);
    }

    #[test]
    fn renders_count_and_actions() {
        let s = search();
        let mut buf = Buffer::empty(Rect::new(0, 0, 110, SHORTCUTS_HEIGHT));
        Shortcuts {
            selected_count: 12,
            search: &s,
            search_focused: false,
        }
        .render(buf.area, &mut buf);
        let line = row_text(&buf, 1);
        assert!(line.starts_with(" Filters ⚲ "));
        assert!(line.contains("│ 12 Candidate Selected"));
        assert!(line.contains("⌕ Search candidates"));
        assert!(line.contains(" 5 Active jobs → "));
        assert!(line.trim_end().ends_with("Create job +"));
    }
}
