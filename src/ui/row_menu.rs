//! Per-row action menu opened from the `⋮` glyph.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::core::overlay::{Dismissible, OverlayEvent};

use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Accept,
    Shortlist,
    Reject,
    ViewDetails,
}

impl RowAction {
    pub const ALL: &[RowAction] = &[
        RowAction::Accept,
        RowAction::Shortlist,
        RowAction::Reject,
        RowAction::ViewDetails,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RowAction::Accept => "Accept",
            RowAction::Shortlist => "Shortlist",
            RowAction::Reject => "Reject",
            RowAction::ViewDetails => "View Details",
        }
    }
}

const MENU_WIDTH: u16 = 16;

#[derive(Debug, Clone, Default)]
pub struct RowMenuState {
    pub menu: Dismissible,
    /// Page-relative row the menu belongs to.
    pub row: usize,
    pub highlighted: usize,
}

impl RowMenuState {
    /// Toggle the menu for `row`; clicking another row's glyph moves it.
    pub fn toggle_for(&mut self, row: usize) {
        if self.menu.is_open() && self.row != row {
            self.row = row;
            self.highlighted = 0;
            return;
        }
        self.row = row;
        if self.menu.handle(OverlayEvent::Toggle) {
            self.highlighted = 0;
        }
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < RowAction::ALL.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Pick an action; closes the menu.
    pub fn choose(&mut self, index: usize) -> Option<RowAction> {
        let action = *RowAction::ALL.get(index)?;
        self.menu.handle(OverlayEvent::Select);
        Some(action)
    }

    pub fn dismiss(&mut self, event: OverlayEvent) {
        self.menu.handle(event);
    }
}

pub struct RowMenu<'a> {
    state: &'a RowMenuState,
    anchor: Rect,
}

impl<'a> RowMenu<'a> {
    pub fn new(state: &'a RowMenuState, anchor: Rect) -> Self {
        Self { state, anchor }
    }

    /// Menu rectangle: right-aligned to the anchor, below it if there is
    /// room, otherwise above.
    pub fn area(anchor: Rect, bounds: Rect) -> Rect {
        let height = RowAction::ALL.len() as u16 + 2;
        let x = anchor
            .right()
            .saturating_sub(MENU_WIDTH)
            .max(bounds.x);
        let y = if anchor.bottom() + height <= bounds.bottom() {
            anchor.bottom()
        } else {
            anchor.y.saturating_sub(height).max(bounds.y)
        };
        Rect::new(x, y, MENU_WIDTH, height).intersection(bounds)
    }

    pub fn option_at(menu: Rect, col: u16, row: u16) -> Option<usize> {
        let inner = menu.inner(Margin::new(1, 1));
        if !inner.contains(Position::new(col, row)) {
            return None;
        }
        let index = usize::from(row - inner.y);
        (index < RowAction::ALL.len()).then_some(index)
    }
}

impl Widget for RowMenu<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        if !self.state.menu.is_open() {
            return;
        }
        let menu = Self::area(self.anchor, bounds);
        if menu.is_empty() {
            return;
        }
        Clear.render(menu, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(menu);
        block.render(menu, buf);
        for (i, action) in RowAction::ALL.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let style = match (i == self.state.highlighted, action) {
                (true, _) => Theme::selected_style(),
                (false, RowAction::Reject) => Theme::error_style(),
                (false, _) => Theme::label_style(),
            };
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            buf.set_stringn(inner.x + 1, y, action.label(), inner.width.saturating_sub(1) as usize, style);
        }
    }
}
