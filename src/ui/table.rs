//! Candidate table: sortable header, badge cells, and a per-row action
//! glyph.
//!
//! [`TableGeometry`] is the single source of truth for where things are;
//! both rendering and mouse hit-testing go through it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    widgets::Widget,
};

use crate::core::badge;
use crate::core::columns::{resolve_widths, ColumnDef, HeaderColumn};
use crate::core::record::{Candidate, ColumnKey};
use crate::core::sort::SortDirection;

use super::badge::Badge;
use super::theme::Theme;

/// Width of the trailing action-menu column.
pub const MENU_WIDTH: u16 = 3;
/// Header line plus the rule under it.
pub const HEADER_HEIGHT: u16 = 2;

pub const EMPTY_MESSAGE: &str = "No candidates match your search";

// ───────────────────────────────────────── geometry ──────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    pub area: Rect,
    /// `(x, width)` of each data column.
    pub spans: Vec<(u16, u16)>,
    pub menu_x: u16,
    pub row_height: u16,
}

impl TableGeometry {
    pub fn new(area: Rect, columns: &[ColumnDef], row_height: u16) -> Self {
        let data_width = area.width.saturating_sub(MENU_WIDTH);
        let widths = resolve_widths(columns, data_width);
        let mut x = area.x;
        let spans = widths
            .into_iter()
            .map(|w| {
                let span = (x, w);
                x += w;
                span
            })
            .collect();
        Self {
            area,
            spans,
            menu_x: area.x + data_width,
            row_height: row_height.max(1),
        }
    }

    pub fn body(&self) -> Rect {
        let h = HEADER_HEIGHT.min(self.area.height);
        Rect::new(self.area.x, self.area.y + h, self.area.width, self.area.height - h)
    }

    /// Column index under a pointer on the header line.
    pub fn header_hit(&self, col: u16, row: u16) -> Option<usize> {
        if row != self.area.y {
            return None;
        }
        self.spans
            .iter()
            .position(|&(x, w)| col >= x && col < x + w)
    }

    /// Page-relative row index under a pointer in the body.
    pub fn row_at(&self, row: u16, row_count: usize) -> Option<usize> {
        let body = self.body();
        if row < body.y || row >= body.bottom() {
            return None;
        }
        let index = usize::from((row - body.y) / self.row_height);
        (index < row_count).then_some(index)
    }

    pub fn is_menu_column(&self, col: u16) -> bool {
        col >= self.menu_x && col < self.area.right()
    }

    pub fn row_rect(&self, index: usize) -> Rect {
        let body = self.body();
        let y = body.y + index as u16 * self.row_height;
        Rect::new(body.x, y, body.width, self.row_height).intersection(body)
    }

    /// Anchor cell of the action glyph on row `index`.
    pub fn menu_cell(&self, index: usize) -> Rect {
        let r = self.row_rect(index);
        Rect::new(self.menu_x, r.y + (self.row_height - 1) / 2, MENU_WIDTH, 1)
    }
}

// ───────────────────────────────────────── widget ────────────

pub struct CandidateTable<'a> {
    columns: &'a [HeaderColumn],
    rows: &'a [&'a Candidate],
    selected: Option<usize>,
    focused_column: Option<usize>,
    row_height: u16,
}

impl<'a> CandidateTable<'a> {
    pub fn new(columns: &'a [HeaderColumn], rows: &'a [&'a Candidate]) -> Self {
        Self {
            columns,
            rows,
            selected: None,
            focused_column: None,
            row_height: 1,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Header column that keyboard sorting acts on.
    pub fn focused_column(mut self, column: Option<usize>) -> Self {
        self.focused_column = column;
        self
    }

    pub fn row_height(mut self, height: u16) -> Self {
        self.row_height = height.max(1);
        self
    }

    fn render_header(&self, geo: &TableGeometry, buf: &mut Buffer) {
        let y = geo.area.y;
        for (i, (col, &(x, w))) in self.columns.iter().zip(&geo.spans).enumerate() {
            if w == 0 {
                continue;
            }
            let chevron = match (col.def.sortable, col.sort) {
                (false, _) => "",
                (true, None) => " ↕",
                (true, Some(SortDirection::Asc)) => " ▲",
                (true, Some(SortDirection::Desc)) => " ▼",
            };
            let mut style = if col.sort.is_some() {
                Theme::accent_style()
            } else {
                Theme::header_style()
            };
            if self.focused_column == Some(i) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let text = format!("{}{chevron}", col.def.label);
            buf.set_stringn(x, y, text, usize::from(w.saturating_sub(1)), style);
        }
        if geo.area.height > 1 {
            let rule = "─".repeat(usize::from(geo.area.width));
            buf.set_stringn(geo.area.x, y + 1, rule, usize::from(geo.area.width), Theme::border_style());
        }
    }

    fn render_row(&self, geo: &TableGeometry, index: usize, record: &Candidate, buf: &mut Buffer) {
        let rect = geo.row_rect(index);
        if rect.is_empty() {
            return;
        }
        if self.selected == Some(index) {
            buf.set_style(rect, Theme::selected_style());
        }
        let y = rect.y + (geo.row_height - 1).min(rect.height - 1) / 2;
        let text_style = Theme::label_style();
        for (col, &(x, w)) in self.columns.iter().zip(&geo.spans) {
            let room = usize::from(w.saturating_sub(1));
            if room == 0 {
                continue;
            }
            let cell = Rect::new(x, y, w.saturating_sub(1), 1);
            match col.def.key {
                ColumnKey::AntiCheat => {
                    Badge::new(badge::for_anti_cheat(record.anti_cheat)).render(cell, buf)
                }
                ColumnKey::Status => Badge::new(badge::for_status(record.status)).render(cell, buf),
                ColumnKey::Name => {
                    buf.set_stringn(x, y, &record.name, room, text_style.add_modifier(Modifier::BOLD));
                }
                ColumnKey::Job => {
                    buf.set_stringn(x, y, &record.job, room, text_style);
                }
                ColumnKey::Score => {
                    buf.set_stringn(x, y, record.score.to_string(), room, text_style);
                }
                ColumnKey::Date => {
                    buf.set_stringn(x, y, &record.date, room, text_style);
                }
            }
        }
        let menu = geo.menu_cell(index);
        if menu.x < geo.area.right() {
            buf.set_stringn(menu.x + 1, menu.y, "⋮", 1, Theme::muted_style());
        }
    }
}

impl Widget for CandidateTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let defs: Vec<ColumnDef> = self.columns.iter().map(|c| c.def).collect();
        let geo = TableGeometry::new(area, &defs, self.row_height);
        self.render_header(&geo, buf);

        let body = geo.body();
        if self.rows.is_empty() {
            if !body.is_empty() {
                let x = body.x + body.width.saturating_sub(EMPTY_MESSAGE.len() as u16) / 2;
                buf.set_stringn(x, body.y + body.height / 2, EMPTY_MESSAGE, usize::from(body.width), Theme::muted_style());
            }
            return;
        }
        for (i, record) in self.rows.iter().enumerate() {
            if geo.row_rect(i).is_empty() {
                break;
            }
            self.render_row(&geo, i, record, buf);
        }
    }
}
