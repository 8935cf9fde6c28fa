//! Layout helpers: split the terminal into shell and page regions.
//!
//! Rendering and mouse hit-testing both compute regions through these
//! structs, so a click always lands where the frame was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use super::navbar::NAVBAR_HEIGHT;
use super::shortcuts::SHORTCUTS_HEIGHT;
use super::sidebar::SIDEBAR_WIDTH;

/// Page shell: sidebar | navbar / content, with a status bar along the
/// bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Rect,
    pub navbar: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[0]);
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(NAVBAR_HEIGHT), Constraint::Min(1)])
            .split(cols[1]);

        Self {
            sidebar: cols[0],
            navbar: main[0],
            content: main[1].inner(Margin::new(1, 0)),
            status: rows[1],
        }
    }
}

/// Pipeline page regions inside the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLayout {
    pub shortcuts: Rect,
    pub tabs: Rect,
    /// Bordered frame around the table.
    pub frame: Rect,
    /// The table itself (header + body), inside the frame.
    pub table: Rect,
    pub pagination: Rect,
}

impl PipelineLayout {
    pub fn from_area(content: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SHORTCUTS_HEIGHT),
                Constraint::Length(1), // gap
                Constraint::Length(1), // tabs
                Constraint::Min(4),    // table frame
                Constraint::Length(1), // pagination
            ])
            .split(content);
        let frame = chunks[3];
        Self {
            shortcuts: chunks[0],
            tabs: chunks[2],
            frame,
            table: frame.inner(Margin::new(1, 1)),
            pagination: chunks[4],
        }
    }

    /// Lines available to table rows after the header.
    pub fn body_height(&self) -> u16 {
        self.table.height.saturating_sub(super::table::HEADER_HEIGHT)
    }
}

/// Whether `(col, row)` lies inside `area`.
pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_regions() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(l.sidebar, Rect::new(0, 0, SIDEBAR_WIDTH, 39));
        assert_eq!(l.navbar, Rect::new(SIDEBAR_WIDTH, 0, 120 - SIDEBAR_WIDTH, NAVBAR_HEIGHT));
        assert_eq!(l.content.y, NAVBAR_HEIGHT);
        assert_eq!(l.content.x, SIDEBAR_WIDTH + 1);
        assert_eq!(l.status, Rect::new(0, 39, 120, 1));
    }

    #[test]
    fn pipeline_body_height_tracks_terminal() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        let p = PipelineLayout::from_area(l.content);
        // 37 content lines: 3 shortcuts, gap, tabs, pagination, frame borders,
        // header and rule.
        assert_eq!(p.frame.height, 37 - 6);
        assert_eq!(p.body_height(), 31 - 2 - 2);
        assert_eq!(p.pagination.y, l.content.bottom() - 1);
    }

    #[test]
    fn point_hits() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(point_in_rect(r, 2, 2));
        assert!(point_in_rect(r, 4, 4));
        assert!(!point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 1, 3));
    }
}
