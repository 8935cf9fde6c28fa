//! Pagination control: prev / numeric strip / next, plus a "go to page"
//! entry box.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

use crate::core::paginate::{page_strip, PageItem};

use super::theme::Theme;

/// Pages shown on each side of the current one.
pub const SIBLINGS: usize = 1;

const INPUT_WIDTH: usize = 4;

/// What a click on the pagination bar asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Prev,
    Next,
    Page(usize),
    GoTo,
}

/// Text typed into the go-to box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    pub input: String,
    pub editing: bool,
}

impl PaginationState {
    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.input.clear();
    }

    /// Digits only, at most four of them.
    pub fn push(&mut self, c: char) {
        if self.editing && c.is_ascii_digit() && self.input.len() < INPUT_WIDTH {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.input.clear();
    }

    /// Finish editing and return the requested page, if one was typed.
    /// Range checks are left to the pager.
    pub fn submit(&mut self) -> Option<usize> {
        let page = self.input.parse().ok();
        self.cancel();
        page
    }
}

struct Piece {
    text: String,
    target: Option<PageTarget>,
    style: Style,
}

pub struct Pagination<'a> {
    current: usize,
    total: usize,
    state: &'a PaginationState,
}

impl<'a> Pagination<'a> {
    pub fn new(current: usize, total: usize, state: &'a PaginationState) -> Self {
        Self {
            current,
            total,
            state,
        }
    }

    fn pieces(&self) -> Vec<Piece> {
        let nav = |enabled: bool| {
            if enabled {
                Theme::label_style()
            } else {
                Theme::disabled_style()
            }
        };
        let mut out = vec![Piece {
            text: "‹ Prev".into(),
            target: Some(PageTarget::Prev),
            style: nav(self.current > 1),
        }];
        for item in page_strip(self.current, self.total, SIBLINGS) {
            out.push(match item {
                PageItem::Page(n) if n == self.current => Piece {
                    text: format!("[{n}]"),
                    target: Some(PageTarget::Page(n)),
                    style: Theme::nav_active_style(),
                },
                PageItem::Page(n) => Piece {
                    text: format!(" {n} "),
                    target: Some(PageTarget::Page(n)),
                    style: Theme::label_style(),
                },
                PageItem::Ellipsis => Piece {
                    text: "…".into(),
                    target: None,
                    style: Theme::muted_style(),
                },
            });
        }
        out.push(Piece {
            text: "Next ›".into(),
            target: Some(PageTarget::Next),
            style: nav(self.current < self.total),
        });
        out.push(Piece {
            text: " Go to".into(),
            target: Some(PageTarget::GoTo),
            style: Theme::muted_style(),
        });
        let shown = if self.state.editing {
            format!("{:_<width$}", self.state.input, width = INPUT_WIDTH)
        } else {
            "_".repeat(INPUT_WIDTH)
        };
        out.push(Piece {
            text: format!("[{shown}]"),
            target: Some(PageTarget::GoTo),
            style: if self.state.editing {
                Theme::focus_style()
            } else {
                Theme::muted_style()
            },
        });
        out
    }

    fn laid_out(&self, area: Rect) -> Vec<(Rect, Piece)> {
        let mut x = area.x;
        let mut out = Vec::new();
        for piece in self.pieces() {
            let w = piece.text.chars().count() as u16;
            if x >= area.right() {
                break;
            }
            let w = w.min(area.right() - x);
            out.push((Rect::new(x, area.y, w, 1), piece));
            x = x.saturating_add(w + 1);
        }
        out
    }

    /// Control under the pointer.
    pub fn hit(&self, area: Rect, col: u16, row: u16) -> Option<PageTarget> {
        let pos = Position::new(col, row);
        self.laid_out(area)
            .into_iter()
            .find(|(r, _)| r.contains(pos))
            .and_then(|(_, p)| p.target)
    }
}

impl Widget for Pagination<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for (rect, piece) in self.laid_out(area) {
            buf.set_stringn(rect.x, rect.y, &piece.text, rect.width as usize, piece.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn strip_with_ellipses() {
        let state = PaginationState::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 1));
        Pagination::new(10, 25, &state).render(buf.area, &mut buf);
        assert_eq!(
            row_text(&buf, 0).trim_end(),
            "‹ Prev  1  …  9  [10]  11  …  25  Next ›  Go to [____]"
        );
    }

    #[test]
    fn hit_maps_columns_to_targets() {
        let state = PaginationState::default();
        let p = Pagination::new(1, 3, &state);
        let area = Rect::new(0, 5, 50, 1);
        assert_eq!(p.hit(area, 0, 5), Some(PageTarget::Prev));
        // "‹ Prev" then "[1]" at x=7, " 2 " at x=11.
        assert_eq!(p.hit(area, 8, 5), Some(PageTarget::Page(1)));
        assert_eq!(p.hit(area, 12, 5), Some(PageTarget::Page(2)));
        assert_eq!(p.hit(area, 12, 6), None);
        assert_eq!(p.hit(area, 6, 5), None);
    }

    #[test]
    fn go_to_entry_accepts_digits_only() {
        let mut s = PaginationState::default();
        s.push('4');
        assert!(s.input.is_empty(), "ignored until editing");
        s.begin_edit();
        for c in "2a5x67".chars() {
            s.push(c);
        }
        assert_eq!(s.input, "2567");
        s.backspace();
        assert_eq!(s.submit(), Some(256));
        assert!(!s.editing);
        s.begin_edit();
        assert_eq!(s.submit(), None);
    }

    #[test]
    fn disabled_prev_on_first_page() {
        let state = PaginationState::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        Pagination::new(1, 25, &state).render(buf.area, &mut buf);
        assert_eq!(buf[(2, 0)].style().fg, Theme::disabled_style().fg);
    }
}
