//! Horizontal tab strip with a single active tab.

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use super::theme::Theme;

const GAP: u16 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsState {
    active: usize,
    count: usize,
}

impl TabsState {
    pub fn new(count: usize) -> Self {
        Self { active: 0, count }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.count {
            self.active = index;
        }
    }

    pub fn next(&mut self) {
        if self.count > 0 {
            self.active = (self.active + 1) % self.count;
        }
    }

    pub fn prev(&mut self) {
        if self.count > 0 {
            self.active = (self.active + self.count - 1) % self.count;
        }
    }
}

pub struct Tabs<'a> {
    labels: &'a [&'a str],
    active: usize,
    focused: bool,
}

impl<'a> Tabs<'a> {
    pub fn new(labels: &'a [&'a str], active: usize) -> Self {
        Self {
            labels,
            active,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Index of the tab under column `col`.
    pub fn hit(labels: &[&str], area: Rect, col: u16) -> Option<usize> {
        let mut x = area.x;
        for (i, label) in labels.iter().enumerate() {
            let w = label.chars().count() as u16;
            if col >= x && col < x + w {
                return Some(i);
            }
            x += w + GAP;
        }
        None
    }
}

impl Widget for Tabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut x = area.x;
        for (i, label) in self.labels.iter().enumerate() {
            if x >= area.right() {
                break;
            }
            let style = if i == self.active {
                let s = Theme::accent_style().add_modifier(Modifier::UNDERLINED);
                if self.focused {
                    s.patch(Theme::focus_style())
                } else {
                    s
                }
            } else {
                Theme::muted_style()
            };
            let (end, _) =
                buf.set_stringn(x, area.y, *label, (area.right() - x) as usize, style);
            x = end + GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    const LABELS: &[&str] = &["Overview", "Candidates", "Settings"];

    #[test]
    fn select_ignores_out_of_range() {
        let mut t = TabsState::new(3);
        t.select(2);
        assert_eq!(t.active(), 2);
        t.select(7);
        assert_eq!(t.active(), 2);
        t.next();
        assert_eq!(t.active(), 0);
        t.prev();
        assert_eq!(t.active(), 2);
    }

    #[test]
    fn renders_and_hits_tabs() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        Tabs::new(LABELS, 1).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim_end(), "Overview   Candidates   Settings");
        assert!(buf[(11, 0)].style().add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(Tabs::hit(LABELS, buf.area, 12), Some(1));
        assert_eq!(Tabs::hit(LABELS, buf.area, 9), None);
    }
}
