//! Breadcrumb trail.  The last item is the current location and never
//! reacts to clicks.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

const SEPARATOR: &str = " / ";

pub struct Breadcrumb<'a> {
    items: &'a [&'a str],
}

impl<'a> Breadcrumb<'a> {
    pub fn new(items: &'a [&'a str]) -> Self {
        Self { items }
    }

    /// Horizontal span `(x, width)` of every item, relative to the area.
    fn spans(&self) -> Vec<(u16, u16)> {
        let mut x = 0u16;
        let mut out = Vec::with_capacity(self.items.len());
        for item in self.items {
            let w = item.chars().count() as u16;
            out.push((x, w));
            x = x.saturating_add(w + SEPARATOR.len() as u16);
        }
        out
    }

    /// Index of the clickable item under column `col`, if any.
    pub fn hit(&self, area: Rect, col: u16) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        let rel = col.checked_sub(area.x)?;
        self.spans()
            .iter()
            .position(|&(x, w)| rel >= x && rel < x + w)
            .filter(|&i| i != last)
    }
}

impl Widget for Breadcrumb<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        for (i, (&item, (x, _))) in self.items.iter().zip(self.spans()).enumerate() {
            if x >= area.width {
                break;
            }
            let room = (area.width - x) as usize;
            let style = if i == last {
                Theme::label_style().add_modifier(ratatui::style::Modifier::BOLD)
            } else {
                Theme::muted_style()
            };
            let (end, _) = buf.set_stringn(area.x + x, area.y, item, room, style);
            if i != last && end < area.right() {
                let room = (area.right() - end) as usize;
                buf.set_stringn(end, area.y, SEPARATOR, room, Theme::muted_style());
            }
        }
    }
}
