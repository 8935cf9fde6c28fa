//! Donut and stats charts.  The donut is drawn as a segmented ring bar with
//! a legend underneath; hovering a legend row highlights its segment.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::chart::{bar_percent, donut_segments, donut_total, segment_cells, Slice};

use super::cards::format_thousands;
use super::theme::{Theme, CHART_PALETTE};

/// Title, total, ring, gap.
const LEGEND_TOP: u16 = 4;

// ───────────────────────────────────────── donut ─────────────

pub struct DonutChart<'a> {
    title: &'a str,
    data: &'a [Slice],
    hovered: Option<usize>,
    progress: f32,
}

impl<'a> DonutChart<'a> {
    pub fn new(title: &'a str, data: &'a [Slice]) -> Self {
        Self {
            title,
            data,
            hovered: None,
            progress: 1.0,
        }
    }

    pub fn hovered(mut self, hovered: Option<usize>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    pub fn height(data: &[Slice]) -> u16 {
        LEGEND_TOP + data.len() as u16
    }

    /// Legend row under the pointer.
    pub fn legend_hit(data: &[Slice], area: Rect, col: u16, row: u16) -> Option<usize> {
        if col < area.x || col >= area.right() || row < area.y + LEGEND_TOP {
            return None;
        }
        let index = usize::from(row - area.y - LEGEND_TOP);
        (index < data.len() && row < area.bottom()).then_some(index)
    }
}

impl Widget for DonutChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 4 {
            return;
        }
        let segments = donut_segments(self.data, CHART_PALETTE.len());
        buf.set_stringn(
            area.x,
            area.y,
            self.title,
            area.width as usize,
            Theme::reveal(Theme::title_style(), self.progress),
        );
        let total = Line::from(vec![
            Span::styled("Total ", Theme::muted_style()),
            Span::styled(
                format_thousands(donut_total(self.data)),
                Theme::label_style().add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(area.x, area.y + 1, &total, area.width);

        // The ring fills in left to right as the reveal progresses.
        let ring_width = (f32::from(area.width) * self.progress.clamp(0.0, 1.0)).round() as u16;
        let ring_end = area.x + ring_width;
        let mut x = area.x;
        let cells = segment_cells(&segments, area.width);
        for (i, (seg, cells)) in segments.iter().zip(cells).enumerate() {
            let cells = cells.min(ring_end.saturating_sub(x));
            if cells == 0 {
                continue;
            }
            let mut style = Style::default().fg(Theme::chart_color(seg.color_index));
            let glyph = match self.hovered {
                Some(h) if h == i => {
                    style = style.add_modifier(Modifier::BOLD);
                    "█"
                }
                Some(_) => "▒",
                None => "█",
            };
            buf.set_stringn(x, area.y + 2, glyph.repeat(usize::from(cells)), usize::from(cells), style);
            x += cells;
        }

        // Swatch, count and percent take 16 cells; the label gets the rest.
        let label_w = usize::from(area.width.saturating_sub(16)).min(12);
        for (i, seg) in segments.iter().enumerate() {
            let y = area.y + LEGEND_TOP + i as u16;
            if y >= area.bottom() {
                break;
            }
            let swatch = Style::default().fg(Theme::chart_color(seg.color_index));
            let line = Line::from(vec![
                Span::styled("■ ", swatch),
                Span::styled(format!("{:<label_w$.label_w$}", seg.label), Theme::label_style()),
                Span::styled(format!("{:>6}", format_thousands(seg.value)), Theme::label_style()),
                Span::styled(format!("  {:.1}%", seg.percent), Theme::muted_style()),
            ]);
            buf.set_line(area.x, y, &line, area.width);
            if self.hovered == Some(i) {
                buf.set_style(Rect::new(area.x, y, area.width, 1), Theme::selected_style());
            }
        }
    }
}

// ───────────────────────────────────────── stats ─────────────

pub struct StatsChart<'a> {
    title: &'a str,
    /// `(label, value)`; values are clamped into 0..=100 when drawn.
    bars: &'a [(&'a str, i64)],
    progress: f32,
}

impl<'a> StatsChart<'a> {
    pub fn new(title: &'a str, bars: &'a [(&'a str, i64)]) -> Self {
        Self {
            title,
            bars,
            progress: 1.0,
        }
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress;
        self
    }

    pub fn height(bars: &[(&str, i64)]) -> u16 {
        bars.len() as u16 + 1
    }
}

impl Widget for StatsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_stringn(
            area.x,
            area.y,
            self.title,
            area.width as usize,
            Theme::reveal(Theme::title_style(), self.progress),
        );
        let label_w = self
            .bars
            .iter()
            .map(|(l, _)| l.chars().count())
            .max()
            .unwrap_or(0) as u16
            + 1;
        // Room for " 100%".
        let track = area.width.saturating_sub(label_w + 5);
        for (i, (label, value)) in self.bars.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= area.bottom() {
                break;
            }
            let pct = bar_percent(*value);
            let shown = f32::from(pct) * self.progress.clamp(0.0, 1.0);
            let filled = (f32::from(track) * shown / 100.0).round() as u16;
            let color = Style::default().fg(Theme::chart_color(i));
            let line = Line::from(vec![
                Span::styled(format!("{label:<w$}", w = usize::from(label_w)), Theme::label_style()),
                Span::styled("█".repeat(usize::from(filled)), color),
                Span::styled("░".repeat(usize::from(track - filled)), Theme::muted_style()),
                Span::styled(format!("{pct:>4}%"), Theme::muted_style()),
            ]);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    fn pipeline() -> Vec<Slice> {
        vec![
            Slice::new("Accepted", 30),
            Slice::new("Shortlist", 10),
            Slice::new("Pending", 40),
            Slice::new("Rejected", 20),
        ]
    }

    #[test]
    fn donut_legend_counts_and_percent() {
        let data = pipeline();
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, DonutChart::height(&data)));
        DonutChart::new("Candidates", &data).render(buf.area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("Total 100"));
        assert_eq!(row_text(&buf, 2).chars().filter(|c| *c == '█').count(), 40);
        let legend = row_text(&buf, 4);
        assert!(legend.starts_with("■ Accepted"));
        assert!(legend.contains("30  30.0%"));
        assert!(row_text(&buf, 6).contains("40  40.0%"));
    }

    #[test]
    fn hovered_segment_stays_solid() {
        let data = pipeline();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, DonutChart::height(&data)));
        DonutChart::new("C", &data)
            .hovered(Some(2))
            .render(buf.area, &mut buf);
        // Accepted 3 cells, Shortlist 1, Pending 4, Rejected 2.
        assert_eq!(row_text(&buf, 2), "▒▒▒▒████▒▒");
    }

    #[test]
    fn legend_hit_testing() {
        let data = pipeline();
        let area = Rect::new(5, 5, 30, 8);
        assert_eq!(DonutChart::legend_hit(&data, area, 6, 9), Some(0));
        assert_eq!(DonutChart::legend_hit(&data, area, 6, 12), Some(3));
        assert_eq!(DonutChart::legend_hit(&data, area, 6, 8), None);
        assert_eq!(DonutChart::legend_hit(&data, area, 1, 9), None);
    }

    #[test]
    fn empty_donut_draws_no_ring() {
        let data = vec![Slice::new("a", 0)];
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 5));
        DonutChart::new("Empty", &data).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 2).trim(), "");
        assert!(row_text(&buf, 4).contains("0.0%"));
    }

    #[test]
    fn narrow_legend_truncates_labels_not_percent() {
        let data = pipeline();
        let mut buf = Buffer::empty(Rect::new(0, 0, 22, DonutChart::height(&data)));
        DonutChart::new("Candidates", &data).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 5).trim_end(), "■ Shortl    10  10.0%");
    }

    #[test]
    fn stats_bars_clamp() {
        let bars = [("Tech", 150), ("Comm", 50), ("Bad", -3)];
        let mut buf = Buffer::empty(Rect::new(0, 0, 25, 4));
        StatsChart::new("Skills", &bars).render(buf.area, &mut buf);
        // Label 5 wide, track 15.
        assert_eq!(row_text(&buf, 1), format!("Tech {} 100%", "█".repeat(15)));
        assert!(row_text(&buf, 2).ends_with("  50%"));
        assert_eq!(row_text(&buf, 3), format!("Bad  {}   0%", "░".repeat(15)));
    }
}
