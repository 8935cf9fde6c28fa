//! Showcase page: a scrolling document of every component.
//!
//! The page is laid out in document coordinates (line 0 is the top of the
//! page), drawn into an off-screen buffer, and the rows under the viewport
//! are copied into the frame.  Popovers are drawn last into the same
//! document, so they scroll with their anchor.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::app::showcase::{Section, ShowcaseState, Slot, BREADCRUMB_DEMO, TAB_LABELS};
use crate::core::badge::BadgeKind;
use crate::core::reveal::visible_fraction;

use super::badge::{Badge, RoleBadge};
use super::breadcrumb::Breadcrumb;
use super::button::{Button, ButtonVariant};
use super::cards::{ActionCard, EntityCard, InfoCard, QuestionCard, QuickInfoCard};
use super::charts::{DonutChart, StatsChart};
use super::dropdown::Dropdown;
use super::inputs::{InputField, INPUT_HEIGHT};
use super::pagination::Pagination;
use super::tabs::Tabs;
use super::tags::Tags;
use super::textarea::{FileInput, Textarea};
use super::theme::Theme;
use super::toggle::Toggle;

/// Widest a single-column element gets.
const COLUMN: u16 = 64;
const HEADING_HEIGHT: u16 = 2;

fn demo_button(slot: Slot) -> Option<Button<'static>> {
    // The variant row is labelled by variant name.
    let variant = |label: &'static str| {
        Button::new(label).variant(ButtonVariant::from_name(&label.to_ascii_lowercase()))
    };
    Some(match slot {
        Slot::PrimaryButton => variant("Primary").left_icon("+"),
        Slot::SecondaryButton => variant("Secondary"),
        Slot::GhostButton => variant("Ghost").right_icon("→"),
        Slot::DisabledButton => variant("Disabled").disabled(true),
        Slot::AddQuestion => Button::new("Add question")
            .variant(ButtonVariant::Secondary)
            .left_icon("+"),
        _ => return None,
    })
}

// ───────────────────────────────────────── layout ────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseLayout {
    /// Slots in document order, in document coordinates.
    pub slots: Vec<(Slot, Rect)>,
    /// `(section, top, height)`.
    pub sections: Vec<(Section, u16, u16)>,
    pub width: u16,
    pub height: u16,
}

struct Flow {
    y: u16,
    slots: Vec<(Slot, Rect)>,
    tops: Vec<(Section, u16)>,
}

impl Flow {
    fn place(&mut self, slot: Slot, x: u16, width: u16, height: u16) {
        self.slots.push((slot, Rect::new(x, self.y, width, height)));
    }

    /// Move below a row of `height` lines, leaving a blank line.
    fn advance(&mut self, height: u16) {
        self.y += height + 1;
    }

    fn heading(&mut self, section: Section, width: u16) {
        self.tops.push((section, self.y));
        self.place(Slot::Heading(section), 0, width, HEADING_HEIGHT);
        self.y += HEADING_HEIGHT;
    }
}

impl ShowcaseLayout {
    pub fn compute(state: &ShowcaseState, width: u16) -> Self {
        let col = width.min(COLUMN);
        let mut f = Flow {
            y: 0,
            slots: Vec::new(),
            tops: Vec::new(),
        };

        f.heading(Section::Controls, width);
        let mut x = 0;
        for slot in [
            Slot::PrimaryButton,
            Slot::SecondaryButton,
            Slot::GhostButton,
            Slot::DisabledButton,
        ] {
            let w = demo_button(slot).map_or(0, |b| b.width());
            f.place(slot, x, w, 1);
            x += w + 2;
        }
        f.advance(1);
        f.place(Slot::Toggle, 0, 24, 1);
        f.place(Slot::DisabledToggle, 26, 24, 1);
        f.advance(1);
        f.place(Slot::Badges, 0, width, 2);
        f.advance(2);
        f.place(Slot::RoleBadge, 0, 14, 1);
        f.advance(1);

        f.heading(Section::Navigation, width);
        f.place(Slot::Breadcrumb, 0, col, 1);
        f.advance(1);
        f.place(Slot::Tabs, 0, col, 1);
        f.advance(1);
        f.place(Slot::Pagination, 0, col, 1);
        f.advance(1);

        f.heading(Section::Inputs, width);
        for slot in [
            Slot::TextInput,
            Slot::EmailInput,
            Slot::PasswordInput,
            Slot::SearchInput,
        ] {
            f.place(slot, 0, col, INPUT_HEIGHT);
            f.advance(INPUT_HEIGHT);
        }
        f.place(Slot::Dropdown, 0, col, 2);
        f.advance(2);
        let textarea_h = state.textarea.height(col);
        f.place(Slot::Textarea, 0, col, textarea_h);
        f.advance(textarea_h);
        f.place(Slot::FileInput, 0, col, 2);
        f.advance(2);
        f.place(Slot::Tags, 0, width, 1);
        f.advance(1);

        f.heading(Section::Cards, width);
        f.place(Slot::QuickInfo, 0, width.min(COLUMN + 12), 4);
        f.advance(4);
        f.place(Slot::InfoCard, 0, col, 4);
        f.advance(4);
        f.place(Slot::ActionCard, 0, col, 7);
        f.advance(7);
        f.place(Slot::EntityCard, 0, col, 8);
        f.advance(8);
        for (i, q) in state.questions.iter().enumerate() {
            f.place(Slot::Question(i), 0, col, q.height());
            f.advance(q.height());
        }
        let add_w = demo_button(Slot::AddQuestion).map_or(0, |b| b.width());
        f.place(Slot::AddQuestion, 0, add_w, 1);
        f.advance(1);

        f.heading(Section::Charts, width);
        let donut_h = DonutChart::height(&state.donut);
        f.place(Slot::Donut, 0, col, donut_h);
        f.advance(donut_h);
        let stats_h = StatsChart::height(&state.stats);
        f.place(Slot::Stats, 0, col, stats_h);
        f.advance(stats_h);

        let height = f.y;
        let sections = f
            .tops
            .iter()
            .enumerate()
            .map(|(i, &(section, top))| {
                let end = f.tops.get(i + 1).map_or(height, |&(_, t)| t);
                (section, top, end - top)
            })
            .collect();
        Self {
            slots: f.slots,
            sections,
            width,
            height,
        }
    }

    pub fn rect(&self, slot: Slot) -> Option<Rect> {
        self.slots.iter().find(|(s, _)| *s == slot).map(|(_, r)| *r)
    }

    /// Tab order.
    pub fn focus_order(&self) -> Vec<Slot> {
        self.slots
            .iter()
            .map(|(s, _)| *s)
            .filter(|s| s.focusable())
            .collect()
    }

    /// Slot under a document position.
    pub fn slot_at(&self, x: u16, y: u16) -> Option<(Slot, Rect)> {
        self.slots
            .iter()
            .find(|(_, r)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .copied()
    }

    pub fn section_top(&self, section: Section) -> u16 {
        self.sections
            .iter()
            .find(|(s, _, _)| *s == section)
            .map_or(0, |(_, top, _)| *top)
    }

    pub fn max_scroll(&self, viewport: u16) -> u16 {
        self.height.saturating_sub(viewport)
    }

    /// Section whose span contains the top of the viewport.
    pub fn section_at(&self, scroll: u16) -> Section {
        self.sections
            .iter()
            .rev()
            .find(|(_, top, _)| *top <= scroll)
            .map_or(Section::Controls, |(s, _, _)| *s)
    }

    /// Visible fraction of each section for a viewport of `viewport` lines
    /// starting at `scroll`.
    pub fn visibility(&self, scroll: u16, viewport: u16) -> Vec<(Section, f32)> {
        self.sections
            .iter()
            .map(|&(s, top, h)| {
                (s, visible_fraction(i32::from(top) - i32::from(scroll), h, viewport))
            })
            .collect()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// The scroll offset that brings `rect` fully into a viewport of `viewport`
/// lines, changing `scroll` as little as possible.
pub fn scroll_into_view(scroll: u16, rect: Rect, viewport: u16) -> u16 {
    if rect.y < scroll {
        rect.y
    } else if rect.bottom() > scroll + viewport {
        rect.bottom().saturating_sub(viewport).min(rect.y)
    } else {
        scroll
    }
}

// ───────────────────────────────────────── render ────────────

/// Render the page into `area`.
pub fn render(state: &ShowcaseState, layout: &ShowcaseLayout, area: Rect, buf: &mut Buffer) {
    if area.is_empty() || layout.height == 0 {
        return;
    }
    let mut doc = Buffer::empty(layout.bounds());
    for &(slot, rect) in &layout.slots {
        render_slot(state, slot, rect, &mut doc);
    }
    // Popovers last so they sit above later rows.
    if let Some(rect) = layout.rect(Slot::Dropdown) {
        Dropdown::new(&state.dropdown)
            .focused(state.focus == Some(Slot::Dropdown))
            .render_with_menu(rect, doc.area, &mut doc);
    }
    if let Some(rect) = layout.rect(Slot::RoleBadge) {
        RoleBadge::new(&state.role)
            .focused(state.focus == Some(Slot::RoleBadge))
            .render_with_menu(rect, doc.area, &mut doc);
    }

    let rows = area.height.min(layout.height.saturating_sub(state.scroll));
    let cols = area.width.min(layout.width);
    for dy in 0..rows {
        for dx in 0..cols {
            buf[(area.x + dx, area.y + dy)] = doc[(dx, state.scroll + dy)].clone();
        }
    }
}

fn section_of(state: &ShowcaseState, slot: Slot) -> f32 {
    let section = match slot {
        Slot::Heading(s) => s,
        Slot::PrimaryButton
        | Slot::SecondaryButton
        | Slot::GhostButton
        | Slot::DisabledButton
        | Slot::Toggle
        | Slot::DisabledToggle
        | Slot::Badges
        | Slot::RoleBadge => Section::Controls,
        Slot::Breadcrumb | Slot::Tabs | Slot::Pagination => Section::Navigation,
        Slot::TextInput
        | Slot::EmailInput
        | Slot::PasswordInput
        | Slot::SearchInput
        | Slot::Dropdown
        | Slot::Textarea
        | Slot::FileInput
        | Slot::Tags => Section::Inputs,
        Slot::QuickInfo
        | Slot::InfoCard
        | Slot::ActionCard
        | Slot::EntityCard
        | Slot::Question(_)
        | Slot::AddQuestion => Section::Cards,
        Slot::Donut | Slot::Stats => Section::Charts,
    };
    state.progress(section)
}

fn render_slot(state: &ShowcaseState, slot: Slot, rect: Rect, buf: &mut Buffer) {
    let focused = state.focus == Some(slot);
    let progress = section_of(state, slot);
    match slot {
        Slot::Heading(section) => {
            buf.set_stringn(
                rect.x,
                rect.y,
                section.title(),
                rect.width as usize,
                Theme::reveal(Theme::title_style(), progress),
            );
            let rule = "─".repeat(usize::from(rect.width));
            buf.set_stringn(rect.x, rect.y + 1, rule, rect.width as usize, Theme::border_style());
        }
        Slot::PrimaryButton
        | Slot::SecondaryButton
        | Slot::GhostButton
        | Slot::DisabledButton
        | Slot::AddQuestion => {
            if let Some(b) = demo_button(slot) {
                b.focused(focused).render(rect, buf);
            }
        }
        Slot::Toggle => Toggle::new(&state.toggle, "Email alerts")
            .focused(focused)
            .render(rect, buf),
        Slot::DisabledToggle => Toggle::new(&state.disabled_toggle, "Locked").render(rect, buf),
        Slot::Badges => render_badges(rect, progress, buf),
        Slot::RoleBadge => {}
        Slot::Breadcrumb => Breadcrumb::new(BREADCRUMB_DEMO).render(rect, buf),
        Slot::Tabs => Tabs::new(TAB_LABELS, state.tabs.active())
            .focused(focused)
            .render(rect, buf),
        Slot::Pagination => {
            let total = state.pager.total_pages(0);
            Pagination::new(state.pager.current(), total, &state.page_input).render(rect, buf);
        }
        Slot::TextInput => InputField::new(&state.text).focused(focused).render(rect, buf),
        Slot::EmailInput => InputField::new(&state.email).focused(focused).render(rect, buf),
        Slot::PasswordInput => InputField::new(&state.password).focused(focused).render(rect, buf),
        Slot::SearchInput => InputField::new(&state.search).focused(focused).render(rect, buf),
        Slot::Dropdown => {}
        Slot::Textarea => Textarea::new(&state.textarea).focused(focused).render(rect, buf),
        Slot::FileInput => FileInput::new(&state.file).focused(focused).render(rect, buf),
        Slot::Tags => Tags::new(&state.tags).focused(focused).render(rect, buf),
        Slot::QuickInfo => render_quick_info(rect, progress, buf),
        Slot::InfoCard => InfoCard {
            title: "Candidate summary",
            description: "Strong frontend fundamentals; fast, well-tested solutions in the live round.",
            ai: true,
            progress,
        }
        .render(rect, buf),
        Slot::ActionCard => ActionCard {
            title: "Frontend Developer",
            subtitle: Some("Remote"),
            caption: Some("Posted 3 days ago"),
            badge: Some((BadgeKind::JobStatus, "active")),
            button: Some("Remove"),
            description_title: Some("Applicants"),
            description_number: Some(1200),
            content: "Build delightful interfaces with React and TypeScript.",
            progress,
        }
        .render(rect, buf),
        Slot::EntityCard => EntityCard {
            user_name: "Kate Young",
            user_email: "kate.young@mail.com",
            caption: Some("Applied Feb 7, 2025"),
            badge: Some((BadgeKind::CandidateState, "accepted")),
            button: Some("Edit"),
            saved: Some(state.saved),
            columns: [("Job", "Frontend Developer"), ("Score", "92"), ("Anti-cheat", "Clean")],
            description: Some(("Notes", "Great portfolio. Schedule a follow-up call.")),
            progress,
        }
        .render(rect, buf),
        Slot::Question(i) => {
            if let Some(q) = state.questions.get(i) {
                QuestionCard {
                    number: i + 1,
                    state: q,
                    focused,
                    progress,
                }
                .render(rect, buf);
            }
        }
        Slot::Donut => DonutChart::new("Applicants by stage", &state.donut)
            .hovered(state.hovered)
            .progress(progress)
            .render(rect, buf),
        Slot::Stats => StatsChart::new("Assessment scores", &state.stats)
            .progress(progress)
            .render(rect, buf),
    }
}

fn render_badges(rect: Rect, progress: f32, buf: &mut Buffer) {
    let catalogue = |kinds: &[BadgeKind]| -> Vec<Badge<'static>> {
        kinds
            .iter()
            .flat_map(|kind| kind.variants())
            .map(|spec| Badge::new(Some(spec)))
            .collect()
    };
    let mut first = catalogue(&[BadgeKind::CandidateState]);
    // Overridden label and icons.
    first.push(
        Badge::of(BadgeKind::CandidateState, "shortlist")
            .label("Top pick")
            .right_icon("↗"),
    );
    first.push(Badge::of(BadgeKind::CheatingFlag, "clean").left_icon(false));
    let rows = [first, catalogue(&[BadgeKind::CheatingFlag, BadgeKind::JobStatus])];

    for (dy, badges) in rows.into_iter().enumerate() {
        let y = rect.y + dy as u16;
        if y >= rect.bottom() {
            break;
        }
        let mut x = rect.x;
        for badge in badges {
            let badge = badge.progress(progress);
            let w = badge.width();
            if x + w > rect.right() {
                break;
            }
            badge.render(Rect::new(x, y, w, 1), buf);
            x += w + 1;
        }
    }
}

fn render_quick_info(rect: Rect, progress: f32, buf: &mut Buffer) {
    let items: [(&str, u64, &str); 3] = [
        ("◎", 1200, "Applicants"),
        ("✓", 45, "Hired"),
        ("⧗", 12450, "Minutes assessed"),
    ];
    let w = rect.width / items.len() as u16;
    for (i, (icon, number, title)) in items.into_iter().enumerate() {
        let x = rect.x + w * i as u16;
        QuickInfoCard {
            icon,
            number,
            title,
            progress,
        }
        .render(Rect::new(x, rect.y, w.saturating_sub(1), rect.height), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn sections_are_contiguous() {
        let state = ShowcaseState::new(false);
        let layout = ShowcaseLayout::compute(&state, 80);
        assert_eq!(layout.sections.len(), Section::ALL.len());
        let mut expected_top = 0;
        for &(_, top, h) in &layout.sections {
            assert_eq!(top, expected_top);
            expected_top = top + h;
        }
        assert_eq!(expected_top, layout.height);
        assert_eq!(layout.section_at(layout.section_top(Section::Cards)), Section::Cards);
    }

    #[test]
    fn focus_order_skips_static_slots() {
        let state = ShowcaseState::new(false);
        let layout = ShowcaseLayout::compute(&state, 80);
        let order = layout.focus_order();
        assert_eq!(order.first(), Some(&Slot::PrimaryButton));
        assert!(!order.contains(&Slot::DisabledButton));
        assert!(!order.contains(&Slot::Badges));
        assert!(order.contains(&Slot::Question(0)));
        assert_eq!(order.last(), Some(&Slot::AddQuestion));
    }

    #[test]
    fn expanding_a_question_pushes_later_slots_down() {
        let mut state = ShowcaseState::new(false);
        let before = ShowcaseLayout::compute(&state, 80);
        state.questions[0].toggle_expanded();
        let after = ShowcaseLayout::compute(&state, 80);
        let grow = state.questions[0].height() - 4;
        assert_eq!(
            after.rect(Slot::Donut).map(|r| r.y),
            before.rect(Slot::Donut).map(|r| r.y + grow)
        );
    }

    #[test]
    fn scroll_into_view_moves_minimally() {
        let r = Rect::new(0, 30, 10, 3);
        assert_eq!(scroll_into_view(0, r, 20), 13);
        assert_eq!(scroll_into_view(40, r, 20), 30);
        assert_eq!(scroll_into_view(20, r, 20), 20);
    }

    #[test]
    fn viewport_shows_scrolled_rows() {
        let mut state = ShowcaseState::new(false);
        let layout = ShowcaseLayout::compute(&state, 80);
        state.scroll = layout.section_top(Section::Inputs);
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 10));
        render(&state, &layout, buf.area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("Inputs"));
        assert!(row_text(&buf, 2).starts_with("Full name *"));
    }

    #[test]
    fn badge_row_shows_overrides() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 2));
        render_badges(buf.area, 1.0, &mut buf);
        let first = row_text(&buf, 0);
        assert!(first.starts_with(" ✔ Accepted "));
        assert!(first.contains(" ★ Top pick ↗ "));
        assert!(first.trim_end().ends_with(" Clean"));
        assert!(!first.contains('◆'));
        assert!(row_text(&buf, 1).starts_with(" ◆ Clean "));
    }

    #[test]
    fn hidden_sections_start_dim_and_become_visible() {
        let state = ShowcaseState::new(true);
        let layout = ShowcaseLayout::compute(&state, 80);
        let vis = layout.visibility(0, 20);
        assert_eq!(vis[0].0, Section::Controls);
        assert!(vis[0].1 >= 0.2);
        assert_eq!(vis.last().map(|v| v.1), Some(0.0));
    }
}
