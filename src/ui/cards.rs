//! Content cards.  Every card draws inside a rounded frame and fades in
//! with the reveal `progress` its owner passes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::badge::{BadgeColor, BadgeKind};

use super::badge::Badge;
use super::button::{Button, ButtonVariant};
use super::sidebar::initials;
use super::theme::Theme;

fn frame(progress: f32, focused: bool) -> Block<'static> {
    let border = if focused {
        Theme::focus_style()
    } else {
        Theme::border_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::reveal(border, progress))
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Reserve `width` cells at the right end of `*right`, leaving a one-cell
/// gap.  `None` when the row is full.
fn take_right(area: Rect, y: u16, right: &mut u16, width: u16) -> Option<Rect> {
    if width == 0 || *right < area.x + width {
        return None;
    }
    let x = *right - width;
    *right = x.saturating_sub(1);
    Some(Rect::new(x, y, width, 1))
}

// ───────────────────────────────────────── info ──────────────

pub struct InfoCard<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Sparkle marker for AI-generated content.
    pub ai: bool,
    pub progress: f32,
}

impl Widget for InfoCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame(self.progress, false);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }
        let mut title = vec![Span::styled(self.title, Theme::label_style().add_modifier(Modifier::BOLD))];
        if self.ai {
            title.push(Span::styled(" ✦ AI", Theme::accent_style()));
        }
        let text = vec![
            Line::from(title),
            Line::styled(self.description, Theme::muted_style()),
        ];
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .style(Theme::reveal(Style::default(), self.progress))
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── quick info ────────

pub struct QuickInfoCard<'a> {
    pub icon: &'a str,
    pub number: u64,
    pub title: &'a str,
    pub progress: f32,
}

impl Widget for QuickInfoCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame(self.progress, false);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }
        let number = Style::default()
            .fg(Theme::badge_color(BadgeColor::Purple))
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled(self.icon, Theme::accent_style()),
                Span::raw(" "),
                Span::styled(format_thousands(self.number), number),
            ]),
            Line::styled(self.title, Theme::muted_style()),
        ];
        Paragraph::new(lines)
            .style(Theme::reveal(Style::default(), self.progress))
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── action ────────────

pub struct ActionCard<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub caption: Option<&'a str>,
    pub badge: Option<(BadgeKind, &'a str)>,
    pub button: Option<&'a str>,
    pub description_title: Option<&'a str>,
    pub description_number: Option<u64>,
    pub content: &'a str,
    pub progress: f32,
}

impl Widget for ActionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame(self.progress, false);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }
        let progress = self.progress;
        let mut title_end = inner.right();
        if let Some(label) = self.button {
            let button = Button::new(label).variant(ButtonVariant::Secondary);
            if let Some(r) = take_right(inner, inner.y, &mut title_end, button.width()) {
                button.render(r, buf);
            }
        }
        if let Some((kind, variant)) = self.badge {
            let badge = Badge::of(kind, variant).progress(progress);
            if let Some(r) = take_right(inner, inner.y, &mut title_end, badge.width()) {
                badge.render(r, buf);
            }
        }
        let title_room = title_end.saturating_sub(inner.x) as usize;
        buf.set_stringn(
            inner.x,
            inner.y,
            self.title,
            title_room,
            Theme::reveal(Theme::label_style().add_modifier(Modifier::BOLD), progress),
        );

        let mut lines = Vec::new();
        let sub: Vec<&str> = [self.subtitle, self.caption].into_iter().flatten().collect();
        if !sub.is_empty() {
            lines.push(Line::styled(sub.join(" · "), Theme::muted_style()));
        }
        if let Some(t) = self.description_title {
            let mut spans = vec![Span::styled(format!("▸ {t}"), Theme::label_style())];
            if let Some(n) = self.description_number {
                spans.push(Span::styled(format!("  ({})", format_thousands(n)), Theme::accent_style()));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(self.content));
        let body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(1));
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Theme::reveal(Style::default(), progress))
            .render(body, buf);
    }
}

// ───────────────────────────────────────── entity ────────────

pub struct EntityCard<'a> {
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub caption: Option<&'a str>,
    pub badge: Option<(BadgeKind, &'a str)>,
    pub button: Option<&'a str>,
    /// `Some(saved)` shows the save star.
    pub saved: Option<bool>,
    /// Three `(label, value)` columns.
    pub columns: [(&'a str, &'a str); 3],
    pub description: Option<(&'a str, &'a str)>,
    pub progress: f32,
}

impl Widget for EntityCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame(self.progress, false);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }
        let progress = self.progress;

        // ── user + controls ─────────────────────────────────────
        let mut end = inner.right();
        if let Some(saved) = self.saved {
            let star = if saved { "★" } else { "☆" };
            if let Some(r) = take_right(inner, inner.y, &mut end, 1) {
                buf.set_stringn(r.x, r.y, star, 1, Theme::accent_style());
            }
        }
        if let Some(label) = self.button {
            let button = Button::new(label);
            if let Some(r) = take_right(inner, inner.y, &mut end, button.width()) {
                button.render(r, buf);
            }
        }
        if let Some((kind, variant)) = self.badge {
            let badge = Badge::of(kind, variant).progress(progress);
            if let Some(r) = take_right(inner, inner.y, &mut end, badge.width()) {
                badge.render(r, buf);
            }
        }
        let avatar = format!(" {} ", initials(self.user_name));
        let user = Line::from(vec![
            Span::styled(avatar, Theme::nav_active_style()),
            Span::raw(" "),
            Span::styled(self.user_name, Theme::label_style().add_modifier(Modifier::BOLD)),
        ]);
        buf.set_line(inner.x, inner.y, &user, end.saturating_sub(inner.x));
        let mut sub = self.user_email.to_string();
        if let Some(c) = self.caption {
            sub.push_str(" · ");
            sub.push_str(c);
        }
        buf.set_stringn(inner.x + 5, inner.y + 1, sub, inner.width.saturating_sub(5) as usize, Theme::muted_style());

        // ── columns ─────────────────────────────────────────────
        if inner.height < 4 {
            return;
        }
        let col_w = inner.width / 3;
        for (i, (label, value)) in self.columns.iter().enumerate() {
            let x = inner.x + col_w * i as u16;
            let room = col_w.saturating_sub(1) as usize;
            buf.set_stringn(x, inner.y + 2, *label, room, Theme::muted_style());
            buf.set_stringn(x, inner.y + 3, *value, room, Theme::reveal(Theme::label_style(), progress));
        }

        // ── description ─────────────────────────────────────────
        if let Some((title, content)) = self.description {
            if inner.height > 4 {
                let body = Rect::new(inner.x, inner.y + 4, inner.width, inner.height - 4);
                Paragraph::new(vec![
                    Line::styled(title, Theme::label_style().add_modifier(Modifier::BOLD)),
                    Line::styled(content, Theme::muted_style()),
                ])
                .wrap(Wrap { trim: true })
                .render(body, buf);
            }
        }
    }
}

// ───────────────────────────────────────── question ──────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Estimated-time choices, in minutes.
pub const ESTIMATED_MINUTES: &[u16] = &[5, 10, 15, 20, 30, 45];

pub const UNTITLED: &str = "Untitled Question";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionField {
    #[default]
    Title,
    Description,
    Difficulty,
    Time,
    Done,
    Remove,
}

impl QuestionField {
    const ORDER: &[QuestionField] = &[
        QuestionField::Title,
        QuestionField::Description,
        QuestionField::Difficulty,
        QuestionField::Time,
        QuestionField::Done,
        QuestionField::Remove,
    ];

    fn step(self, forward: bool) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let j = if forward {
            (i + 1).min(Self::ORDER.len() - 1)
        } else {
            i.saturating_sub(1)
        };
        Self::ORDER[j]
    }
}

/// What the owner should do after an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionEvent {
    None,
    Done,
    Remove,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionState {
    pub title: String,
    pub description: String,
    pub difficulty: Option<Difficulty>,
    /// Index into [`ESTIMATED_MINUTES`].
    pub time: Option<usize>,
    pub expanded: bool,
    pub field: QuestionField,
}

impl QuestionState {
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.field = QuestionField::Title;
    }

    pub fn time_label(&self) -> Option<String> {
        self.time
            .and_then(|i| ESTIMATED_MINUTES.get(i))
            .map(|m| format!("{m} minutes"))
    }

    /// Collapsed summary: title (or fallback) and the `time • difficulty`
    /// meta, either part omitted when unset.
    pub fn summary(&self) -> (&str, String) {
        let title = if self.title.is_empty() {
            UNTITLED
        } else {
            self.title.as_str()
        };
        let meta: Vec<String> = [self.time_label(), self.difficulty.map(|d| d.label().to_string())]
            .into_iter()
            .flatten()
            .collect();
        (title, meta.join(" • "))
    }

    pub fn next_field(&mut self) {
        self.field = self.field.step(true);
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.step(false);
    }

    pub fn push(&mut self, c: char) {
        match self.field {
            QuestionField::Title => self.title.push(c),
            QuestionField::Description => self.description.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            QuestionField::Title => {
                self.title.pop();
            }
            QuestionField::Description => {
                self.description.pop();
            }
            _ => {}
        }
    }

    /// Left/Right on a choice field.
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            QuestionField::Difficulty => {
                self.difficulty = Some(cycle_index(
                    self.difficulty.and_then(|d| Difficulty::ALL.iter().position(|x| *x == d)),
                    Difficulty::ALL.len(),
                    forward,
                ))
                .map(|i| Difficulty::ALL[i]);
            }
            QuestionField::Time => {
                self.time = Some(cycle_index(self.time, ESTIMATED_MINUTES.len(), forward));
            }
            _ => {}
        }
    }

    /// Enter on the focused field.
    pub fn activate(&mut self) -> QuestionEvent {
        match self.field {
            QuestionField::Done => {
                self.expanded = false;
                QuestionEvent::Done
            }
            QuestionField::Remove => QuestionEvent::Remove,
            QuestionField::Difficulty | QuestionField::Time => {
                self.cycle(true);
                QuestionEvent::None
            }
            QuestionField::Title | QuestionField::Description => {
                self.next_field();
                QuestionEvent::None
            }
        }
    }

    pub fn height(&self) -> u16 {
        if self.expanded {
            9
        } else {
            4
        }
    }
}

fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    }
}

pub struct QuestionCard<'a> {
    pub number: usize,
    pub state: &'a QuestionState,
    pub focused: bool,
    pub progress: f32,
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.state;
        let block = frame(self.progress, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }
        let chevron = if s.expanded { "▴" } else { "▾" };
        buf.set_stringn(
            inner.x,
            inner.y,
            format!("Question {}", self.number),
            inner.width as usize,
            Theme::label_style().add_modifier(Modifier::BOLD),
        );
        buf.set_stringn(inner.right() - 1, inner.y, chevron, 1, Theme::muted_style());

        if !s.expanded {
            if inner.height < 2 {
                return;
            }
            let (title, meta) = s.summary();
            let line = Line::from(vec![
                Span::styled(title, Theme::label_style()),
                Span::raw("  "),
                Span::styled(meta, Theme::muted_style()),
            ]);
            buf.set_line(inner.x, inner.y + 1, &line, inner.width.saturating_sub(2));
            buf.set_stringn(inner.right() - 1, inner.y + 1, "✕", 1, Theme::error_style());
            return;
        }

        let focus = |f: QuestionField| {
            if self.focused && s.field == f {
                Theme::focus_style()
            } else {
                Theme::label_style()
            }
        };
        let placeholder = |v: &str, p: &'static str| -> (String, Style) {
            if v.is_empty() {
                (p.to_string(), Theme::muted_style())
            } else {
                (v.to_string(), Theme::label_style())
            }
        };
        let (title, title_style) = placeholder(&s.title, "Two sum problem");
        let (desc, desc_style) = placeholder(&s.description, "Describe the problem");
        let difficulty = s.difficulty.map_or("Select", |d| d.label());
        let time = s.time_label().unwrap_or_else(|| "Select".into());
        let rows = vec![
            Line::from(vec![
                Span::styled("Question Title  ", focus(QuestionField::Title)),
                Span::styled(title, title_style),
            ]),
            Line::from(vec![
                Span::styled("Description     ", focus(QuestionField::Description)),
                Span::styled(desc, desc_style),
            ]),
            Line::from(vec![
                Span::styled("Difficulty      ", focus(QuestionField::Difficulty)),
                Span::styled(format!("‹ {difficulty} ›"), Theme::label_style()),
            ]),
            Line::from(vec![
                Span::styled("Estimated Time  ", focus(QuestionField::Time)),
                Span::styled(format!("‹ {time} ›"), Theme::label_style()),
            ]),
        ];
        for (i, line) in rows.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.bottom() {
                return;
            }
            buf.set_line(inner.x, y, line, inner.width);
        }
        let y = inner.y + 6;
        if y < inner.bottom() {
            let done = Button::new("Done")
                .focused(self.focused && s.field == QuestionField::Done);
            let done_w = done.width();
            done.render(Rect::new(inner.x, y, done_w, 1), buf);
            let remove = Button::new("Remove")
                .variant(ButtonVariant::Ghost)
                .left_icon("✕")
                .focused(self.focused && s.field == QuestionField::Remove);
            let remove_w = remove.width();
            remove.render(Rect::new(inner.x + done_w + 1, y, remove_w, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::{buffer_text, row_text};

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn quick_info_renders_number() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        QuickInfoCard {
            icon: "◎",
            number: 12450,
            title: "Applicants",
            progress: 1.0,
        }
        .render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 1), "│◎ 12,450          │");
        assert!(row_text(&buf, 2).contains("Applicants"));
    }

    #[test]
    fn info_card_ai_marker() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 4));
        InfoCard {
            title: "Summary",
            description: "Strong systems background",
            ai: true,
            progress: 1.0,
        }
        .render(buf.area, &mut buf);
        assert!(row_text(&buf, 1).contains("Summary ✦ AI"));
    }

    #[test]
    fn action_card_places_badge_and_button_right() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 5));
        ActionCard {
            title: "Frontend Developer",
            subtitle: Some("Remote"),
            caption: None,
            badge: Some((BadgeKind::JobStatus, "active")),
            button: Some("Remove"),
            description_title: Some("Applicants"),
            description_number: Some(1200),
            content: "",
            progress: 1.0,
        }
        .render(buf.area, &mut buf);
        let top = row_text(&buf, 1);
        assert!(top.starts_with("│Frontend Developer"));
        assert!(top.contains("Active"));
        assert!(top.trim_end_matches('│').trim_end().ends_with("Remove"));
        assert!(row_text(&buf, 3).contains("▸ Applicants  (1,200)"));
    }

    #[test]
    fn entity_card_columns() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 44, 7));
        EntityCard {
            user_name: "Kate Young",
            user_email: "kate@vu.io",
            caption: None,
            badge: None,
            button: Some("Edit"),
            saved: Some(true),
            columns: [("Score", "92"), ("Job", "UX"), ("Date", "Feb 7")],
            description: None,
            progress: 1.0,
        }
        .render(buf.area, &mut buf);
        let text = buffer_text(&buf);
        assert!(row_text(&buf, 1).starts_with("│ KY  Kate Young"));
        assert!(row_text(&buf, 1).contains("★"));
        assert!(text.contains("kate@vu.io"));
        assert!(row_text(&buf, 3).contains("Score"));
        assert!(row_text(&buf, 4).contains("92"));
    }

    #[test]
    fn question_summary_fallbacks() {
        let mut q = QuestionState::default();
        assert_eq!(q.summary(), (UNTITLED, String::new()));
        q.field = QuestionField::Time;
        q.cycle(true);
        assert_eq!(q.summary().1, "5 minutes");
        q.field = QuestionField::Difficulty;
        q.cycle(false);
        q.title = "Two sum".into();
        assert_eq!(q.summary(), ("Two sum", "5 minutes • Hard".to_string()));
    }

    #[test]
    fn question_editing_flow() {
        let mut q = QuestionState::default();
        q.toggle_expanded();
        for c in "FizzBuzz".chars() {
            q.push(c);
        }
        assert_eq!(q.activate(), QuestionEvent::None);
        assert_eq!(q.field, QuestionField::Description);
        q.next_field();
        q.next_field();
        q.next_field();
        assert_eq!(q.field, QuestionField::Done);
        assert_eq!(q.activate(), QuestionEvent::Done);
        assert!(!q.expanded);
        assert_eq!(q.title, "FizzBuzz");
        q.field = QuestionField::Remove;
        q.next_field();
        assert_eq!(q.field, QuestionField::Remove);
        assert_eq!(q.activate(), QuestionEvent::Remove);
    }

    #[test]
    fn collapsed_question_card() {
        let q = QuestionState {
            title: "Two sum".into(),
            difficulty: Some(Difficulty::Easy),
            time: Some(1),
            ..Default::default()
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 4));
        QuestionCard {
            number: 2,
            state: &q,
            focused: false,
            progress: 1.0,
        }
        .render(buf.area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("│Question 2"));
        assert!(row_text(&buf, 2).contains("Two sum  10 minutes • Easy"));
    }
}
