//! Single-line inputs: text, e-mail, password and search.
//!
//! Every field renders three lines: label, value line, hint.  The value line
//! may carry a trailing action glyph (reveal for passwords, clear for
//! search) that [`InputField::action_hit`] reports.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::validate::{is_valid_email, INVALID_EMAIL_HINT};

use super::theme::Theme;

pub const INPUT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Search,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub kind: InputKind,
    pub label: String,
    pub placeholder: String,
    hint: Option<String>,
    pub required: bool,
    pub value: String,
    pub error: bool,
    /// Password shown in clear text.
    pub revealed: bool,
}

impl InputState {
    pub fn new(kind: InputKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        self.value.pop();
        self.revalidate();
    }

    /// Search fields: the clear action.
    pub fn clear(&mut self) {
        self.value.clear();
        self.revalidate();
    }

    pub fn toggle_reveal(&mut self) {
        if self.kind == InputKind::Password {
            self.revealed = !self.revealed;
        }
    }

    /// Trailing action glyph (reveal toggle, clear).
    pub fn activate_action(&mut self) {
        match self.kind {
            InputKind::Password => self.toggle_reveal(),
            InputKind::Search => self.clear(),
            InputKind::Text | InputKind::Email => {}
        }
    }

    /// Focus left the field: e-mail fields validate now.
    pub fn blur(&mut self) {
        if self.kind == InputKind::Email {
            self.error = !is_valid_email(&self.value);
        }
    }

    /// An edit can only clear an error, never raise one.
    fn revalidate(&mut self) {
        if self.kind == InputKind::Email && self.error && is_valid_email(&self.value) {
            self.error = false;
        }
    }

    /// Hint line currently shown.
    pub fn hint(&self) -> Option<&str> {
        if self.error && self.kind == InputKind::Email {
            Some(INVALID_EMAIL_HINT)
        } else {
            self.hint.as_deref()
        }
    }

    fn action_glyph(&self) -> Option<&'static str> {
        match self.kind {
            InputKind::Password if self.revealed => Some("◎"),
            InputKind::Password => Some("◉"),
            InputKind::Search if !self.value.is_empty() => Some("×"),
            _ => None,
        }
    }

    fn shown_value(&self) -> String {
        if self.kind == InputKind::Password && !self.revealed {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

pub struct InputField<'a> {
    state: &'a InputState,
    focused: bool,
}

impl<'a> InputField<'a> {
    pub fn new(state: &'a InputState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// `true` when `(col, row)` is the trailing action glyph of a field
    /// drawn at `area`.
    pub fn action_hit(state: &InputState, area: Rect, col: u16, row: u16) -> bool {
        state.action_glyph().is_some()
            && area.width >= 2
            && row == area.y + 1
            && col == area.right() - 2
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let s = self.state;

        // ── label ───────────────────────────────────────────────
        let mut label = vec![Span::styled(s.label.as_str(), Theme::label_style())];
        if s.required {
            label.push(Span::styled(" *", Theme::error_style()));
        }
        buf.set_line(area.x, area.y, &Line::from(label), area.width);

        // ── value line ─────────────────────────────────────────
        if area.height < 2 {
            return;
        }
        let y = area.y + 1;
        let border = Theme::input_border_style(self.focused, s.error);
        buf.set_style(
            Rect::new(area.x, y, area.width, 1),
            border.add_modifier(Modifier::UNDERLINED),
        );
        let mut x = area.x;
        if s.kind == InputKind::Search {
            let (end, _) = buf.set_stringn(x, y, "⌕ ", area.width as usize, Theme::muted_style());
            x = end;
        }
        let room = area.right().saturating_sub(x).saturating_sub(3) as usize;
        if s.value.is_empty() {
            buf.set_stringn(x, y, &s.placeholder, room, Theme::muted_style());
        } else {
            let shown = s.shown_value();
            // Keep the tail visible when the value overflows.
            let skip = shown.chars().count().saturating_sub(room);
            let tail: String = shown.chars().skip(skip).collect();
            let (end, _) = buf.set_stringn(x, y, &tail, room, Theme::label_style());
            if self.focused && end < area.right() {
                buf.set_stringn(end, y, "▏", 1, Theme::focus_style());
            }
        }
        if let Some(glyph) = s.action_glyph() {
            if area.width >= 2 {
                buf.set_stringn(area.right() - 2, y, glyph, 1, Theme::muted_style());
            }
        }

        // ── hint ───────────────────────────────────────────────
        if area.height < 3 {
            return;
        }
        if let Some(hint) = s.hint() {
            let style = if s.error {
                Theme::error_style()
            } else {
                Theme::muted_style()
            };
            buf.set_stringn(area.x, area.y + 2, hint, area.width as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    fn typed(kind: InputKind, text: &str) -> InputState {
        let mut s = InputState::new(kind, "Field").with_hint("We never share it");
        for c in text.chars() {
            s.push(c);
        }
        s
    }

    #[test]
    fn email_error_set_on_blur_and_cleared_by_valid_edit() {
        let mut s = typed(InputKind::Email, "kate@vu");
        assert!(!s.error, "no error while typing");
        s.blur();
        assert!(s.error);
        assert_eq!(s.hint(), Some(INVALID_EMAIL_HINT));
        s.push('.');
        assert!(s.error, "still invalid");
        s.push('i');
        s.push('o');
        assert!(!s.error);
        assert_eq!(s.hint(), Some("We never share it"));
    }

    #[test]
    fn empty_email_is_valid_on_blur() {
        let mut s = typed(InputKind::Email, "");
        s.blur();
        assert!(!s.error);
    }

    #[test]
    fn blur_clears_error_once_fixed() {
        let mut s = typed(InputKind::Email, "a@b");
        s.blur();
        s.clear();
        s.blur();
        assert!(!s.error);
    }

    #[test]
    fn password_masks_until_revealed() {
        let mut s = typed(InputKind::Password, "hunter2");
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 3));
        InputField::new(&s).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 1), "•••••••     ◉ ");
        s.activate_action();
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 3));
        InputField::new(&s).render(buf.area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("hunter2"));
    }

    #[test]
    fn search_clear_action() {
        let mut s = typed(InputKind::Search, "lina");
        let area = Rect::new(0, 0, 20, 3);
        assert!(InputField::action_hit(&s, area, 18, 1));
        assert!(!InputField::action_hit(&s, area, 17, 1));
        s.activate_action();
        assert!(s.value.is_empty());
        assert!(!InputField::action_hit(&s, area, 18, 1));
    }

    #[test]
    fn renders_required_marker_placeholder_and_hint() {
        let s = InputState::new(InputKind::Text, "Full name")
            .required()
            .with_placeholder("Jane Doe")
            .with_hint("As on your ID");
        let mut buf = Buffer::empty(Rect::new(0, 0, 16, 3));
        InputField::new(&s).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), "Full name *     ");
        assert_eq!(row_text(&buf, 1), "Jane Doe        ");
        assert_eq!(row_text(&buf, 2), "As on your ID   ");
    }
}
