//! Multi-line text area and the file picker field.

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget},
};

use super::theme::Theme;

const MIN_ROWS: u16 = 4;
/// Auto-grow limit.
const MAX_ROWS: u16 = 10;

// ───────────────────────────────────────── textarea ──────────

#[derive(Debug, Clone, Default)]
pub struct TextareaState {
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub max_length: Option<usize>,
    /// Show the `n / max` counter.
    pub counter: bool,
    /// Grow with the content up to the row limit.
    pub auto_size: bool,
}

impl TextareaState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self.counter = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn auto_size(mut self) -> Self {
        self.auto_size = true;
        self
    }

    pub fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Input past `max_length` is dropped.
    pub fn push(&mut self, c: char) -> bool {
        if self.max_length.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Visible text rows for an inner width of `width` cells.
    pub fn rows(&self, width: u16) -> u16 {
        if !self.auto_size {
            return MIN_ROWS;
        }
        let lines = wrap(&self.value, width).len() as u16;
        lines.clamp(MIN_ROWS, MAX_ROWS)
    }

    /// Total height of the widget: label, bordered box.
    pub fn height(&self, width: u16) -> u16 {
        self.rows(width.saturating_sub(2)) + 3
    }

    fn counter_text(&self) -> Option<String> {
        let max = self.max_length?;
        self.counter.then(|| format!(" {} / {} ", self.char_count(), max))
    }
}

/// Hard-wrap at `width` cells, honouring newlines.
fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut out = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

pub struct Textarea<'a> {
    state: &'a TextareaState,
    focused: bool,
}

impl<'a> Textarea<'a> {
    pub fn new(state: &'a TextareaState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Textarea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 3 {
            return;
        }
        let s = self.state;
        buf.set_stringn(area.x, area.y, &s.label, area.width as usize, Theme::label_style());

        let box_area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::input_border_style(self.focused, false));
        if let Some(counter) = s.counter_text() {
            block = block.title_bottom(
                Line::styled(counter, Theme::muted_style()).alignment(Alignment::Right),
            );
        }
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        if s.value.is_empty() {
            buf.set_stringn(inner.x, inner.y, &s.placeholder, inner.width as usize, Theme::muted_style());
            return;
        }
        let lines = wrap(&s.value, inner.width);
        // Keep the end of the text in view.
        let skip = lines.len().saturating_sub(usize::from(inner.height));
        for (row, line) in lines.iter().skip(skip).enumerate() {
            let y = inner.y + row as u16;
            buf.set_stringn(inner.x, y, line, inner.width as usize, Theme::label_style());
        }
    }
}

// ───────────────────────────────────────── file input ────────

pub const NO_FILE: &str = "Choose file...";

/// File picker.  Activating it opens a path prompt; the chosen file's name
/// is shown in the field.
#[derive(Debug, Clone, Default)]
pub struct FileInputState {
    pub label: String,
    pub file_name: Option<String>,
    /// Path being typed, while the prompt is open.
    pub draft: Option<String>,
}

impl FileInputState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn begin(&mut self) {
        self.draft = Some(String::new());
    }

    pub fn push(&mut self, c: char) {
        if let Some(d) = self.draft.as_mut() {
            d.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(d) = self.draft.as_mut() {
            d.pop();
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Accept the typed path; an empty prompt keeps the previous choice.
    pub fn commit(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        let name = Path::new(draft.trim())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        if name.is_some() {
            self.file_name = name;
        }
    }

    pub fn display(&self) -> &str {
        self.file_name.as_deref().unwrap_or(NO_FILE)
    }
}

pub struct FileInput<'a> {
    state: &'a FileInputState,
    focused: bool,
}

impl<'a> FileInput<'a> {
    pub fn new(state: &'a FileInputState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for FileInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let s = self.state;
        buf.set_stringn(area.x, area.y, &s.label, area.width as usize, Theme::label_style());
        if area.height < 2 {
            return;
        }
        let y = area.y + 1;
        let (x, _) = buf.set_stringn(area.x, y, " Browse ", area.width as usize, Theme::secondary_style());
        let room = area.right().saturating_sub(x + 1) as usize;
        match &s.draft {
            Some(d) => {
                let (end, _) = buf.set_stringn(x + 1, y, d, room, Theme::label_style());
                if end < area.right() {
                    buf.set_stringn(end, y, "▏", 1, Theme::focus_style());
                }
            }
            None => {
                let style = if s.file_name.is_some() {
                    Theme::label_style()
                } else {
                    Theme::muted_style()
                };
                buf.set_stringn(x + 1, y, s.display(), room, style);
            }
        }
        if self.focused {
            buf.set_style(Rect::new(area.x, y, area.width, 1), Theme::focus_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn input_truncates_at_max_length() {
        let mut t = TextareaState::new("Notes").with_max_length(5);
        for c in "abcdefg".chars() {
            t.push(c);
        }
        assert_eq!(t.value, "abcde");
        assert_eq!(t.counter_text().as_deref(), Some(" 5 / 5 "));
    }

    #[test]
    fn auto_size_grows_between_bounds() {
        let mut t = TextareaState::new("Notes").auto_size();
        assert_eq!(t.rows(10), MIN_ROWS);
        t.value = "x".repeat(55);
        assert_eq!(t.rows(10), 6);
        t.value = "x".repeat(500);
        assert_eq!(t.rows(10), MAX_ROWS);
        let fixed = TextareaState::new("Notes");
        assert_eq!(fixed.rows(1), MIN_ROWS);
    }

    #[test]
    fn wrap_honours_newlines() {
        assert_eq!(wrap("abcd\n\nef", 3), vec!["abc", "d", "", "ef"]);
    }

    #[test]
    fn renders_counter_on_bottom_border() {
        let mut t = TextareaState::new("Bio").with_max_length(200);
        t.push('h');
        t.push('i');
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 7));
        Textarea::new(&t).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim_end(), "Bio");
        assert!(row_text(&buf, 2).starts_with("│hi"));
        assert!(row_text(&buf, 6).contains(" 2 / 200 "));
    }

    #[test]
    fn file_input_shows_placeholder_then_name() {
        let mut f = FileInputState::new("Resume");
        assert_eq!(f.display(), NO_FILE);
        f.begin();
        f.commit();
        assert_eq!(f.display(), NO_FILE);
        f.begin();
        for c in "/home/kate/cv.pdf".chars() {
            f.push(c);
        }
        f.commit();
        assert_eq!(f.display(), "cv.pdf");

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 2));
        FileInput::new(&f).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 1), " Browse  cv.pdf     ");
    }
}
