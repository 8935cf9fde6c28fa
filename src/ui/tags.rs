//! Editable tag list.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsState {
    pub tags: Vec<String>,
    pub editable: bool,
    /// `Some` while the add box is open.
    pub draft: Option<String>,
}

impl TagsState {
    pub fn new(tags: &[&str], editable: bool) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            editable,
            draft: None,
        }
    }

    pub fn is_adding(&self) -> bool {
        self.draft.is_some()
    }

    pub fn start_adding(&mut self) {
        if self.editable && self.draft.is_none() {
            self.draft = Some(String::new());
        }
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

    /// Add the trimmed draft if non-empty.  The box stays open for the
    /// next tag.
    pub fn commit(&mut self) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let tag = draft.trim().to_string();
        draft.clear();
        if tag.is_empty() {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Escape: drop the draft and close the box.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (self.editable && index < self.tags.len()).then(|| self.tags.remove(index))
    }
}

pub struct Tags<'a> {
    state: &'a TagsState,
    focused: bool,
}

/// Element of the rendered strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTarget {
    Remove(usize),
    Add,
}

impl<'a> Tags<'a> {
    pub fn new(state: &'a TagsState) -> Self {
        Self {
            state,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn chips(&self) -> Vec<(String, Option<TagTarget>)> {
        let mut out: Vec<(String, Option<TagTarget>)> = self
            .state
            .tags
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if self.state.editable {
                    (format!(" {t} ×"), Some(TagTarget::Remove(i)))
                } else {
                    (format!(" {t} "), None)
                }
            })
            .collect();
        if self.state.editable {
            let add = match &self.state.draft {
                Some(d) => format!(" {d}▏"),
                None => " + Add ".to_string(),
            };
            out.push((add, Some(TagTarget::Add)));
        }
        out
    }

    /// Target under `col`; the `×` of a chip removes it.
    pub fn hit(&self, area: Rect, col: u16) -> Option<TagTarget> {
        let mut x = area.x;
        for (text, target) in self.chips() {
            let w = text.chars().count() as u16;
            if col >= x && col < x + w {
                return match target {
                    Some(TagTarget::Remove(i)) if col == x + w - 1 => Some(TagTarget::Remove(i)),
                    Some(TagTarget::Add) => Some(TagTarget::Add),
                    _ => None,
                };
            }
            x += w + 1;
        }
        None
    }
}

impl Widget for Tags<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut x = area.x;
        for (text, target) in self.chips() {
            if x >= area.right() {
                break;
            }
            let style = match target {
                Some(TagTarget::Add) if self.state.is_adding() || self.focused => {
                    Theme::focus_style()
                }
                Some(TagTarget::Add) => Theme::muted_style(),
                _ => Theme::secondary_style(),
            };
            let (end, _) = buf.set_stringn(x, area.y, &text, (area.right() - x) as usize, style);
            x = end + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn add_trims_and_keeps_box_open() {
        let mut t = TagsState::new(&["React"], true);
        t.start_adding();
        for c in "  Rust ".chars() {
            t.push(c);
        }
        assert!(t.commit());
        assert_eq!(t.tags, vec!["React", "Rust"]);
        assert!(t.is_adding());
        assert!(!t.commit(), "empty draft is ignored");
        t.push('x');
        t.cancel();
        assert!(!t.is_adding());
        assert_eq!(t.tags.len(), 2);
    }

    #[test]
    fn read_only_tags_cannot_change() {
        let mut t = TagsState::new(&["React"], false);
        t.start_adding();
        assert!(!t.is_adding());
        assert_eq!(t.remove(0), None);
    }

    #[test]
    fn remove_by_index() {
        let mut t = TagsState::new(&["a", "b", "c"], true);
        assert_eq!(t.remove(1).as_deref(), Some("b"));
        assert_eq!(t.remove(5), None);
        assert_eq!(t.tags, vec!["a", "c"]);
    }

    #[test]
    fn renders_and_hits_chips() {
        let t = TagsState::new(&["Go", "Rust"], true);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 1));
        Tags::new(&t).render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), " Go ×  Rust ×  + Add    ");
        let tags = Tags::new(&t);
        assert_eq!(tags.hit(buf.area, 4), Some(TagTarget::Remove(0)));
        assert_eq!(tags.hit(buf.area, 1), None);
        assert_eq!(tags.hit(buf.area, 12), Some(TagTarget::Remove(1)));
        assert_eq!(tags.hit(buf.area, 16), Some(TagTarget::Add));
    }
}
