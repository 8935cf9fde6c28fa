//! On/off switch.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::theme::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleState {
    pub checked: bool,
    pub disabled: bool,
}

impl ToggleState {
    /// Flip the switch.  Returns `false` (and does nothing) when disabled.
    pub fn activate(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.checked = !self.checked;
        true
    }
}

pub struct Toggle<'a> {
    state: &'a ToggleState,
    label: &'a str,
    focused: bool,
}

impl<'a> Toggle<'a> {
    pub fn new(state: &'a ToggleState, label: &'a str) -> Self {
        Self {
            state,
            label,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Toggle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let (track, style) = match (self.state.disabled, self.state.checked) {
            (true, on) => (if on { "[━●]" } else { "[●━]" }, Theme::disabled_style()),
            (false, true) => ("[━●]", Theme::accent_style()),
            (false, false) => ("[●━]", Theme::muted_style()),
        };
        let style = if self.focused && !self.state.disabled {
            style.patch(Theme::focus_style())
        } else {
            style
        };
        let (x, _) = buf.set_stringn(area.x, area.y, track, area.width as usize, style);
        let remaining = (area.x + area.width).saturating_sub(x + 1);
        if remaining > 0 {
            buf.set_stringn(x + 1, area.y, self.label, remaining as usize, Theme::label_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn disabled_toggle_ignores_activation() {
        let mut t = ToggleState {
            checked: false,
            disabled: true,
        };
        assert!(!t.activate());
        assert!(!t.checked);
        t.disabled = false;
        assert!(t.activate());
        assert!(t.checked);
    }

    #[test]
    fn renders_track_and_label() {
        let state = ToggleState {
            checked: true,
            disabled: false,
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        Toggle::new(&state, "Remote").render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), "[━●] Remote ");
    }
}
