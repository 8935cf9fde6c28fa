//! Button: a one-line pill with optional icon glyphs on either side.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Line, widgets::Widget};

use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    /// Unknown names fall back to `Primary`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "secondary" => Self::Secondary,
            "ghost" => Self::Ghost,
            _ => Self::Primary,
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Primary => Theme::primary_style(),
            Self::Secondary => Theme::secondary_style(),
            Self::Ghost => Theme::ghost_style(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    variant: ButtonVariant,
    disabled: bool,
    focused: bool,
    left_icon: Option<&'a str>,
    right_icon: Option<&'a str>,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            variant: ButtonVariant::Primary,
            disabled: false,
            focused: false,
            left_icon: None,
            right_icon: None,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn left_icon(mut self, icon: &'a str) -> Self {
        self.left_icon = Some(icon);
        self
    }

    pub fn right_icon(mut self, icon: &'a str) -> Self {
        self.right_icon = Some(icon);
        self
    }

    fn text(&self) -> String {
        let mut s = String::from(" ");
        if let Some(icon) = self.left_icon {
            s.push_str(icon);
            s.push(' ');
        }
        s.push_str(self.label);
        if let Some(icon) = self.right_icon {
            s.push(' ');
            s.push_str(icon);
        }
        s.push(' ');
        s
    }

    /// Cells the button occupies.
    pub fn width(&self) -> u16 {
        Line::raw(self.text()).width() as u16
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut style = if self.disabled {
            Theme::disabled_style()
        } else {
            self.variant.style()
        };
        if self.focused && !self.disabled {
            style = style.patch(Theme::focus_style().bg(style.bg.unwrap_or_default()));
        }
        buf.set_stringn(area.x, area.y, self.text(), area.width as usize, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_util::row_text;

    #[test]
    fn unknown_variant_is_primary() {
        assert_eq!(ButtonVariant::from_name("ghost"), ButtonVariant::Ghost);
        assert_eq!(ButtonVariant::from_name("danger"), ButtonVariant::Primary);
    }

    #[test]
    fn renders_icons_around_label() {
        let button = Button::new("Create job").left_icon("+");
        assert_eq!(button.width(), 14);
        let mut buf = Buffer::empty(Rect::new(0, 0, 16, 1));
        button.render(buf.area, &mut buf);
        assert_eq!(row_text(&buf, 0), " + Create job   ");
    }

    #[test]
    fn disabled_uses_muted_style() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        Button::new("Go").disabled(true).render(buf.area, &mut buf);
        assert_eq!(buf[(1, 0)].style().fg, Theme::disabled_style().fg);
    }
}
