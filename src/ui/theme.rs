//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::badge::BadgeColor;

/// Brand purple used for primary actions and the active nav item.
const BRAND: Color = Color::Rgb(108, 76, 230);
const BRAND_SOFT: Color = Color::Rgb(56, 44, 110);
const SURFACE: Color = Color::Rgb(30, 30, 38);

/// Chart series colours, cycled by segment index.
pub const CHART_PALETTE: &[Color] = &[
    Color::Rgb(108, 76, 230),
    Color::Rgb(52, 199, 138),
    Color::Rgb(245, 184, 65),
    Color::Rgb(235, 87, 87),
    Color::Rgb(86, 156, 240),
];

/// Central theme.  All colours come from here.
pub struct Theme;

impl Theme {
    // ── design tokens ──────────────────────────────────────────
    pub fn badge_color(color: BadgeColor) -> Color {
        match color {
            BadgeColor::Green => Color::Rgb(52, 199, 138),
            BadgeColor::Yellow => Color::Rgb(245, 184, 65),
            BadgeColor::Blue => Color::Rgb(86, 156, 240),
            BadgeColor::Red => Color::Rgb(235, 87, 87),
            BadgeColor::Gray => Color::Gray,
            BadgeColor::Purple => Color::Rgb(160, 120, 255),
            BadgeColor::Teal => Color::Rgb(64, 200, 200),
        }
    }

    pub fn chart_color(index: usize) -> Color {
        CHART_PALETTE[index % CHART_PALETTE.len()]
    }

    // ── buttons & controls ─────────────────────────────────────
    pub fn primary_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(BRAND)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary_style() -> Style {
        Style::default().fg(BRAND).bg(SURFACE)
    }

    pub fn ghost_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn disabled_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    pub fn focus_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
    }

    // ── forms ──────────────────────────────────────────────────
    pub fn label_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Rgb(235, 87, 87))
    }

    pub fn input_border_style(focused: bool, error: bool) -> Style {
        if error {
            Self::error_style()
        } else if focused {
            Style::default().fg(BRAND)
        } else {
            Self::border_style()
        }
    }

    // ── table ──────────────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(BRAND_SOFT)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn nav_active_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(BRAND)
            .add_modifier(Modifier::BOLD)
    }

    /// Fade a style in: hidden below 1/3, dimmed until 2/3, then as-is.
    pub fn reveal(style: Style, progress: f32) -> Style {
        if progress < 1.0 / 3.0 {
            Style::default().fg(SURFACE)
        } else if progress < 2.0 / 3.0 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_steps_through_three_stages() {
        let base = Theme::label_style();
        assert_eq!(Theme::reveal(base, 0.0).fg, Some(SURFACE));
        assert!(Theme::reveal(base, 0.5).add_modifier.contains(Modifier::DIM));
        assert_eq!(Theme::reveal(base, 1.0), base);
    }

    #[test]
    fn chart_colours_cycle() {
        assert_eq!(Theme::chart_color(0), Theme::chart_color(CHART_PALETTE.len()));
    }
}
