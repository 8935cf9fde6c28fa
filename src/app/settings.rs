//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};
use crate::config::PageSizeMode;
use crate::core::record::SearchField;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle, read and written via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

const ROW_HEIGHTS: &[u16] = &[1, 2, 3];

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Cycle {
        label: "Page Size",
        value: |s| s.config.page_size.label(),
        cycle: |s| {
            let modes = PageSizeMode::CYCLE;
            let idx = modes
                .iter()
                .position(|m| *m == s.config.page_size)
                .unwrap_or(0);
            s.config.page_size = modes[(idx + 1) % modes.len()];
            s.config.save_or_warn();
            s.apply_page_size();
            s.status_message = Some(format!("Page size: {}", s.config.page_size.label()));
        },
    },
    SettingsItem::Cycle {
        label: "Row Height (lines)",
        value: |s| s.config.row_height.to_string(),
        cycle: |s| {
            let idx = ROW_HEIGHTS
                .iter()
                .position(|h| *h == s.config.row_height)
                .unwrap_or(0);
            s.config.row_height = ROW_HEIGHTS[(idx + 1) % ROW_HEIGHTS.len()];
            s.config.save_or_warn();
            s.apply_page_size();
            s.status_message = Some(format!("Row height: {}", s.config.row_height));
        },
    },
    SettingsItem::Toggle {
        label: "Animations",
        get: |s| s.config.animations,
        set: |s, v| {
            s.config.animations = v;
            s.config.save_or_warn();
            s.showcase.set_animations(v);
            s.overview = super::state::overview_reveal(v);
        },
    },
    SettingsItem::Cycle {
        label: "Search Field",
        value: |s| s.config.search_field.label().to_string(),
        cycle: |s| {
            let fields = SearchField::ALL;
            let idx = fields
                .iter()
                .position(|f| *f == s.config.search_field)
                .unwrap_or(0);
            s.config.search_field = fields[(idx + 1) % fields.len()];
            s.config.save_or_warn();
            s.pipeline.set_search_field(s.config.search_field);
            s.status_message = Some(format!("Searching by {}", s.config.search_field.label()));
        },
    },
];
