//! Rendering layer: every widget that touches Ratatui.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  Widgets are built fresh each frame; anything that must
//! survive between frames lives in a small `*State` struct owned by
//! [`crate::app::state::AppState`].

pub mod badge;
pub mod breadcrumb;
pub mod button;
pub mod cards;
pub mod charts;
pub mod dropdown;
pub mod inputs;
pub mod layout;
pub mod navbar;
pub mod pagination;
pub mod popup;
pub mod row_menu;
pub mod screen;
pub mod shortcuts;
pub mod showcase;
pub mod sidebar;
pub mod table;
pub mod tabs;
pub mod tags;
pub mod textarea;
pub mod theme;
pub mod toggle;

#[cfg(test)]
pub(crate) mod test_util {
    use ratatui::buffer::Buffer;

    /// Text of one buffer row, trailing spaces kept.
    pub fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    /// All rows joined with newlines.
    pub fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
