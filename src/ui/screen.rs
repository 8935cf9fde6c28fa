//! Frame composition: shell, current page, status bar, overlays.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::state::{
    ActiveView, AppState, Page, PipelineFocus, OVERVIEW_TAB, PIPELINE_TABS, USER_EMAIL, USER_NAME,
};
use crate::core::chart::{health_bars, status_breakdown};
use crate::core::columns::{with_sort_state, PIPELINE_COLUMNS};
use crate::core::record::Candidate;

use super::charts::{DonutChart, StatsChart};
use super::layout::PipelineLayout;
use super::navbar::{Navbar, NotificationPanel};
use super::pagination::Pagination;
use super::popup::{ControlsPopup, SettingsPopup};
use super::row_menu::RowMenu;
use super::shortcuts::Shortcuts;
use super::showcase;
use super::sidebar::Sidebar;
use super::table::{CandidateTable, TableGeometry};
use super::tabs::Tabs;
use super::theme::Theme;

const SHOWCASE_HINT: &str = "Tab: focus | Enter: activate | ←/→: change | ↑/↓: scroll | Esc: release";

/// Draw one frame.  Takes `&mut` because the pipeline refreshes its cache
/// lazily.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = state.layout();
    let buf = frame.buffer_mut();

    Sidebar::new(state.nav, USER_NAME, USER_EMAIL).render(layout.sidebar, buf);
    let trail = state.nav.trail();
    Navbar::new(&trail, &state.feed, state.notifications.is_open()).render(layout.navbar, buf);

    match state.page() {
        Page::Pipeline => draw_pipeline(state, layout.content, buf),
        Page::Showcase => {
            let doc = state.showcase_layout();
            showcase::render(&state.showcase, &doc, layout.content, buf);
        }
    }

    draw_status(state, layout.status, buf);

    if state.notifications.is_open() {
        let panel = Navbar::panel_area(layout.navbar, &state.feed, buf.area);
        NotificationPanel::new(&state.feed).render(panel, buf);
    }

    let area = frame.area();
    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(
                SettingsPopup {
                    selected: state.settings_selected,
                    state: &*state,
                },
                area,
            );
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                area,
            );
        }
        ActiveView::Main => {}
    }
}

fn draw_pipeline(state: &mut AppState, content: Rect, buf: &mut Buffer) {
    let layout = PipelineLayout::from_area(content);
    let row_height = state.config.row_height;
    let view = state.pipeline.view(&state.records);

    Shortcuts {
        selected_count: view.matched,
        search: &state.search,
        search_focused: state.pipeline_focus == PipelineFocus::Search,
    }
    .render(layout.shortcuts, buf);
    Tabs::new(PIPELINE_TABS, state.pipeline_tabs.active()).render(layout.tabs, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .render(layout.frame, buf);
    Pagination::new(view.current_page, view.total_pages, &state.page_input)
        .render(layout.pagination, buf);

    if state.pipeline_tabs.active() == OVERVIEW_TAB {
        let ordered = state.pipeline.ordered(&state.records);
        draw_overview(&ordered, state.overview.progress(), layout.table, buf);
        return;
    }

    let header = with_sort_state(PIPELINE_COLUMNS, state.pipeline.sort());
    let focused_column =
        (state.pipeline_focus == PipelineFocus::Table).then_some(state.focused_column);
    CandidateTable::new(&header, &view.rows)
        .selected(state.selected_row)
        .focused_column(focused_column)
        .row_height(row_height)
        .render(layout.table, buf);

    if state.row_menu.menu.is_open() {
        let geo = TableGeometry::new(layout.table, PIPELINE_COLUMNS, row_height);
        let anchor = geo.menu_cell(state.row_menu.row);
        RowMenu::new(&state.row_menu, anchor).render(content, buf);
    }
}

fn draw_overview(
    ordered: &[&Candidate],
    progress: f32,
    area: Rect,
    buf: &mut Buffer,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let slices = status_breakdown(ordered);
    let bars = health_bars(ordered);
    DonutChart::new("Candidates by status", &slices)
        .progress(progress)
        .render(cols[0], buf);
    StatsChart::new("Pipeline health", &bars)
        .progress(progress)
        .render(cols[1], buf);
}

fn draw_status(state: &AppState, area: Rect, buf: &mut Buffer) {
    // Squeezed out on very short terminals.
    if area.is_empty() {
        return;
    }
    let hint = match state.page() {
        Page::Pipeline => state.config.status_bar_hint(),
        Page::Showcase => SHOWCASE_HINT.to_string(),
    };
    let text = match state.active_view {
        ActiveView::Main => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    let used = u16::try_from(text.chars().count()).unwrap_or(u16::MAX).saturating_add(2);
    Paragraph::new(format!(" {text}"))
        .style(Theme::status_bar_style())
        .render(area, buf);

    let source = format!("{} records · {} ", state.records.len(), state.source);
    let w = u16::try_from(source.chars().count()).unwrap_or(u16::MAX);
    if used.saturating_add(w) < area.width {
        buf.set_stringn(
            area.right() - w,
            area.y,
            source,
            w as usize,
            Theme::status_bar_style(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::showcase::Section;
    use crate::config::AppConfig;
    use crate::core::overlay::OverlayEvent;
    use crate::core::record::seed_candidates;
    use crate::ui::sidebar::NavSelection;
    use crate::ui::test_util::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn state() -> AppState {
        let mut s = AppState::new(seed_candidates(), "built-in sample".into(), AppConfig::default());
        s.resize(120, 40);
        s
    }

    #[test]
    fn pipeline_page_shows_shell_table_and_status() {
        let mut s = state();
        let text = render(&mut s);
        assert!(text.contains("vu·deck"));
        assert!(text.contains("Candidates / Pipeline"));
        assert!(text.contains("Filters"));
        assert!(text.contains("Name"));
        assert!(text.contains("Anti-cheat"));
        assert!(text.contains(&s.records[0].name));
        assert!(text.contains("12 records · built-in sample"));
        assert!(text.contains("rows"));
    }

    #[test]
    fn overview_tab_draws_charts() {
        let mut s = state();
        s.pipeline_tabs.select(OVERVIEW_TAB);
        s.overview = crate::core::reveal::Reveal::shown();
        let text = render(&mut s);
        assert!(text.contains("Candidates by status"));
        assert!(text.contains("Pipeline health"));
        assert!(text.contains("Total 12"));
    }

    #[test]
    fn status_message_replaces_hint() {
        let mut s = state();
        s.status_message = Some("Accepted Lina Markovic".into());
        assert!(render(&mut s).contains(" Accepted Lina Markovic"));
    }

    #[test]
    fn showcase_page_and_settings_popup() {
        let mut s = state();
        s.select_nav(NavSelection::entry(1));
        let text = render(&mut s);
        assert!(text.contains("Design System / Controls"));
        assert!(text.contains(Section::Controls.title()));
        assert!(text.contains("Primary"));

        s.active_view = ActiveView::SettingsMenu;
        let text = render(&mut s);
        assert!(text.contains(" Settings "));
        assert!(text.contains("Animations"));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        for view in [ActiveView::Main, ActiveView::SettingsMenu, ActiveView::ControlsSubmenu] {
            for bell in [false, true] {
                for w in 1..60 {
                    for h in 1..30 {
                        let mut s = AppState::new(
                            seed_candidates(),
                            "built-in sample".into(),
                            AppConfig::default(),
                        );
                        s.resize(w, h);
                        s.active_view = view;
                        if bell {
                            s.notifications.handle(OverlayEvent::Toggle);
                        }
                        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
                        terminal.draw(|f| draw(f, &mut s)).unwrap();
                    }
                }
            }
        }
    }

    #[test]
    fn status_bar_keeps_source_when_it_fits() {
        let mut s = state();
        s.status_message = Some("x".repeat(200));
        let text = render(&mut s);
        assert!(!text.contains("12 records"));
        s.status_message = None;
        s.active_view = ActiveView::SettingsMenu;
        assert!(render(&mut s).contains("12 records · built-in sample"));
    }

    #[test]
    fn open_panels_draw_on_top() {
        let mut s = state();
        s.row_menu.toggle_for(0);
        assert!(render(&mut s).contains("View Details"));

        s.row_menu.dismiss(OverlayEvent::Escape);
        s.notifications.handle(OverlayEvent::Toggle);
        let text = render(&mut s);
        assert!(text.contains("✉ Notifications"));
        assert!(!text.contains("View Details"));
    }
}
