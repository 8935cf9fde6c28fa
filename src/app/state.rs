//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::{AppConfig, PageSizeMode};
use crate::core::notify::{seed_notifications, NotificationFeed};
use crate::core::overlay::{Dismissible, OverlayEvent};
use crate::core::paginate::{items_per_page_for_height, Pager};
use crate::core::pipeline::Pipeline;
use crate::core::record::Candidate;
use crate::core::reveal::Reveal;
use crate::ui::inputs::{InputKind, InputState};
use crate::ui::layout::{AppLayout, PipelineLayout};
use crate::ui::pagination::PaginationState;
use crate::ui::row_menu::RowMenuState;
use crate::ui::showcase::{scroll_into_view, ShowcaseLayout};
use crate::ui::sidebar::NavSelection;
use crate::ui::tabs::TabsState;

use super::showcase::{Section, ShowcaseState, REVEAL_TICKS};

/// Tabs above the candidate table.
pub const PIPELINE_TABS: &[&str] = &["Pipeline", "Overview"];
pub const OVERVIEW_TAB: usize = 1;

pub const USER_NAME: &str = "Sarah Cole";
pub const USER_EMAIL: &str = "sarah.cole@vu.io";

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    SettingsMenu,
    ControlsSubmenu,
}

/// The page the sidebar has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Pipeline,
    Showcase,
}

/// Keyboard focus on the pipeline page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineFocus {
    #[default]
    Table,
    Search,
    PageInput,
}

impl PipelineFocus {
    pub fn next(self) -> Self {
        match self {
            PipelineFocus::Table => PipelineFocus::Search,
            PipelineFocus::Search => PipelineFocus::PageInput,
            PipelineFocus::PageInput => PipelineFocus::Table,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PipelineFocus::Table => PipelineFocus::PageInput,
            PipelineFocus::Search => PipelineFocus::Table,
            PipelineFocus::PageInput => PipelineFocus::Search,
        }
    }
}

/// Reveal for the pipeline overview charts.
pub fn overview_reveal(animations: bool) -> Reveal {
    if animations {
        Reveal::new(REVEAL_TICKS)
    } else {
        Reveal::shown()
    }
}

/// Top-level application state.
pub struct AppState {
    /// User-configurable keybindings and table settings.
    pub config: AppConfig,
    /// The candidate list; never mutated after load.
    pub records: Vec<Candidate>,
    /// Where `records` came from, for the status bar.
    pub source: String,
    pub pipeline: Pipeline,
    pub nav: NavSelection,

    // ── pipeline page ───────────────────────────────────────────
    pub pipeline_focus: PipelineFocus,
    pub search: InputState,
    pub page_input: PaginationState,
    /// Highlighted row on the current page.
    pub selected_row: Option<usize>,
    /// Header column keyboard sorting acts on.
    pub focused_column: usize,
    pub row_menu: RowMenuState,
    pub pipeline_tabs: TabsState,
    pub overview: Reveal,

    // ── navbar ──────────────────────────────────────────────────
    pub notifications: Dismissible,
    pub feed: NotificationFeed,

    pub showcase: ShowcaseState,

    /// Last known terminal size; layouts are derived from it.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
}

impl AppState {
    pub fn new(records: Vec<Candidate>, source: String, config: AppConfig) -> Self {
        let mut pipeline = Pipeline::new(Pager::default());
        pipeline.set_search_field(config.search_field);
        let animations = config.animations;
        let selected_row = (!records.is_empty()).then_some(0);
        Self {
            config,
            records,
            source,
            pipeline,
            nav: NavSelection::default(),
            pipeline_focus: PipelineFocus::default(),
            search: InputState::new(InputKind::Search, "Search")
                .with_placeholder("Search candidates"),
            page_input: PaginationState::default(),
            selected_row,
            focused_column: 0,
            row_menu: RowMenuState::default(),
            pipeline_tabs: TabsState::new(PIPELINE_TABS.len()),
            overview: overview_reveal(animations),
            notifications: Dismissible::default(),
            feed: seed_notifications(),
            showcase: ShowcaseState::new(animations),
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
        }
    }

    pub fn page(&self) -> Page {
        if self.nav.entry == 0 {
            Page::Pipeline
        } else {
            Page::Showcase
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn pipeline_layout(&self) -> PipelineLayout {
        PipelineLayout::from_area(self.layout().content)
    }

    pub fn showcase_layout(&self) -> ShowcaseLayout {
        ShowcaseLayout::compute(&self.showcase, self.layout().content.width)
    }

    // ── sizing ──────────────────────────────────────────────────

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        self.apply_page_size();
        self.scroll_showcase(0);
    }

    /// Recompute rows per page from the config and the table height.
    pub fn apply_page_size(&mut self) {
        let per_page = match self.config.page_size {
            PageSizeMode::Fixed(n) => n,
            PageSizeMode::Auto => items_per_page_for_height(
                self.pipeline_layout().body_height(),
                self.config.row_height,
            ),
        };
        self.pipeline.set_per_page(&self.records, per_page);
        self.clamp_selection();
    }

    /// Keep the highlighted row on the current page.
    pub fn clamp_selection(&mut self) {
        let rows = self.pipeline.view(&self.records).rows.len();
        self.selected_row = match self.selected_row {
            _ if rows == 0 => None,
            Some(r) => Some(r.min(rows - 1)),
            None => Some(0),
        };
    }

    // ── navigation ──────────────────────────────────────────────

    pub fn select_nav(&mut self, selection: NavSelection) {
        self.nav = selection;
        self.row_menu.dismiss(OverlayEvent::OutsidePointer);
        self.showcase.dismiss_menus(OverlayEvent::OutsidePointer);
        if let (Page::Showcase, Some(sub)) = (self.page(), selection.sub) {
            if let Some(section) = Section::ALL.get(sub) {
                let top = self.showcase_layout().section_top(*section);
                self.set_showcase_scroll(top);
            }
        }
        tracing::debug!(trail = ?self.nav.trail(), "page selected");
    }

    /// Scroll the showcase by `delta` lines, clamped to the document.
    pub fn scroll_showcase(&mut self, delta: i32) {
        let target = i32::from(self.showcase.scroll) + delta;
        self.set_showcase_scroll(target.clamp(0, i32::from(u16::MAX)) as u16);
    }

    fn set_showcase_scroll(&mut self, scroll: u16) {
        let viewport = self.layout().content.height;
        let max = self.showcase_layout().max_scroll(viewport);
        self.showcase.scroll = scroll.min(max);
        self.sync_showcase_nav();
    }

    /// Bring the focused showcase slot fully into view.
    pub fn scroll_to_focus(&mut self) {
        let Some(slot) = self.showcase.focus else {
            return;
        };
        let layout = self.showcase_layout();
        if let Some(rect) = layout.rect(slot) {
            let viewport = self.layout().content.height;
            let scroll = scroll_into_view(self.showcase.scroll, rect, viewport);
            self.set_showcase_scroll(scroll);
        }
    }

    /// The sidebar sub-item follows the section at the top of the viewport.
    fn sync_showcase_nav(&mut self) {
        if self.page() != Page::Showcase {
            return;
        }
        let section = self.showcase_layout().section_at(self.showcase.scroll);
        self.nav.sub = Some(section.index());
    }

    // ── animation ───────────────────────────────────────────────

    /// Report what is on screen to every reveal.
    pub fn observe_reveals(&mut self) {
        match self.page() {
            Page::Pipeline => {
                if self.pipeline_tabs.active() == OVERVIEW_TAB {
                    self.overview.observe(1.0);
                }
            }
            Page::Showcase => {
                let viewport = self.layout().content.height;
                let visibility = self
                    .showcase_layout()
                    .visibility(self.showcase.scroll, viewport);
                for (section, fraction) in visibility {
                    if let Some(r) = self.showcase.reveals.get_mut(section.index()) {
                        r.observe(fraction);
                    }
                }
            }
        }
    }

    pub fn tick(&mut self) {
        self.observe_reveals();
        self.overview.tick();
        self.showcase.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::seed_candidates;

    fn state() -> AppState {
        let mut s = AppState::new(seed_candidates(), "test".into(), AppConfig::default());
        s.resize(120, 40);
        s
    }

    #[test]
    fn auto_page_size_follows_terminal_height() {
        let mut s = state();
        let body = s.pipeline_layout().body_height();
        assert_eq!(s.pipeline.pager().per_page(), items_per_page_for_height(body, 1));
        s.resize(120, 16);
        let body = s.pipeline_layout().body_height();
        assert_eq!(s.pipeline.pager().per_page(), items_per_page_for_height(body, 1));
    }

    #[test]
    fn fixed_page_size_ignores_terminal() {
        let mut s = state();
        s.config.page_size = PageSizeMode::Fixed(5);
        s.apply_page_size();
        s.resize(120, 60);
        assert_eq!(s.pipeline.pager().per_page(), 5);
        assert_eq!(s.pipeline.view(&s.records).total_pages, 3);
    }

    #[test]
    fn selecting_a_section_scrolls_the_showcase() {
        let mut s = state();
        s.select_nav(NavSelection::sub_item(1, Section::Inputs.index()));
        assert_eq!(s.page(), Page::Showcase);
        let top = s.showcase_layout().section_top(Section::Inputs);
        assert_eq!(s.showcase.scroll, top);
        assert_eq!(s.nav.sub, Some(Section::Inputs.index()));
        s.scroll_showcase(-i32::from(top));
        assert_eq!(s.showcase.scroll, 0);
        assert_eq!(s.nav.sub, Some(Section::Controls.index()));
    }

    #[test]
    fn scroll_is_clamped_to_document() {
        let mut s = state();
        s.select_nav(NavSelection::entry(1));
        s.scroll_showcase(10_000);
        let viewport = s.layout().content.height;
        assert_eq!(s.showcase.scroll, s.showcase_layout().max_scroll(viewport));
    }

    #[test]
    fn overview_reveals_once_shown() {
        let mut s = state();
        s.tick();
        assert_eq!(s.overview.progress(), 0.0);
        s.pipeline_tabs.select(OVERVIEW_TAB);
        for _ in 0..REVEAL_TICKS {
            s.tick();
        }
        assert_eq!(s.overview.progress(), 1.0);
    }
}
