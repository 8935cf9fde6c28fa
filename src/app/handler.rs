//! Input handling: maps key and mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::{Action, KeyBind};
use crate::core::columns::PIPELINE_COLUMNS;
use crate::core::overlay::OverlayEvent;
use crate::core::record::SearchField;
use crate::ui::badge::RoleBadge;
use crate::ui::breadcrumb::Breadcrumb;
use crate::ui::charts::DonutChart;
use crate::ui::dropdown::Dropdown;
use crate::ui::inputs::InputField;
use crate::ui::layout::point_in_rect;
use crate::ui::navbar::Navbar;
use crate::ui::pagination::{PageTarget, Pagination};
use crate::ui::row_menu::{RowAction, RowMenu};
use crate::ui::shortcuts::{ShortcutTarget, ShortcutsGeometry};
use crate::ui::showcase::ShowcaseLayout;
use crate::ui::sidebar::{NavSelection, NavTarget, Sidebar, NAV};
use crate::ui::table::TableGeometry;
use crate::ui::tabs::Tabs;
use crate::ui::tags::{TagTarget, Tags};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::showcase::{Slot, BREADCRUMB_DEMO, TAB_LABELS};
use super::state::{ActiveView, AppState, Page, PipelineFocus, PIPELINE_TABS};

/// Lines the mouse wheel scrolls the showcase by.
const WHEEL_LINES: i32 = 3;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if is_ctrl(key, 'c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Main => handle_main_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

fn is_ctrl(key: KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// A printable key with no Ctrl/Alt held.
fn typed_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

// ── Main view ───────────────────────────────────────────────────

fn handle_main_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc
        && state.notifications.handle(OverlayEvent::Escape)
    {
        return;
    }
    match state.page() {
        Page::Pipeline => handle_pipeline_key(state, key),
        Page::Showcase => handle_showcase_key(state, key),
    }
}

/// Actions available on every page when no field has the keyboard.
/// Returns `false` for actions the caller handles itself.
fn handle_global_action(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::Notifications => toggle_notifications(state),
        Action::SwitchPage => {
            let next = (state.nav.entry + 1) % NAV.len();
            state.select_nav(NavSelection::entry(next));
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
        _ => return false,
    }
    true
}

fn toggle_notifications(state: &mut AppState) {
    if state.notifications.handle(OverlayEvent::Toggle) && state.notifications.is_open() {
        state.feed.mark_seen();
    }
}

// ── Pipeline page ───────────────────────────────────────────────

fn handle_pipeline_key(state: &mut AppState, key: KeyEvent) {
    if state.row_menu.menu.is_open() {
        handle_row_menu_key(state, key);
        return;
    }

    match key.code {
        KeyCode::Tab => {
            set_pipeline_focus(state, state.pipeline_focus.next());
            return;
        }
        KeyCode::BackTab => {
            set_pipeline_focus(state, state.pipeline_focus.prev());
            return;
        }
        _ => {}
    }

    match state.pipeline_focus {
        PipelineFocus::Search => handle_search_key(state, key),
        PipelineFocus::PageInput => handle_page_input_key(state, key),
        PipelineFocus::Table => handle_table_key(state, key),
    }
}

fn set_pipeline_focus(state: &mut AppState, focus: PipelineFocus) {
    if state.pipeline_focus == PipelineFocus::PageInput {
        state.page_input.cancel();
    }
    if focus == PipelineFocus::PageInput {
        state.page_input.begin_edit();
    }
    state.pipeline_focus = focus;
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
            set_pipeline_focus(state, PipelineFocus::Table);
            return;
        }
        KeyCode::Backspace => state.search.backspace(),
        _ if is_ctrl(key, 'r') => state.search.activate_action(),
        _ => match typed_char(key) {
            Some(c) => state.search.push(c),
            None => return,
        },
    }
    sync_query(state);
}

fn sync_query(state: &mut AppState) {
    state.pipeline.set_query(state.search.value.clone());
    state.clamp_selection();
}

fn handle_page_input_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => set_pipeline_focus(state, PipelineFocus::Table),
        KeyCode::Backspace => state.page_input.backspace(),
        KeyCode::Enter => {
            if let Some(page) = state.page_input.submit() {
                go_to_page(state, page);
            }
            set_pipeline_focus(state, PipelineFocus::Table);
        }
        _ => {
            if let Some(c) = typed_char(key) {
                state.page_input.push(c);
            }
        }
    }
}

/// Jump to `page`.  Asking for the page already shown is a no-op.
fn go_to_page(state: &mut AppState, page: usize) {
    if !state.pipeline.page_in_range(&state.records, page) {
        state.status_message = Some(format!("No page {page}"));
    } else if state.pipeline.go_to_page(&state.records, page) {
        state.selected_row = Some(0);
        state.clamp_selection();
    }
}

fn handle_table_key(state: &mut AppState, key: KeyEvent) {
    // Digits pick the tab above the table.
    if let Some(d) = typed_char(key).and_then(|c| c.to_digit(10)) {
        if (1..=PIPELINE_TABS.len() as u32).contains(&d) {
            state.pipeline_tabs.select(d as usize - 1);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::MoveUp => move_row(state, false),
        Action::MoveDown => move_row(state, true),
        Action::PrevPage => {
            if state.pipeline.prev_page(&state.records) {
                state.clamp_selection();
            }
        }
        Action::NextPage => {
            if state.pipeline.next_page(&state.records) {
                state.clamp_selection();
            }
        }
        Action::ColumnLeft => {
            state.focused_column = state.focused_column.saturating_sub(1);
        }
        Action::ColumnRight => {
            if state.focused_column + 1 < PIPELINE_COLUMNS.len() {
                state.focused_column += 1;
            }
        }
        Action::CycleSort => sort_column(state, state.focused_column),
        Action::FocusSearch => set_pipeline_focus(state, PipelineFocus::Search),
        Action::RowMenu => {
            if let Some(row) = state.selected_row {
                state.row_menu.toggle_for(row);
            }
        }
        _ => {
            handle_global_action(state, action);
        }
    }
}

fn sort_column(state: &mut AppState, index: usize) {
    let Some(col) = PIPELINE_COLUMNS.get(index) else {
        return;
    };
    if !col.sortable {
        state.status_message = Some(format!("{} is not sortable", col.label));
        return;
    }
    state.pipeline.click_header(col.key, col.sortable);
    state.clamp_selection();
}

/// Move the highlight one row, crossing page boundaries.
fn move_row(state: &mut AppState, forward: bool) {
    let rows = state.pipeline.view(&state.records).rows.len();
    let Some(current) = state.selected_row.filter(|_| rows > 0) else {
        state.selected_row = (rows > 0).then_some(0);
        return;
    };
    if forward {
        if current + 1 < rows {
            state.selected_row = Some(current + 1);
        } else if state.pipeline.next_page(&state.records) {
            state.selected_row = Some(0);
        }
    } else if current > 0 {
        state.selected_row = Some(current - 1);
    } else if state.pipeline.prev_page(&state.records) {
        let rows = state.pipeline.view(&state.records).rows.len();
        state.selected_row = rows.checked_sub(1);
    }
}

fn handle_row_menu_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.row_menu.dismiss(OverlayEvent::Escape),
        KeyCode::Up | KeyCode::Char('k') => state.row_menu.highlight_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.row_menu.highlight_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let index = state.row_menu.highlighted;
            choose_row_action(state, index);
        }
        _ => {}
    }
}

/// Row actions only report; the records themselves never change.
fn choose_row_action(state: &mut AppState, index: usize) {
    let Some(action) = state.row_menu.choose(index) else {
        return;
    };
    let view = state.pipeline.view(&state.records);
    let Some(c) = view.rows.get(state.row_menu.row) else {
        return;
    };
    let message = match action {
        RowAction::Accept => format!("Accepted {}", c.name),
        RowAction::Shortlist => format!("Shortlisted {}", c.name),
        RowAction::Reject => format!("Rejected {}", c.name),
        RowAction::ViewDetails => format!(
            "{} · {} · score {} · {}",
            c.name, c.job, c.score, c.date
        ),
    };
    tracing::info!(candidate = c.id, action = action.label(), "row action");
    state.status_message = Some(message);
}

// ── Showcase page ───────────────────────────────────────────────

fn handle_showcase_key(state: &mut AppState, key: KeyEvent) {
    if let Some(menu) = state.showcase.open_menu() {
        handle_popover_key(state, menu, key);
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            let order = state.showcase_layout().focus_order();
            state
                .showcase
                .cycle_focus(&order, key.code == KeyCode::Tab);
            state.scroll_to_focus();
            return;
        }
        KeyCode::Left | KeyCode::Right => {
            if state.showcase.focus.is_some() {
                state.showcase.step(key.code == KeyCode::Right);
                return;
            }
        }
        KeyCode::Up | KeyCode::Down => {
            if state.showcase.move_within(key.code == KeyCode::Down) {
                state.scroll_to_focus();
                return;
            }
        }
        KeyCode::Esc => {
            if !state.showcase.cancel() {
                state.showcase.focus(None);
            }
            return;
        }
        KeyCode::Enter => {
            activate_showcase(state);
            return;
        }
        _ => {}
    }

    if state.showcase.is_typing() {
        match key.code {
            KeyCode::Backspace => state.showcase.backspace(),
            _ if is_ctrl(key, 'r') => match state.showcase.focus {
                Some(Slot::PasswordInput) => state.showcase.password.activate_action(),
                Some(Slot::SearchInput) => state.showcase.search.activate_action(),
                _ => {}
            },
            _ => {
                if let Some(c) = typed_char(key) {
                    state.showcase.type_char(c);
                }
            }
        }
        return;
    }

    if key.code == KeyCode::Char(' ') && state.showcase.focus.is_some() {
        activate_showcase(state);
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let page = i32::from(state.layout().content.height.max(1));
    match action {
        Action::MoveUp => state.scroll_showcase(-1),
        Action::MoveDown => state.scroll_showcase(1),
        Action::PrevPage => state.scroll_showcase(-page),
        Action::NextPage => state.scroll_showcase(page),
        _ => {
            handle_global_action(state, action);
        }
    }
}

fn activate_showcase(state: &mut AppState) {
    if let Some(message) = state.showcase.activate() {
        state.status_message = Some(message);
    }
    state.scroll_to_focus();
}

fn handle_popover_key(state: &mut AppState, menu: Slot, key: KeyEvent) {
    let s = &mut state.showcase;
    match (menu, key.code) {
        (_, KeyCode::Esc) => s.dismiss_menus(OverlayEvent::Escape),
        (Slot::Dropdown, KeyCode::Up) => s.dropdown.highlight_prev(),
        (Slot::Dropdown, KeyCode::Down) => s.dropdown.highlight_next(),
        (Slot::Dropdown, KeyCode::Enter | KeyCode::Char(' ')) => {
            s.dropdown.select(s.dropdown.highlighted);
        }
        (Slot::RoleBadge, KeyCode::Up) => s.role.highlight_prev(),
        (Slot::RoleBadge, KeyCode::Down) => s.role.highlight_next(),
        (Slot::RoleBadge, KeyCode::Enter | KeyCode::Char(' ')) => {
            s.role.select(s.role.highlighted);
        }
        _ => {}
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                // Start rebinding the selected action.
                state.awaiting_rebind = true;
            } else {
                // "Reset to defaults" item.
                state.config.reset_defaults();
                state.config.save_or_warn();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                state.config.save_or_warn();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Ctrl+c stays reserved for quitting.
    if is_ctrl(key, 'c') {
        return;
    }

    if let Some(&action) = Action::ALL.get(state.controls_selected) {
        state.config.add_binding(action, KeyBind::from_key_event(key));
        state.config.save_or_warn();
    }
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Main {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, col, row),
        MouseEventKind::Moved => {
            if state.page() == Page::Showcase {
                hover_showcase(state, col, row);
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let down = mouse.kind == MouseEventKind::ScrollDown;
            match state.page() {
                Page::Showcase => {
                    state.scroll_showcase(if down { WHEEL_LINES } else { -WHEEL_LINES });
                }
                Page::Pipeline => {
                    if point_in_rect(state.pipeline_layout().table, col, row) {
                        move_row(state, down);
                    }
                }
            }
        }
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let layout = state.layout();
    let in_panel = state.notifications.is_open()
        && point_in_rect(
            Navbar::panel_area(layout.navbar, &state.feed, state.terminal_area),
            col,
            row,
        );

    // Page popovers and their triggers live inside the content area.
    if in_panel || !point_in_rect(layout.content, col, row) {
        dismiss_page_popovers(state);
    }

    // Notification panel first: it floats over everything else.
    if state.notifications.is_open() {
        let panel = Navbar::panel_area(layout.navbar, &state.feed, state.terminal_area);
        let bell = Navbar::bell_area(layout.navbar);
        if in_panel {
            if Navbar::close_hit(panel, col, row) {
                state.notifications.close();
            }
            return;
        }
        if !point_in_rect(bell, col, row) {
            state.notifications.handle(OverlayEvent::OutsidePointer);
        }
    }

    if point_in_rect(layout.sidebar, col, row) {
        match Sidebar::hit(state.nav, layout.sidebar, col, row) {
            Some(NavTarget::Entry(i)) => state.select_nav(NavSelection::entry(i)),
            Some(NavTarget::Sub(i, j)) => state.select_nav(NavSelection::sub_item(i, j)),
            None => {}
        }
        return;
    }

    if point_in_rect(layout.navbar, col, row) {
        if point_in_rect(Navbar::bell_area(layout.navbar), col, row) {
            toggle_notifications(state);
        } else {
            let trail = state.nav.trail();
            let area = Navbar::breadcrumb_area(layout.navbar);
            if point_in_rect(area, col, row) && Breadcrumb::new(&trail).hit(area, col) == Some(0) {
                state.select_nav(NavSelection::entry(state.nav.entry));
            }
        }
        return;
    }

    if point_in_rect(layout.content, col, row) {
        match state.page() {
            Page::Pipeline => click_pipeline(state, col, row),
            Page::Showcase => click_showcase(state, layout.content, col, row),
        }
    }
}

fn dismiss_page_popovers(state: &mut AppState) {
    state.row_menu.dismiss(OverlayEvent::OutsidePointer);
    state.showcase.dismiss_menus(OverlayEvent::OutsidePointer);
}

fn click_pipeline(state: &mut AppState, col: u16, row: u16) {
    let layout = state.pipeline_layout();
    let geo = TableGeometry::new(layout.table, PIPELINE_COLUMNS, state.config.row_height);
    let on_tables_page = state.pipeline_tabs.active() == 0;

    if state.row_menu.menu.is_open() && on_tables_page {
        let anchor = geo.menu_cell(state.row_menu.row);
        let menu = RowMenu::area(anchor, state.layout().content);
        if point_in_rect(menu, col, row) {
            if let Some(index) = RowMenu::option_at(menu, col, row) {
                choose_row_action(state, index);
            }
            return;
        }
        if !point_in_rect(anchor, col, row) {
            state.row_menu.dismiss(OverlayEvent::OutsidePointer);
        }
    }

    if point_in_rect(layout.shortcuts, col, row) {
        click_shortcuts(state, layout.shortcuts, col, row);
        return;
    }
    if state.pipeline_focus == PipelineFocus::Search {
        set_pipeline_focus(state, PipelineFocus::Table);
    }

    if point_in_rect(layout.tabs, col, row) {
        if let Some(i) = Tabs::hit(PIPELINE_TABS, layout.tabs, col) {
            state.pipeline_tabs.select(i);
        }
        return;
    }

    if point_in_rect(layout.pagination, col, row) {
        let view = state.pipeline.view(&state.records);
        let (current, total) = (view.current_page, view.total_pages);
        let target = Pagination::new(current, total, &state.page_input).hit(
            layout.pagination,
            col,
            row,
        );
        match target {
            Some(PageTarget::Prev) => {
                state.pipeline.prev_page(&state.records);
                state.clamp_selection();
            }
            Some(PageTarget::Next) => {
                state.pipeline.next_page(&state.records);
                state.clamp_selection();
            }
            Some(PageTarget::Page(n)) => go_to_page(state, n),
            Some(PageTarget::GoTo) => set_pipeline_focus(state, PipelineFocus::PageInput),
            None => {}
        }
        return;
    }

    if !on_tables_page || !point_in_rect(layout.table, col, row) {
        return;
    }
    if let Some(index) = geo.header_hit(col, row) {
        state.focused_column = index;
        sort_column(state, index);
        return;
    }
    let rows = state.pipeline.view(&state.records).rows.len();
    if let Some(index) = geo.row_at(row, rows) {
        state.selected_row = Some(index);
        if geo.is_menu_column(col) {
            state.row_menu.toggle_for(index);
        }
    }
}

fn click_shortcuts(state: &mut AppState, area: Rect, col: u16, row: u16) {
    let geo = ShortcutsGeometry::new(area);
    match geo.hit(col, row) {
        Some(ShortcutTarget::Search) => {
            if InputField::action_hit(&state.search, geo.search, col, row) {
                state.search.activate_action();
                sync_query(state);
            }
            set_pipeline_focus(state, PipelineFocus::Search);
        }
        Some(ShortcutTarget::Filter) => {
            let fields = SearchField::ALL;
            let idx = fields
                .iter()
                .position(|f| *f == state.config.search_field)
                .unwrap_or(0);
            state.config.search_field = fields[(idx + 1) % fields.len()];
            state.pipeline.set_search_field(state.config.search_field);
            state.clamp_selection();
            state.status_message = Some(format!("Searching by {}", state.config.search_field.label()));
        }
        Some(ShortcutTarget::Secondary) => {
            state.status_message = Some("5 active jobs".into());
        }
        Some(ShortcutTarget::Primary) => {
            state.status_message = Some("Create job".into());
        }
        None => {}
    }
}

/// Convert a screen position inside `content` to showcase document
/// coordinates.
fn to_document(state: &AppState, content: Rect, col: u16, row: u16) -> (u16, u16) {
    (col - content.x, row - content.y + state.showcase.scroll)
}

fn click_showcase(state: &mut AppState, content: Rect, col: u16, row: u16) {
    let layout = state.showcase_layout();
    let (x, y) = to_document(state, content, col, row);

    if let Some(menu) = state.showcase.open_menu() {
        if click_popover(state, &layout, menu, x, y) {
            return;
        }
        state.showcase.dismiss_menus(OverlayEvent::OutsidePointer);
    }

    let Some((slot, rect)) = layout.slot_at(x, y) else {
        state.showcase.focus(None);
        return;
    };
    if slot.focusable() {
        state.showcase.focus(Some(slot));
    }

    let s = &mut state.showcase;
    let message = match slot {
        Slot::Tabs => {
            if let Some(i) = Tabs::hit(TAB_LABELS, rect, x) {
                s.tabs.select(i);
            }
            None
        }
        Slot::Pagination => {
            let total = s.pager.total_pages(0);
            let target = Pagination::new(s.pager.current(), total, &s.page_input).hit(rect, x, y);
            match target {
                Some(PageTarget::Prev) => {
                    s.pager.prev(0);
                }
                Some(PageTarget::Next) => {
                    s.pager.next(0);
                }
                Some(PageTarget::Page(n)) => {
                    s.pager.go_to(n, 0);
                }
                Some(PageTarget::GoTo) => s.page_input.begin_edit(),
                None => {}
            }
            None
        }
        Slot::Tags => {
            let target = Tags::new(&s.tags).hit(rect, x);
            match target {
                Some(TagTarget::Remove(i)) => {
                    s.tags.remove(i);
                }
                Some(TagTarget::Add) => s.tags.start_adding(),
                None => {}
            }
            None
        }
        Slot::PasswordInput if InputField::action_hit(&s.password, rect, x, y) => {
            s.password.activate_action();
            None
        }
        Slot::SearchInput if InputField::action_hit(&s.search, rect, x, y) => {
            s.search.activate_action();
            None
        }
        Slot::Breadcrumb => Breadcrumb::new(BREADCRUMB_DEMO)
            .hit(rect, x)
            .map(|i| format!("Breadcrumb: {}", BREADCRUMB_DEMO[i])),
        Slot::Question(i) => {
            let expanded = s.questions.get(i).is_some_and(|q| q.expanded);
            // The header line toggles; inside an open card a click only focuses.
            if !expanded || y <= rect.y + 1 {
                if let Some(q) = s.questions.get_mut(i) {
                    q.toggle_expanded();
                }
            }
            None
        }
        Slot::Donut => {
            s.hovered = DonutChart::legend_hit(&s.donut, rect, x, y);
            None
        }
        Slot::PrimaryButton
        | Slot::SecondaryButton
        | Slot::GhostButton
        | Slot::Toggle
        | Slot::RoleBadge
        | Slot::Dropdown
        | Slot::FileInput
        | Slot::EntityCard
        | Slot::AddQuestion => s.activate(),
        _ => None,
    };
    if message.is_some() {
        state.status_message = message;
    }
}

/// Clicks on an open popover or its trigger.  Returns `true` when consumed.
fn click_popover(state: &mut AppState, layout: &ShowcaseLayout, menu: Slot, x: u16, y: u16) -> bool {
    let Some(anchor) = layout.rect(menu) else {
        return false;
    };
    let s = &mut state.showcase;
    let area = match menu {
        Slot::Dropdown => Dropdown::menu_area(&s.dropdown, anchor, layout.bounds()),
        Slot::RoleBadge => RoleBadge::menu_area(anchor, layout.bounds()),
        _ => return false,
    };
    if point_in_rect(area, x, y) {
        match menu {
            Slot::Dropdown => {
                if let Some(i) = Dropdown::option_at(&s.dropdown, area, x, y) {
                    s.dropdown.select(i);
                }
            }
            _ => {
                if let Some(i) = RoleBadge::option_at(area, x, y) {
                    s.role.select(i);
                }
            }
        }
        return true;
    }
    if point_in_rect(anchor, x, y) {
        // Trigger click closes through the toggle path.
        s.activate();
        return true;
    }
    false
}

fn hover_showcase(state: &mut AppState, col: u16, row: u16) {
    let content = state.layout().content;
    if !point_in_rect(content, col, row) {
        state.showcase.hovered = None;
        return;
    }
    let (x, y) = to_document(state, content, col, row);
    let layout = state.showcase_layout();
    state.showcase.hovered = layout
        .rect(Slot::Donut)
        .and_then(|rect| DonutChart::legend_hit(&state.showcase.donut, rect, x, y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, PageSizeMode};
    use crate::core::record::seed_candidates;
    use crate::core::sort::SortState;
    use crate::ui::layout::AppLayout;

    fn state() -> AppState {
        let mut s = AppState::new(seed_candidates(), "test".into(), AppConfig::default());
        s.resize(120, 40);
        s
    }

    fn press(s: &mut AppState, code: KeyCode) {
        handle_key(s, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            press(s, KeyCode::Char(c));
        }
    }

    fn click(s: &mut AppState, col: u16, row: u16) {
        handle_mouse(
            s,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn first_name(s: &mut AppState) -> String {
        s.pipeline.view(&s.records).rows[0].name.clone()
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut s = state();
        s.active_view = ActiveView::ControlsSubmenu;
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn search_typing_filters_the_table() {
        let mut s = state();
        press(&mut s, KeyCode::Char('/'));
        assert_eq!(s.pipeline_focus, PipelineFocus::Search);
        type_str(&mut s, "mahm");
        assert_eq!(s.search.value, "mahm");
        let view = s.pipeline.view(&s.records);
        assert_eq!(view.matched, 1);
        assert_eq!(view.rows[0].name, "Aya Mahmoud");
        // Letters bound to actions are text while searching.
        assert!(!s.should_quit);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.pipeline_focus, PipelineFocus::Table);
    }

    #[test]
    fn keyboard_sort_cycles_focused_column() {
        let mut s = state();
        press(&mut s, KeyCode::Right);
        press(&mut s, KeyCode::Right);
        assert_eq!(s.focused_column, 2);
        press(&mut s, KeyCode::Char('s'));
        press(&mut s, KeyCode::Char('s'));
        assert_eq!(first_name(&mut s), "Lina Markovic");
        press(&mut s, KeyCode::Char('s'));
        let ids: Vec<u32> = s.pipeline.ordered(&s.records).iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn unsortable_column_reports_instead() {
        let mut s = state();
        s.focused_column = 4;
        press(&mut s, KeyCode::Char('s'));
        assert_eq!(s.pipeline.sort(), &SortState::default());
        assert_eq!(s.status_message.as_deref(), Some("Anti-cheat is not sortable"));
    }

    #[test]
    fn header_click_sorts() {
        let mut s = state();
        let table = s.pipeline_layout().table;
        let geo = TableGeometry::new(table, PIPELINE_COLUMNS, 1);
        let (x, _) = geo.spans[2];
        click(&mut s, x + 1, table.y);
        click(&mut s, x + 1, table.y);
        assert_eq!(first_name(&mut s), "Lina Markovic");
    }

    #[test]
    fn row_menu_reports_choice_only() {
        let mut s = state();
        let name = first_name(&mut s);
        press(&mut s, KeyCode::Char('m'));
        assert!(s.row_menu.menu.is_open());
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert!(!s.row_menu.menu.is_open());
        assert_eq!(s.status_message, Some(format!("Shortlisted {name}")));
        assert_eq!(s.records, seed_candidates());
    }

    #[test]
    fn row_menu_glyph_click_and_outside_click() {
        let mut s = state();
        let geo = TableGeometry::new(s.pipeline_layout().table, PIPELINE_COLUMNS, 1);
        let glyph = geo.menu_cell(1);
        click(&mut s, glyph.x + 1, glyph.y);
        assert!(s.row_menu.menu.is_open());
        assert_eq!(s.row_menu.row, 1);
        assert_eq!(s.selected_row, Some(1));
        let content = AppLayout::from_area(s.terminal_area).content;
        click(&mut s, content.x, content.bottom() - 1);
        assert!(!s.row_menu.menu.is_open());
    }

    #[test]
    fn paging_keeps_selection_on_page() {
        let mut s = state();
        s.config.page_size = PageSizeMode::Fixed(5);
        s.apply_page_size();
        for _ in 0..5 {
            press(&mut s, KeyCode::Down);
        }
        assert_eq!(s.pipeline.pager().current(), 2);
        assert_eq!(s.selected_row, Some(0));
        press(&mut s, KeyCode::Char(']'));
        press(&mut s, KeyCode::Char(']'));
        assert_eq!(s.pipeline.pager().current(), 3);
        assert_eq!(s.selected_row, Some(0));
        press(&mut s, KeyCode::Up);
        assert_eq!(s.pipeline.pager().current(), 2);
        assert_eq!(s.selected_row, Some(4));
    }

    #[test]
    fn page_input_jumps_and_rejects_out_of_range() {
        let mut s = state();
        s.config.page_size = PageSizeMode::Fixed(5);
        s.apply_page_size();
        press(&mut s, KeyCode::Tab);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.pipeline_focus, PipelineFocus::PageInput);
        type_str(&mut s, "3");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.pipeline.pager().current(), 3);
        press(&mut s, KeyCode::BackTab);
        type_str(&mut s, "9");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.pipeline.pager().current(), 3);
        assert_eq!(s.status_message.as_deref(), Some("No page 9"));
    }

    #[test]
    fn entering_the_current_page_is_not_an_error() {
        let mut s = state();
        s.config.page_size = PageSizeMode::Fixed(5);
        s.apply_page_size();
        press(&mut s, KeyCode::Tab);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.pipeline_focus, PipelineFocus::PageInput);
        type_str(&mut s, "1");
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.pipeline.pager().current(), 1);
        assert_eq!(s.status_message, None);
    }

    #[test]
    fn notifications_open_mark_seen_and_close_on_escape() {
        let mut s = state();
        assert!(s.feed.badge_count() > 0);
        press(&mut s, KeyCode::Char('n'));
        assert!(s.notifications.is_open());
        assert_eq!(s.feed.badge_count(), 0);
        press(&mut s, KeyCode::Esc);
        assert!(!s.notifications.is_open());
    }

    #[test]
    fn bell_click_toggles_and_outside_click_closes() {
        let mut s = state();
        let bell = Navbar::bell_area(s.layout().navbar);
        click(&mut s, bell.x + 1, bell.y);
        assert!(s.notifications.is_open());
        let content = s.layout().content;
        click(&mut s, content.x + 1, content.bottom() - 1);
        assert!(!s.notifications.is_open());
    }

    #[test]
    fn settings_cycle_page_size() {
        let mut s = state();
        press(&mut s, KeyCode::Char('?'));
        assert_eq!(s.active_view, ActiveView::SettingsMenu);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.config.page_size, PageSizeMode::Fixed(5));
        assert_eq!(s.pipeline.pager().per_page(), 5);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Main);
    }

    #[test]
    fn rebinding_from_controls_submenu() {
        let mut s = state();
        press(&mut s, KeyCode::Char('?'));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.active_view, ActiveView::ControlsSubmenu);
        press(&mut s, KeyCode::Enter);
        assert!(s.awaiting_rebind);
        press(&mut s, KeyCode::Char('x'));
        assert!(!s.awaiting_rebind);
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(s.config.match_key(x), Some(Action::MoveUp));
    }

    #[test]
    fn switch_page_and_activate_showcase_button() {
        let mut s = state();
        press(&mut s, KeyCode::Char('p'));
        assert_eq!(s.page(), Page::Showcase);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.showcase.focus, Some(Slot::PrimaryButton));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.status_message.as_deref(), Some("Primary button pressed"));
    }

    #[test]
    fn showcase_click_flips_toggle() {
        let mut s = state();
        s.select_nav(NavSelection::entry(1));
        let content = s.layout().content;
        let rect = s.showcase_layout().rect(Slot::Toggle).unwrap();
        let before = s.showcase.toggle.checked;
        let scroll = s.showcase.scroll;
        click(&mut s, content.x + rect.x, content.y + rect.y - scroll);
        assert_eq!(s.showcase.toggle.checked, !before);
        assert_eq!(s.showcase.focus, Some(Slot::Toggle));
    }

    #[test]
    fn showcase_typing_does_not_trigger_shortcuts() {
        let mut s = state();
        s.select_nav(NavSelection::entry(1));
        s.showcase.focus(Some(Slot::TextInput));
        type_str(&mut s, "pq?");
        assert_eq!(s.showcase.text.value, "pq?");
        assert_eq!(s.page(), Page::Showcase);
        assert!(!s.should_quit);
        assert_eq!(s.active_view, ActiveView::Main);
    }

    #[test]
    fn dropdown_keyboard_selection() {
        let mut s = state();
        s.select_nav(NavSelection::entry(1));
        s.showcase.focus(Some(Slot::Dropdown));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.showcase.open_menu(), Some(Slot::Dropdown));
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.showcase.dropdown.selected_label(), Some("Engineering"));
        assert_eq!(s.showcase.open_menu(), None);
    }

    #[test]
    fn clicks_on_the_shell_close_page_popovers() {
        let mut s = state();
        let layout = s.layout();
        let navbar_rule = (layout.navbar.x + layout.navbar.width / 2, layout.navbar.y + 1);
        let status = (layout.status.x + 5, layout.status.y);

        s.row_menu.toggle_for(0);
        click(&mut s, navbar_rule.0, navbar_rule.1);
        assert!(!s.row_menu.menu.is_open());
        s.row_menu.toggle_for(0);
        click(&mut s, status.0, status.1);
        assert!(!s.row_menu.menu.is_open());

        s.select_nav(NavSelection::entry(1));
        s.showcase.focus(Some(Slot::Dropdown));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.showcase.open_menu(), Some(Slot::Dropdown));
        click(&mut s, status.0, status.1);
        assert_eq!(s.showcase.open_menu(), None);

        press(&mut s, KeyCode::Enter);
        assert_eq!(s.showcase.open_menu(), Some(Slot::Dropdown));
        click(&mut s, navbar_rule.0, navbar_rule.1);
        assert_eq!(s.showcase.open_menu(), None);
        assert_eq!(s.page(), Page::Showcase);
    }

    #[test]
    fn sidebar_click_switches_page() {
        let mut s = state();
        let sidebar = s.layout().sidebar;
        // Logo line, gap, then one line per entry.
        click(&mut s, sidebar.x + 2, sidebar.y + 3);
        assert_eq!(s.page(), Page::Showcase);
        assert_eq!(s.nav.trail().first(), Some(&"Design System"));
    }
}
