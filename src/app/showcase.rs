//! Showcase page state: every demo widget's state, the keyboard focus ring,
//! the scroll offset and one reveal per section.
//!
//! Geometry lives in [`crate::ui::showcase`]; this module only knows which
//! slot is focused and what a key or activation does to it.

use crate::core::chart::Slice;
use crate::core::overlay::OverlayEvent;
use crate::core::paginate::Pager;
use crate::core::reveal::Reveal;
use crate::ui::badge::RoleBadgeState;
use crate::ui::cards::{QuestionEvent, QuestionField, QuestionState};
use crate::ui::dropdown::DropdownState;
use crate::ui::inputs::{InputKind, InputState};
use crate::ui::pagination::PaginationState;
use crate::ui::tabs::TabsState;
use crate::ui::tags::TagsState;
use crate::ui::textarea::{FileInputState, TextareaState};
use crate::ui::toggle::ToggleState;

/// Ticks a section takes to fade in.
pub const REVEAL_TICKS: u16 = 8;
/// Pages the pagination demo pretends to have.
pub const DEMO_TOTAL_PAGES: usize = 25;

pub const TAB_LABELS: &[&str] = &["Overview", "Candidates", "Settings"];
pub const BREADCRUMB_DEMO: &[&str] = &["Jobs", "Frontend Developer", "Candidates"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Controls,
    Navigation,
    Inputs,
    Cards,
    Charts,
}

impl Section {
    /// Same order as the sidebar's sub-items.
    pub const ALL: &[Section] = &[
        Section::Controls,
        Section::Navigation,
        Section::Inputs,
        Section::Cards,
        Section::Charts,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Controls => "Controls",
            Section::Navigation => "Navigation",
            Section::Inputs => "Inputs",
            Section::Cards => "Cards",
            Section::Charts => "Charts",
        }
    }
}

/// A placed element of the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Heading(Section),
    PrimaryButton,
    SecondaryButton,
    GhostButton,
    DisabledButton,
    Toggle,
    DisabledToggle,
    Badges,
    RoleBadge,
    Breadcrumb,
    Tabs,
    Pagination,
    TextInput,
    EmailInput,
    PasswordInput,
    SearchInput,
    Dropdown,
    Textarea,
    FileInput,
    Tags,
    QuickInfo,
    InfoCard,
    ActionCard,
    EntityCard,
    Question(usize),
    AddQuestion,
    Donut,
    Stats,
}

impl Slot {
    /// Reachable with Tab.
    pub fn focusable(self) -> bool {
        !matches!(
            self,
            Slot::Heading(_)
                | Slot::Badges
                | Slot::Breadcrumb
                | Slot::QuickInfo
                | Slot::InfoCard
                | Slot::ActionCard
                | Slot::Donut
                | Slot::Stats
                | Slot::DisabledButton
                | Slot::DisabledToggle
        )
    }
}

#[derive(Debug, Clone)]
pub struct ShowcaseState {
    pub toggle: ToggleState,
    pub disabled_toggle: ToggleState,
    pub role: RoleBadgeState,
    pub tabs: TabsState,
    pub pager: Pager,
    pub page_input: PaginationState,
    pub text: InputState,
    pub email: InputState,
    pub password: InputState,
    pub search: InputState,
    pub dropdown: DropdownState,
    pub textarea: TextareaState,
    pub file: FileInputState,
    pub tags: TagsState,
    pub questions: Vec<QuestionState>,
    /// Entity card star.
    pub saved: bool,
    pub donut: Vec<Slice>,
    pub stats: Vec<(&'static str, i64)>,
    /// Donut legend row under the pointer.
    pub hovered: Option<usize>,
    pub focus: Option<Slot>,
    /// First document line shown at the top of the viewport.
    pub scroll: u16,
    pub reveals: Vec<Reveal>,
}

impl ShowcaseState {
    pub fn new(animations: bool) -> Self {
        Self {
            toggle: ToggleState {
                checked: true,
                disabled: false,
            },
            disabled_toggle: ToggleState {
                checked: false,
                disabled: true,
            },
            role: RoleBadgeState::default(),
            tabs: TabsState::new(TAB_LABELS.len()),
            pager: Pager::new(12).with_declared_total(DEMO_TOTAL_PAGES),
            page_input: PaginationState::default(),
            text: InputState::new(InputKind::Text, "Full name")
                .with_placeholder("Jane Doe")
                .required(),
            email: InputState::new(InputKind::Email, "Email Address")
                .with_placeholder("Enter your email...")
                .with_hint("We'll never share your email"),
            password: InputState::new(InputKind::Password, "Password")
                .with_placeholder("At least 8 characters"),
            search: InputState::new(InputKind::Search, "Search").with_placeholder("Search"),
            dropdown: DropdownState::new(
                "Department",
                "Select a department",
                &["Design", "Engineering", "Marketing", "Operations", "Sales"],
            ),
            textarea: TextareaState::new("Cover letter")
                .with_placeholder("Tell us about yourself")
                .with_max_length(200)
                .auto_size(),
            file: FileInputState::new("Resume"),
            tags: TagsState::new(&["React", "TypeScript", "Figma"], true),
            questions: vec![QuestionState {
                title: "Two sum problem".into(),
                difficulty: Some(crate::ui::cards::Difficulty::Easy),
                time: Some(2),
                ..QuestionState::default()
            }],
            saved: false,
            donut: vec![
                Slice::new("Applied", 1200),
                Slice::new("Screened", 640),
                Slice::new("Interviewed", 210),
                Slice::new("Offered", 45),
                Slice::new("Hired", 30),
            ],
            stats: vec![
                ("Technical", 82),
                ("Communication", 67),
                ("Problem solving", 91),
                ("Culture fit", 74),
            ],
            hovered: None,
            focus: None,
            scroll: 0,
            reveals: fresh_reveals(animations),
        }
    }

    /// Turning animations off shows everything at once; turning them on
    /// re-arms every section.
    pub fn set_animations(&mut self, on: bool) {
        self.reveals = fresh_reveals(on);
    }

    pub fn progress(&self, section: Section) -> f32 {
        self.reveals
            .get(section.index())
            .map_or(1.0, Reveal::progress)
    }

    pub fn tick(&mut self) {
        for r in &mut self.reveals {
            r.tick();
        }
    }

    // ── focus ───────────────────────────────────────────────────

    /// Move focus to `slot`.  Leaving the e-mail field validates it.
    pub fn focus(&mut self, slot: Option<Slot>) {
        if self.focus == slot {
            return;
        }
        if self.focus == Some(Slot::EmailInput) {
            self.email.blur();
        }
        self.focus = slot;
    }

    /// Step through `order` (the focusable slots in layout order).
    pub fn cycle_focus(&mut self, order: &[Slot], forward: bool) {
        if order.is_empty() {
            return;
        }
        let next = match self.focus.and_then(|f| order.iter().position(|s| *s == f)) {
            None if forward => 0,
            None => order.len() - 1,
            Some(i) if forward => (i + 1) % order.len(),
            Some(i) => (i + order.len() - 1) % order.len(),
        };
        self.focus(Some(order[next]));
    }

    /// Whether printable keys go into the focused field rather than being
    /// read as shortcuts.
    pub fn is_typing(&self) -> bool {
        match self.focus {
            Some(
                Slot::TextInput
                | Slot::EmailInput
                | Slot::PasswordInput
                | Slot::SearchInput
                | Slot::Textarea,
            ) => true,
            Some(Slot::FileInput) => self.file.draft.is_some(),
            Some(Slot::Tags) => self.tags.is_adding(),
            Some(Slot::Pagination) => self.page_input.editing,
            Some(Slot::Question(i)) => self.questions.get(i).is_some_and(|q| {
                q.expanded && matches!(q.field, QuestionField::Title | QuestionField::Description)
            }),
            _ => false,
        }
    }

    /// The open popover list, if any.
    pub fn open_menu(&self) -> Option<Slot> {
        if self.dropdown.menu.is_open() {
            Some(Slot::Dropdown)
        } else if self.role.menu.is_open() {
            Some(Slot::RoleBadge)
        } else {
            None
        }
    }

    pub fn dismiss_menus(&mut self, event: OverlayEvent) {
        self.dropdown.dismiss(event);
        self.role.dismiss(event);
    }

    // ── editing ─────────────────────────────────────────────────

    pub fn type_char(&mut self, c: char) {
        match self.focus {
            Some(Slot::TextInput) => self.text.push(c),
            Some(Slot::EmailInput) => self.email.push(c),
            Some(Slot::PasswordInput) => self.password.push(c),
            Some(Slot::SearchInput) => self.search.push(c),
            Some(Slot::Textarea) => {
                self.textarea.push(c);
            }
            Some(Slot::FileInput) => self.file.push(c),
            Some(Slot::Tags) => self.tags.push(c),
            Some(Slot::Pagination) => self.page_input.push(c),
            Some(Slot::Question(i)) => {
                if let Some(q) = self.questions.get_mut(i) {
                    q.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Some(Slot::TextInput) => self.text.backspace(),
            Some(Slot::EmailInput) => self.email.backspace(),
            Some(Slot::PasswordInput) => self.password.backspace(),
            Some(Slot::SearchInput) => self.search.backspace(),
            Some(Slot::Textarea) => self.textarea.backspace(),
            Some(Slot::FileInput) => self.file.backspace(),
            Some(Slot::Tags) => self.tags.backspace(),
            Some(Slot::Pagination) => self.page_input.backspace(),
            Some(Slot::Question(i)) => {
                if let Some(q) = self.questions.get_mut(i) {
                    q.backspace();
                }
            }
            _ => {}
        }
    }

    /// Escape inside the focused element.  Returns `false` when there was
    /// nothing to cancel, so the caller can drop focus instead.
    pub fn cancel(&mut self) -> bool {
        match self.focus {
            Some(Slot::FileInput) if self.file.draft.is_some() => self.file.cancel(),
            Some(Slot::Tags) if self.tags.is_adding() => self.tags.cancel(),
            Some(Slot::Pagination) if self.page_input.editing => self.page_input.cancel(),
            Some(Slot::Question(i)) if self.questions.get(i).is_some_and(|q| q.expanded) => {
                self.questions[i].toggle_expanded();
            }
            _ => return false,
        }
        true
    }

    /// Left/Right on the focused element.
    pub fn step(&mut self, forward: bool) {
        match self.focus {
            Some(Slot::Tabs) => {
                if forward {
                    self.tabs.next();
                } else {
                    self.tabs.prev();
                }
            }
            Some(Slot::Pagination) => {
                if forward {
                    self.pager.next(0);
                } else {
                    self.pager.prev(0);
                }
            }
            Some(Slot::Question(i)) => {
                if let Some(q) = self.questions.get_mut(i) {
                    q.cycle(forward);
                }
            }
            _ => {}
        }
    }

    /// Enter / Space on the focused element.  Returns a status line for
    /// actions that have no visible effect of their own.
    pub fn activate(&mut self) -> Option<String> {
        let slot = self.focus?;
        match slot {
            Slot::PrimaryButton => return Some("Primary button pressed".into()),
            Slot::SecondaryButton => return Some("Secondary button pressed".into()),
            Slot::GhostButton => return Some("Ghost button pressed".into()),
            Slot::Toggle => {
                self.toggle.activate();
            }
            Slot::RoleBadge => self.role.activate(),
            Slot::Tabs => self.tabs.next(),
            Slot::Pagination => {
                if self.page_input.editing {
                    if let Some(page) = self.page_input.submit() {
                        if !self.pager.go_to(page, 0) {
                            return Some(format!("No page {page}"));
                        }
                    }
                } else {
                    self.page_input.begin_edit();
                }
            }
            Slot::Dropdown => self.dropdown.activate(),
            Slot::Textarea => {
                self.textarea.push('\n');
            }
            Slot::FileInput => {
                if self.file.draft.is_some() {
                    self.file.commit();
                    if let Some(name) = &self.file.file_name {
                        return Some(format!("Attached {name}"));
                    }
                } else {
                    self.file.begin();
                }
            }
            Slot::Tags => {
                if self.tags.is_adding() {
                    self.tags.commit();
                } else {
                    self.tags.start_adding();
                }
            }
            Slot::EntityCard => {
                self.saved = !self.saved;
            }
            Slot::Question(i) => return self.activate_question(i),
            Slot::AddQuestion => self.add_question(),
            Slot::SearchInput => self.search.activate_action(),
            Slot::PasswordInput => self.password.toggle_reveal(),
            _ => {}
        }
        None
    }

    fn activate_question(&mut self, index: usize) -> Option<String> {
        let q = self.questions.get_mut(index)?;
        if !q.expanded {
            q.toggle_expanded();
            return None;
        }
        match q.activate() {
            QuestionEvent::Remove => {
                self.remove_question(index);
                Some(format!("Question {} removed", index + 1))
            }
            QuestionEvent::Done | QuestionEvent::None => None,
        }
    }

    /// Up/Down inside an expanded question moves between its fields.
    /// Returns `false` when the key is not consumed.
    pub fn move_within(&mut self, forward: bool) -> bool {
        match self.focus {
            Some(Slot::Question(i)) => match self.questions.get_mut(i) {
                Some(q) if q.expanded => {
                    if forward {
                        q.next_field();
                    } else {
                        q.prev_field();
                    }
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    pub fn add_question(&mut self) {
        let q = QuestionState {
            expanded: true,
            ..QuestionState::default()
        };
        self.questions.push(q);
        let slot = Slot::Question(self.questions.len() - 1);
        self.focus(Some(slot));
    }

    pub fn remove_question(&mut self, index: usize) {
        if index >= self.questions.len() {
            return;
        }
        self.questions.remove(index);
        if matches!(self.focus, Some(Slot::Question(_))) {
            self.focus = None;
        }
    }
}

fn fresh_reveals(animations: bool) -> Vec<Reveal> {
    Section::ALL
        .iter()
        .map(|_| {
            if animations {
                Reveal::new(REVEAL_TICKS)
            } else {
                Reveal::shown()
            }
        })
        .collect()
}
