//! Open/closed state shared by every popover (role picker, dropdown input,
//! notification panel, row action menu).

/// Things that can happen to a popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The trigger (badge, button, bell) was activated.
    Toggle,
    /// A pointer press landed outside both trigger and panel.
    OutsidePointer,
    /// Escape key.
    Escape,
    /// An option in a selectable list was picked.
    Select,
}

/// Two-state popover.  Every popover owns one; nothing coordinates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dismissible {
    open: bool,
}

impl Dismissible {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Feed one event through the state machine.  Returns `true` when the
    /// state changed.  Only `Toggle` can open; every other event can only
    /// close.
    pub fn handle(&mut self, event: OverlayEvent) -> bool {
        let before = self.open;
        match event {
            OverlayEvent::Toggle => self.toggle(),
            OverlayEvent::OutsidePointer | OverlayEvent::Escape | OverlayEvent::Select => {
                self.close()
            }
        }
        if before != self.open {
            tracing::debug!(?event, open = self.open, "overlay transition");
        }
        before != self.open
    }
}
