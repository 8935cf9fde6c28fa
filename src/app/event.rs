//! Terminal event stream.
//!
//! A background task polls crossterm and forwards events over a channel.  When
//! nothing arrives within the tick rate a `Tick` is sent instead; ticks drive
//! the reveal animations.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// Poll interval, and therefore the animation frame length.
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// Events consumed by the main loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Map a crossterm event onto an [`AppEvent`].  Key releases and focus or
/// paste events are dropped.
pub fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns the reader task and returns its receiving end.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(ev) => translate(ev),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read terminal event");
                        None
                    }
                }
            } else {
                Some(AppEvent::Tick)
            };
            let Some(app_event) = next else {
                continue;
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
