//! One-shot "reveal when scrolled into view" animation state.
//!
//! The owner reports how much of the element is inside the viewport on each
//! frame and advances the clock on each tick; the renderer reads
//! [`Reveal::progress`].  Once triggered, the reveal never resets.

/// Fraction of an element that must be visible before it starts revealing.
pub const VISIBILITY_THRESHOLD: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// Ticks the fade-in takes; 0 means no animation.
    duration: u16,
    /// `None` until the element first becomes visible.
    elapsed: Option<u16>,
}

impl Reveal {
    pub fn new(duration: u16) -> Self {
        Self {
            duration,
            elapsed: None,
        }
    }

    /// Already fully shown, for when animations are off.
    pub fn shown() -> Self {
        Self {
            duration: 0,
            elapsed: Some(0),
        }
    }

    /// Report the visible fraction (0.0..=1.0) of the element.
    pub fn observe(&mut self, visible_fraction: f32) {
        if self.elapsed.is_none() && visible_fraction >= VISIBILITY_THRESHOLD {
            self.elapsed = Some(0);
        }
    }

    pub fn tick(&mut self) {
        if let Some(e) = self.elapsed.as_mut() {
            *e = e.saturating_add(1);
        }
    }

    /// 0.0 hidden … 1.0 fully revealed.
    pub fn progress(&self) -> f32 {
        let Some(elapsed) = self.elapsed else {
            return 0.0;
        };
        if self.duration == 0 {
            return 1.0;
        }
        (f32::from(elapsed) / f32::from(self.duration)).min(1.0)
    }
}

/// Visible fraction of a vertical span `[top, top+height)` inside a viewport
/// `[0, viewport)`.
pub fn visible_fraction(top: i32, height: u16, viewport: u16) -> f32 {
    if height == 0 {
        return 0.0;
    }
    let bottom = top + i32::from(height);
    let lo = top.max(0);
    let hi = bottom.min(i32::from(viewport));
    if hi <= lo {
        return 0.0;
    }
    (hi - lo) as f32 / f32::from(height)
}
