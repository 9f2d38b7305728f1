//! Transient full-screen overlays.
//!
//! The status presenter takes over the whole screen for a fixed number of
//! ticks, then reports [`OverlayTick::Finished`] so the caller can hand the
//! screen back to the menu. It never changes item values.
//!
//! # Overlays
//!
//! - [`Overlay::Readout`]: a status item's value. Bound readings update
//!   live while it is shown. A click dismisses it early.
//! - [`Overlay::ValueSet`]: short confirmation after an edit is committed.

use crate::colors::{GRAY, GREEN, WHITE, YELLOW};
use crate::config::layout::{OVERLAY_CAPTION_POS, OVERLAY_HINT_POS, OVERLAY_NAME_POS, OVERLAY_VALUE_POS};
use crate::registry::ItemRegistry;
use crate::view::{DrawCommand, DrawList, TextSize, push};

/// Which overlay is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Overlay {
    Readout { index: usize },
    ValueSet { index: usize, value: i32 },
}

/// Result of advancing the overlay timer by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayTick {
    /// Nothing is shown.
    Idle,
    Showing,
    /// The overlay just expired. The menu owns the screen again.
    Finished,
}

#[derive(Clone, Copy, Debug)]
struct Active {
    overlay: Overlay,
    remaining: u32,
}

/// Owner of the full-screen overlay and its countdown.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusPresenter {
    active: Option<Active>,
    /// Overlay and value currently on screen, to skip identical redraws.
    drawn: Option<(Overlay, i32)>,
}

impl StatusPresenter {
    pub const fn new() -> Self {
        Self {
            active: None,
            drawn: None,
        }
    }

    /// Show a status item for `duration_ticks`.
    pub fn present(
        &mut self,
        index: usize,
        duration_ticks: u32,
    ) {
        self.show(Overlay::Readout { index }, duration_ticks);
    }

    /// Show the "value set" confirmation for `duration_ticks`.
    pub fn confirm(
        &mut self,
        index: usize,
        value: i32,
        duration_ticks: u32,
    ) {
        self.show(Overlay::ValueSet { index, value }, duration_ticks);
    }

    fn show(
        &mut self,
        overlay: Overlay,
        duration_ticks: u32,
    ) {
        self.active = Some(Active {
            overlay,
            remaining: duration_ticks.max(1),
        });
        self.drawn = None;
    }

    /// Count down one tick.
    pub fn tick(&mut self) -> OverlayTick {
        let Some(active) = self.active.as_mut() else {
            return OverlayTick::Idle;
        };
        active.remaining = active.remaining.saturating_sub(1);
        if active.remaining == 0 {
            self.active = None;
            self.drawn = None;
            OverlayTick::Finished
        } else {
            OverlayTick::Showing
        }
    }

    /// End the overlay early. Returns false if nothing was shown.
    pub fn dismiss(&mut self) -> bool {
        self.drawn = None;
        self.active.take().is_some()
    }

    #[inline]
    pub const fn is_active(&self) -> bool { self.active.is_some() }

    #[inline]
    pub fn overlay(&self) -> Option<Overlay> { self.active.map(|a| a.overlay) }

    /// Commands for the overlay. Empty when it is already on screen as-is.
    pub fn draw(
        &mut self,
        registry: &ItemRegistry,
    ) -> DrawList {
        let mut list = DrawList::new();
        let Some(overlay) = self.overlay() else {
            return list;
        };
        let (index, caption, value) = match overlay {
            Overlay::Readout { index } => (index, "STATUS", registry.get(index).map_or(0, |i| i.value)),
            Overlay::ValueSet { index, value } => (index, "VALUE SET", value),
        };
        if self.drawn == Some((overlay, value)) {
            return list;
        }
        self.drawn = Some((overlay, value));

        let Some(item) = registry.get(index) else {
            return list;
        };
        push(&mut list, DrawCommand::Clear);
        push(&mut list, DrawCommand::text(OVERLAY_CAPTION_POS, caption, GRAY, TextSize::Normal));
        push(&mut list, DrawCommand::text(OVERLAY_NAME_POS, item.name, YELLOW, TextSize::Large));

        let mut shown = *item;
        shown.value = value;
        let color = match overlay {
            Overlay::Readout { .. } => WHITE,
            Overlay::ValueSet { .. } => GREEN,
        };
        push(&mut list, DrawCommand::text(OVERLAY_VALUE_POS, &shown.value_text(), color, TextSize::Large));
        if matches!(overlay, Overlay::Readout { .. }) {
            push(&mut list, DrawCommand::text(OVERLAY_HINT_POS, "Click to return", GRAY, TextSize::Normal));
        }
        push(&mut list, DrawCommand::Present);
        list
    }
}
