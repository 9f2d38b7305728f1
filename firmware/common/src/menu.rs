//! Navigation and edit state machine.
//!
//! # Pages
//!
//! - [`Page::Browse`]: rotation moves the selection, a click acts on the
//!   selected item (toggle, open editor, show status, run action)
//! - [`Page::Edit`]: rotation moves the edit cursor, a click commits it
//!
//! Status readouts are not a page. A click on a status item returns
//! [`MenuAction::ShowStatus`] and the caller hands the screen to the status
//! presenter while the machine stays in `Browse`.
//!
//! # Input rules
//!
//! - Only the direction of a step matters. A poll that accumulated `+5`
//!   moves one position, the same as `+1`.
//! - When a poll carries both a step and a click, the click wins and the
//!   step is dropped.
//! - Clicks with nothing to do (unselectable item, empty menu) are no-ops.

use core::ops::Range;

use crate::config::VIEWPORT_SIZE;
use crate::input::InputEvent;
use crate::registry::{Action, ItemKind, ItemRegistry};

/// Menu page.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    #[default]
    Browse,
    Edit,
}

// =============================================================================
// Navigation State
// =============================================================================

/// Selection and scroll position.
///
/// Invariants, for a registry of `count` items:
///
/// - `selected < count` (or `0` when empty)
/// - `viewport_start <= selected < viewport_start + viewport_size`
/// - `viewport_start <= count.saturating_sub(viewport_size)`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationState {
    page: Page,
    selected: usize,
    viewport_start: usize,
    viewport_size: usize,
}

impl NavigationState {
    /// Browse page, first item selected. A zero window is widened to one row.
    pub const fn new(viewport_size: usize) -> Self {
        Self {
            page: Page::Browse,
            selected: 0,
            viewport_start: 0,
            viewport_size: if viewport_size == 0 { 1 } else { viewport_size },
        }
    }

    #[inline]
    pub const fn page(&self) -> Page { self.page }

    #[inline]
    pub const fn selected(&self) -> usize { self.selected }

    #[inline]
    pub const fn viewport_start(&self) -> usize { self.viewport_start }

    #[inline]
    pub const fn viewport_size(&self) -> usize { self.viewport_size }

    /// Indices of the rows currently on screen.
    pub fn visible_range(
        &self,
        count: usize,
    ) -> Range<usize> {
        let start = self.viewport_start.min(count);
        start..(self.viewport_start + self.viewport_size).min(count)
    }

    /// Move the selection one row in the direction of `step`.
    fn step_selection(
        &mut self,
        step: i32,
        count: usize,
    ) {
        let last = count.saturating_sub(1);
        self.selected = match step.signum() {
            1 => (self.selected + 1).min(last),
            -1 => self.selected.saturating_sub(1),
            _ => self.selected.min(last),
        };
        self.scroll_to_selection(count);
    }

    /// Scroll the minimum amount that brings the selection into view.
    fn scroll_to_selection(
        &mut self,
        count: usize,
    ) {
        if self.selected < self.viewport_start {
            self.viewport_start = self.selected;
        } else if self.selected >= self.viewport_start + self.viewport_size {
            self.viewport_start = self.selected + 1 - self.viewport_size;
        }
        self.viewport_start = self.viewport_start.min(count.saturating_sub(self.viewport_size));
    }
}

impl Default for NavigationState {
    fn default() -> Self { Self::new(VIEWPORT_SIZE) }
}

// =============================================================================
// Transitions
// =============================================================================

/// Outcome of one [`MenuStateMachine::apply`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    None,
    /// Selection changed in `Browse`.
    Moved { from: usize, to: usize },
    /// Boolean item flipped in place.
    Toggled { index: usize, value: bool },
    /// Editor opened with the cursor on the current value.
    EnterEdit { index: usize, cursor: i32 },
    /// Cursor moved while editing. Not yet stored.
    CursorMoved { index: usize, cursor: i32 },
    /// Cursor stored into the registry, back in `Browse`.
    Committed { index: usize, value: i32 },
    /// The caller should present this status item.
    ShowStatus { index: usize },
    /// An action item ran.
    Performed { index: usize, action: Action },
}

/// Applies input events to navigation state and item values.
#[derive(Clone, Copy, Debug)]
pub struct MenuStateMachine {
    nav: NavigationState,
    cursor: i32,
}

impl MenuStateMachine {
    pub const fn new(viewport_size: usize) -> Self {
        Self {
            nav: NavigationState::new(viewport_size),
            cursor: 0,
        }
    }

    #[inline]
    pub const fn state(&self) -> &NavigationState { &self.nav }

    /// Cursor value while on the edit page.
    #[inline]
    pub const fn edit_cursor(&self) -> Option<i32> {
        match self.nav.page {
            Page::Edit => Some(self.cursor),
            Page::Browse => None,
        }
    }

    /// Apply one poll of input.
    pub fn apply(
        &mut self,
        event: InputEvent,
        registry: &mut ItemRegistry,
    ) -> MenuAction {
        if registry.is_empty() {
            return MenuAction::None;
        }
        match (self.nav.page, event.clicked) {
            (Page::Browse, true) => self.click_browse(registry),
            (Page::Browse, false) if event.step != 0 => {
                let from = self.nav.selected;
                self.nav.step_selection(event.step, registry.count());
                let to = self.nav.selected;
                if from == to { MenuAction::None } else { MenuAction::Moved { from, to } }
            }
            (Page::Edit, true) => self.commit(registry),
            (Page::Edit, false) if event.step != 0 => self.step_cursor(event.step, registry),
            _ => MenuAction::None,
        }
    }

    fn click_browse(
        &mut self,
        registry: &mut ItemRegistry,
    ) -> MenuAction {
        let index = self.nav.selected;
        let Some(item) = registry.get(index).copied() else {
            return MenuAction::None;
        };
        if !item.selectable {
            return MenuAction::None;
        }
        match item.kind {
            ItemKind::Boolean => match registry.toggle(index) {
                Some(value) => MenuAction::Toggled { index, value },
                None => MenuAction::None,
            },
            ItemKind::Integer { .. } | ItemKind::Enum { .. } => {
                self.nav.page = Page::Edit;
                self.cursor = item.value;
                MenuAction::EnterEdit { index, cursor: item.value }
            }
            ItemKind::Status => MenuAction::ShowStatus { index },
            ItemKind::Action(action) => {
                match action {
                    Action::ResetDefaults => registry.reset_defaults(),
                }
                MenuAction::Performed { index, action }
            }
        }
    }

    fn step_cursor(
        &mut self,
        step: i32,
        registry: &ItemRegistry,
    ) -> MenuAction {
        let index = self.nav.selected;
        let next = match registry.get(index).map(|item| item.kind) {
            Some(ItemKind::Integer { min, max }) => self.cursor.saturating_add(step.signum()).clamp(min, max),
            Some(ItemKind::Enum { choices }) => (self.cursor + step.signum()).rem_euclid(choices.len() as i32),
            _ => {
                // item is no longer editable
                self.nav.page = Page::Browse;
                return MenuAction::None;
            }
        };
        if next == self.cursor {
            return MenuAction::None;
        }
        self.cursor = next;
        MenuAction::CursorMoved { index, cursor: next }
    }

    fn commit(
        &mut self,
        registry: &mut ItemRegistry,
    ) -> MenuAction {
        let index = self.nav.selected;
        self.nav.page = Page::Browse;
        match registry.set_value(index, self.cursor) {
            Some(value) => MenuAction::Committed { index, value },
            None => MenuAction::None,
        }
    }
}

impl Default for MenuStateMachine {
    fn default() -> Self { Self::new(VIEWPORT_SIZE) }
}
