//! Menu item registry.
//!
//! The registry owns every [`MenuItem`] for the lifetime of the program. An
//! item's identity is its index, which never changes after construction.
//!
//! # Value policy
//!
//! Values are stored as `i32` for every kind:
//!
//! - `Integer`: the number itself, always within `[min, max]`
//! - `Boolean`: `0` or `1`
//! - `Enum`: an index into `choices`
//! - `Status`: the last published reading, unconstrained
//! - `Action`: always `0`
//!
//! Writes are clamped silently. Writes that make no sense for a kind (setting
//! a status item, toggling an integer) are ignored.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{LABEL_LEN, MAX_ITEMS};
use crate::error::RegistryError;

// =============================================================================
// Item Definitions
// =============================================================================

/// Command run when an action item is clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Restore every item to its default value.
    ResetDefaults,
}

/// What an item holds and how the menu treats a click on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Integer { min: i32, max: i32 },
    Boolean,
    Enum { choices: &'static [&'static str] },
    /// Read-only value shown full-screen by the status presenter.
    Status,
    Action(Action),
}

/// Hardware an item is tied to.
///
/// Output bindings are pushed to the actuators whenever the value changes.
/// Input bindings are filled from a sensor by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Binding {
    /// Boolean item driving the backlight.
    Backlight,
    /// Integer item (0-100) driving display contrast.
    Contrast,
    /// Status item showing the soil moisture reading.
    Moisture,
}

impl Binding {
    /// Whether this binding can be attached to an item of `kind`.
    const fn accepts(
        self,
        kind: &ItemKind,
    ) -> bool {
        match self {
            Self::Backlight => matches!(kind, ItemKind::Boolean),
            Self::Contrast => matches!(kind, ItemKind::Integer { .. }),
            Self::Moisture => matches!(kind, ItemKind::Status),
        }
    }
}

/// A single configurable or read-only entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u8,
    pub name: &'static str,
    pub kind: ItemKind,
    pub value: i32,
    pub default: i32,
    pub binding: Option<Binding>,
    pub selectable: bool,
}

impl MenuItem {
    const fn with_kind(
        id: u8,
        name: &'static str,
        kind: ItemKind,
        default: i32,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            value: default,
            default,
            binding: None,
            selectable: true,
        }
    }

    /// Integer in `[min, max]`.
    pub const fn integer(
        id: u8,
        name: &'static str,
        min: i32,
        max: i32,
        default: i32,
    ) -> Self {
        Self::with_kind(id, name, ItemKind::Integer { min, max }, default)
    }

    pub const fn boolean(
        id: u8,
        name: &'static str,
        default: bool,
    ) -> Self {
        Self::with_kind(id, name, ItemKind::Boolean, default as i32)
    }

    /// Enumerated choice. `default` is an index into `choices`.
    pub const fn choice(
        id: u8,
        name: &'static str,
        choices: &'static [&'static str],
        default: usize,
    ) -> Self {
        Self::with_kind(id, name, ItemKind::Enum { choices }, default as i32)
    }

    pub const fn status(
        id: u8,
        name: &'static str,
        initial: i32,
    ) -> Self {
        Self::with_kind(id, name, ItemKind::Status, initial)
    }

    pub const fn action(
        id: u8,
        name: &'static str,
        action: Action,
    ) -> Self {
        Self::with_kind(id, name, ItemKind::Action(action), 0)
    }

    #[inline]
    pub const fn with_binding(
        mut self,
        binding: Binding,
    ) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Mark the item as display-only. Clicks on it are ignored.
    #[inline]
    pub const fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    /// Nearest valid value for this item.
    pub fn clamp(
        &self,
        value: i32,
    ) -> i32 {
        match self.kind {
            ItemKind::Integer { min, max } => value.clamp(min, max),
            ItemKind::Boolean => value.clamp(0, 1),
            ItemKind::Enum { choices } => value.clamp(0, choices.len().saturating_sub(1) as i32),
            ItemKind::Status => value,
            ItemKind::Action(_) => 0,
        }
    }

    /// Whether the item can enter the edit page.
    #[inline]
    pub const fn is_editable(&self) -> bool { matches!(self.kind, ItemKind::Integer { .. } | ItemKind::Enum { .. }) }

    /// Text for the current value, without the item name.
    pub fn value_text(&self) -> String<LABEL_LEN> {
        let mut text = String::new();
        match self.kind {
            ItemKind::Boolean => {
                text.push_str(if self.value != 0 { "ON" } else { "OFF" }).ok();
            }
            ItemKind::Enum { choices } => {
                let name = choices.get(self.value as usize).copied().unwrap_or("?");
                text.push_str(name).ok();
            }
            ItemKind::Integer { .. } | ItemKind::Status => {
                write!(text, "{}", self.value).ok();
            }
            ItemKind::Action(_) => {}
        }
        text
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let kind_ok = match self.kind {
            ItemKind::Integer { min, max } => min <= max,
            ItemKind::Enum { choices } => !choices.is_empty(),
            _ => true,
        };
        let binding_ok = self.binding.is_none_or(|b| b.accepts(&self.kind));
        if kind_ok && binding_ok {
            Ok(())
        } else {
            Err(RegistryError::InvalidItem)
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered, fixed-capacity list of menu items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRegistry {
    items: Vec<MenuItem, MAX_ITEMS>,
    revision: u32,
}

impl ItemRegistry {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Append an item and return its index.
    ///
    /// The value and default are clamped into the item's valid range.
    pub fn push(
        &mut self,
        mut item: MenuItem,
    ) -> Result<usize, RegistryError> {
        item.validate()?;
        item.default = item.clamp(item.default);
        item.value = item.clamp(item.value);
        let index = self.items.len();
        self.items.push(item).map_err(|_| RegistryError::Full)?;
        Ok(index)
    }

    #[inline]
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&MenuItem> {
        self.items.get(index)
    }

    #[inline]
    pub fn count(&self) -> usize { self.items.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Counter bumped by every value change. Lets renderers detect edits
    /// without diffing every item.
    #[inline]
    pub const fn revision(&self) -> u32 { self.revision }

    /// Store a clamped value. Status and action items are not writable.
    ///
    /// Returns the stored value, or `None` if nothing was written.
    pub fn set_value(
        &mut self,
        index: usize,
        value: i32,
    ) -> Option<i32> {
        let item = self.items.get_mut(index)?;
        if matches!(item.kind, ItemKind::Status | ItemKind::Action(_)) {
            return None;
        }
        let value = item.clamp(value);
        if item.value != value {
            item.value = value;
            self.revision = self.revision.wrapping_add(1);
        }
        Some(value)
    }

    /// Flip a boolean item. Returns the new state, `None` for other kinds.
    pub fn toggle(
        &mut self,
        index: usize,
    ) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        if item.kind != ItemKind::Boolean {
            return None;
        }
        item.value = i32::from(item.value == 0);
        self.revision = self.revision.wrapping_add(1);
        Some(item.value != 0)
    }

    /// Row text for an item, e.g. `Light: ON` or `Volume: 50`.
    pub fn label(
        &self,
        index: usize,
    ) -> String<LABEL_LEN> {
        let mut label = String::new();
        let Some(item) = self.items.get(index) else {
            return label;
        };
        if matches!(item.kind, ItemKind::Action(_)) {
            label.push_str(item.name).ok();
        } else {
            write!(label, "{}: {}", item.name, item.value_text()).ok();
        }
        label
    }

    /// Restore every writable item to its default.
    pub fn reset_defaults(&mut self) {
        let mut changed = false;
        for item in self.items.iter_mut() {
            if matches!(item.kind, ItemKind::Status | ItemKind::Action(_)) {
                continue;
            }
            if item.value != item.default {
                item.value = item.default;
                changed = true;
            }
        }
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
    }

    /// Publish a sensor reading into every status item bound to `binding`.
    ///
    /// Returns true if any stored value changed.
    pub fn update_reading(
        &mut self,
        binding: Binding,
        value: i32,
    ) -> bool {
        let mut changed = false;
        for item in self.items.iter_mut() {
            if item.kind == ItemKind::Status && item.binding == Some(binding) && item.value != value {
                item.value = value;
                changed = true;
            }
        }
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }

    /// Current value of every output-bound item.
    pub fn bound_values(&self) -> impl Iterator<Item = (Binding, i32)> + '_ {
        self.items
            .iter()
            .filter_map(|item| item.binding.map(|b| (b, item.value)))
            .filter(|(b, _)| *b != Binding::Moisture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGS: &[&str] = &["EN", "ES", "EL"];

    fn sample() -> ItemRegistry {
        let mut reg = ItemRegistry::new();
        reg.push(MenuItem::integer(0, "Volume", 0, 100, 50)).unwrap();
        reg.push(MenuItem::boolean(1, "Light", true).with_binding(Binding::Backlight))
            .unwrap();
        reg.push(MenuItem::choice(2, "Language", LANGS, 0)).unwrap();
        reg.push(MenuItem::status(3, "Moisture", 0).with_binding(Binding::Moisture))
            .unwrap();
        reg.push(MenuItem::action(4, "Reset", Action::ResetDefaults)).unwrap();
        reg
    }

    #[test]
    fn test_set_value_clamps_to_nearest_bound() {
        let mut reg = sample();
        assert_eq!(reg.set_value(0, 250), Some(100));
        assert_eq!(reg.get(0).unwrap().value, 100);
        assert_eq!(reg.set_value(0, -7), Some(0));
        assert_eq!(reg.get(0).unwrap().value, 0);
    }

    #[test]
    fn test_set_value_enum_stays_valid_index() {
        let mut reg = sample();
        reg.set_value(2, 9);
        assert_eq!(reg.get(2).unwrap().value, 2);
        assert_eq!(reg.label(2).as_str(), "Language: EL");
    }

    #[test]
    fn test_set_value_ignored_for_status_and_action() {
        let mut reg = sample();
        let rev = reg.revision();
        assert_eq!(reg.set_value(3, 42), None);
        assert_eq!(reg.set_value(4, 1), None);
        assert_eq!(reg.set_value(99, 1), None);
        assert_eq!(reg.revision(), rev);
    }

    #[test]
    fn test_toggle_twice_restores_value() {
        let mut reg = sample();
        assert_eq!(reg.toggle(1), Some(false));
        assert_eq!(reg.label(1).as_str(), "Light: OFF");
        assert_eq!(reg.toggle(1), Some(true));
        assert_eq!(reg.label(1).as_str(), "Light: ON");
    }

    #[test]
    fn test_toggle_non_boolean_is_noop() {
        let mut reg = sample();
        assert_eq!(reg.toggle(0), None);
        assert_eq!(reg.get(0).unwrap().value, 50);
    }

    #[test]
    fn test_labels() {
        let reg = sample();
        assert_eq!(reg.label(0).as_str(), "Volume: 50");
        assert_eq!(reg.label(3).as_str(), "Moisture: 0");
        assert_eq!(reg.label(4).as_str(), "Reset");
        assert_eq!(reg.label(42).as_str(), "");
    }

    #[test]
    fn test_push_rejects_invalid_items() {
        let mut reg = ItemRegistry::new();
        assert_eq!(reg.push(MenuItem::integer(0, "Bad", 10, 0, 5)), Err(RegistryError::InvalidItem));
        assert_eq!(reg.push(MenuItem::choice(0, "Empty", &[], 0)), Err(RegistryError::InvalidItem));
        assert_eq!(
            reg.push(MenuItem::integer(0, "Light", 0, 1, 0).with_binding(Binding::Backlight)),
            Err(RegistryError::InvalidItem)
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn test_push_clamps_default_and_reports_full() {
        let mut reg = ItemRegistry::new();
        let idx = reg.push(MenuItem::integer(0, "Speed", 0, 255, 999)).unwrap();
        assert_eq!(reg.get(idx).unwrap().value, 255);
        assert_eq!(reg.get(idx).unwrap().default, 255);
        for i in 1..MAX_ITEMS {
            reg.push(MenuItem::boolean(i as u8, "B", false)).unwrap();
        }
        assert_eq!(reg.push(MenuItem::boolean(99, "X", false)), Err(RegistryError::Full));
    }

    #[test]
    fn test_reset_defaults_restores_writable_items() {
        let mut reg = sample();
        reg.set_value(0, 10);
        reg.toggle(1);
        reg.set_value(2, 1);
        reg.update_reading(Binding::Moisture, 512);
        reg.reset_defaults();
        assert_eq!(reg.get(0).unwrap().value, 50);
        assert_eq!(reg.get(1).unwrap().value, 1);
        assert_eq!(reg.get(2).unwrap().value, 0);
        // readings are not settings
        assert_eq!(reg.get(3).unwrap().value, 512);
    }

    #[test]
    fn test_update_reading_only_touches_bound_status() {
        let mut reg = sample();
        let rev = reg.revision();
        assert!(reg.update_reading(Binding::Moisture, 700));
        assert!(!reg.update_reading(Binding::Moisture, 700));
        assert!(!reg.update_reading(Binding::Backlight, 0));
        assert_eq!(reg.get(3).unwrap().value, 700);
        assert_eq!(reg.get(1).unwrap().value, 1);
        assert_eq!(reg.revision(), rev + 1);
    }

    #[test]
    fn test_bound_values_lists_outputs() {
        let reg = sample();
        let bound: heapless::Vec<(Binding, i32), 4> = reg.bound_values().collect();
        assert_eq!(bound.as_slice(), &[(Binding::Backlight, 1)]);
    }

    #[test]
    fn test_unselectable_builder() {
        let item = MenuItem::status(0, "Info", 0).unselectable();
        assert!(!item.selectable);
        assert!(!item.is_editable());
    }
}
