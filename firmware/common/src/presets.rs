//! Built-in menu layouts.

use crate::error::RegistryError;
use crate::registry::{Action, Binding, ItemRegistry, MenuItem};

pub const LANGUAGES: &[&str] = &["EN", "ES", "EL"];
pub const DIFFICULTIES: &[&str] = &["EASY", "HARD"];

/// Items of the garden controller menu, in display order.
pub const GARDEN_ITEMS: [MenuItem; 11] = [
    MenuItem::integer(0, "Contrast", 0, 100, 60).with_binding(Binding::Contrast),
    MenuItem::integer(1, "Volume", 0, 100, 50),
    MenuItem::integer(2, "Pump Speed", 0, 255, 0),
    MenuItem::integer(3, "Threshold", 0, 255, 128),
    MenuItem::boolean(4, "Light", true).with_binding(Binding::Backlight),
    MenuItem::boolean(5, "Pump", false),
    MenuItem::choice(6, "Language", LANGUAGES, 0),
    MenuItem::choice(7, "Difficulty", DIFFICULTIES, 0),
    MenuItem::status(8, "Moisture", 0).with_binding(Binding::Moisture),
    MenuItem::status(9, "Reservoir", 200),
    MenuItem::action(10, "Reset", Action::ResetDefaults),
];

/// Registry holding [`GARDEN_ITEMS`].
pub fn garden_menu() -> Result<ItemRegistry, RegistryError> {
    registry_from(&GARDEN_ITEMS)
}

/// Registry holding `items` in order.
pub fn registry_from(items: &[MenuItem]) -> Result<ItemRegistry, RegistryError> {
    let mut registry = ItemRegistry::new();
    for item in items {
        registry.push(*item)?;
    }
    Ok(registry)
}
