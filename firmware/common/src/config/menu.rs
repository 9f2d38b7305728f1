//! Registry and viewport capacities.

/// Number of menu rows visible at once.
pub const VIEWPORT_SIZE: usize = 3;

/// Maximum number of items a registry can hold.
pub const MAX_ITEMS: usize = 16;

/// Capacity of a derived item label ("Contrast: 100").
pub const LABEL_LEN: usize = 32;

/// Capacity of the text carried by a single draw command.
pub const TEXT_LEN: usize = 36;

// A row is "> " followed by the label
const _: () = assert!(TEXT_LEN >= LABEL_LEN + 2);
const _: () = assert!(VIEWPORT_SIZE > 0 && VIEWPORT_SIZE <= MAX_ITEMS);
