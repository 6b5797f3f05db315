// Logical values travel as u32, so a list can never be wider than that.
pub const MAX_PINS: usize = 32;

// Distinct register ports a single list may span.
pub const MAX_PORTS: usize = 8;
