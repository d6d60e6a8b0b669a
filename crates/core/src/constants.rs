//! Application-wide constants.

/// Fractional digits carried by every monetary amount. Rounding is half-up
/// at this scale on every construction and arithmetic result.
pub const MONEY_SCALE: u32 = 2;

/// Instrument symbol format: non-empty, 1-10 uppercase ASCII letters.
pub const SYMBOL_PATTERN: &str = "^[A-Z]{1,10}$";
