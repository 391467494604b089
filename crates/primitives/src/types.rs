//! Core domain types.
//!
//! Goals:
//! - no bare f64 in series logic
//! - fix the units of every field
//! - make mistakes obvious at the type level

use std::fmt;

/// Instrument price (open/high/low/close, ATR)
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Price(pub f64);

/// Traded quantity (bar volume)
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Qty(pub f64);

/// Bar open time in milliseconds (unix epoch)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampMs(pub i64);

impl Price {
    /// Number of fractional digits in the shortest decimal rendering.
    pub fn decimal_digits(self) -> u32 {
        fractional_digits(self.0)
    }
}

/// Count of characters after the decimal point in the canonical rendering of `v`.
///
/// Uses f64's own `Display`, which prints the shortest string that round-trips
/// (`0.1` renders as "0.1", never as "0.1000000000000000055..."). Integral
/// values render without a separator and count as 0.
pub fn fractional_digits(v: f64) -> u32 {
    let s = v.to_string();
    match s.find('.') {
        Some(i) => (s.len() - 1 - i) as u32,
        None => 0,
    }
}

//
// --- Display (for logs) -----------------------------------------------------
//

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
