// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Grind Contributors

//! Integer money arithmetic in minor currency units.
//!
//! All monetary amounts in grind are `i64` cents. Decimal strings are only
//! a presentation format: parsing and formatting round-trip exactly, and no
//! arithmetic ever touches floating point.

use crate::error::{Error, Result};

/// Parse a decimal amount string into minor currency units.
///
/// Accepts an optional leading sign and at most two fractional digits:
/// `"19.99"` → 1999, `"-3"` → -300, `"0.5"` → 50.
pub fn to_minor_units(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() {
        return Err(Error::InvalidAmount(s.to_string()));
    }

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(Error::InvalidAmount(s.to_string()));
    }
    if frac.len() > 2 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(s.to_string()));
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(s.to_string()));
    }

    let whole_units: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| Error::InvalidAmount(s.to_string()))?
    };

    // ".5" means 50 cents, ".05" means 5 cents
    let mut frac_units: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse()
            .map_err(|_| Error::InvalidAmount(s.to_string()))?
    };
    if frac.len() == 1 {
        frac_units *= 10;
    }

    let minor = whole_units
        .checked_mul(100)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(|| Error::InvalidAmount(s.to_string()))?;

    if negative {
        Ok(-minor)
    } else {
        Ok(minor)
    }
}

/// Format minor currency units as a decimal string with two places.
///
/// `1999` → `"19.99"`, `-50` → `"-0.50"`.
pub fn format_minor_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
