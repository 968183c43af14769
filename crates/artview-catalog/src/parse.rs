//! Print-size extraction from free-text size codes such as
//! `"16 x 20 inches"` or `"24x36in"`.
//!
//! Uses manual byte scanning; the only thing we need from the text is the
//! ordered list of numbers.

use artview_core::{Orientation, INCHES_TO_METERS};

/// Returns every integer or decimal number in `text`, left to right.
///
/// A `.` only joins a number when a digit follows it, so `"16. x 20"` yields
/// `[16.0, 20.0]`. A leading `.5` is read as `0.5`.
#[must_use]
pub(crate) fn numeric_tokens(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let starts_decimal = |i: usize| bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit();

    let mut values = Vec::new();
    let mut i = 0usize;

    while i < len {
        if !(bytes[i].is_ascii_digit() || starts_decimal(i)) {
            i += 1;
            continue;
        }

        let num_start = i;
        let mut has_dot = false;
        while i < len {
            if bytes[i].is_ascii_digit() {
                i += 1;
            } else if !has_dot && starts_decimal(i) {
                has_dot = true;
                i += 1;
            } else {
                break;
            }
        }

        if let Ok(v) = text[num_start..i].parse::<f64>() {
            values.push(v);
        }
    }

    values
}

/// Parses `(width, height)` in inches from a size code, correcting the order
/// for the print's orientation.
///
/// The first number is dimension A and the second dimension B; missing
/// numbers are `0`. Portrait prints put the smaller side first, landscape
/// prints the larger. Other orientations keep the order as written.
#[must_use]
pub(crate) fn parse_dimensions_inches(size_text: &str, orientation: &Orientation) -> (f64, f64) {
    let tokens = numeric_tokens(size_text);
    let a = tokens.first().copied().unwrap_or(0.0);
    let b = tokens.get(1).copied().unwrap_or(0.0);

    match orientation {
        Orientation::Portrait if a > b => (b, a),
        Orientation::Landscape if b > a => (b, a),
        _ => (a, b),
    }
}

/// [`parse_dimensions_inches`] converted to meters.
#[must_use]
pub(crate) fn parse_dimensions_meters(size_text: &str, orientation: &Orientation) -> (f64, f64) {
    let (width, height) = parse_dimensions_inches(size_text, orientation);
    (inches_to_meters(width), inches_to_meters(height))
}

#[must_use]
pub(crate) fn inches_to_meters(inches: f64) -> f64 {
    inches * INCHES_TO_METERS
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
