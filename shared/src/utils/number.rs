//! Locale-aware number parsing
//!
//! Report pages render numbers either as `1,234.5` or as `1.234,5`. The
//! [`NumberFormat`] picks which convention the page uses.

use serde::{Deserialize, Serialize};

/// Numeric convention of a report page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// `,` is the decimal separator and `.` groups thousands
    pub comma_decimal: bool,
}

impl NumberFormat {
    /// Format with `.` decimals and `,` thousands
    pub const POINT: NumberFormat = NumberFormat {
        comma_decimal: false,
    };

    /// Format with `,` decimals and `.` thousands
    pub const COMMA: NumberFormat = NumberFormat {
        comma_decimal: true,
    };

    pub fn new(comma_decimal: bool) -> Self {
        Self { comma_decimal }
    }

    /// Parse displayed text into a number, returning NaN when no number
    /// can be read from it.
    pub fn parse(&self, s: &str) -> f64 {
        parse_num(s, *self)
    }
}

/// Parse displayed text into a number using the given convention.
///
/// Thousands separators and all whitespace are removed, the decimal
/// separator is normalized to `.`, and the longest leading float is read.
/// Text without a leading number yields NaN.
pub fn parse_num(s: &str, format: NumberFormat) -> f64 {
    let normalized: String = if format.comma_decimal {
        s.replace('.', "").replacen(',', ".", 1)
    } else {
        s.replace(',', "")
    };
    let compact: String = normalized.chars().filter(|c| !is_blank(*c)).collect();
    parse_float_prefix(&compact)
}

/// Whitespace as matched by `\s` in page scripts, which includes the BOM
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Read the longest prefix of `s` that forms a float literal.
fn parse_float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
