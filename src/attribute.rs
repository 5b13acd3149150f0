//! Lenient numeric reading of markup attribute values.
//!
//! Attribute values come straight from hand-written html, so both readers
//! skip leading whitespace and then take the longest numeric prefix:
//! `"12px"` reads as `12`, `" 2.5x"` as `2.5`, `"abc"` as nothing.

/// Leading integer of `value`, ignoring anything after the digits
pub fn leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let sign_len = match trimmed.chars().next() {
        Some('+') | Some('-') => 1,
        _ => 0,
    };
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| i64::from(b - b'0'));

    let mut seen = false;
    let mut magnitude: i64 = 0;
    for digit in digits {
        seen = true;
        magnitude = magnitude.saturating_mul(10).saturating_add(digit);
    }
    if !seen {
        return None;
    }
    let signed = if trimmed.starts_with('-') {
        -magnitude
    } else {
        magnitude
    };
    // out of range values saturate instead of failing
    Some(signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Leading decimal number of `value`, ignoring anything after it
pub fn leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let candidate = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .last()
        .map_or(0, |(index, c)| index + c.len_utf8());

    // longest prefix that still parses, "1.5e" -> "1.5"
    (1..=candidate)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .filter(|number| number.is_finite())
}
