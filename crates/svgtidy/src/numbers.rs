// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Number rounding and the shortest number notation.

/// Rounds a number to the specified amount of fractional digits.
#[inline]
pub fn round(n: f64, precision: u8) -> f64 {
    let m = 10f64.powi(precision as i32);
    (n * m).round() / m
}

/// Formats a rounded number in the shortest form.
///
/// Trailing zeros and a leading zero are removed, so `0.50` becomes `.5`.
pub fn format_number(n: f64, precision: u8) -> String {
    let n = round(n, precision);
    if n == 0.0 || !n.is_finite() {
        return "0".to_string();
    }

    let s = n.to_string();
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        s
    }
}

/// Appends a number to a list where separators can be omitted,
/// like path data or `points`.
///
/// A separator is needed only when the next number could be read
/// as a continuation of the previous one.
pub fn push_compact(out: &mut String, number: &str) {
    let needs_space = match (out.chars().last(), number.chars().next()) {
        (None, _) => false,
        (_, Some('-')) => false,
        (Some(prev), Some('.')) => {
            // `.5.5` is two numbers, but `5.5` followed by `.5` must not become `5.5.5`
            // only when the previous number has no dot.
            if prev.is_ascii_digit() {
                !last_number_has_dot(out)
            } else {
                false
            }
        }
        (Some(prev), _) => prev.is_ascii_digit() || prev == '.',
    };

    if needs_space {
        out.push(' ');
    }

    out.push_str(number);
}

fn last_number_has_dot(s: &str) -> bool {
    for c in s.chars().rev() {
        match c {
            '.' => return true,
            '0'..='9' => continue,
            _ => return false,
        }
    }

    false
}

/// Parses a leading number, ignoring any trailing units: `10px` -> `10`.
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = s.as_bytes();
    while end < bytes.len() {
        let c = bytes[end];
        match c {
            b'0'..=b'9' => {}
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if !seen_exp && end > 0 => {
                // `1em` is a unit, not an exponent.
                match bytes.get(end + 1) {
                    Some(b'0'..=b'9') | Some(b'+') | Some(b'-') => seen_exp = true,
                    _ => break,
                }
            }
            _ => break,
        }

        end += 1;
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_notation() {
        assert_eq!(format_number(0.5, 2), ".5");
        assert_eq!(format_number(-0.504, 2), "-.5");
        assert_eq!(format_number(10.0, 2), "10");
        assert_eq!(format_number(1.23456, 3), "1.235");
        assert_eq!(format_number(-0.001, 2), "0");
    }

    #[test]
    fn compact_lists() {
        let mut s = String::new();
        for n in ["10", "-5", ".5", ".5", "3"] {
            push_compact(&mut s, n);
        }
        assert_eq!(s, "10-5 .5.5 3");
    }

    #[test]
    fn leading_number() {
        assert_eq!(parse_leading_number("10px"), Some(10.0));
        assert_eq!(parse_leading_number("1.5em"), Some(1.5));
        assert_eq!(parse_leading_number(" 2e2 "), Some(200.0));
        assert_eq!(parse_leading_number("auto"), None);
    }
}
