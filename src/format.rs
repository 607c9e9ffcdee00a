//! Display formatting for calculator outputs
//!
//! Non-finite values render as the configured placeholder instead of a number.

use crate::config::DisplayConfig;

/// Plain number with at most `max_decimals` fraction digits, trailing zeros trimmed
pub fn format_number(x: f64, max_decimals: usize, display: &DisplayConfig) -> String {
    if !x.is_finite() {
        return display.placeholder.clone();
    }

    let fixed = format!("{:.*}", max_decimals, x);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0' && c != '.') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", trimmed),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let whole = if display.group_thousands {
        group_thousands(whole)
    } else {
        whole.to_string()
    };

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, whole, fraction),
        None => format!("{}{}", sign, whole),
    }
}

/// `100·x` with exactly `decimals` fraction digits and a trailing `%`
pub fn format_percent(x: f64, decimals: usize, display: &DisplayConfig) -> String {
    if !x.is_finite() {
        return display.placeholder.clone();
    }
    format!("{:.*}%", decimals, 100.0 * x)
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, c) in whole.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
