//! Display formatting for metric cards and chart tooltips.

/// `$1234.50`: fixed number of fraction digits, no grouping.
pub fn format_currency_fixed(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("${value:.decimals$}")
}

/// `$1,234.5`: thousands separators and at most `max_decimals` fraction
/// digits, trailing zeros trimmed.
pub fn format_currency_grouped(value: f64, max_decimals: usize) -> String {
    format!("${}", group_number(value, max_decimals))
}

/// `1,234` for counts.
pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_number(value: f64, max_decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rendered = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let mut out = String::new();
    // Avoid "-0" when rounding swallows a tiny negative value.
    if value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
