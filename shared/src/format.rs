//! Price formatting for the vi-VN locale

/// Currency suffix appended by [`format_price`]
pub const CURRENCY_SUFFIX: &str = " ₫";

/// Format a price the way the store labels show it
///
/// Thousands are grouped with `.`, the decimal separator is `,` and at most
/// three fraction digits are kept (trailing zeros dropped).
///
/// # Examples
///
/// ```
/// use shared::format::format_price;
///
/// assert_eq!(format_price(25000.0), "25.000 ₫");
/// assert_eq!(format_price(1234567.5), "1.234.567,5 ₫");
/// assert_eq!(format_price(0.0), "0 ₫");
/// ```
pub fn format_price(amount: f64) -> String {
    format!("{}{}", format_number(amount), CURRENCY_SUFFIX)
}

fn format_number(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    // Work in thousandths so rounding happens once
    let scaled = (amount.abs() * 1000.0).round() as u128;
    let integer = scaled / 1000;
    let fraction = scaled % 1000;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let fraction = format!("{:03}", fraction);
        grouped.push(',');
        grouped.push_str(fraction.trim_end_matches('0'));
    }

    if amount < 0.0 && scaled > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
