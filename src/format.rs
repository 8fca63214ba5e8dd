use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount the Brazilian way: `R$ 1.234.567,89`.
///
/// Cents are rounded half away from zero. Non-finite amounts render as `R$ n/a`.
pub fn format_brl(amount: f64) -> String {
    let Some(decimal) = Decimal::from_f64(amount) else {
        return "R$ n/a".to_string();
    };
    let rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let plain = format!("{:.2}", rounded.abs());
    let (integer, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("R$ {}{},{}", sign, group_thousands(integer, '.'), cents)
}

/// Formats a fraction as a percentage with two decimals: `0.0123` is `1.23%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
