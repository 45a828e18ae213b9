//! Display formatting for engine outputs.

use rust_decimal::{Decimal, RoundingStrategy};

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Inserts thousands separators into the integer part of a plain decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// `$1,234.56`, negatives as `-$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round(value, 2);
    let body = group_thousands(&format!("{:.2}", rounded.abs()));
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Like [`format_currency`] with an explicit `+` on positive values.
pub fn format_signed_currency(value: Decimal) -> String {
    let rounded = round(value, 2);
    if rounded > Decimal::ZERO {
        format!("+{}", format_currency(rounded))
    } else {
        format_currency(rounded)
    }
}

/// `+5.00%`, `-3.25%`, `0.00%`. The input is already in percent units.
pub fn format_percent(value: Decimal) -> String {
    let rounded = round(value, 2);
    if rounded > Decimal::ZERO {
        format!("+{rounded:.2}%")
    } else if rounded.is_zero() {
        "0.00%".to_string()
    } else {
        format!("{rounded:.2}%")
    }
}

/// `2.5000 ETH`.
pub fn format_token_amount(value: Decimal, symbol: &str) -> String {
    format!("{:.4} {symbol}", round(value, 4))
}

/// `$1.23K`, `$4.50M`, `$7.00B`. Values under a thousand use [`format_currency`].
pub fn format_compact(value: Decimal) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= Decimal::from(1_000_000_000u64) {
        (abs / Decimal::from(1_000_000_000u64), "B")
    } else if abs >= Decimal::from(1_000_000u64) {
        (abs / Decimal::from(1_000_000u64), "M")
    } else if abs >= Decimal::ONE_THOUSAND {
        (abs / Decimal::ONE_THOUSAND, "K")
    } else {
        return format_currency(value);
    };

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}${:.2}{suffix}", round(scaled, 2))
}
