//! Rupee formatting with Indian digit grouping (`12,34,567.89`).

use itax_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Groups whole-number digits as thousands, then lakhs and crores.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount to two decimal places, e.g. `12,00,000.00`.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some(parts) => parts,
        None => (text.as_str(), "00"),
    };

    format!("{sign}{}.{fraction}", group_indian(whole))
}

/// Formats a whole-rupee amount without decimals, e.g. `4,00,001`.
pub fn format_whole(amount: Decimal) -> String {
    let whole = amount.trunc();
    let sign = if whole < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{}", group_indian(&whole.abs().to_string()))
}

/// Formats a percentage rate without trailing zeros, e.g. `5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_inr_groups_lakhs_and_crores() {
        assert_eq!(format_inr(dec!(1200000)), "12,00,000.00");
        assert_eq!(format_inr(dec!(12345678.9)), "1,23,45,678.90");
    }

    #[test]
    fn format_inr_leaves_small_amounts_ungrouped() {
        assert_eq!(format_inr(dec!(999)), "999.00");
        assert_eq!(format_inr(dec!(0.05)), "0.05");
    }

    #[test]
    fn format_inr_groups_thousands() {
        assert_eq!(format_inr(dec!(1000)), "1,000.00");
        assert_eq!(format_inr(dec!(75000)), "75,000.00");
    }

    #[test]
    fn format_inr_keeps_sign() {
        assert_eq!(format_inr(dec!(-150000)), "-1,50,000.00");
    }

    #[test]
    fn format_whole_drops_decimals() {
        assert_eq!(format_whole(dec!(400001)), "4,00,001");
        assert_eq!(format_whole(dec!(2400000.75)), "24,00,000");
    }

    #[test]
    fn format_rate_strips_trailing_zeros() {
        assert_eq!(format_rate(dec!(5.00)), "5%");
        assert_eq!(format_rate(dec!(12.5)), "12.5%");
    }
}
