use chrono::NaiveDate;

use crate::decimal::{Money, Rate};

/// 1.234.567,89 style: period groups thousands, comma marks decimals
pub fn format_money(amount: Money) -> String {
    let rounded = amount.round_dp(2).as_decimal();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(',');
    out.push_str(frac_part);
    out
}

/// zero renders as an empty cell
pub fn format_money_or_blank(amount: Money) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        format_money(amount)
    }
}

/// rate percentage with a decimal comma, e.g. 44,25
pub fn format_rate(rate: Rate) -> String {
    let pct = rate.as_percentage().round_dp(2);
    let text = format!("{:.2}", pct);
    text.replace('.', ",")
}

/// dd.mm.yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_money_format() {
        assert_eq!(format_money(money("1234567.891")), "1.234.567,89");
        assert_eq!(format_money(money("1000")), "1.000,00");
        assert_eq!(format_money(money("999.995")), "1.000,00");
        assert_eq!(format_money(money("12.5")), "12,50");
        assert_eq!(format_money(money("0.004")), "0,00");
        assert_eq!(format_money(money("-0.004")), "0,00");
        assert_eq!(format_money(money("-98765.4321")), "-98.765,43");
        assert_eq!(format_money(Money::ZERO), "0,00");
    }

    #[test]
    fn test_interest_example_renders() {
        let interest = Money::from_decimal(dec!(263000) * dec!(49.25) / dec!(36500));
        assert_eq!(format_money(interest), "354,87");
    }

    #[test]
    fn test_blank_for_zero() {
        assert_eq!(format_money_or_blank(Money::ZERO), "");
        assert_eq!(format_money_or_blank(money("0.00")), "");
        assert_eq!(format_money_or_blank(money("0.001")), "0,00");
        assert_eq!(format_money_or_blank(money("5")), "5,00");
    }

    #[test]
    fn test_rate_and_date() {
        assert_eq!(format_rate(Rate::from_percentage(dec!(44.25))), "44,25");
        assert_eq!(format_rate(Rate::from_percentage(dec!(50))), "50,00");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()),
            "03.09.2025"
        );
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("123456"), "123.456");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }
}
