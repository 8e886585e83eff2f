use rust_decimal::Decimal;

/// Abbreviate a monetary amount the way the report displays it:
/// €1.2M, €450K, €950.
pub fn format_currency(value: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);
    if value.abs() >= million {
        format!("€{:.1}M", value / million)
    } else if value.abs() >= thousand {
        format!("€{:.0}K", value / thousand)
    } else {
        format!("€{:.0}", value)
    }
}

/// One-decimal percentage, e.g. "24.7%".
pub fn format_pct(value: Decimal) -> String {
    format!("{:.1}%", value)
}

/// Signed one-decimal percentage for growth figures, e.g. "+24.3%".
pub fn format_signed_pct(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Two-decimal ratio, e.g. "1.84".
pub fn format_ratio(value: Decimal) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_abbreviation() {
        assert_eq!(format_currency(dec!(44_788_100)), "€44.8M");
        assert_eq!(format_currency(dec!(450_000)), "€450K");
        assert_eq!(format_currency(dec!(950)), "€950");
        assert_eq!(format_currency(dec!(-1_063_790)), "€-1.1M");
    }

    #[test]
    fn test_signed_pct() {
        assert_eq!(format_signed_pct(dec!(24.30)), "+24.3%");
        assert_eq!(format_signed_pct(dec!(-3.26)), "-3.3%");
    }
}
