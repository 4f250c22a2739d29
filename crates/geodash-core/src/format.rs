// crates/geodash-core/src/format.rs

//! Indian-locale number presentation (`12,34,567`, `₹1.25 Cr`, `₹4.80 L`).

use crate::catalog::{Indicator, Unit};
use num_format::{Locale, ToFormattedString};

/// Placeholder for an undefined value.
pub const NOT_AVAILABLE: &str = "N/A";

const LAKH: f64 = 1e5;
const CRORE: f64 = 1e7;

/// Whole number with Indian digit grouping.
pub fn format_count(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en_IN)
}

/// Rupee amount, shortened to lakh or crore above those thresholds.
pub fn format_rupees(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= CRORE {
        format!("{sign}₹{:.2} Cr", abs / CRORE)
    } else if abs >= LAKH {
        format!("{sign}₹{:.2} L", abs / LAKH)
    } else {
        format!("{sign}₹{}", format_count(abs))
    }
}

pub fn format_tonnes(value: f64) -> String {
    format!("{} t", format_count(value))
}

/// Formats a value of `indicator` in its unit; `N/A` when undefined.
pub fn format_value(indicator: Indicator, value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => match indicator.unit() {
            Unit::Rupees => format_rupees(v),
            Unit::Tonnes => format_tonnes(v),
            Unit::Count => format_count(v),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_indian_grouping() {
        assert_eq!(format_count(1_234_567.0), "12,34,567");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(0.4), "0");
    }

    #[test]
    fn rupees_switch_to_lakh_and_crore() {
        assert_eq!(format_rupees(99_999.0), "₹99,999");
        assert_eq!(format_rupees(150_000.0), "₹1.50 L");
        assert_eq!(format_rupees(25_000_000.0), "₹2.50 Cr");
        assert_eq!(format_rupees(-2e7), "-₹2.00 Cr");
    }

    #[test]
    fn undefined_values_render_na() {
        assert_eq!(format_value(Indicator::Funds, None), "N/A");
        assert_eq!(format_value(Indicator::Funds, Some(f64::NAN)), "N/A");
        assert_eq!(format_value(Indicator::FishProduction, Some(12_500.0)), "12,500 t");
        assert_eq!(format_value(Indicator::Beneficiaries, Some(4_200.0)), "4,200");
    }
}
