//! Display formatting for entity states.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Most decimal places any formatter prints.
pub const MAX_DECIMALS: u32 = 20;

/// Above this every `f64` is already integral.
const INTEGRAL_BOUND: f64 = 4_503_599_627_370_496.0;

/// What a formatted value is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Plain card display.
    #[default]
    Display,
    /// Chart axes and other tight spots; thousands become `1.1k`.
    Compact,
    /// Whole numbers only (humidity-style percentages).
    Whole,
}

/// Semantic hints that steer number formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueHint<'a> {
    pub unit: Option<&'a str>,
    pub device_class: Option<&'a str>,
}

impl<'a> ValueHint<'a> {
    pub fn unit(unit: &'a str) -> Self {
        Self {
            unit: Some(unit),
            device_class: None,
        }
    }

    fn wants_whole(&self) -> bool {
        self.device_class == Some("humidity")
    }

    fn is_temperature_or_percent(&self) -> bool {
        self.unit.is_some_and(|u| u.contains('°') || u.contains('%'))
    }
}

/// Format a raw entity state for display.
///
/// Sentinel states become capitalized words, numbers are rounded according
/// to `hint` and `style`, anything else is shown as-is.
pub fn format_state(state: &str, hint: &ValueHint<'_>, style: FormatStyle) -> String {
    match state {
        "unknown" => return "Unknown".to_string(),
        "unavailable" => return "Unavailable".to_string(),
        _ => {}
    }
    match parse_finite(state) {
        Some(value) => format_number(value, hint, style),
        None => state.to_string(),
    }
}

/// Format an already-numeric reading.
pub fn format_number(value: f64, hint: &ValueHint<'_>, style: FormatStyle) -> String {
    if style == FormatStyle::Whole || hint.wants_whole() {
        return fixed(value, 0);
    }
    if hint.is_temperature_or_percent() {
        return fixed(value, 1);
    }
    if round_to(value, 1).abs() >= 1000.0 {
        return match style {
            FormatStyle::Compact => format!("{}k", fixed(value / 1000.0, 1)),
            _ => fixed(value, 0),
        };
    }
    fixed(value, 1)
}

/// Chart axis label for a bare number.
pub fn format_axis_tick(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format_number(value, &ValueHint::default(), FormatStyle::Compact)
}

/// A secondary numeric reading from the attribute map, or `-` when the
/// attribute is missing or not a number.
pub fn format_attribute(attributes: Option<&Map<String, Value>>, key: &str, decimals: u32) -> String {
    let value = attributes.and_then(|attrs| attrs.get(key)).and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_finite(s),
        _ => None,
    });
    match value {
        Some(v) if v.is_finite() => fixed(v, decimals),
        _ => "-".to_string(),
    }
}

/// Parse a state as a finite number. `NaN` and infinities are not readings.
fn parse_finite(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round half away from zero to `decimals` places.
fn round_to(value: f64, decimals: u32) -> f64 {
    if value.abs() >= INTEGRAL_BOUND {
        return value;
    }
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round half away from zero, then print with exactly `decimals` places.
/// `decimals` is capped at [`MAX_DECIMALS`].
fn fixed(value: f64, decimals: u32) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let rounded = round_to(value, decimals);
    format!("{rounded:.prec$}", prec = decimals as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn display(state: &str, unit: &str) -> String {
        format_state(state, &ValueHint::unit(unit), FormatStyle::Display)
    }

    #[test]
    fn test_temperature_one_decimal() {
        assert_eq!(display("23.456", "°C"), "23.5");
        assert_eq!(display("22.567", "°C"), "22.6");
        assert_eq!(display("21", "°F"), "21.0");
    }

    #[test]
    fn test_percentage_one_decimal() {
        assert_eq!(display("54.25", "%"), "54.3");
    }

    #[test]
    fn test_large_magnitude_rounds_to_integer() {
        assert_eq!(display("1234.567", "W"), "1235");
        assert_eq!(display("-2500.4", "W"), "-2500");
    }

    #[test]
    fn test_large_magnitude_compact() {
        let hint = ValueHint::unit("W");
        assert_eq!(format_state("1050", &hint, FormatStyle::Compact), "1.1k");
        assert_eq!(format_state("12000", &hint, FormatStyle::Compact), "12.0k");
    }

    #[test]
    fn test_temperature_wins_over_magnitude() {
        assert_eq!(display("1234.567", "°C"), "1234.6");
    }

    #[test]
    fn test_whole_contexts() {
        let hint = ValueHint {
            unit: Some("%"),
            device_class: Some("humidity"),
        };
        assert_eq!(format_state("56.7", &hint, FormatStyle::Display), "57");
        assert_eq!(
            format_state("56.4", &ValueHint::unit("%"), FormatStyle::Whole),
            "56"
        );
    }

    #[test]
    fn test_default_one_decimal() {
        assert_eq!(display("3.14159", "kWh"), "3.1");
        assert_eq!(format_state("7", &ValueHint::default(), FormatStyle::Display), "7.0");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(display("0.25", ""), "0.3");
        assert_eq!(display("2.5", "%"), "2.5");
        assert_eq!(format_state("2.5", &ValueHint::default(), FormatStyle::Whole), "3");
        assert_eq!(format_state("-2.5", &ValueHint::default(), FormatStyle::Whole), "-3");
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(display("-0.04", "°C"), "0.0");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(display("unknown", "°C"), "Unknown");
        assert_eq!(display("unavailable", "W"), "Unavailable");
    }

    #[test]
    fn test_non_numeric_passthrough() {
        assert_eq!(display("heat", ""), "heat");
        assert_eq!(display("NaN", "°C"), "NaN");
        assert_eq!(display("inf", ""), "inf");
        assert_eq!(display("", ""), "");
        assert_eq!(display("12abc", ""), "12abc");
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(format_axis_tick(1050.0), "1.1k");
        assert_eq!(format_axis_tick(250.0), "250.0");
        assert_eq!(format_axis_tick(f64::NAN), "-");
    }

    #[test]
    fn test_attribute_missing_is_dash() {
        let attrs = json!({ "abv": 5.45, "ibu": "42", "ebc": null, "style": "ipa" });
        let attrs = attrs.as_object();
        assert_eq!(format_attribute(attrs, "abv", 1), "5.5");
        assert_eq!(format_attribute(attrs, "ibu", 0), "42");
        assert_eq!(format_attribute(attrs, "ebc", 0), "-");
        assert_eq!(format_attribute(attrs, "style", 0), "-");
        assert_eq!(format_attribute(attrs, "og", 3), "-");
        assert_eq!(format_attribute(None, "abv", 1), "-");
    }

    #[test]
    fn test_attribute_decimals_capped() {
        let attrs = json!({ "abv": 5.0 });
        let attrs = attrs.as_object();
        let expected = format!("5.{}", "0".repeat(MAX_DECIMALS as usize));
        assert_eq!(format_attribute(attrs, "abv", 400), expected);
        assert_eq!(format_attribute(attrs, "abv", 70_000), expected);
        assert_eq!(format_attribute(attrs, "abv", u32::MAX), expected);
    }

    #[test]
    fn test_huge_finite_readings_stay_fixed() {
        let out = display("1.7e308", "°C");
        assert!(out.ends_with(".0"), "{out}");
        assert!(!out.contains("inf") && !out.contains('e'), "{out}");
        assert_eq!(out.parse::<f64>().unwrap(), 1.7e308);

        let out = display("-1e300", "W");
        assert!(!out.contains('.') && !out.contains('e'), "{out}");
        assert_eq!(out.parse::<f64>().unwrap(), -1e300);

        assert_eq!(display("9007199254740993", ""), "9007199254740992");
    }

    #[test]
    fn test_magnitude_checked_after_rounding() {
        let hint = ValueHint::unit("W");
        assert_eq!(format_state("999.96", &hint, FormatStyle::Compact), "1.0k");
        assert_eq!(format_state("999.96", &hint, FormatStyle::Display), "1000");
        assert_eq!(format_state("999.94", &hint, FormatStyle::Compact), "999.9");
        assert_eq!(format_axis_tick(-999.96), "-1.0k");
    }

    #[test]
    fn test_style_deserializes_snake_case() {
        let style: FormatStyle = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(style, FormatStyle::Compact);
    }
}
