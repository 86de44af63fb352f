use serde::{Deserialize, Serialize};

use crate::domain::totals::NONE_LABEL;

/// Fraction digits shown for amounts.
pub const DISPLAY_PRECISION: u8 = 2;

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

/// Formats an amount for display with grouped thousands and two decimals.
/// Non-finite values render as a dash.
pub fn format_amount(locale: &LocaleConfig, value: f64) -> String {
    if !value.is_finite() {
        return NONE_LABEL.to_string();
    }
    format_number(locale, value, DISPLAY_PRECISION)
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut formatted = group_integer(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        formatted.push(locale.decimal_separator);
        formatted.push_str(fraction);
    }
    formatted
}

fn group_integer(int_part: &str, separator: char) -> String {
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(int_part, separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
