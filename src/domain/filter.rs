//! Ephemeral query parameters: text/month filters and the sort order.

use std::{fmt, str::FromStr};

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ordering applied to a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::AmountDesc => "amount-desc",
            SortKey::AmountAsc => "amount-asc",
        }
    }

    /// Parses a sort token, falling back to [`SortKey::DateDesc`] for anything unknown.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| format!("unknown sort key `{value}`"))
    }
}

/// Text, month and sort parameters for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub text: String,
    /// `YYYY-MM`; empty or malformed values disable month filtering.
    pub month: String,
    pub sort: SortKey,
}

impl FilterSpec {
    pub fn new(text: impl Into<String>, month: impl Into<String>, sort: SortKey) -> Self {
        Self {
            text: text.into(),
            month: month.into(),
            sort,
        }
    }

    /// No text filter, current local month, newest first.
    pub fn current_month() -> Self {
        let month = Local::now().date_naive().format("%Y-%m").to_string();
        Self::new(String::new(), month, SortKey::default())
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// The active month range, if `month` is well formed.
    pub fn month_range(&self) -> Option<MonthRange> {
        MonthRange::parse(&self.month)
    }
}

/// Inclusive first/last calendar day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl MonthRange {
    /// Parses `YYYY-MM` (four digits, dash, two digits).
    ///
    /// Month numbers outside 1..=12 roll over into adjacent years, so `2024-13`
    /// is January 2025 and `2024-00` is December 2023.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return None;
        }
        let year: i32 = value[..4].parse().ok()?;
        let month: i32 = value[5..].parse().ok()?;
        Self::for_month_index(year * 12 + month - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    fn for_month_index(index: i32) -> Option<Self> {
        let first = first_of_month_index(index)?;
        let last = first_of_month_index(index + 1)? - Duration::days(1);
        Some(Self { first, last })
    }
}

fn first_of_month_index(index: i32) -> Option<NaiveDate> {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}
