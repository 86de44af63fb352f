//! Expense entries, creation drafts, and the preset category vocabulary.

use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;
use crate::errors::ValidationError;

/// Number of characters in an ISO `YYYY-MM-DD` date.
pub const ISO_DATE_LEN: usize = 10;

/// One recorded expense.
///
/// Deserialization is lenient so that legacy or hand-edited documents load:
/// missing or `null` text fields become empty, other JSON values are read as
/// text, and amounts that are not numbers become `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(rename = "desc", default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default = "nan", deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
}

impl Entry {
    /// Builds an entry with a freshly generated id. The date is truncated to
    /// [`ISO_DATE_LEN`] characters.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl AsRef<str>,
    ) -> Self {
        Self {
            id: generate_id(),
            description: description.into(),
            amount,
            category: category.into(),
            date: truncate_date(date.as_ref()),
        }
    }

    /// Amount used for arithmetic and ordering; non-finite values count as zero.
    pub fn amount_value(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }

    /// Calendar date of the entry, or `None` when the stored text is not a date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }

    /// Text searched by the query engine's text filter: description and
    /// category joined by a single space.
    pub fn haystack(&self) -> String {
        format!("{} {}", self.description, self.category)
    }
}

impl Displayable for Entry {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.date, self.description, self.category)
    }
}

/// Field values of an entry that has not passed creation validation yet.
///
/// Drafts come from user input or from [`crate::EntryStore::begin_edit`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

impl EntryDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
        }
    }

    /// A blank form: default category and today's date.
    pub fn blank(default_category: impl Into<String>) -> Self {
        Self::new(String::new(), f64::NAN, default_category, today_iso())
    }

    /// Applies the creation rules and produces an entry with a new id.
    pub fn validate(self) -> Result<Entry, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        if self.date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(Entry::new(
            description,
            self.amount,
            self.category,
            &self.date,
        ))
    }
}

impl From<Entry> for EntryDraft {
    fn from(entry: Entry) -> Self {
        Self {
            description: entry.description,
            amount: entry.amount,
            category: entry.category,
            date: entry.date,
        }
    }
}

/// The fixed category vocabulary offered when recording an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryPreset {
    Food,
    Transport,
    Housing,
    Utilities,
    Health,
    Entertainment,
    Education,
    Shopping,
    Travel,
    Other,
}

impl CategoryPreset {
    pub const ALL: [CategoryPreset; 10] = [
        CategoryPreset::Food,
        CategoryPreset::Transport,
        CategoryPreset::Housing,
        CategoryPreset::Utilities,
        CategoryPreset::Health,
        CategoryPreset::Entertainment,
        CategoryPreset::Education,
        CategoryPreset::Shopping,
        CategoryPreset::Travel,
        CategoryPreset::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryPreset::Food => "Food",
            CategoryPreset::Transport => "Transport",
            CategoryPreset::Housing => "Housing",
            CategoryPreset::Utilities => "Utilities",
            CategoryPreset::Health => "Health",
            CategoryPreset::Entertainment => "Entertainment",
            CategoryPreset::Education => "Education",
            CategoryPreset::Shopping => "Shopping",
            CategoryPreset::Travel => "Travel",
            CategoryPreset::Other => "Other",
        }
    }

    /// True when `category` is exactly one of the preset labels.
    pub fn is_preset(category: &str) -> bool {
        category.parse::<CategoryPreset>().is_ok()
    }
}

impl Default for CategoryPreset {
    fn default() -> Self {
        CategoryPreset::Food
    }
}

impl fmt::Display for CategoryPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryPreset {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CategoryPreset::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == value)
            .ok_or(())
    }
}

/// Generates an opaque entry identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Keeps at most the first [`ISO_DATE_LEN`] characters of `value`.
pub fn truncate_date(value: &str) -> String {
    value.chars().take(ISO_DATE_LEN).collect()
}

/// Today's date in local time, formatted `YYYY-MM-DD`.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parses a stored `YYYY-MM-DD` date, tolerating trailing time components.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
        trimmed
            .get(..ISO_DATE_LEN)
            .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
    })
}

fn nan() -> f64 {
    f64::NAN
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(crate::codec::coerce::to_number(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        other => crate::codec::coerce::to_text(&other),
    })
}
