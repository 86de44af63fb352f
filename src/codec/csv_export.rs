//! Spreadsheet-friendly export of a filtered view.

use std::io::Read;

use serde_json::Value;

use crate::codec::coerce;
use crate::domain::Entry;
use crate::errors::{LedgerError, Result};

pub const CSV_HEADER: [&str; 4] = ["Date", "Description", "Category", "Amount"];
const EXPORT_PREFIX: &str = "expenses";
const ALL_MONTHS_LABEL: &str = "all";

/// One data row of an exported document.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl From<&Entry> for CsvRow {
    fn from(entry: &Entry) -> Self {
        Self {
            date: entry.date.clone(),
            description: entry.description.clone(),
            category: entry.category.clone(),
            amount: entry.amount,
        }
    }
}

/// Renders `entries` in their current order as CSV text.
///
/// Fields containing a comma, double quote or line break are quoted with
/// inner quotes doubled. Records are separated by `\n` with no trailing
/// newline after the last row.
pub fn export_csv<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.date.as_str(),
            entry.description.as_str(),
            entry.category.as_str(),
            coerce::raw_number_text(entry.amount).as_str(),
        ])?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|err| LedgerError::Csv(err.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|err| LedgerError::Csv(err.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Reads back a document produced by [`export_csv`].
pub fn parse_csv(reader: impl Read) -> Result<Vec<CsvRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record?;
        if record.len() != CSV_HEADER.len() {
            return Err(LedgerError::Csv(format!(
                "row {} has {} columns, expected {}",
                index + 1,
                record.len(),
                CSV_HEADER.len()
            )));
        }
        rows.push(CsvRow {
            date: record[0].to_string(),
            description: record[1].to_string(),
            category: record[2].to_string(),
            amount: coerce::to_number(&Value::String(record[3].to_string())),
        });
    }
    Ok(rows)
}

/// File name for an export: the active month filter, or `all` without one.
pub fn export_file_name(month: &str) -> String {
    let label = if month.is_empty() {
        ALL_MONTHS_LABEL
    } else {
        month
    };
    format!("{EXPORT_PREFIX}_{label}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str, amount: f64, category: &str, date: &str) -> Entry {
        Entry::new(description, amount, category, date)
    }

    #[test]
    fn header_only_for_empty_view() {
        let csv = export_csv(&Vec::<Entry>::new()).unwrap();
        assert_eq!(csv, "Date,Description,Category,Amount");
    }

    #[test]
    fn quotes_fields_with_separators() {
        let entries = vec![
            entry("Dinner, drinks", 42.5, "Food", "2024-03-02"),
            entry("The \"good\" bus", 3.0, "Transport", "2024-03-15"),
        ];
        let csv = export_csv(&entries).unwrap();
        insta::assert_snapshot!(csv, @r###"
        Date,Description,Category,Amount
        2024-03-02,"Dinner, drinks",Food,42.5
        2024-03-15,"The ""good"" bus",Transport,3
        "###);
    }

    #[test]
    fn parse_recovers_escaped_values() {
        let entries = vec![
            entry("Line\nbreak", 1.25, "Other", "2024-01-01"),
            entry("Comma, \"quote\"", 9.99, "Custom, category", "2024-01-02"),
        ];
        let csv = export_csv(&entries).unwrap();
        let rows = parse_csv(csv.as_bytes()).unwrap();
        let expected: Vec<CsvRow> = entries.iter().map(CsvRow::from).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn file_name_embeds_month_filter() {
        assert_eq!(export_file_name("2024-03"), "expenses_2024-03.csv");
        assert_eq!(export_file_name(""), "expenses_all.csv");
    }
}
