//! Full-fidelity JSON backup and the permissive restore decoder.

use std::fmt;

use serde_json::{Map, Value};

use crate::codec::coerce::{is_truthy, to_number, to_text};
use crate::domain::entry::{generate_id, truncate_date, Entry};
use crate::errors::{LedgerError, Result};

pub const BACKUP_FILE_NAME: &str = "expenses_backup.json";

/// Fields an element must carry, with truthy values, to be restored.
const REQUIRED_FIELDS: [&str; 4] = ["desc", "amount", "date", "category"];

/// Serializes every entry, ids included, as a pretty-printed JSON array.
pub fn backup_document(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    MissingField(&'static str),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnObject => f.write_str("element is not an object"),
            RejectReason::MissingField(field) => write!(f, "missing or empty `{field}`"),
        }
    }
}

/// Outcome of decoding one element of a restore document.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportDecision {
    Accepted(Entry),
    Rejected { index: usize, reason: RejectReason },
}

/// Entries accepted from a restore document, in document order, plus the
/// elements that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreBatch {
    pub entries: Vec<Entry>,
    pub rejected: Vec<(usize, RejectReason)>,
}

impl FromIterator<ImportDecision> for RestoreBatch {
    fn from_iter<T: IntoIterator<Item = ImportDecision>>(iter: T) -> Self {
        let mut batch = RestoreBatch::default();
        for decision in iter {
            match decision {
                ImportDecision::Accepted(entry) => batch.entries.push(entry),
                ImportDecision::Rejected { index, reason } => {
                    batch.rejected.push((index, reason))
                }
            }
        }
        batch
    }
}

/// Decodes a restore document element by element.
///
/// The whole document is refused when it is not JSON or its top level is not
/// an array; otherwise every element yields its own decision.
pub fn decode_document(text: &str) -> Result<Vec<ImportDecision>> {
    let parsed: Value =
        serde_json::from_str(text).map_err(|err| LedgerError::Import(err.to_string()))?;
    let Value::Array(elements) = parsed else {
        return Err(LedgerError::Import(
            "top-level value is not a list of entries".into(),
        ));
    };
    Ok(elements
        .iter()
        .enumerate()
        .map(|(index, element)| decode_element(index, element))
        .collect())
}

/// Decodes a restore document into the batch that will be merged.
pub fn decode_batch(text: &str) -> Result<RestoreBatch> {
    let decisions = decode_document(text)?;
    let batch: RestoreBatch = decisions.into_iter().collect();
    for (index, reason) in &batch.rejected {
        tracing::debug!(index, %reason, "dropping restore element");
    }
    Ok(batch)
}

pub fn decode_element(index: usize, element: &Value) -> ImportDecision {
    let Value::Object(fields) = element else {
        return ImportDecision::Rejected {
            index,
            reason: RejectReason::NotAnObject,
        };
    };
    if let Some(field) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| !fields.get(*field).map(is_truthy).unwrap_or(false))
    {
        return ImportDecision::Rejected {
            index,
            reason: RejectReason::MissingField(field),
        };
    }
    ImportDecision::Accepted(coerce_entry(fields))
}

/// Reads the document held by a persistence slot.
///
/// Unlike a restore nothing is filtered for empty values: every object loads
/// through the lenient [`Entry`] decoder, and entries stored without an id get
/// a fresh one. Elements that are not objects are skipped. Only a document that
/// is not a JSON array fails as a whole.
pub fn decode_stored(text: &str) -> Result<Vec<Entry>> {
    let elements: Vec<Value> = serde_json::from_str(text)?;
    let mut entries = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            tracing::debug!(index, "skipping stored element that is not an object");
            continue;
        }
        match serde_json::from_value::<Entry>(element) {
            Ok(mut entry) => {
                if entry.id.is_empty() {
                    entry.id = generate_id();
                }
                entries.push(entry);
            }
            Err(err) => tracing::debug!(index, error = %err, "skipping unreadable stored element"),
        }
    }
    Ok(entries)
}

fn coerce_entry(fields: &Map<String, Value>) -> Entry {
    let text = |key: &str| fields.get(key).map(to_text).unwrap_or_default();
    let id = match fields.get("id") {
        Some(value) if is_truthy(value) => to_text(value),
        _ => generate_id(),
    };
    Entry {
        id,
        description: text("desc"),
        amount: fields.get("amount").map(to_number).unwrap_or(f64::NAN),
        category: text("category"),
        date: truncate_date(&text("date")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backup_is_pretty_printed_with_all_fields() {
        let entry = Entry {
            id: "abc123".into(),
            description: "Coffee".into(),
            amount: 4.5,
            category: "Food".into(),
            date: "2024-03-02".into(),
        };
        let document = backup_document(&[entry]).unwrap();
        insta::assert_snapshot!(document, @r###"
        [
          {
            "id": "abc123",
            "desc": "Coffee",
            "amount": 4.5,
            "category": "Food",
            "date": "2024-03-02"
          }
        ]
        "###);
    }

    #[test]
    fn non_array_documents_are_refused() {
        for text in ["{}", "\"entries\"", "42", "not json", ""] {
            let err = decode_document(text).expect_err("document must be refused");
            assert!(matches!(err, LedgerError::Import(_)), "unexpected error: {err:?}");
        }
    }

    #[test]
    fn elements_missing_required_fields_are_rejected() {
        let document = json!([
            {"desc": "Lunch", "amount": 12, "date": "2024-05-01", "category": "Food"},
            {"desc": "No amount", "date": "2024-05-01", "category": "Food"},
            {"desc": "Zero", "amount": 0, "date": "2024-05-01", "category": "Food"},
            {"desc": "", "amount": 3, "date": "2024-05-01", "category": "Food"},
            "stray string",
            null
        ])
        .to_string();
        let decisions = decode_document(&document).unwrap();
        assert!(matches!(decisions[0], ImportDecision::Accepted(_)));
        assert_eq!(
            decisions[1],
            ImportDecision::Rejected {
                index: 1,
                reason: RejectReason::MissingField("amount")
            }
        );
        assert_eq!(
            decisions[2],
            ImportDecision::Rejected {
                index: 2,
                reason: RejectReason::MissingField("amount")
            }
        );
        assert_eq!(
            decisions[3],
            ImportDecision::Rejected {
                index: 3,
                reason: RejectReason::MissingField("desc")
            }
        );
        assert_eq!(
            decisions[4],
            ImportDecision::Rejected {
                index: 4,
                reason: RejectReason::NotAnObject
            }
        );
        assert_eq!(
            decisions[5],
            ImportDecision::Rejected {
                index: 5,
                reason: RejectReason::NotAnObject
            }
        );
    }

    #[test]
    fn accepted_elements_are_coerced() {
        let document = json!([
            {"id": 7, "desc": 99, "amount": "15.75", "date": "2024-05-01T09:30:00Z", "category": "Gifts"},
            {"desc": "Legacy", "amount": "a lot", "date": "2024-05-02", "category": "Other"}
        ])
        .to_string();
        let batch = decode_batch(&document).unwrap();
        assert!(batch.rejected.is_empty());

        let first = &batch.entries[0];
        assert_eq!(first.id, "7");
        assert_eq!(first.description, "99");
        assert_eq!(first.amount, 15.75);
        assert_eq!(first.date, "2024-05-01");
        assert_eq!(first.category, "Gifts");

        let second = &batch.entries[1];
        assert!(!second.id.is_empty());
        assert!(second.amount.is_nan());
    }

    #[test]
    fn stored_documents_load_every_object() {
        let document = json!([
            {"id": 7, "desc": "Numeric id", "amount": 4, "category": "Food", "date": null},
            {"desc": "", "amount": 0, "category": "Food", "date": "2024-05-02"},
            "stray string",
            {"id": "ok", "desc": "Fine", "amount": 5, "category": "Food", "date": "2024-05-03"}
        ])
        .to_string();
        let entries = decode_stored(&document).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "7");
        assert_eq!(entries[0].date, "");
        assert!(!entries[1].id.is_empty());
        assert_eq!(entries[1].amount, 0.0);
        assert_eq!(entries[2].id, "ok");
    }

    #[test]
    fn stored_entries_without_ids_get_distinct_ids() {
        let entries = decode_stored(r#"[{"desc":"a"},{"desc":"b"}]"#).unwrap();
        assert!(!entries[0].id.is_empty());
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn stored_document_must_be_an_array() {
        assert!(decode_stored(r#"{"desc":"a"}"#).is_err());
        assert!(decode_stored("not json").is_err());
    }

    #[test]
    fn backup_round_trips_through_decoder() {
        let entries = vec![
            Entry::new("Bus", 2.8, "Transport", "2024-03-15"),
            Entry::new("Rent", 1200.0, "Housing", "2024-03-01"),
        ];
        let document = backup_document(&entries).unwrap();
        let batch = decode_batch(&document).unwrap();
        assert_eq!(batch.entries, entries);
    }
}
