//! Filtered, ordered views over the ledger.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::{Entry, FilterSpec, SortKey};

pub struct QueryService;

impl QueryService {
    /// Applies the text filter, then the month filter, then a stable sort.
    pub fn apply<'a>(entries: &'a [Entry], filter: &FilterSpec) -> Vec<&'a Entry> {
        let needle = filter.text.to_lowercase();
        let month = filter.month_range();

        let mut view: Vec<&Entry> = entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.haystack().to_lowercase().contains(&needle))
            .filter(|entry| match month {
                Some(range) => entry.parsed_date().is_some_and(|date| range.contains(date)),
                None => true,
            })
            .collect();

        Self::sort(&mut view, filter.sort);
        view
    }

    /// Stable sort; entries with equal keys keep their relative order.
    pub fn sort(view: &mut [&Entry], key: SortKey) {
        match key {
            SortKey::DateDesc => {
                view.sort_by(|a, b| compare_dates(a.parsed_date(), b.parsed_date(), true))
            }
            SortKey::DateAsc => {
                view.sort_by(|a, b| compare_dates(a.parsed_date(), b.parsed_date(), false))
            }
            SortKey::AmountDesc => {
                view.sort_by(|a, b| b.amount_value().total_cmp(&a.amount_value()))
            }
            SortKey::AmountAsc => {
                view.sort_by(|a, b| a.amount_value().total_cmp(&b.amount_value()))
            }
        }
    }
}

/// Valid dates in the requested direction; unparseable dates always last.
fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
