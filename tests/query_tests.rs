mod common;

use common::{coffee_and_bus, entry};
use expense_ledger::{FilterSpec, QueryService, SortKey, SummaryService};

#[test]
fn text_filter_is_case_insensitive_substring() {
    let entries = coffee_and_bus();
    let view = QueryService::apply(&entries, &FilterSpec::default().with_text("cof"));
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].description, "Coffee");
}

#[test]
fn month_filter_selects_calendar_month() {
    let entries = coffee_and_bus();

    let march = QueryService::apply(&entries, &FilterSpec::default().with_month("2024-03"));
    assert_eq!(march.len(), 2);

    let april = QueryService::apply(&entries, &FilterSpec::default().with_month("2024-04"));
    assert!(april.is_empty());
}

#[test]
fn empty_filter_returns_everything_newest_first() {
    let entries = coffee_and_bus();
    let view = QueryService::apply(&entries, &FilterSpec::default());
    let dates: Vec<&str> = view.iter().map(|entry| entry.date.as_str()).collect();
    assert_eq!(dates, ["2024-03-15", "2024-03-02"]);
}

#[test]
fn equal_amounts_keep_relative_order() {
    let entries = vec![
        entry("First", "Food", 8.0, "2024-03-01"),
        entry("Cheap", "Food", 1.0, "2024-03-02"),
        entry("Second", "Food", 8.0, "2024-03-03"),
    ];
    let view = QueryService::apply(&entries, &FilterSpec::default().with_sort(SortKey::AmountDesc));
    let names: Vec<&str> = view.iter().map(|entry| entry.description.as_str()).collect();
    assert_eq!(names, ["First", "Second", "Cheap"]);
}

#[test]
fn equal_dates_keep_relative_order() {
    let entries = vec![
        entry("Morning", "Food", 1.0, "2024-03-01"),
        entry("Noon", "Food", 2.0, "2024-03-01"),
        entry("Evening", "Food", 3.0, "2024-03-01"),
    ];
    for key in [SortKey::DateAsc, SortKey::DateDesc] {
        let view = QueryService::apply(&entries, &FilterSpec::default().with_sort(key));
        let names: Vec<&str> = view.iter().map(|entry| entry.description.as_str()).collect();
        assert_eq!(names, ["Morning", "Noon", "Evening"], "sort {key}");
    }
}

#[test]
fn malformed_entries_do_not_break_queries() {
    let mut entries = coffee_and_bus();
    entries.push(entry("Corrupt", "", f64::NAN, "31/12/2023"));
    for key in SortKey::ALL {
        let view = QueryService::apply(&entries, &FilterSpec::default().with_sort(key));
        assert_eq!(view.len(), 3);
    }
    let totals = SummaryService::totals(&entries);
    assert_eq!(totals.total, 8.0);
}

#[test]
fn aggregation_over_category_fixture() {
    let entries = vec![
        entry("a", "Food", 10.0, "2024-03-01"),
        entry("b", "Food", 5.0, "2024-03-02"),
        entry("c", "Transport", 7.0, "2024-03-03"),
    ];
    let totals = SummaryService::totals(&entries);
    assert_eq!(totals.total, 22.0);
    assert_eq!(totals.category("Food"), Some(15.0));
    assert_eq!(totals.category("Transport"), Some(7.0));
    assert_eq!(totals.by_category.len(), 2);
    assert_eq!(SummaryService::top_category(&totals), Some("Food"));
}

#[test]
fn totals_over_filtered_view() {
    let mut entries = coffee_and_bus();
    entries.push(entry("Flight", "Travel", 300.0, "2024-04-10"));
    let filter = FilterSpec::default().with_month("2024-03");
    let view = QueryService::apply(&entries, &filter);
    let summary = SummaryService::summarize(view.iter().copied(), &filter.month);
    assert_eq!(summary.total, 8.0);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.top_category_label(), "Food");
}
