use crate::domain::totals::{CategoryTotal, Summary, Totals, NONE_LABEL};
use crate::domain::Entry;

pub struct SummaryService;

impl SummaryService {
    /// Sums amounts overall and per category. Non-finite amounts add nothing.
    pub fn totals<'a, I>(entries: I) -> Totals
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut totals = Totals::default();
        for entry in entries {
            totals.record(&entry.category, entry.amount_value());
        }
        totals
    }

    /// Categories by descending sum; equal sums keep first-seen order.
    pub fn ranked_categories(totals: &Totals) -> Vec<&CategoryTotal> {
        let mut ranked: Vec<&CategoryTotal> = totals.by_category.iter().collect();
        ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        ranked
    }

    /// The category with the largest sum, or `None` for an empty breakdown.
    pub fn top_category(totals: &Totals) -> Option<&str> {
        Self::ranked_categories(totals)
            .into_iter()
            .next()
            .map(|bucket| bucket.category.as_str())
    }

    /// Figures for the summary panel of a view filtered by `month`.
    pub fn summarize<'a, I>(entries: I, month: &str) -> Summary
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let view: Vec<&Entry> = entries.into_iter().collect();
        let totals = Self::totals(view.iter().copied());
        let top_category = Self::top_category(&totals).map(str::to_string);
        let by_category = Self::ranked_categories(&totals)
            .into_iter()
            .cloned()
            .collect();
        Summary {
            total: totals.total,
            count: view.len(),
            top_category,
            by_category,
            period_label: if month.is_empty() {
                NONE_LABEL.to_string()
            } else {
                month.to_string()
            },
        }
    }
}
