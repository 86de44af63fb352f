use serde::{Deserialize, Serialize};

/// Label shown when there is no value to report.
pub const NONE_LABEL: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Sum and per-category breakdown over a list of entries.
///
/// `by_category` keeps categories in order of first appearance; categories
/// are compared by exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total: f64,
    pub by_category: Vec<CategoryTotal>,
}

impl Totals {
    pub fn record(&mut self, category: &str, amount: f64) {
        self.total += amount;
        match self
            .by_category
            .iter_mut()
            .find(|bucket| bucket.category == category)
        {
            Some(bucket) => bucket.amount += amount,
            None => self.by_category.push(CategoryTotal {
                category: category.to_string(),
                amount,
            }),
        }
    }

    pub fn category(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|bucket| bucket.category == category)
            .map(|bucket| bucket.amount)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Figures displayed alongside a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    pub top_category: Option<String>,
    /// Categories ordered by descending sum.
    pub by_category: Vec<CategoryTotal>,
    /// Active month filter, or [`NONE_LABEL`].
    pub period_label: String,
}

impl Summary {
    pub fn top_category_label(&self) -> &str {
        self.top_category.as_deref().unwrap_or(NONE_LABEL)
    }
}
