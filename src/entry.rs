// 🧾 Entry - One recorded budget transaction
//
// Equality for deduplication is NOT defined here. The set container takes an
// identity policy at construction (see identity.rs); EntryIdentity is the
// narrow (bank_code, date, amount) rule the budget app relies on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Bank-side reference code for the transaction
    pub bank_code: String,

    pub category: String,

    pub sub_category: String,

    /// Signed amount; negative = money out
    pub amount: f64,

    /// Business date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
}

impl Entry {
    pub fn new(
        bank_code: impl Into<String>,
        category: impl Into<String>,
        sub_category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Entry {
            bank_code: bank_code.into(),
            category: category.into(),
            sub_category: sub_category.into(),
            amount,
            date,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Sum of amounts
    pub fn total<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> f64 {
        entries.into_iter().map(|e| e.amount).sum()
    }

    /// Totals per category, sorted by category name
    pub fn totals_by_category<'a>(
        entries: impl IntoIterator<Item = &'a Entry>,
    ) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for entry in entries {
            *totals.entry(entry.category.clone()).or_insert(0.0) += entry.amount;
        }
        totals
    }
}
