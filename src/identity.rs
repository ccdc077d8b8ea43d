// 🪪 Identity Policies - What makes two elements "the same" in a set
//
// Supplied at construction, independent of the element's own PartialEq.
// Swapping policies changes duplicate detection without touching the set.

use crate::entry::Entry;
use chrono::NaiveDate;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

pub trait IdentityPolicy<T> {
    type Key: Eq + Hash;

    fn key(&self, item: &T) -> Self::Key;
}

// ============================================================================
// GENERIC POLICIES
// ============================================================================

/// The element is its own identity
#[derive(Debug, Clone, Copy, Default)]
pub struct Intrinsic;

impl<T> IdentityPolicy<T> for Intrinsic
where
    T: Eq + Hash + Clone,
{
    type Key = T;

    fn key(&self, item: &T) -> T {
        item.clone()
    }
}

/// Identity computed by any closure, capturing or not
///
/// ```
/// use budget_store::{Entry, FnIdentity, IdentityPolicy};
/// use chrono::NaiveDate;
///
/// let prefix = "TX-".to_string();
/// let by_code = FnIdentity::new(move |e: &Entry| format!("{}{}", prefix, e.bank_code));
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let entry = Entry::new("42", "Food", "", -3.5, date);
/// assert_eq!(by_code.key(&entry), "TX-42");
/// ```
pub struct FnIdentity<F, K> {
    key_fn: F,
    key: PhantomData<fn() -> K>,
}

impl<F, K> FnIdentity<F, K> {
    pub fn new(key_fn: F) -> Self {
        FnIdentity {
            key_fn,
            key: PhantomData,
        }
    }
}

impl<F: Clone, K> Clone for FnIdentity<F, K> {
    fn clone(&self) -> Self {
        FnIdentity::new(self.key_fn.clone())
    }
}

impl<F, K> fmt::Debug for FnIdentity<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnIdentity").finish_non_exhaustive()
    }
}

impl<T, K, F> IdentityPolicy<T> for FnIdentity<F, K>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
{
    type Key = K;

    fn key(&self, item: &T) -> K {
        (self.key_fn)(item)
    }
}

// ============================================================================
// ENTRY POLICIES
// ============================================================================

/// Amount as hashable bits, with -0.0 folded into 0.0
fn amount_bits(amount: f64) -> u64 {
    if amount == 0.0 {
        0.0f64.to_bits()
    } else {
        amount.to_bits()
    }
}

/// The budget app's rule: (bank_code, date, amount).
/// Category and sub_category are ignored, so re-categorizing an entry does
/// not create a second element.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryIdentity;

impl IdentityPolicy<Entry> for EntryIdentity {
    type Key = (String, NaiveDate, u64);

    fn key(&self, entry: &Entry) -> Self::Key {
        (entry.bank_code.clone(), entry.date, amount_bits(entry.amount))
    }
}

/// Every field participates; entries differing only in category are distinct
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFullIdentity;

impl IdentityPolicy<Entry> for EntryFullIdentity {
    type Key = (String, NaiveDate, u64, String, String);

    fn key(&self, entry: &Entry) -> Self::Key {
        (
            entry.bank_code.clone(),
            entry.date,
            amount_bits(entry.amount),
            entry.category.clone(),
            entry.sub_category.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, category: &str, amount: f64) -> Entry {
        Entry::new(
            code,
            category,
            "",
            amount,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_entry_identity_ignores_category() {
        let a = entry("TX-1", "Food", -10.0);
        let b = entry("TX-1", "Travel", -10.0);
        assert_eq!(EntryIdentity.key(&a), EntryIdentity.key(&b));
        assert_ne!(EntryFullIdentity.key(&a), EntryFullIdentity.key(&b));
    }

    #[test]
    fn test_entry_identity_uses_amount() {
        let a = entry("TX-1", "Food", -10.0);
        let b = entry("TX-1", "Food", -10.01);
        assert_ne!(EntryIdentity.key(&a), EntryIdentity.key(&b));
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let a = entry("TX-1", "Fees", 0.0);
        let b = entry("TX-1", "Fees", -0.0);
        assert_eq!(EntryIdentity.key(&a), EntryIdentity.key(&b));
    }

    #[test]
    fn test_fn_identity() {
        let by_code = FnIdentity::new(|e: &Entry| e.bank_code.clone());
        assert_eq!(by_code.key(&entry("TX-9", "Food", 1.0)), "TX-9");
    }

    #[test]
    fn test_capturing_closure_identity() {
        let cents_only = 100.0;
        let by_cents = FnIdentity::new(move |e: &Entry| (e.amount * cents_only).round() as i64);

        assert_eq!(
            by_cents.key(&entry("TX-1", "Food", -10.004)),
            by_cents.key(&entry("TX-2", "Rent", -10.0))
        );
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(Intrinsic.key(&"rent".to_string()), "rent");
    }
}
