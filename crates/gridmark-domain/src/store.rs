//! Tri-state relation storage
//!
//! One entry per unordered item pair spanning two categories. The pair is
//! canonicalized (lower category first) before addressing, so `(a, b)` and
//! `(b, a)` always reach the same slot.

use crate::category::{CategorySet, ItemRef};
use crate::error::{GridError, Result};
use crate::relation::RelationValue;

/// Dense store of relation values, owned by one puzzle session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationStore {
    category_count: usize,
    item_count: usize,
    values: Vec<RelationValue>,
}

impl RelationStore {
    /// Create an all-Unknown store sized for `categories`.
    pub fn new(categories: &CategorySet) -> Self {
        Self::with_dimensions(categories.len(), categories.item_count())
    }

    /// Create an all-Unknown store for `category_count` categories of
    /// `item_count` items each.
    pub fn with_dimensions(category_count: usize, item_count: usize) -> Self {
        let pairs = category_count * category_count.saturating_sub(1) / 2;
        Self {
            category_count,
            item_count,
            values: vec![RelationValue::Unknown; pairs * item_count * item_count],
        }
    }

    /// Current value of the pair; Unknown if never set.
    ///
    /// # Errors
    /// [`GridError::InvalidPair`] if the items share a category or either is
    /// outside the puzzle.
    pub fn get(&self, a: ItemRef, b: ItemRef) -> Result<RelationValue> {
        let slot = self.slot(a, b)?;
        Ok(self.values[slot])
    }

    /// Write `value` for the pair and return what was there before.
    ///
    /// Overwrites unconditionally; callers detect contradictions by comparing
    /// the returned value with the one written.
    ///
    /// # Errors
    /// Same as [`RelationStore::get`].
    pub fn set(&mut self, a: ItemRef, value: RelationValue, b: ItemRef) -> Result<RelationValue> {
        let slot = self.slot(a, b)?;
        Ok(std::mem::replace(&mut self.values[slot], value))
    }

    /// Reset every entry to Unknown.
    pub fn clear_all(&mut self) {
        self.values.fill(RelationValue::Unknown);
    }

    /// Number of stored pairs, `C(m, 2) * n * n`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the store addresses no pair
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries currently holding `value`
    pub fn count(&self, value: RelationValue) -> usize {
        self.values.iter().filter(|v| **v == value).count()
    }

    fn slot(&self, a: ItemRef, b: ItemRef) -> Result<usize> {
        for item in [a, b] {
            if item.category.index() >= self.category_count || item.ordinal >= self.item_count {
                return Err(GridError::unknown_item(a, b, item));
            }
        }
        if a.category == b.category {
            return Err(GridError::same_category(a, b));
        }

        let (lo, hi) = if a.category < b.category { (a, b) } else { (b, a) };
        let (i, j) = (lo.category.index(), hi.category.index());
        let m = self.category_count;
        let n = self.item_count;

        // Rank of (i, j), i < j, among pairs in lexicographic order.
        let pair = i * (2 * m - i - 1) / 2 + (j - i - 1);
        Ok(pair * n * n + lo.ordinal * n + hi.ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: ItemRef = ItemRef::new(0, 0);
    const BLUE: ItemRef = ItemRef::new(0, 2);
    const CAT: ItemRef = ItemRef::new(1, 0);
    const DOG: ItemRef = ItemRef::new(1, 1);
    const THIRD: ItemRef = ItemRef::new(2, 2);

    fn store() -> RelationStore {
        RelationStore::with_dimensions(3, 3)
    }

    #[test]
    fn test_new_store_is_unknown() {
        let store = store();
        assert_eq!(store.len(), 27);
        assert_eq!(store.get(RED, CAT).unwrap(), RelationValue::Unknown);
        assert_eq!(store.count(RelationValue::Unknown), 27);
    }

    #[test]
    fn test_set_is_symmetric() {
        let mut store = store();
        let previous = store.set(RED, RelationValue::True, CAT).unwrap();
        assert_eq!(previous, RelationValue::Unknown);
        assert_eq!(store.get(CAT, RED).unwrap(), RelationValue::True);
        assert_eq!(store.get(RED, CAT).unwrap(), RelationValue::True);
        assert_eq!(store.get(RED, DOG).unwrap(), RelationValue::Unknown);
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut store = store();
        store.set(DOG, RelationValue::False, THIRD).unwrap();
        let previous = store.set(THIRD, RelationValue::False, DOG).unwrap();
        assert_eq!(previous, RelationValue::False);

        let previous = store.set(DOG, RelationValue::True, THIRD).unwrap();
        assert!(previous.contradicts(RelationValue::True));
        assert_eq!(store.get(THIRD, DOG).unwrap(), RelationValue::True);
    }

    #[test]
    fn test_same_category_rejected() {
        let mut store = store();
        let result = store.set(RED, RelationValue::True, BLUE);
        assert!(matches!(result, Err(GridError::InvalidPair { .. })));
        assert!(store.get(CAT, DOG).is_err());
    }

    #[test]
    fn test_unknown_item_rejected() {
        let store = store();
        assert!(store.get(RED, ItemRef::new(1, 3)).is_err());
        assert!(store.get(ItemRef::new(3, 0), RED).is_err());
    }

    #[test]
    fn test_clear_all() {
        let mut store = store();
        store.set(RED, RelationValue::True, CAT).unwrap();
        store.set(BLUE, RelationValue::False, THIRD).unwrap();
        store.clear_all();
        assert_eq!(store.get(CAT, RED).unwrap(), RelationValue::Unknown);
        assert_eq!(store.get(THIRD, BLUE).unwrap(), RelationValue::Unknown);
        assert_eq!(store.count(RelationValue::Unknown), store.len());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn value() -> impl Strategy<Value = RelationValue> {
        prop_oneof![
            Just(RelationValue::Unknown),
            Just(RelationValue::True),
            Just(RelationValue::False),
        ]
    }

    proptest! {
        /// Property: a write through one argument order is read through the other
        #[test]
        fn test_symmetric_read_after_write(
            m in 2usize..7,
            n in 1usize..6,
            writes in prop::collection::vec((0usize..7, 0usize..6, value(), 0usize..7, 0usize..6), 1..40),
        ) {
            let mut store = RelationStore::with_dimensions(m, n);
            for (ca, ia, v, cb, ib) in writes {
                let (ca, cb) = (ca % m, cb % m);
                let (a, b) = (ItemRef::new(ca, ia % n), ItemRef::new(cb, ib % n));
                if ca == cb {
                    prop_assert!(store.set(a, v, b).is_err());
                    continue;
                }
                store.set(a, v, b).unwrap();
                prop_assert_eq!(store.get(b, a).unwrap(), v);
                prop_assert_eq!(store.get(a, b).unwrap(), v);
                prop_assert_eq!(store.set(a, v, b).unwrap(), v);
            }
        }

        /// Property: distinct pairs never share a slot
        #[test]
        fn test_slots_are_distinct(m in 2usize..6, n in 1usize..5) {
            let mut store = RelationStore::with_dimensions(m, n);
            let mut written = 0;
            for ca in 0..m {
                for cb in (ca + 1)..m {
                    for ia in 0..n {
                        for ib in 0..n {
                            let previous = store
                                .set(ItemRef::new(ca, ia), RelationValue::True, ItemRef::new(cb, ib))
                                .unwrap();
                            prop_assert_eq!(previous, RelationValue::Unknown);
                            written += 1;
                        }
                    }
                }
            }
            prop_assert_eq!(written, store.len());
            prop_assert_eq!(store.count(RelationValue::True), store.len());
        }
    }
}
