//! Categories and items of a loaded puzzle
//!
//! A puzzle has `m` categories ("Color", "Pet", ...) and every category holds
//! the same number `n` of items. The equal-count rule is checked when the
//! set is built, since every block of the grid is `n x n`.

use std::fmt;

use crate::error::{GridError, Result};

/// Ordinal of a category within its puzzle (`0..m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(usize);

impl CategoryId {
    /// Create a category id from its ordinal.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the ordinal (for indexing).
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of one item: its category and its ordinal inside that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemRef {
    /// Owning category
    pub category: CategoryId,
    /// Position within the category (`0..n`)
    pub ordinal: usize,
}

impl ItemRef {
    /// Create an item reference from raw ordinals.
    pub const fn new(category: usize, ordinal: usize) -> Self {
        Self {
            category: CategoryId::new(category),
            ordinal,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.ordinal)
    }
}

/// One member of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Position within the owning category
    pub ordinal: usize,
    /// Display name
    pub name: String,
}

/// A labeled group of mutually exclusive items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Ordinal of this category
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Items in display order
    pub items: Vec<Item>,
}

impl Category {
    /// Reference to the item at `ordinal`, if present.
    pub fn item_ref(&self, ordinal: usize) -> Option<ItemRef> {
        (ordinal < self.items.len()).then(|| ItemRef {
            category: self.id,
            ordinal,
        })
    }

    /// Find an item by name, ignoring case.
    pub fn find_item(&self, name: &str) -> Option<ItemRef> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .map(|item| ItemRef {
                category: self.id,
                ordinal: item.ordinal,
            })
    }

    /// References to every item, in order.
    pub fn item_refs(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.items.iter().map(move |item| ItemRef {
            category: self.id,
            ordinal: item.ordinal,
        })
    }
}

/// The validated, fixed category list of one puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
    item_count: usize,
}

impl CategorySet {
    /// Build a category set from `(name, items)` definitions.
    ///
    /// # Errors
    /// Returns [`GridError::Configuration`] if the categories do not all hold
    /// the same number of items, or if a category or item name is empty or
    /// repeated.
    pub fn new<I, N, T>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<T>)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();
        let mut item_count = None;

        for (index, (name, items)) in definitions.into_iter().enumerate() {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(GridError::Configuration(format!(
                    "Category {} has an empty name",
                    index
                )));
            }
            if categories
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&name))
            {
                return Err(GridError::Configuration(format!(
                    "Duplicate category name '{}'",
                    name
                )));
            }

            let mut category = Category {
                id: CategoryId::new(index),
                name,
                items: Vec::with_capacity(items.len()),
            };
            for (ordinal, item) in items.into_iter().enumerate() {
                let item: String = item.into();
                if item.trim().is_empty() {
                    return Err(GridError::Configuration(format!(
                        "Item {} of '{}' has an empty name",
                        ordinal, category.name
                    )));
                }
                if category.find_item(&item).is_some() {
                    return Err(GridError::Configuration(format!(
                        "Duplicate item '{}' in '{}'",
                        item, category.name
                    )));
                }
                category.items.push(Item {
                    ordinal,
                    name: item,
                });
            }

            match item_count {
                None => item_count = Some(category.items.len()),
                Some(n) if n != category.items.len() => {
                    return Err(GridError::Configuration(format!(
                        "Category '{}' has {} items, expected {}",
                        category.name,
                        category.items.len(),
                        n
                    )));
                }
                Some(_) => {}
            }
            categories.push(category);
        }

        Ok(Self {
            categories,
            item_count: item_count.unwrap_or(0),
        })
    }

    /// Number of categories (`m`).
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the set holds no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Items per category (`n`).
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Category by id.
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.index())
    }

    /// All categories in ordinal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    /// Find a category by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolve `category` / `item` names to an item reference.
    pub fn resolve(&self, category: &str, item: &str) -> Option<ItemRef> {
        self.find(category)?.find_item(item)
    }

    /// True if `item` addresses an existing item.
    pub fn contains(&self, item: ItemRef) -> bool {
        item.category.index() < self.categories.len() && item.ordinal < self.item_count
    }

    /// Display name of an item.
    pub fn item_name(&self, item: ItemRef) -> Option<&str> {
        self.get(item.category)?
            .items
            .get(item.ordinal)
            .map(|i| i.name.as_str())
    }

    /// `Category:Item` label, falling back to the raw ordinals.
    pub fn label(&self, item: ItemRef) -> String {
        match (self.get(item.category), self.item_name(item)) {
            (Some(category), Some(name)) => format!("{}:{}", category.name, name),
            _ => item.to_string(),
        }
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn houses() -> CategorySet {
        CategorySet::new(vec![
            ("Color", vec!["Red", "Green", "Blue"]),
            ("Pet", vec!["Cat", "Dog", "Fish"]),
            ("House", vec!["First", "Second", "Third"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_category_set_creation() {
        let set = houses();
        assert_eq!(set.len(), 3);
        assert_eq!(set.item_count(), 3);
        assert_eq!(set.get(CategoryId::new(1)).unwrap().name, "Pet");
    }

    #[test]
    fn test_unequal_item_counts_rejected() {
        let result = CategorySet::new(vec![
            ("Color", vec!["Red", "Green", "Blue"]),
            ("Pet", vec!["Cat", "Dog"]),
        ]);
        assert!(matches!(result, Err(GridError::Configuration(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = CategorySet::new(vec![
            ("Color", vec!["Red", "Green"]),
            ("color", vec!["Cat", "Dog"]),
        ]);
        assert!(matches!(result, Err(GridError::Configuration(_))));

        let result = CategorySet::new(vec![("Color", vec!["Red", "red"])]);
        assert!(matches!(result, Err(GridError::Configuration(_))));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let set = houses();
        assert_eq!(set.resolve("pet", "DOG"), Some(ItemRef::new(1, 1)));
        assert_eq!(set.resolve("Pet", "Horse"), None);
        assert_eq!(set.resolve("Drink", "Tea"), None);
    }

    #[test]
    fn test_contains_and_label() {
        let set = houses();
        assert!(set.contains(ItemRef::new(2, 2)));
        assert!(!set.contains(ItemRef::new(3, 0)));
        assert!(!set.contains(ItemRef::new(0, 3)));
        assert_eq!(set.label(ItemRef::new(0, 0)), "Color:Red");
        assert_eq!(set.label(ItemRef::new(5, 1)), "5.1");
    }

    #[test]
    fn test_empty_set() {
        let set = CategorySet::new(Vec::<(String, Vec<String>)>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.item_count(), 0);
    }
}
