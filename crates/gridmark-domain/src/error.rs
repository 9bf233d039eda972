//! Error types for grid operations

use thiserror::Error;

use crate::category::ItemRef;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised by the layout, the relation store and the translator.
///
/// Both variants point at a puzzle definition that was not validated
/// upstream. Nothing here is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The category set cannot be laid out (negative count, unequal item
    /// counts, duplicate names, too few categories).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two items that cannot hold a relation: same category, or an item
    /// outside its category's index.
    #[error("Invalid pair {a} / {b}: {reason}")]
    InvalidPair {
        /// First item as supplied by the caller
        a: ItemRef,
        /// Second item as supplied by the caller
        b: ItemRef,
        /// What is wrong with the pair
        reason: String,
    },
}

impl GridError {
    pub(crate) fn same_category(a: ItemRef, b: ItemRef) -> Self {
        GridError::InvalidPair {
            a,
            b,
            reason: format!("both items belong to category {}", a.category),
        }
    }

    pub(crate) fn unknown_item(a: ItemRef, b: ItemRef, missing: ItemRef) -> Self {
        GridError::InvalidPair {
            a,
            b,
            reason: format!("item {} is not in the puzzle", missing),
        }
    }
}
