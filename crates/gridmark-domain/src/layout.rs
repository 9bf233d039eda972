//! Super-grid layout: which category pair goes into which block
//!
//! Every unordered pair of categories gets one `n x n` block of the display.
//! Blocks are arranged in a triangle so that the mirror half of the relation
//! matrix is never drawn:
//!
//! ```text
//!            1      2      3
//!   0     [0,1]  [0,2]  [0,3]
//!   3     [3,1]  [3,2]
//!   2     [2,1]
//! ```
//!
//! Row 0 belongs to category 0. Each following row belongs to the highest
//! category not yet placed and pairs it with the remaining categories from 1
//! upwards. Column `c` therefore always holds category `c + 1`, so a single
//! strip of column headers serves every row.

use crate::category::CategoryId;
use crate::error::{GridError, Result};

/// An unordered pair of distinct categories, stored low ordinal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryPair {
    low: CategoryId,
    high: CategoryId,
}

impl CategoryPair {
    /// Create a pair; `None` when both sides are the same category.
    pub fn new(a: CategoryId, b: CategoryId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Lower category ordinal
    pub fn low(&self) -> CategoryId {
        self.low
    }

    /// Higher category ordinal
    pub fn high(&self) -> CategoryId {
        self.high
    }

    /// True if `category` is one side of the pair
    pub fn contains(&self, category: CategoryId) -> bool {
        self.low == category || self.high == category
    }
}

/// Placement of one category pair in the super-grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    /// The pair shown in this block
    pub pair: CategoryPair,
    /// Category whose items run down the block's rows
    pub row_category: CategoryId,
    /// Category whose items run across the block's columns
    pub col_category: CategoryId,
    /// Block row in the super-grid
    pub super_row: usize,
    /// Block column in the super-grid
    pub super_col: usize,
}

/// The complete pair-to-block assignment for one category count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTable {
    category_count: usize,
    /// Blocks in row-major order
    blocks: Vec<SuperBlock>,
    /// Index of the first block of each super-row
    row_starts: Vec<usize>,
    /// `m x m` symmetric index into `blocks`
    lookup: Vec<Option<usize>>,
}

impl BlockTable {
    /// Enumerate every unordered pair of `category_count` categories.
    ///
    /// Produces `m - 1` super-rows, row `r >= 1` holding `m - 1 - r` blocks.
    /// Fewer than two categories give an empty table.
    pub fn enumerate(category_count: usize) -> Self {
        let m = category_count;
        let mut table = Self {
            category_count: m,
            blocks: Vec::with_capacity(m * m.saturating_sub(1) / 2),
            row_starts: Vec::with_capacity(m.saturating_sub(1)),
            lookup: vec![None; m * m],
        };
        if m < 2 {
            return table;
        }

        table.push_row(CategoryId::new(0), m - 1);

        // Pool of unplaced categories is 1..=top; each row retires the top one.
        let mut top = m - 1;
        while top > 1 {
            table.push_row(CategoryId::new(top), top - 1);
            top -= 1;
        }

        table
    }

    /// Append one super-row owned by `owner`, paired with categories
    /// `1..=partners` in ascending order.
    fn push_row(&mut self, owner: CategoryId, partners: usize) {
        let super_row = self.row_starts.len();
        self.row_starts.push(self.blocks.len());

        for (super_col, partner) in (1..=partners).map(CategoryId::new).enumerate() {
            let Some(pair) = CategoryPair::new(owner, partner) else {
                continue;
            };
            let index = self.blocks.len();
            self.blocks.push(SuperBlock {
                pair,
                row_category: owner,
                col_category: partner,
                super_row,
                super_col,
            });
            let m = self.category_count;
            self.lookup[owner.index() * m + partner.index()] = Some(index);
            self.lookup[partner.index() * m + owner.index()] = Some(index);
        }
    }

    /// Number of categories the table was built for
    pub fn category_count(&self) -> usize {
        self.category_count
    }

    /// Number of blocks, `m (m - 1) / 2`
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when no pair exists (fewer than two categories)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of super-rows
    pub fn row_count(&self) -> usize {
        self.row_starts.len()
    }

    /// Widest super-row, which is always row 0
    pub fn column_count(&self) -> usize {
        self.row(0).map_or(0, <[SuperBlock]>::len)
    }

    /// Blocks of one super-row
    pub fn row(&self, super_row: usize) -> Option<&[SuperBlock]> {
        let start = *self.row_starts.get(super_row)?;
        let end = self
            .row_starts
            .get(super_row + 1)
            .copied()
            .unwrap_or(self.blocks.len());
        Some(&self.blocks[start..end])
    }

    /// All super-rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[SuperBlock]> + '_ {
        (0..self.row_count()).filter_map(move |r| self.row(r))
    }

    /// All blocks in row-major order
    pub fn blocks(&self) -> &[SuperBlock] {
        &self.blocks
    }

    /// Block holding the pair `{a, b}`, in either argument order
    pub fn block_for(&self, a: CategoryId, b: CategoryId) -> Option<&SuperBlock> {
        let m = self.category_count;
        if a.index() >= m || b.index() >= m {
            return None;
        }
        self.lookup[a.index() * m + b.index()].map(|i| &self.blocks[i])
    }

    /// Block at a super-grid position
    pub fn block_at(&self, super_row: usize, super_col: usize) -> Option<&SuperBlock> {
        self.row(super_row)?.get(super_col)
    }

    /// Category owning the rows of a super-row
    pub fn row_category(&self, super_row: usize) -> Option<CategoryId> {
        self.row(super_row)?.first().map(|b| b.row_category)
    }

    /// Category shown in a super-column (the same for every row)
    pub fn column_category(&self, super_col: usize) -> Option<CategoryId> {
        self.block_at(0, super_col).map(|b| b.col_category)
    }
}

impl TryFrom<i64> for BlockTable {
    type Error = GridError;

    /// Enumerate from a signed count, as handed over by loosely typed callers.
    fn try_from(category_count: i64) -> Result<Self> {
        let count = usize::try_from(category_count).map_err(|_| {
            GridError::Configuration(format!(
                "Category count must not be negative, got {}",
                category_count
            ))
        })?;
        Ok(Self::enumerate(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> CategoryId {
        CategoryId::new(i)
    }

    #[test]
    fn test_three_categories() {
        let table = BlockTable::enumerate(3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.len(), 3);

        let row0 = table.row(0).unwrap();
        assert_eq!(row0.len(), 2);
        assert_eq!(row0[0].pair, CategoryPair::new(id(0), id(1)).unwrap());
        assert_eq!(row0[0].super_col, 0);
        assert_eq!(row0[1].pair, CategoryPair::new(id(0), id(2)).unwrap());
        assert_eq!(row0[1].super_col, 1);

        let row1 = table.row(1).unwrap();
        assert_eq!(row1.len(), 1);
        assert_eq!(row1[0].pair, CategoryPair::new(id(1), id(2)).unwrap());
        assert_eq!(row1[0].row_category, id(2));
        assert_eq!(row1[0].col_category, id(1));
    }

    #[test]
    fn test_row_lengths() {
        let table = BlockTable::enumerate(6);
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.row(0).unwrap().len(), 5);
        for r in 1..5 {
            assert_eq!(table.row(r).unwrap().len(), 6 - 1 - r);
            assert_eq!(table.row_category(r), Some(id(6 - r)));
        }
        assert!(table.row(5).is_none());
    }

    #[test]
    fn test_columns_share_category() {
        let table = BlockTable::enumerate(5);
        for row in table.rows() {
            for block in row {
                assert_eq!(block.col_category, id(block.super_col + 1));
            }
        }
        assert_eq!(table.column_category(3), Some(id(4)));
        assert_eq!(table.column_category(4), None);
    }

    #[test]
    fn test_small_counts_are_empty() {
        for m in 0..2 {
            let table = BlockTable::enumerate(m);
            assert!(table.is_empty());
            assert_eq!(table.row_count(), 0);
            assert_eq!(table.column_count(), 0);
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(matches!(
            BlockTable::try_from(-1),
            Err(GridError::Configuration(_))
        ));
        assert_eq!(BlockTable::try_from(4).unwrap(), BlockTable::enumerate(4));
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let table = BlockTable::enumerate(4);
        let forward = table.block_for(id(3), id(1)).unwrap();
        let backward = table.block_for(id(1), id(3)).unwrap();
        assert_eq!(forward, backward);
        assert!(table.block_for(id(2), id(2)).is_none());
        assert!(table.block_for(id(0), id(4)).is_none());
    }

    #[test]
    fn test_pair_rejects_same_category() {
        assert!(CategoryPair::new(id(1), id(1)).is_none());
        let pair = CategoryPair::new(id(3), id(1)).unwrap();
        assert_eq!(pair.low(), id(1));
        assert_eq!(pair.high(), id(3));
        assert!(pair.contains(id(3)));
        assert!(!pair.contains(id(2)));
    }
}
