//! Item pair to display cell addressing

use std::fmt;

use crate::category::{CategoryId, ItemRef};
use crate::error::{GridError, Result};
use crate::layout::{BlockTable, SuperBlock};

/// Absolute cell of the relation grid, block headers excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row, counted across all super-rows
    pub row: usize,
    /// Column, counted across all super-columns
    pub col: usize,
}

impl Cell {
    /// Create a cell address
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Maps item pairs to cells and back, using one [`BlockTable`].
///
/// Within a block the item of the block's row category picks the row and the
/// other item picks the column, so the result does not depend on argument
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateTranslator {
    table: BlockTable,
    item_count: usize,
}

impl CoordinateTranslator {
    /// Create a translator for blocks of `item_count x item_count` cells.
    pub fn new(table: BlockTable, item_count: usize) -> Self {
        Self { table, item_count }
    }

    /// The layout this translator addresses
    pub fn table(&self) -> &BlockTable {
        &self.table
    }

    /// Side length of every block (`n`)
    pub fn block_size(&self) -> usize {
        self.item_count
    }

    /// Total grid rows
    pub fn row_count(&self) -> usize {
        self.table.row_count() * self.item_count
    }

    /// Total grid columns
    pub fn col_count(&self) -> usize {
        self.table.column_count() * self.item_count
    }

    /// The one cell representing the relation between `a` and `b`.
    ///
    /// # Errors
    /// [`GridError::InvalidPair`] if the items share a category or either is
    /// outside the layout.
    pub fn cell_of(&self, a: ItemRef, b: ItemRef) -> Result<Cell> {
        for item in [a, b] {
            if item.category.index() >= self.table.category_count() || item.ordinal >= self.item_count
            {
                return Err(GridError::unknown_item(a, b, item));
            }
        }
        let block = self
            .table
            .block_for(a.category, b.category)
            .ok_or_else(|| GridError::same_category(a, b))?;

        let (row_item, col_item) = if a.category == block.row_category {
            (a, b)
        } else {
            (b, a)
        };
        Ok(self.absolute(block, row_item.ordinal, col_item.ordinal))
    }

    /// Every cell of the block showing `{a, b}`, row-major.
    ///
    /// # Errors
    /// [`GridError::Configuration`] if the two categories have no block
    /// (same category, or outside the layout).
    pub fn block_cells_of(&self, a: CategoryId, b: CategoryId) -> Result<Vec<Cell>> {
        let block = self.table.block_for(a, b).ok_or_else(|| {
            GridError::Configuration(format!("No block for categories {} and {}", a, b))
        })?;
        let n = self.item_count;
        Ok((0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .map(|(r, c)| self.absolute(block, r, c))
            .collect())
    }

    /// The item pair shown at `cell`, row item first; `None` outside every
    /// block.
    pub fn pair_at(&self, cell: Cell) -> Option<(ItemRef, ItemRef)> {
        let n = self.item_count;
        if n == 0 {
            return None;
        }
        let block = self.table.block_at(cell.row / n, cell.col / n)?;
        Some((
            ItemRef {
                category: block.row_category,
                ordinal: cell.row % n,
            },
            ItemRef {
                category: block.col_category,
                ordinal: cell.col % n,
            },
        ))
    }

    fn absolute(&self, block: &SuperBlock, row_offset: usize, col_offset: usize) -> Cell {
        Cell {
            row: block.super_row * self.item_count + row_offset,
            col: block.super_col * self.item_count + col_offset,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        /// Property: distinct unordered pairs map to distinct cells, and each
        /// cell maps back to its pair
        #[test]
        fn test_cell_of_is_injective(m in 2usize..7, n in 1usize..6) {
            let t = CoordinateTranslator::new(BlockTable::enumerate(m), n);
            let mut seen = HashMap::new();
            for ca in 0..m {
                for cb in (ca + 1)..m {
                    for ia in 0..n {
                        for ib in 0..n {
                            let a = ItemRef::new(ca, ia);
                            let b = ItemRef::new(cb, ib);
                            let cell = t.cell_of(a, b).unwrap();
                            prop_assert_eq!(cell, t.cell_of(b, a).unwrap());
                            prop_assert!(cell.row < t.row_count());
                            prop_assert!(cell.col < t.col_count());
                            prop_assert!(seen.insert(cell, (a, b)).is_none());

                            let (x, y) = t.pair_at(cell).unwrap();
                            prop_assert!((x, y) == (a, b) || (x, y) == (b, a));
                        }
                    }
                }
            }
            prop_assert_eq!(seen.len(), m * (m - 1) / 2 * n * n);
        }
    }
}
