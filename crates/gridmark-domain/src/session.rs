//! Puzzle session: the layout, store and history of one loaded puzzle
//!
//! A session is created when a puzzle is loaded and dropped when another one
//! replaces it. Relation events are applied one at a time, in the order they
//! arrive, and each returns the single cell a renderer has to repaint.

use tracing::{debug, info, warn};

use crate::category::{Category, CategoryId, CategorySet, ItemRef};
use crate::error::{GridError, Result};
use crate::layout::BlockTable;
use crate::relation::{RelationEvent, RelationValue};
use crate::store::RelationStore;
use crate::translate::{Cell, CoordinateTranslator};

/// Outcome of one write: where it shows and what it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    /// Cell to repaint
    pub cell: Cell,
    /// First item of the pair
    pub a: ItemRef,
    /// Second item of the pair
    pub b: ItemRef,
    /// Value before the write
    pub previous: RelationValue,
    /// Value after the write
    pub current: RelationValue,
}

impl CellUpdate {
    /// A confirmed value was flipped to the opposite one
    pub fn is_contradiction(&self) -> bool {
        self.previous.contradicts(self.current)
    }

    /// The write changed the stored value
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Tallies of stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationCounts {
    /// Pairs confirmed true
    pub confirmed_true: usize,
    /// Pairs confirmed false
    pub confirmed_false: usize,
    /// Pairs still open
    pub unknown: usize,
}

impl RelationCounts {
    /// Total number of pairs
    pub fn total(&self) -> usize {
        self.confirmed_true + self.confirmed_false + self.unknown
    }
}

/// One row of the chart: an item of the pivot category and its confirmed
/// partner in each other category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    /// Item of the pivot category
    pub item: ItemRef,
    /// Confirmed partner per column category, `None` if not yet known
    pub partners: Vec<Option<ItemRef>>,
}

/// Solution chart pivoted on one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Category listed down the first column
    pub pivot: CategoryId,
    /// Remaining categories, in ordinal order
    pub columns: Vec<CategoryId>,
    /// One row per pivot item
    pub rows: Vec<ChartRow>,
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    event: RelationEvent,
    previous: RelationValue,
}

/// Everything owned by the currently loaded puzzle.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    categories: CategorySet,
    translator: CoordinateTranslator,
    store: RelationStore,
    history: Vec<Mark>,
}

impl PuzzleSession {
    /// Lay out `categories` and start with every relation Unknown.
    ///
    /// # Errors
    /// [`GridError::Configuration`] if there are fewer than two categories.
    pub fn open(categories: CategorySet) -> Result<Self> {
        if categories.len() < 2 {
            return Err(GridError::Configuration(format!(
                "A puzzle needs at least two categories, got {}",
                categories.len()
            )));
        }

        let table = BlockTable::enumerate(categories.len());
        let translator = CoordinateTranslator::new(table, categories.item_count());
        let store = RelationStore::new(&categories);

        info!(
            categories = categories.len(),
            items = categories.item_count(),
            blocks = translator.table().len(),
            "Opened puzzle session"
        );

        Ok(Self {
            categories,
            translator,
            store,
            history: Vec::new(),
        })
    }

    /// The puzzle's categories
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Cell addressing for this puzzle
    pub fn translator(&self) -> &CoordinateTranslator {
        &self.translator
    }

    /// Block layout for this puzzle
    pub fn table(&self) -> &BlockTable {
        self.translator.table()
    }

    /// Current relation values
    pub fn store(&self) -> &RelationStore {
        &self.store
    }

    /// Number of writes that `undo` can revert
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Current value of a pair
    pub fn get(&self, a: ItemRef, b: ItemRef) -> Result<RelationValue> {
        self.store.get(a, b)
    }

    /// Apply one decided relation and report the cell to repaint.
    ///
    /// A contradiction is reported, not rejected: the new value is stored.
    pub fn apply(&mut self, event: RelationEvent) -> Result<CellUpdate> {
        let cell = self.translator.cell_of(event.a, event.b)?;
        let previous = self.store.set(event.a, event.value, event.b)?;
        self.history.push(Mark { event, previous });

        let update = CellUpdate {
            cell,
            a: event.a,
            b: event.b,
            previous,
            current: event.value,
        };
        if update.is_contradiction() {
            warn!(
                a = %self.categories.label(event.a),
                b = %self.categories.label(event.b),
                previous = %previous,
                current = %event.value,
                "Contradicting relation"
            );
        } else {
            debug!(
                a = %self.categories.label(event.a),
                b = %self.categories.label(event.b),
                value = %event.value,
                %cell,
                "Applied relation"
            );
        }
        Ok(update)
    }

    /// Set a pair back to Unknown.
    pub fn retract(&mut self, a: ItemRef, b: ItemRef) -> Result<CellUpdate> {
        self.apply(RelationEvent::new(a, RelationValue::Unknown, b))
    }

    /// Apply `verb` to the pair shown at `cell`.
    ///
    /// Only open cells accept a selection; decided cells and cells outside
    /// every block give `None`.
    pub fn select(&mut self, cell: Cell, verb: RelationValue) -> Result<Option<CellUpdate>> {
        let Some((a, b)) = self.translator.pair_at(cell) else {
            return Ok(None);
        };
        if self.store.get(a, b)?.is_decided() {
            debug!(%cell, "Ignoring selection of a decided cell");
            return Ok(None);
        }
        self.apply(RelationEvent::new(a, verb, b)).map(Some)
    }

    /// Revert the most recent write.
    ///
    /// One call reverts one write. Every write in the history is treated as
    /// a user mark, so replayed events are also undone one at a time.
    pub fn undo(&mut self) -> Result<Option<CellUpdate>> {
        let Some(mark) = self.history.pop() else {
            return Ok(None);
        };
        let RelationEvent { a, b, .. } = mark.event;
        let cell = self.translator.cell_of(a, b)?;
        let undone = self.store.set(a, mark.previous, b)?;
        debug!(%cell, value = %mark.previous, "Undid relation");

        Ok(Some(CellUpdate {
            cell,
            a,
            b,
            previous: undone,
            current: mark.previous,
        }))
    }

    /// Clear every relation and the history.
    pub fn reset(&mut self) {
        self.store.clear_all();
        self.history.clear();
        info!("Reset puzzle session");
    }

    /// Tally of True, False and Unknown pairs
    pub fn counts(&self) -> RelationCounts {
        RelationCounts {
            confirmed_true: self.store.count(RelationValue::True),
            confirmed_false: self.store.count(RelationValue::False),
            unknown: self.store.count(RelationValue::Unknown),
        }
    }

    /// Every item has exactly one confirmed partner in every other category.
    pub fn is_solved(&self) -> bool {
        self.table().blocks().iter().all(|block| {
            let (Some(rows), Some(cols)) = (
                self.categories.get(block.row_category),
                self.categories.get(block.col_category),
            ) else {
                return false;
            };
            rows.item_refs().all(|a| self.true_partners(a, cols) == 1)
                && cols.item_refs().all(|b| self.true_partners(b, rows) == 1)
        })
    }

    fn true_partners(&self, item: ItemRef, other: &Category) -> usize {
        other
            .item_refs()
            .filter(|b| matches!(self.store.get(item, *b), Ok(RelationValue::True)))
            .count()
    }

    /// Confirmed partners of every item of `pivot`.
    ///
    /// # Errors
    /// [`GridError::Configuration`] if `pivot` is not a category of this
    /// puzzle.
    pub fn chart(&self, pivot: CategoryId) -> Result<Chart> {
        let pivot_category = self.categories.get(pivot).ok_or_else(|| {
            GridError::Configuration(format!("No category {} to chart", pivot))
        })?;
        let others: Vec<_> = self.categories.iter().filter(|c| c.id != pivot).collect();

        let mut rows = Vec::with_capacity(pivot_category.items.len());
        for item in pivot_category.item_refs() {
            let mut partners = Vec::with_capacity(others.len());
            for other in &others {
                let mut partner = None;
                for candidate in other.item_refs() {
                    if self.store.get(item, candidate)? == RelationValue::True {
                        partner = Some(candidate);
                        break;
                    }
                }
                partners.push(partner);
            }
            rows.push(ChartRow { item, partners });
        }

        Ok(Chart {
            pivot,
            columns: others.iter().map(|c| c.id).collect(),
            rows,
        })
    }
}
