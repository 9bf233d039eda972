//! Terminal rendering of the relation grid.
//!
//! The view is laid out once per puzzle from the block cells of every
//! category pair, then kept current by repainting the single cell each
//! update reports.

use crate::output::Formatter;
use gridmark_domain::{CellUpdate, PuzzleSession, RelationValue, Result};

/// Separator drawn between neighbouring blocks.
const BLOCK_GAP: &str = " |";

/// Cached cell glyphs of one puzzle's grid.
#[derive(Debug, Clone)]
pub struct GridView {
    /// `None` marks positions outside every block (the empty triangle).
    cells: Vec<Vec<Option<RelationValue>>>,
    block_size: usize,
}

impl GridView {
    /// Lay out every block of `session` and fill in the stored values.
    pub fn build(session: &PuzzleSession) -> Result<Self> {
        let translator = session.translator();
        let mut cells = vec![vec![None; translator.col_count()]; translator.row_count()];

        for block in session.table().blocks() {
            for cell in translator.block_cells_of(block.row_category, block.col_category)? {
                let value = match translator.pair_at(cell) {
                    Some((a, b)) => session.get(a, b)?,
                    None => RelationValue::Unknown,
                };
                cells[cell.row][cell.col] = Some(value);
            }
        }

        Ok(Self {
            cells,
            block_size: translator.block_size(),
        })
    }

    /// Repaint the one cell touched by `update`.
    pub fn repaint(&mut self, update: &CellUpdate) {
        if let Some(slot) = self
            .cells
            .get_mut(update.cell.row)
            .and_then(|row| row.get_mut(update.cell.col))
        {
            *slot = Some(update.current);
        }
    }

    /// Blank every cell after a reset.
    pub fn clear(&mut self) {
        for slot in self.cells.iter_mut().flatten().flatten() {
            *slot = RelationValue::Unknown;
        }
    }

    /// Value shown at a grid position
    pub fn value_at(&self, row: usize, col: usize) -> Option<RelationValue> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Render headers, labels and cells as text.
    ///
    /// Layout: partner category names, partner item names written
    /// vertically, column numbers, then per super-row a line with the row
    /// category's name followed by one line per item.
    pub fn render(&self, session: &PuzzleSession, formatter: &Formatter) -> String {
        let categories = session.categories();
        let table = session.table();
        let n = self.block_size;
        let block_width = n * 2;

        let label_width = categories
            .iter()
            .flat_map(|c| {
                std::iter::once(c.name.chars().count())
                    .chain(c.items.iter().map(|i| i.name.chars().count()))
            })
            .max()
            .unwrap_or(0)
            + 5;

        let columns: Vec<_> = (0..table.column_count())
            .filter_map(|c| table.column_category(c).and_then(|id| categories.get(id)))
            .collect();

        let mut out = String::new();

        // Partner category names, one per block column.
        out.push_str(&" ".repeat(label_width));
        for category in &columns {
            let width = block_width.saturating_sub(1);
            out.push_str(&format!(" {:<width$}", truncate(&category.name, width)));
            out.push_str(BLOCK_GAP);
        }
        out.push('\n');

        // Partner item names, one character per line.
        let tallest = columns
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.name.chars().count()))
            .max()
            .unwrap_or(0);
        for line in 0..tallest {
            out.push_str(&" ".repeat(label_width));
            for category in &columns {
                for item in &category.items {
                    out.push(' ');
                    out.push(item.name.chars().nth(line).unwrap_or(' '));
                }
                out.push_str(BLOCK_GAP);
            }
            out.push('\n');
        }

        // Column numbers for `pick`.
        out.push_str(&" ".repeat(label_width));
        for c in 0..columns.len() * n {
            out.push(' ');
            out.push(char::from_digit((c % 10) as u32, 10).unwrap_or(' '));
            if (c + 1) % n == 0 {
                out.push_str(BLOCK_GAP);
            }
        }
        out.push('\n');

        for super_row in 0..table.row_count() {
            let Some(owner) = table.row_category(super_row).and_then(|id| categories.get(id)) else {
                continue;
            };
            out.push_str(&formatter.heading(&owner.name));
            out.push('\n');

            for item in &owner.items {
                let row = super_row * n + item.ordinal;
                let label = format!("{:<w$}{:>4} ", truncate(&item.name, label_width - 5), row, w = label_width - 5);
                out.push_str(&label);
                for (c, slot) in self.cells[row].iter().enumerate() {
                    out.push(' ');
                    match slot {
                        Some(value) => out.push_str(&formatter.glyph(*value)),
                        None => out.push(' '),
                    }
                    if (c + 1) % n == 0 {
                        out.push_str(BLOCK_GAP);
                    }
                }
                let trimmed = out.trim_end_matches([' ', '|']).len();
                out.truncate(trimmed);
                out.push('\n');
            }
        }

        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use gridmark_domain::{CategorySet, ItemRef, RelationEvent};

    const RED: ItemRef = ItemRef::new(0, 0);
    const THIRD: ItemRef = ItemRef::new(2, 2);

    fn session() -> PuzzleSession {
        let categories = CategorySet::new(vec![
            ("Color", vec!["Red", "Green", "Blue"]),
            ("Pet", vec!["Cat", "Dog", "Fish"]),
            ("House", vec!["First", "Second", "Third"]),
        ])
        .unwrap();
        PuzzleSession::open(categories).unwrap()
    }

    #[test]
    fn test_build_covers_triangle() {
        let view = GridView::build(&session()).unwrap();
        assert_eq!(view.value_at(0, 0), Some(RelationValue::Unknown));
        assert_eq!(view.value_at(5, 2), Some(RelationValue::Unknown));
        // Row 1 has one block, so its second block column is empty.
        assert_eq!(view.value_at(3, 3), None);
        assert_eq!(view.value_at(6, 0), None);
    }

    #[test]
    fn test_repaint_and_clear() {
        let mut session = session();
        let mut view = GridView::build(&session).unwrap();
        let update = session
            .apply(RelationEvent::new(THIRD, RelationValue::True, RED))
            .unwrap();
        view.repaint(&update);
        assert_eq!(
            view.value_at(update.cell.row, update.cell.col),
            Some(RelationValue::True)
        );

        view.clear();
        assert_eq!(
            view.value_at(update.cell.row, update.cell.col),
            Some(RelationValue::Unknown)
        );
    }

    #[test]
    fn test_render_shows_labels_and_glyphs() {
        let mut session = session();
        session
            .apply(RelationEvent::new(RED, RelationValue::False, THIRD))
            .unwrap();
        let view = GridView::build(&session).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let text = view.render(&session, &formatter);

        assert!(text.contains("Pet"));
        assert!(text.contains("House"));
        assert!(text.contains("Red"));
        assert!(text.contains("Third"));
        assert!(text.contains('X'));
        // Color rows plus House rows, each with three item lines.
        assert_eq!(text.lines().filter(|l| l.contains(" . ")).count(), 6);
    }

    #[test]
    fn test_render_aligns_non_ascii_names() {
        let categories = CategorySet::new(vec![
            ("Café", vec!["Crème", "Thé"]),
            ("Ville", vec!["Zürich", "Łódź"]),
        ])
        .unwrap();
        let session = PuzzleSession::open(categories).unwrap();
        let view = GridView::build(&session).unwrap();
        let text = view.render(&session, &Formatter::new(OutputFormat::Table, false));

        // Labels are as wide as the longest name ("Zürich", six characters)
        // plus the row number, so the first cell sits in column 12.
        let header = text.lines().next().unwrap();
        assert_eq!(header.chars().take_while(|c| *c == ' ').count(), 12);
        let rows: Vec<_> = text.lines().filter(|l| l.contains(" . ")).collect();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.chars().nth(12), Some('.'), "misaligned row: {:?}", row);
        }
    }
}
