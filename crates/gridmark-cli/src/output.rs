//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gridmark_domain::{BlockTable, CategorySet, CellUpdate, Chart, RelationCounts, RelationValue};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a block layout. Categories are shown by ordinal.
    pub fn format_layout(&self, table: &BlockTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_layout_json(table),
            OutputFormat::Table => Ok(self.format_layout_table(table)),
        }
    }

    fn format_layout_json(&self, table: &BlockTable) -> Result<String> {
        let rows: Vec<serde_json::Value> = table
            .rows()
            .map(|row| {
                serde_json::Value::Array(
                    row.iter()
                        .map(|b| {
                            serde_json::json!({
                                "pair": [b.pair.low().index(), b.pair.high().index()],
                                "row_category": b.row_category.index(),
                                "col_category": b.col_category.index(),
                                "super_row": b.super_row,
                                "super_col": b.super_col,
                            })
                        })
                        .collect(),
                )
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "categories": table.category_count(),
            "blocks": table.len(),
            "rows": rows,
        }))?)
    }

    fn format_layout_table(&self, table: &BlockTable) -> String {
        if table.is_empty() {
            return self.colorize("No category pairs to lay out.", "yellow");
        }

        let mut builder = Builder::default();
        let mut header = vec!["Row".to_string()];
        header.extend((0..table.column_count()).map(|c| format!("Col {}", c)));
        builder.push_record(header);

        for (r, row) in table.rows().enumerate() {
            let mut record = vec![r.to_string()];
            record.extend(
                (0..table.column_count()).map(|c| match row.get(c) {
                    Some(b) => format!("{} x {}", b.row_category, b.col_category),
                    None => String::new(),
                }),
            );
            builder.push_record(record);
        }

        let mut built = builder.build();
        built
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        built.to_string()
    }

    /// Format a chart with item names.
    pub fn format_chart(&self, chart: &Chart, categories: &CategorySet) -> Result<String> {
        let name_of = |id| categories.get(id).map_or(String::new(), |c| c.name.clone());

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = chart
                    .rows
                    .iter()
                    .map(|row| {
                        let mut entry = serde_json::Map::new();
                        entry.insert(
                            name_of(chart.pivot),
                            categories.item_name(row.item).unwrap_or_default().into(),
                        );
                        for (column, partner) in chart.columns.iter().zip(&row.partners) {
                            let value = partner
                                .and_then(|p| categories.item_name(p))
                                .map_or(serde_json::Value::Null, Into::into);
                            entry.insert(name_of(*column), value);
                        }
                        serde_json::Value::Object(entry)
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                let mut header = vec![name_of(chart.pivot)];
                header.extend(chart.columns.iter().map(|c| name_of(*c)));
                builder.push_record(header);

                for row in &chart.rows {
                    let mut record = vec![categories.item_name(row.item).unwrap_or_default().to_string()];
                    record.extend(row.partners.iter().map(|p| {
                        p.and_then(|p| categories.item_name(p))
                            .unwrap_or_default()
                            .to_string()
                    }));
                    builder.push_record(record);
                }

                let mut built = builder.build();
                built
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(built.to_string())
            }
        }
    }

    /// Describe one applied write.
    pub fn format_update(&self, update: &CellUpdate, categories: &CategorySet) -> String {
        let message = format!(
            "{} {} {} at {}",
            categories.label(update.a),
            update.current,
            categories.label(update.b),
            update.cell
        );
        if update.is_contradiction() {
            self.warning(&format!("{} (contradicts earlier '{}')", message, update.previous))
        } else if update.changed() {
            self.success(&message)
        } else {
            self.info(&format!("{} (unchanged)", message))
        }
    }

    /// Summarize relation counts.
    pub fn format_counts(&self, counts: &RelationCounts, solved: bool) -> String {
        let summary = format!(
            "{} true, {} false, {} unknown of {} pairs",
            counts.confirmed_true,
            counts.confirmed_false,
            counts.unknown,
            counts.total()
        );
        if solved {
            self.success(&format!("{} - solved", summary))
        } else {
            self.info(&summary)
        }
    }

    /// Cell glyph, colored by value.
    pub fn glyph(&self, value: RelationValue) -> String {
        let glyph = value.glyph().to_string();
        match value {
            RelationValue::Unknown => glyph,
            RelationValue::True => self.colorize(&glyph, "green"),
            RelationValue::False => self.colorize(&glyph, "red"),
        }
    }

    /// Section heading (category name above its rows).
    pub fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
