//! Puzzle definitions and relation event files.

use crate::error::{CliError, Result};
use gridmark_domain::{CategorySet, ItemRef, PuzzleSession, RelationEvent, RelationValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A puzzle definition as stored on disk.
///
/// ```toml
/// title = "Three Houses"
///
/// [[categories]]
/// name = "Color"
/// items = ["Red", "Green", "Blue"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleFile {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Categories in display order
    pub categories: Vec<CategoryDef>,
}

/// One category of a puzzle file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Category name
    pub name: String,
    /// Item names
    pub items: Vec<String>,
}

impl PuzzleFile {
    /// Read and parse a puzzle file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let puzzle = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            categories = puzzle.categories.len(),
            "Loaded puzzle file"
        );
        Ok(puzzle)
    }

    /// Parse a puzzle definition from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Title, falling back to `fallback`.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    /// Validate the categories.
    pub fn to_categories(&self) -> Result<CategorySet> {
        let definitions = self
            .categories
            .iter()
            .map(|c| (c.name.clone(), c.items.clone()));
        Ok(CategorySet::new(definitions)?)
    }

    /// Validate the categories and start a session.
    pub fn open_session(&self) -> Result<PuzzleSession> {
        Ok(PuzzleSession::open(self.to_categories()?)?)
    }
}

/// Resolve `Category:Item` to an item reference.
pub fn parse_item(categories: &CategorySet, label: &str) -> Result<ItemRef> {
    let (category, item) = label.split_once(':').ok_or_else(|| {
        CliError::InvalidInput(format!("Expected Category:Item, got '{}'", label))
    })?;
    let category = category.trim();
    let item = item.trim();

    let found = categories
        .find(category)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown category '{}'", category)))?;
    found.find_item(item).ok_or_else(|| {
        CliError::InvalidInput(format!("Unknown item '{}' in '{}'", item, found.name))
    })
}

/// Parse `Category:Item verb Category:Item`.
///
/// Item names may contain spaces; the verb is the first bare `is`, `not` or
/// `maybe` token that is followed by another `Category:Item`.
pub fn parse_event(categories: &CategorySet, line: &str) -> Result<RelationEvent> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let verb_at = (1..tokens.len().saturating_sub(1))
        .find(|&i| {
            !tokens[i].contains(':')
                && RelationValue::parse(tokens[i]).is_some()
                && tokens[i + 1].contains(':')
        })
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Expected 'Category:Item is|not|maybe Category:Item', got '{}'",
                line.trim()
            ))
        })?;

    let value = RelationValue::parse(tokens[verb_at])
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown relation '{}'", tokens[verb_at])))?;
    let a = parse_item(categories, &tokens[..verb_at].join(" "))?;
    let b = parse_item(categories, &tokens[verb_at + 1..].join(" "))?;
    Ok(RelationEvent::new(a, value, b))
}

/// Parse an events file. Blank lines and `#` comments are skipped; each
/// event comes with its 1-based line number.
pub fn parse_events(categories: &CategorySet, contents: &str) -> Result<Vec<(usize, RelationEvent)>> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            parse_event(categories, line)
                .map(|event| (number, event))
                .map_err(|e| CliError::InvalidInput(format!("line {}: {}", number, e)))
        })
        .collect()
}
