//! Gridmark Domain Layer
//!
//! Storage and addressing for the relation grid of a logic puzzle. Every
//! pair of items from two different categories holds one of three values
//! (unknown, true, false), and every such pair owns exactly one cell of a
//! triangular display grid.
//!
//! ## Key Concepts
//!
//! - **Category / Item**: groups of mutually exclusive items, all the same size
//! - **BlockTable**: places each unordered category pair in the super-grid
//! - **RelationStore**: symmetric tri-state storage, O(1) per pair
//! - **CoordinateTranslator**: item pair to cell and back
//! - **PuzzleSession**: owns the above for one loaded puzzle
//!
//! ## Example
//!
//! ```
//! use gridmark_domain::{CategorySet, PuzzleSession, RelationEvent, RelationValue};
//!
//! let categories = CategorySet::new(vec![
//!     ("Color", vec!["Red", "Green"]),
//!     ("Pet", vec!["Cat", "Dog"]),
//! ])?;
//! let mut session = PuzzleSession::open(categories)?;
//!
//! let red = session.categories().resolve("Color", "Red").unwrap();
//! let cat = session.categories().resolve("Pet", "Cat").unwrap();
//! let update = session.apply(RelationEvent::new(red, RelationValue::True, cat))?;
//!
//! assert_eq!(session.get(cat, red)?, RelationValue::True);
//! assert_eq!(update.cell, session.translator().cell_of(cat, red)?);
//! # Ok::<(), gridmark_domain::GridError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod error;
pub mod layout;
pub mod relation;
pub mod session;
pub mod store;
pub mod translate;

// Re-exports for convenience
pub use category::{Category, CategoryId, CategorySet, Item, ItemRef};
pub use error::{GridError, Result};
pub use layout::{BlockTable, CategoryPair, SuperBlock};
pub use relation::{RelationEvent, RelationValue};
pub use session::{CellUpdate, Chart, ChartRow, PuzzleSession, RelationCounts};
pub use store::RelationStore;
pub use translate::{Cell, CoordinateTranslator};
