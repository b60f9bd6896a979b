//! Recipe provider
//!
//! Supplies ordered step lists keyed by a stable recipe id and records when a
//! recipe was last brewed.

pub mod book;
pub mod recipe;

pub use book::{write_snapshot, RecipeBook, RecipeError};
pub use recipe::{BrewerId, Recipe, RecipeStep};
