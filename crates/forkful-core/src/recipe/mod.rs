//! Recipe domain: catalog entries and drafts.

mod model;

pub use model::{Recipe, RecipeDraft};
