//! Search domain models and tokenization.

mod model;

pub use model::{tokenize, SearchQuery, SearchStatus};
