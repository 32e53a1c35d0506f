//! Use-case layer of the Forkful client engine.
//!
//! Orchestrates the domain components from `forkful-core` over the I/O in
//! `forkful-infrastructure`: the debounced search pipeline, the optimistic
//! like reconciler, the shared recipe cache they both mutate, and the
//! authentication flows.

pub mod auth;
pub mod engine;
pub mod like_reconciler;
pub mod recipe_cache;
pub mod search_pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthUseCase;
pub use engine::ForkfulEngine;
pub use like_reconciler::LikeReconciler;
pub use recipe_cache::RecipeCache;
pub use search_pipeline::SearchPipeline;
