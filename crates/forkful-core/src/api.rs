//! Remote recipe catalog contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::recipe::{Recipe, RecipeDraft};
use crate::session::Session;

/// Contract with the remote recipe service.
///
/// All operations are single request/response over HTTPS with optional
/// bearer-token auth; the transport and codec live behind this trait so the
/// engine can be driven by an in-memory fake in tests.
///
/// Failures map onto the engine's error taxonomy: connection and server
/// errors are `Transient`, rejected credentials/tokens are
/// `Unauthenticated`, undecodable bodies are `Serialization`.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Searches the catalog by ingredient tokens.
    ///
    /// An absent bearer token issues the call unauthenticated; the remote
    /// service decides what such a caller may see.
    async fn search(&self, tokens: &[String], bearer: Option<&str>) -> Result<Vec<Recipe>>;

    /// Lists the recipes owned by the calling user.
    async fn list_recipes(&self, bearer: &str) -> Result<Vec<Recipe>>;

    /// Toggles the calling user's membership in a recipe's liked-by set.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(liked_by))`: the server returned the authoritative
    ///   membership set for the recipe
    /// - `Ok(None)`: bare acknowledgment; the caller's local state stands
    async fn toggle_like(&self, recipe_id: &str, bearer: &str) -> Result<Option<Vec<String>>>;

    /// Exchanges credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// Registers a new account and returns its session.
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session>;

    /// Publishes a new recipe authored by the calling user.
    async fn create_recipe(&self, draft: &RecipeDraft, bearer: &str) -> Result<Recipe>;

    /// Deletes a recipe owned by the calling user.
    async fn delete_recipe(&self, recipe_id: &str, bearer: &str) -> Result<()>;
}
