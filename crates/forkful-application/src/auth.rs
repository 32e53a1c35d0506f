//! Authentication and recipe CRUD use cases.
//!
//! Single-shot request/response flows with no concurrency hazard; they
//! exist to feed the [`SessionStore`] and the remote service, nothing
//! more.

use std::sync::Arc;

use forkful_core::api::RecipeApi;
use forkful_core::recipe::{Recipe, RecipeDraft};
use forkful_core::session::{Session, SessionStore};
use forkful_core::{ForkfulError, Result};

/// Login/signup/logout plus the owner-side recipe CRUD.
pub struct AuthUseCase {
    api: Arc<dyn RecipeApi>,
    sessions: Arc<SessionStore>,
}

impl AuthUseCase {
    pub fn new(api: Arc<dyn RecipeApi>, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// Exchanges credentials for a session and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.api.login(email, password).await?;
        self.sessions.set(session.clone())?;
        Ok(session)
    }

    /// Registers an account, then stores the returned session.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let session = self.api.signup(name, email, password).await?;
        self.sessions.set(session.clone())?;
        Ok(session)
    }

    /// Signs out locally. The server-side token stays valid until it
    /// expires; expiry enforcement is the remote service's concern.
    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()
    }

    /// Publishes a recipe authored by the signed-in user.
    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        let token = self.require_token()?;
        self.api.create_recipe(draft, &token).await
    }

    /// Lists the signed-in user's own recipes, as shown on the
    /// "my recipes" view that the delete flow operates on.
    pub async fn my_recipes(&self) -> Result<Vec<Recipe>> {
        let token = self.require_token()?;
        self.api.list_recipes(&token).await
    }

    /// Deletes one of the signed-in user's recipes.
    pub async fn delete_recipe(&self, recipe_id: &str) -> Result<()> {
        let token = self.require_token()?;
        self.api.delete_recipe(recipe_id, &token).await
    }

    fn require_token(&self) -> Result<String> {
        self.sessions
            .bearer_token()
            .ok_or_else(|| ForkfulError::unauthenticated("please sign in first"))
    }
}
