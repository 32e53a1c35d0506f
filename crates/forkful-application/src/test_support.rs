//! Shared fixtures for use-case tests: an in-memory session repository
//! and a scriptable fake of the remote recipe service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use forkful_core::api::RecipeApi;
use forkful_core::recipe::{Recipe, RecipeDraft};
use forkful_core::session::{Session, SessionSnapshotRepository, SessionStore};
use forkful_core::{ForkfulError, Result};

pub fn recipe(id: &str, liked_by: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: format!("Recipe {}", id),
        description: String::new(),
        ingredients: vec!["salt".to_string()],
        liked_by: liked_by.iter().map(|s| s.to_string()).collect(),
        author: "author-1".to_string(),
        instructions: None,
        cooking_time: None,
    }
}

pub struct MemoryRepository(Mutex<Option<Session>>);

impl MemoryRepository {
    pub fn new() -> Self {
        Self(Mutex::new(None))
    }
}

impl SessionSnapshotRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.0.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.0.lock().unwrap() = None;
        Ok(())
    }
}

/// A store with no session (anonymous).
pub fn memory_session_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MemoryRepository::new())))
}

/// A store signed in as `user_id` with bearer `token`.
pub fn signed_in_session_store(user_id: &str, token: &str) -> Arc<SessionStore> {
    let store = memory_session_store();
    store
        .set(Session::new(user_id, token, "Test User", "test@example.com"))
        .unwrap();
    store
}

struct PlannedSearch {
    delay: Duration,
    result: Result<Vec<Recipe>>,
}

struct PlannedLike {
    delay: Duration,
    result: Result<Option<Vec<String>>>,
}

/// Scriptable [`RecipeApi`] fake.
///
/// Search and like calls consume planned responses in order; each plan
/// carries a delay so tests under paused virtual time can control which
/// response lands first. Calls are recorded for assertion.
pub struct MockRecipeApi {
    search_plan: Mutex<VecDeque<PlannedSearch>>,
    like_plan: Mutex<VecDeque<PlannedLike>>,
    search_calls: Mutex<Vec<(Vec<String>, Option<String>)>>,
    like_calls: Mutex<Vec<String>>,
    list_result: Mutex<Option<Result<Vec<Recipe>>>>,
    list_calls: Mutex<Vec<String>>,
    login_result: Mutex<Option<Result<Session>>>,
}

impl MockRecipeApi {
    pub fn new() -> Self {
        Self {
            search_plan: Mutex::new(VecDeque::new()),
            like_plan: Mutex::new(VecDeque::new()),
            search_calls: Mutex::new(Vec::new()),
            like_calls: Mutex::new(Vec::new()),
            list_result: Mutex::new(None),
            list_calls: Mutex::new(Vec::new()),
            login_result: Mutex::new(None),
        }
    }

    pub fn plan_list(&self, result: Result<Vec<Recipe>>) {
        *self.list_result.lock().unwrap() = Some(result);
    }

    pub fn plan_search(&self, delay: Duration, result: Result<Vec<Recipe>>) {
        self.search_plan
            .lock()
            .unwrap()
            .push_back(PlannedSearch { delay, result });
    }

    pub fn plan_like(&self, delay: Duration, result: Result<Option<Vec<String>>>) {
        self.like_plan
            .lock()
            .unwrap()
            .push_back(PlannedLike { delay, result });
    }

    pub fn plan_login(&self, result: Result<Session>) {
        *self.login_result.lock().unwrap() = Some(result);
    }

    /// Token lists of every search issued so far.
    pub fn search_calls(&self) -> Vec<Vec<String>> {
        self.search_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(tokens, _)| tokens.clone())
            .collect()
    }

    /// Bearer tokens attached to each search.
    pub fn search_bearers(&self) -> Vec<Option<String>> {
        self.search_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, bearer)| bearer.clone())
            .collect()
    }

    pub fn like_calls(&self) -> Vec<String> {
        self.like_calls.lock().unwrap().clone()
    }

    /// Bearer tokens attached to each owner-list request.
    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeApi for MockRecipeApi {
    async fn search(&self, tokens: &[String], bearer: Option<&str>) -> Result<Vec<Recipe>> {
        self.search_calls
            .lock()
            .unwrap()
            .push((tokens.to_vec(), bearer.map(str::to_string)));
        let planned = self.search_plan.lock().unwrap().pop_front();
        match planned {
            Some(p) => {
                tokio::time::sleep(p.delay).await;
                p.result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn list_recipes(&self, bearer: &str) -> Result<Vec<Recipe>> {
        self.list_calls.lock().unwrap().push(bearer.to_string());
        self.list_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn toggle_like(&self, recipe_id: &str, _bearer: &str) -> Result<Option<Vec<String>>> {
        self.like_calls.lock().unwrap().push(recipe_id.to_string());
        let planned = self.like_plan.lock().unwrap().pop_front();
        match planned {
            Some(p) => {
                tokio::time::sleep(p.delay).await;
                p.result
            }
            None => Ok(None),
        }
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<Session> {
        self.login_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ForkfulError::internal("login not planned")))
    }

    async fn signup(&self, name: &str, email: &str, _password: &str) -> Result<Session> {
        Ok(Session::new("new-user", "new-token", name, email))
    }

    async fn create_recipe(&self, draft: &RecipeDraft, _bearer: &str) -> Result<Recipe> {
        Ok(Recipe {
            id: "created-1".to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            ingredients: draft.ingredients.clone(),
            liked_by: Vec::new(),
            author: "test-user".to_string(),
            instructions: draft.instructions.clone(),
            cooking_time: draft.cooking_time.clone(),
        })
    }

    async fn delete_recipe(&self, _recipe_id: &str, _bearer: &str) -> Result<()> {
        Ok(())
    }
}
