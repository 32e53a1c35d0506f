//! In-memory cache of the recipes currently displayed.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::watch;

use forkful_core::like::{LikeKey, PendingLike};
use forkful_core::recipe::Recipe;
use forkful_core::{ForkfulError, Result};

/// The single source of truth for displayed recipes.
///
/// Every view that mirrors a recipe (the results list, an open detail
/// view) renders from the receiver handed out by
/// [`subscribe`](RecipeCache::subscribe); there are no duplicated local
/// copies to drift apart.
///
/// Mutation is restricted to two operations: a wholesale
/// [`replace_from_search`](RecipeCache::replace_from_search) and the
/// like-toggle family (`begin_toggle` / `confirm_toggle` /
/// `revert_toggle`), which patch a single `(recipe, user)` membership.
/// The cache also tracks in-flight [`PendingLike`]s so a search replace
/// cannot let a stale server snapshot overwrite an unconfirmed local
/// mutation.
pub struct RecipeCache {
    recipes: watch::Sender<Vec<Recipe>>,
    pending: Mutex<HashMap<LikeKey, PendingLike>>,
}

impl RecipeCache {
    pub fn new() -> Self {
        let (recipes, _) = watch::channel(Vec::new());
        Self {
            recipes,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribes to the displayed recipe list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Recipe>> {
        self.recipes.subscribe()
    }

    /// Current contents, cloned.
    pub fn snapshot(&self) -> Vec<Recipe> {
        self.recipes.borrow().clone()
    }

    pub fn get(&self, recipe_id: &str) -> Option<Recipe> {
        self.recipes
            .borrow()
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned()
    }

    /// Replaces the cache with a fresh search result.
    ///
    /// Recipes that survive the replace keep the `intended_state` of any
    /// still-unsettled like toggle: the server snapshot may predate the
    /// optimistic mutation, and the toggle's own settlement will
    /// reconcile it.
    pub fn replace_from_search(&self, mut recipes: Vec<Recipe>) {
        let pending = self.pending.lock().unwrap();
        for p in pending.values() {
            if let Some(recipe) = recipes.iter_mut().find(|r| r.id == p.key.recipe_id) {
                recipe.set_liked_by(&p.key.user_id, p.intended_state);
            }
        }
        drop(pending);
        self.recipes.send_replace(recipes);
    }

    /// Empties the cache (query cleared). Pending likes stay registered
    /// until their network calls settle.
    pub fn clear(&self) {
        self.recipes.send_replace(Vec::new());
    }

    /// Starts a like toggle for `key`: reads the current membership,
    /// applies the flipped state, and registers the pending record —
    /// atomically with respect to other toggles.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(pending))`: the optimistic patch was applied
    /// - `Ok(None)`: a toggle for this pair is already in flight; the
    ///   caller must treat this invocation as absorbed into it
    /// - `Err(NotFound)`: the recipe is not in the cache
    pub fn begin_toggle(&self, key: &LikeKey) -> Result<Option<PendingLike>> {
        let mut pending = self.pending.lock().unwrap();
        if pending.contains_key(key) {
            return Ok(None);
        }

        let previous = self
            .get(&key.recipe_id)
            .map(|r| r.is_liked_by(&key.user_id))
            .ok_or_else(|| ForkfulError::not_found("recipe", key.recipe_id.clone()))?;

        let record = PendingLike::new(key.clone(), previous);
        self.patch_like(&key.recipe_id, &key.user_id, record.intended_state);
        pending.insert(key.clone(), record.clone());
        Ok(Some(record))
    }

    /// Settles a toggle successfully. When the server supplied an
    /// authoritative membership set, it replaces the recipe's `liked_by`
    /// wholesale — server truth supersedes the local guess, but only for
    /// this one recipe.
    pub fn confirm_toggle(&self, key: &LikeKey, authoritative: Option<Vec<String>>) {
        self.pending.lock().unwrap().remove(key);
        if let Some(liked_by) = authoritative {
            self.recipes.send_if_modified(|recipes| {
                match recipes.iter_mut().find(|r| r.id == key.recipe_id) {
                    Some(recipe) => {
                        recipe.liked_by = liked_by;
                        true
                    }
                    None => false,
                }
            });
        }
    }

    /// Settles a toggle that failed remotely: restores the pre-toggle
    /// membership.
    pub fn revert_toggle(&self, key: &LikeKey) {
        let record = self.pending.lock().unwrap().remove(key);
        if let Some(record) = record {
            self.patch_like(&key.recipe_id, &key.user_id, record.previous_state);
        }
    }

    /// Whether a toggle for `key` is still unsettled.
    pub fn has_pending(&self, key: &LikeKey) -> bool {
        self.pending.lock().unwrap().contains_key(key)
    }

    fn patch_like(&self, recipe_id: &str, user_id: &str, liked: bool) {
        self.recipes.send_if_modified(|recipes| {
            match recipes.iter_mut().find(|r| r.id == recipe_id) {
                Some(recipe) => {
                    recipe.set_liked_by(user_id, liked);
                    true
                }
                // Recipe left the cache while the toggle was in flight.
                None => false,
            }
        });
    }
}

impl Default for RecipeCache {
    fn default() -> Self {
        Self::new()
    }
}
