//! Optimistic like toggling with server reconciliation.

use std::sync::Arc;

use forkful_core::api::RecipeApi;
use forkful_core::like::LikeKey;
use forkful_core::session::SessionStore;
use forkful_core::{ForkfulError, Result};

use crate::recipe_cache::RecipeCache;

/// Toggles the current user's membership in a recipe's liked-by set with
/// immediate local feedback and eventual server confirmation.
///
/// The flipped membership is written into the [`RecipeCache`] *before* the
/// remote call is issued, so every view rendering the cache reflects the
/// change with zero perceived latency. On success the pending record is
/// discarded (and, when the server returns an authoritative membership
/// set, that set replaces the local guess for the one recipe). On failure
/// the pre-toggle state is restored and a `Transient` error is returned to
/// the caller.
///
/// Toggles are serialized per `(recipe, user)` pair by coalescing: while a
/// pair's toggle is unsettled, further toggles for the same pair are
/// absorbed into it rather than queued. A rapid double-click therefore
/// nets exactly one flip, and no toggle ever computes its flip from a
/// stale base. Toggles for different pairs are independent and may settle
/// in any order.
pub struct LikeReconciler {
    api: Arc<dyn RecipeApi>,
    sessions: Arc<SessionStore>,
    cache: Arc<RecipeCache>,
}

impl LikeReconciler {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        sessions: Arc<SessionStore>,
        cache: Arc<RecipeCache>,
    ) -> Self {
        Self {
            api,
            sessions,
            cache,
        }
    }

    /// Toggles the signed-in user's like on `recipe_id`.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when no session is present
    /// - `NotFound` when the recipe is not in the cache
    /// - `Transient` when the remote call fails (the cache has already
    ///   been rolled back by the time this returns)
    pub async fn toggle_like(&self, recipe_id: &str) -> Result<()> {
        let session = self
            .sessions
            .read()
            .ok_or_else(|| ForkfulError::unauthenticated("please sign in to like recipes"))?;

        let key = LikeKey::new(recipe_id, &session.user_id);
        let Some(pending) = self.cache.begin_toggle(&key)? else {
            tracing::debug!(
                recipe_id,
                user_id = %session.user_id,
                "Toggle already in flight for this pair, coalescing"
            );
            return Ok(());
        };

        match self.api.toggle_like(recipe_id, &session.token).await {
            Ok(authoritative) => {
                tracing::debug!(
                    recipe_id,
                    liked = pending.intended_state,
                    authoritative = authoritative.is_some(),
                    "Like toggle confirmed"
                );
                self.cache.confirm_toggle(&key, authoritative);
                Ok(())
            }
            Err(e) => {
                tracing::error!(recipe_id, "Like toggle failed, rolling back: {}", e);
                self.cache.revert_toggle(&key);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        memory_session_store, recipe, signed_in_session_store, MockRecipeApi,
    };
    use std::time::Duration;

    fn reconciler(
        api: Arc<MockRecipeApi>,
        sessions: Arc<SessionStore>,
    ) -> (LikeReconciler, Arc<RecipeCache>) {
        let cache = Arc::new(RecipeCache::new());
        (
            LikeReconciler::new(api, sessions, cache.clone()),
            cache,
        )
    }

    #[tokio::test]
    async fn test_toggle_requires_session() {
        let api = Arc::new(MockRecipeApi::new());
        let (reconciler, cache) = reconciler(api, memory_session_store());
        cache.replace_from_search(vec![recipe("r1", &[])]);

        let err = reconciler.toggle_like("r1").await.unwrap_err();
        assert!(err.is_unauthenticated());
        assert!(cache.get("r1").unwrap().liked_by.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_recipe() {
        let api = Arc::new(MockRecipeApi::new());
        let (reconciler, _cache) = reconciler(api, signed_in_session_store("u1", "tok"));

        let err = reconciler.toggle_like("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    /// Scenario B: the cache shows the like before the network call
    /// resolves, and the state is confirmed after it does.
    #[tokio::test(start_paused = true)]
    async fn test_optimistic_apply_then_confirm() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::from_millis(100), Ok(None));
        let (reconciler, cache) = reconciler(api.clone(), signed_in_session_store("u1", "tok"));
        cache.replace_from_search(vec![recipe("r1", &[])]);

        let toggle = tokio::spawn(async move { reconciler.toggle_like("r1").await });
        tokio::task::yield_now().await;

        // Before resolution: optimistic state already visible.
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
        assert!(cache.has_pending(&LikeKey::new("r1", "u1")));

        toggle.await.unwrap().unwrap();
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
        assert!(!cache.has_pending(&LikeKey::new("r1", "u1")));
        assert_eq!(api.like_calls(), vec!["r1".to_string()]);
    }

    /// Scenario C: a rejected call reverts the cache and surfaces a
    /// transient error.
    #[tokio::test]
    async fn test_failure_rolls_back_and_surfaces_transient() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(
            Duration::ZERO,
            Err(ForkfulError::transient("server returned 500")),
        );
        let (reconciler, cache) = reconciler(api, signed_in_session_store("u1", "tok"));
        cache.replace_from_search(vec![recipe("r1", &[])]);

        let err = reconciler.toggle_like("r1").await.unwrap_err();

        assert!(err.is_transient());
        assert!(cache.get("r1").unwrap().liked_by.is_empty());
        assert!(!cache.has_pending(&LikeKey::new("r1", "u1")));
    }

    /// Rollback on an initially-liked recipe restores the like.
    #[tokio::test]
    async fn test_failure_restores_existing_like() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::ZERO, Err(ForkfulError::transient("timeout")));
        let (reconciler, cache) = reconciler(api, signed_in_session_store("u1", "tok"));
        cache.replace_from_search(vec![recipe("r1", &["u1"])]);

        let err = reconciler.toggle_like("r1").await.unwrap_err();

        assert!(err.is_transient());
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
    }

    /// Two toggles in immediate succession net a single flip: the second
    /// is absorbed into the first's in-flight toggle.
    #[tokio::test(start_paused = true)]
    async fn test_rapid_double_toggle_converges_to_liked() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::from_millis(100), Ok(None));
        api.plan_like(Duration::from_millis(10), Ok(None));
        let sessions = signed_in_session_store("u1", "tok");
        let cache = Arc::new(RecipeCache::new());
        cache.replace_from_search(vec![recipe("r1", &[])]);
        let reconciler = Arc::new(LikeReconciler::new(api.clone(), sessions, cache.clone()));

        let first = {
            let r = Arc::clone(&reconciler);
            tokio::spawn(async move { r.toggle_like("r1").await })
        };
        tokio::task::yield_now().await;
        let second = {
            let r = Arc::clone(&reconciler);
            tokio::spawn(async move { r.toggle_like("r1").await })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
        // Only one remote call went out for the pair.
        assert_eq!(api.like_calls().len(), 1);
    }

    /// Once the first toggle settles, a second toggle is a real flip.
    #[tokio::test]
    async fn test_sequential_toggles_alternate() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::ZERO, Ok(None));
        api.plan_like(Duration::ZERO, Ok(None));
        let (reconciler, cache) = reconciler(api, signed_in_session_store("u1", "tok"));
        cache.replace_from_search(vec![recipe("r1", &[])]);

        reconciler.toggle_like("r1").await.unwrap();
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);

        reconciler.toggle_like("r1").await.unwrap();
        assert!(cache.get("r1").unwrap().liked_by.is_empty());
    }

    /// Toggles for different pairs proceed independently.
    #[tokio::test(start_paused = true)]
    async fn test_distinct_recipes_toggle_concurrently() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::from_millis(100), Ok(None));
        api.plan_like(Duration::from_millis(10), Ok(None));
        let sessions = signed_in_session_store("u1", "tok");
        let cache = Arc::new(RecipeCache::new());
        cache.replace_from_search(vec![recipe("r1", &[]), recipe("r2", &[])]);
        let reconciler = Arc::new(LikeReconciler::new(api.clone(), sessions, cache.clone()));

        let a = {
            let r = Arc::clone(&reconciler);
            tokio::spawn(async move { r.toggle_like("r1").await })
        };
        let b = {
            let r = Arc::clone(&reconciler);
            tokio::spawn(async move { r.toggle_like("r2").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
        assert_eq!(cache.get("r2").unwrap().liked_by, vec!["u1"]);
        assert_eq!(api.like_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_authoritative_set_supersedes_local_guess() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(
            Duration::ZERO,
            Ok(Some(vec!["u1".to_string(), "u7".to_string()])),
        );
        let (reconciler, cache) = reconciler(api, signed_in_session_store("u1", "tok"));
        cache.replace_from_search(vec![recipe("r1", &[])]);

        reconciler.toggle_like("r1").await.unwrap();

        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1", "u7"]);
    }

    /// A search replace landing mid-toggle does not clobber the
    /// optimistic state, and settlement still works afterwards.
    #[tokio::test(start_paused = true)]
    async fn test_search_replace_mid_toggle_keeps_overlay() {
        let api = Arc::new(MockRecipeApi::new());
        api.plan_like(Duration::from_millis(100), Ok(None));
        let sessions = signed_in_session_store("u1", "tok");
        let cache = Arc::new(RecipeCache::new());
        cache.replace_from_search(vec![recipe("r1", &[])]);
        let reconciler = Arc::new(LikeReconciler::new(api, sessions, cache.clone()));

        let toggle = {
            let r = Arc::clone(&reconciler);
            tokio::spawn(async move { r.toggle_like("r1").await })
        };
        tokio::task::yield_now().await;

        // Stale server snapshot (without the like) replaces the cache.
        cache.replace_from_search(vec![recipe("r1", &[])]);
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);

        toggle.await.unwrap().unwrap();
        assert_eq!(cache.get("r1").unwrap().liked_by, vec!["u1"]);
    }
}
