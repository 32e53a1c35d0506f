//! Engine assembly: wires infrastructure into the use-case layer.

use std::sync::Arc;

use forkful_core::access::AccessGate;
use forkful_core::api::RecipeApi;
use forkful_core::session::{SessionSnapshotRepository, SessionStore};
use forkful_core::Result;
use forkful_infrastructure::{ConfigService, ForkfulPaths, HttpRecipeApi, JsonSnapshotRepository};

use crate::auth::AuthUseCase;
use crate::like_reconciler::LikeReconciler;
use crate::recipe_cache::RecipeCache;
use crate::search_pipeline::SearchPipeline;

/// Fully wired client engine, one per running application.
///
/// Owns the shared session store and recipe cache and hands the
/// presentation layer its entry points: the search pipeline, the like
/// reconciler, the access gate, and the auth flows.
pub struct ForkfulEngine {
    pub sessions: Arc<SessionStore>,
    pub cache: Arc<RecipeCache>,
    pub search: Arc<SearchPipeline>,
    pub likes: Arc<LikeReconciler>,
    pub gate: AccessGate,
    pub auth: AuthUseCase,
}

impl ForkfulEngine {
    /// Assembles an engine from explicit collaborators. Used directly by
    /// tests; production goes through [`bootstrap`](Self::bootstrap).
    pub fn new(
        api: Arc<dyn RecipeApi>,
        repository: Arc<dyn SessionSnapshotRepository>,
        debounce: std::time::Duration,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(repository));
        let cache = Arc::new(RecipeCache::new());
        let search = Arc::new(SearchPipeline::new(
            Arc::clone(&api),
            Arc::clone(&sessions),
            Arc::clone(&cache),
            debounce,
        ));
        let likes = Arc::new(LikeReconciler::new(
            Arc::clone(&api),
            Arc::clone(&sessions),
            Arc::clone(&cache),
        ));
        let gate = AccessGate::new(Arc::clone(&sessions));
        let auth = AuthUseCase::new(api, Arc::clone(&sessions));
        Self {
            sessions,
            cache,
            search,
            likes,
            gate,
            auth,
        }
    }

    /// Assembles the production engine: config and session snapshot under
    /// `~/.forkful`, HTTP client against the configured service.
    pub fn bootstrap() -> Result<Self> {
        let paths = ForkfulPaths::default_location()?;
        let config = ConfigService::new(&paths).get_config();
        let api: Arc<dyn RecipeApi> = Arc::new(HttpRecipeApi::new(&config.api_base_url));
        let repository: Arc<dyn SessionSnapshotRepository> =
            Arc::new(JsonSnapshotRepository::new(&paths));
        Ok(Self::new(api, repository, config.debounce_interval()))
    }
}
