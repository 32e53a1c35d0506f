//! Debounced, cancelable remote search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use forkful_core::api::RecipeApi;
use forkful_core::search::{tokenize, SearchQuery, SearchStatus};
use forkful_core::session::SessionStore;

use crate::recipe_cache::RecipeCache;

/// Converts free-text keystrokes into a rate-limited sequence of remote
/// searches and commits only the most recent result.
///
/// Each keystroke restarts a single debounce timer; only the input present
/// when the timer fires becomes a request, so request volume is bounded to
/// one per debounce interval regardless of typing speed. Requests carry a
/// monotonically increasing id, and a response is committed only while its
/// id is still the highest issued — a later keystroke supersedes earlier
/// in-flight calls without aborting them at the transport level.
///
/// A failed refresh of the *current* request surfaces through
/// [`status`](SearchPipeline::status) and leaves the previous cache
/// contents untouched.
pub struct SearchPipeline {
    api: Arc<dyn RecipeApi>,
    sessions: Arc<SessionStore>,
    cache: Arc<RecipeCache>,
    debounce: Duration,
    /// Highest request id issued so far; also bumped when the query is
    /// cleared, so in-flight responses become stale.
    request_counter: AtomicU64,
    status: watch::Sender<SearchStatus>,
    /// The one scheduled-but-not-yet-fired debounce timer. Replaced, never
    /// stacked.
    debounce_task: Mutex<Option<JoinHandle<()>>>,
}

impl SearchPipeline {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        sessions: Arc<SessionStore>,
        cache: Arc<RecipeCache>,
        debounce: Duration,
    ) -> Self {
        let (status, _) = watch::channel(SearchStatus::Idle);
        Self {
            api,
            sessions,
            cache,
            debounce,
            request_counter: AtomicU64::new(0),
            status,
            debounce_task: Mutex::new(None),
        }
    }

    /// Feeds one keystroke's worth of input into the pipeline.
    ///
    /// Empty or whitespace-only text clears the results immediately,
    /// bypassing debounce and network entirely. Anything else restarts the
    /// debounce timer with the new text.
    pub fn on_input_change(self: &Arc<Self>, text: &str) {
        if let Some(handle) = self.debounce_task.lock().unwrap().take() {
            handle.abort();
        }

        if text.trim().is_empty() {
            // Invalidate any in-flight request so its response is
            // discarded, then drop straight to an empty view.
            self.request_counter.fetch_add(1, Ordering::SeqCst);
            self.cache.clear();
            self.status.send_replace(SearchStatus::Idle);
            return;
        }

        let raw_text = text.to_string();
        let tokens = tokenize(text);
        let pipeline = Arc::clone(self);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(pipeline.debounce).await;
            let query = SearchQuery {
                raw_text,
                tokens,
                request_id: pipeline.request_counter.fetch_add(1, Ordering::SeqCst) + 1,
            };
            // The network call runs detached from the timer handle:
            // restarting the debounce cancels timers, never in-flight
            // requests (those are superseded by id instead).
            tokio::spawn(Arc::clone(&pipeline).issue(query));
        });
        *self.debounce_task.lock().unwrap() = Some(timer);
    }

    /// Observable search results (shared with everything else that renders
    /// the cache).
    pub fn results(&self) -> watch::Receiver<Vec<forkful_core::recipe::Recipe>> {
        self.cache.subscribe()
    }

    /// Observable load/error state of the newest request.
    pub fn status(&self) -> watch::Receiver<SearchStatus> {
        self.status.subscribe()
    }

    async fn issue(self: Arc<Self>, query: SearchQuery) {
        if query.request_id == self.request_counter.load(Ordering::SeqCst) {
            self.status.send_replace(SearchStatus::Searching {
                request_id: query.request_id,
            });
        }

        let bearer = self.sessions.bearer_token();
        let outcome = self.api.search(&query.tokens, bearer.as_deref()).await;

        if query.request_id != self.request_counter.load(Ordering::SeqCst) {
            tracing::debug!(
                request_id = query.request_id,
                "Discarding superseded search response"
            );
            return;
        }

        match outcome {
            Ok(recipes) => {
                tracing::debug!(
                    request_id = query.request_id,
                    count = recipes.len(),
                    "Search completed"
                );
                self.cache.replace_from_search(recipes);
                self.status.send_replace(SearchStatus::Loaded {
                    request_id: query.request_id,
                });
            }
            Err(e) => {
                // Previous results stay on screen; only the status changes.
                tracing::error!(request_id = query.request_id, "Search failed: {}", e);
                self.status.send_replace(SearchStatus::Failed { error: e });
            }
        }
    }
}
