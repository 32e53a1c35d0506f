//! Authoritative holder of the current session.

use std::sync::Arc;

use tokio::sync::watch;

use super::model::Session;
use super::repository::SessionSnapshotRepository;
use crate::error::Result;

/// Single authoritative, observable holder of the [`Session`] value.
///
/// `SessionStore` is the only component allowed to create or destroy the
/// session. It rehydrates from the injected repository at construction and
/// persists a full snapshot on every change, *before* notifying
/// subscribers, so an observer never sees a session that is not yet
/// durable.
///
/// Observation uses a `tokio::sync::watch` channel: [`subscribe`] hands out
/// receivers, and dropping a receiver is the unsubscribe.
///
/// [`subscribe`]: SessionStore::subscribe
pub struct SessionStore {
    repository: Arc<dyn SessionSnapshotRepository>,
    current: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Creates a store rehydrated from the repository.
    ///
    /// A missing, unreadable, or malformed snapshot degrades to an absent
    /// session; a corrupt snapshot must force re-authentication, never a
    /// crash.
    pub fn new(repository: Arc<dyn SessionSnapshotRepository>) -> Self {
        let initial = match repository.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to load session snapshot, starting signed out: {}", e);
                None
            }
        };
        let (current, _) = watch::channel(initial);
        Self {
            repository,
            current,
        }
    }

    /// Returns the current session, if any. No side effects.
    pub fn read(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Returns the current bearer token, if signed in.
    pub fn bearer_token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Replaces the current session.
    ///
    /// The snapshot is persisted first; subscribers are notified only once
    /// the write succeeded. On a persistence error the in-memory value is
    /// left unchanged.
    pub fn set(&self, session: Session) -> Result<()> {
        self.repository.save(&session)?;
        self.current.send_replace(Some(session));
        Ok(())
    }

    /// Signs out: removes the persisted snapshot and publishes `None`.
    pub fn clear(&self) -> Result<()> {
        self.repository.clear()?;
        self.current.send_replace(None);
        Ok(())
    }

    /// Subscribes to session changes.
    ///
    /// The receiver observes the value after every [`set`](Self::set) and
    /// [`clear`](Self::clear). Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}
