//! Session snapshot repository trait.
//!
//! Defines the interface for persisting the single session snapshot.

use super::model::Session;
use crate::error::Result;

/// An abstract repository for the persisted session snapshot.
///
/// This trait decouples [`SessionStore`](super::SessionStore) from the
/// concrete storage mechanism (a JSON file in production, an in-memory map
/// in tests). Exactly one snapshot exists at a time.
///
/// # Implementation Notes
///
/// Implementations must guarantee the snapshot is never partially
/// persisted: after `save` either the complete serialized session is in
/// storage or the previous content is intact. Operations are synchronous
/// because `SessionStore::set` persists before it notifies subscribers.
pub trait SessionSnapshotRepository: Send + Sync {
    /// Loads the persisted snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: a valid snapshot was found
    /// - `Ok(None)`: no snapshot, or the stored data is malformed — corrupt
    ///   data degrades to "no session" (and a warning log) rather than an
    ///   error, so a bad snapshot can never block startup
    /// - `Err(_)`: storage itself is inaccessible
    fn load(&self) -> Result<Option<Session>>;

    /// Persists the complete snapshot, replacing any previous one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes the persisted snapshot, if any.
    fn clear(&self) -> Result<()>;
}
