//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated identity, as returned by the remote login/signup
/// endpoints and persisted locally between visits.
///
/// Absence of a `Session` means the user is anonymous. The value is owned
/// exclusively by [`SessionStore`](crate::session::SessionStore); nothing
/// else creates or mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned user id.
    pub user_id: String,
    /// Opaque bearer token attached to authenticated requests.
    pub token: String,
    /// Name shown in the navigation bar.
    pub display_name: String,
    /// Account email, kept for display on the profile view.
    pub email: String,
    /// Server-side account creation time ("member since" on the profile
    /// view). Absent when the auth response omitted it; snapshots written
    /// before this field existed rehydrate as `None`.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When this session was established locally.
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        token: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            display_name: display_name.into(),
            email: email.into(),
            created_at: None,
            logged_in_at: Utc::now(),
        }
    }

    /// Attaches the server-reported account creation time.
    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }
}
