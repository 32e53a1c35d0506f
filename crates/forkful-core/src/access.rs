//! Navigation access derivation from session state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::session::{Session, SessionStore};

/// Access requirement of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Protected views: render only when signed in.
    RequiresSession,
    /// Login/signup views: render only when signed out.
    RequiresNoSession,
}

/// Outcome of evaluating a [`GateMode`] against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The view may render.
    Allow,
    /// A protected view was requested while signed out.
    RedirectToLogin,
    /// An auth-only view was requested while signed in; go to the
    /// authenticated landing view.
    RedirectToHome,
}

/// Stateless predicate over [`SessionStore`] deciding whether a view may
/// render.
///
/// The gate holds no state of its own. Mounted views keep the receiver
/// from [`subscribe`](AccessGate::subscribe) and re-run
/// [`evaluate`](AccessGate::evaluate) on every notification, so a logout
/// while a protected view is mounted revokes access immediately.
pub struct AccessGate {
    sessions: Arc<SessionStore>,
}

impl AccessGate {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Evaluates `mode` against the current session.
    pub fn evaluate(&self, mode: GateMode) -> GateDecision {
        Self::decide(mode, self.sessions.read().as_ref())
    }

    /// Forwards the session store's change notifications so callers can
    /// re-evaluate reactively.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }

    fn decide(mode: GateMode, session: Option<&Session>) -> GateDecision {
        match (mode, session) {
            (GateMode::RequiresSession, Some(_)) => GateDecision::Allow,
            (GateMode::RequiresSession, None) => GateDecision::RedirectToLogin,
            (GateMode::RequiresNoSession, None) => GateDecision::Allow,
            (GateMode::RequiresNoSession, Some(_)) => GateDecision::RedirectToHome,
        }
    }
}
