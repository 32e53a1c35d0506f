//! Domain layer of the Forkful client engine.
//!
//! Holds the data model (sessions, recipes, search queries, pending
//! likes), the error taxonomy, the remote service contract, and the two
//! components with no orchestration of their own: the observable
//! [`SessionStore`](session::SessionStore) and the
//! [`AccessGate`](access::AccessGate).
//!
//! Orchestration (debounced search, optimistic like reconciliation) lives
//! in `forkful-application`; concrete I/O lives in
//! `forkful-infrastructure`.

pub mod access;
pub mod api;
pub mod error;
pub mod like;
pub mod recipe;
pub mod search;
pub mod session;

// Re-export common error type
pub use error::{ForkfulError, Result};
