//! Pending like-toggle bookkeeping.

/// Identity of a like relation: one `(recipe, user)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LikeKey {
    pub recipe_id: String,
    pub user_id: String,
}

impl LikeKey {
    pub fn new(recipe_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// An optimistically applied like toggle awaiting server settlement.
///
/// Created before the remote call is issued, discarded when it settles:
/// success confirms `intended_state`, failure restores `previous_state`.
/// While it exists, a search-driven cache replace must not let a stale
/// server snapshot overwrite `intended_state` for this pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLike {
    pub key: LikeKey,
    pub intended_state: bool,
    pub previous_state: bool,
}

impl PendingLike {
    pub fn new(key: LikeKey, previous_state: bool) -> Self {
        Self {
            key,
            intended_state: !previous_state,
            previous_state,
        }
    }
}
