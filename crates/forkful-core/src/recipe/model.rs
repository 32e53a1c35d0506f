//! Recipe domain models.

use serde::{Deserialize, Serialize};

/// A recipe as returned by the remote catalog.
///
/// `liked_by` is a membership set, not a counter: a user id appears at most
/// once, and [`set_liked_by`](Recipe::set_liked_by) is idempotent so
/// retried or interleaved toggles can never double-insert.
///
/// Field renames follow the upstream wire format (`_id`, `likes`,
/// `cookingTime`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// User ids that like this recipe. Set semantics, see above.
    #[serde(rename = "likes", default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub author: String,
    /// Free-form preparation steps, when the author provided them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        rename = "cookingTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_time: Option<String>,
}

impl Recipe {
    /// Whether `user_id` is a member of the liked-by set.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    /// Sets `user_id`'s membership in the liked-by set.
    ///
    /// Idempotent: setting an already-present member or removing an absent
    /// one is a no-op.
    pub fn set_liked_by(&mut self, user_id: &str, liked: bool) {
        let present = self.is_liked_by(user_id);
        match (liked, present) {
            (true, false) => self.liked_by.push(user_id.to_string()),
            (false, true) => self.liked_by.retain(|id| id != user_id),
            _ => {}
        }
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

/// Payload for creating a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(
        rename = "cookingTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_time: Option<String>,
}
