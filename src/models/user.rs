use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record stored in the document container.
///
/// `user_id` duplicates `id` because it doubles as the partition key: every
/// point operation on a document addresses it by (partition key, id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    /// Stored lower-cased; uniqueness key alongside username
    pub email: String,
    /// Unsalted SHA-256 hex digest (placeholder auth, see `security`)
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    /// Partition key, equal to `id`
    pub user_id: String,
}

/// User shape returned by the API: everything except the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            user_id: user.user_id.clone(),
        }
    }
}
