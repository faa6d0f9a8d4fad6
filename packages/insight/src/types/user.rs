//! User record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::search::RecentSearch;

/// One user document, keyed by unique username.
///
/// The password is hashed at write time and never stored or compared in
/// plaintext; see [`security::password`](crate::security::password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username
    pub username: String,

    /// Salted password hash
    pub password_hash: String,

    /// Bounded FIFO list of recent product searches
    #[serde(default)]
    pub recent_searches: Vec<RecentSearch>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new user with an already-hashed password.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            recent_searches: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Find a cached search by product id.
    pub fn find_search(&self, product_id: &str) -> Option<&RecentSearch> {
        self.recent_searches
            .iter()
            .find(|s| s.product_id == product_id)
    }
}
