//! Storage trait for user records.
//!
//! The persistence engine is an external collaborator; this trait is the
//! boundary. Semantics match a generic document store with upsert and
//! field projection over a `users` collection keyed by unique username.
//! Recent-search updates are read-modify-write; concurrent updates to the
//! same user are last-write-wins (no transactional guarantee).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::search::RecentSearch;
use crate::types::user::UserRecord;

/// Store for user documents and their recent searches.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by username.
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert a new user.
    ///
    /// Fails with a conflict if the username already exists.
    async fn insert_user(&self, user: &UserRecord) -> Result<()>;

    /// Replace a user's recent-searches list.
    async fn update_recent_searches(
        &self,
        username: &str,
        searches: &[RecentSearch],
    ) -> Result<()>;

    /// Find one cached search by product id.
    async fn find_recent_search(
        &self,
        username: &str,
        product_id: &str,
    ) -> Result<Option<RecentSearch>> {
        Ok(self.find_user(username).await?.and_then(|user| {
            user.recent_searches
                .into_iter()
                .find(|s| s.product_id == product_id)
        }))
    }
}
