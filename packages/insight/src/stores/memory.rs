//! In-memory user store.
//!
//! Backed by a `RwLock<HashMap>`; suitable for tests, demos, and
//! single-process deployments. Read-modify-write of recent searches is
//! last-write-wins, matching the [`UserStore`] contract.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{InsightError, Result};
use crate::traits::store::UserStore;
use crate::types::search::RecentSearch;
use crate::types::user::UserRecord;

/// Thread-safe in-memory store of user documents keyed by username.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users currently stored.
    pub fn user_count(&self) -> usize {
        self.users.read().expect("user lock poisoned").len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().expect("user lock poisoned");
        Ok(users.get(username).cloned())
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<()> {
        let mut users = self.users.write().expect("user lock poisoned");
        if users.contains_key(&user.username) {
            return Err(InsightError::Conflict {
                reason: format!("username already exists: {}", user.username),
            });
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn update_recent_searches(
        &self,
        username: &str,
        searches: &[RecentSearch],
    ) -> Result<()> {
        let mut users = self.users.write().expect("user lock poisoned");
        let user = users
            .get_mut(username)
            .ok_or_else(|| InsightError::not_found(format!("user: {username}")))?;
        user.recent_searches = searches.to_vec();
        Ok(())
    }
}
