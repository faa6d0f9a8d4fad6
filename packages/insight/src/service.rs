//! Service facade tying the collaborators together.
//!
//! [`InsightService`] owns a scraper, an AI provider, and a user store,
//! and exposes the operations a web layer would mount: registration,
//! login, product search, search history, and grounded question
//! answering.

use tracing::{info, instrument};

use crate::error::{InsightError, Result};
use crate::pipeline::execute_search;
use crate::retrieval::answer_question;
use crate::security::{hash_password, verify_password};
use crate::traits::ai::Ai;
use crate::traits::scraper::Scraper;
use crate::traits::store::UserStore;
use crate::types::config::SearchConfig;
use crate::types::product::validate_search_url;
use crate::types::search::{RecentSearch, RecentSearchView};
use crate::types::user::UserRecord;

/// Generic over its collaborators so tests can inject mocks and
/// deployments can pick concrete adapters without touching the core.
pub struct InsightService<S, A, St> {
    scraper: S,
    ai: A,
    store: St,
    config: SearchConfig,
}

impl<S, A, St> InsightService<S, A, St>
where
    S: Scraper,
    A: Ai,
    St: UserStore,
{
    /// Create a service with default configuration.
    pub fn new(scraper: S, ai: A, store: St) -> Self {
        Self {
            scraper,
            ai,
            store,
            config: SearchConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Register a new user.
    ///
    /// The password is salted and hashed before it reaches the store.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(InsightError::validation("username is required"));
        }
        if password.is_empty() {
            return Err(InsightError::validation("password is required"));
        }
        if self.store.find_user(username).await?.is_some() {
            return Err(InsightError::Conflict {
                reason: format!("username already exists: {username}"),
            });
        }

        let user = UserRecord::new(username, hash_password(password));
        self.store.insert_user(&user).await?;
        info!(username, "user registered");
        Ok(())
    }

    /// Check credentials.
    ///
    /// Unknown users and wrong passwords both map to the same
    /// unauthorized error; callers cannot probe for usernames.
    pub async fn verify_login(&self, username: &str, password: &str) -> Result<()> {
        let user = self
            .store
            .find_user(username)
            .await?
            .ok_or(InsightError::Unauthorized)?;
        if !verify_password(password, &user.password_hash) {
            return Err(InsightError::Unauthorized);
        }
        Ok(())
    }

    /// Search a product URL for the given user.
    ///
    /// Idempotent per product: if the user already has this product id
    /// cached, the cached result is returned without scraping or model
    /// calls. A fresh run persists atomically and evicts the oldest
    /// search beyond the configured cap.
    #[instrument(skip(self, url), fields(username = %username))]
    pub async fn search(&self, username: &str, url: &str) -> Result<RecentSearchView> {
        let product_id = validate_search_url(url)?;

        let mut user = self
            .store
            .find_user(username)
            .await?
            .ok_or_else(|| InsightError::not_found(format!("user: {username}")))?;

        if let Some(cached) = user.find_search(&product_id) {
            info!(product_id, "returning cached search");
            return Ok(RecentSearchView::from(cached));
        }

        let output = execute_search(&self.scraper, &self.ai, &self.config, url).await?;
        let search = RecentSearch::new(
            product_id,
            url,
            output.product_details,
            output.review_summary,
            output.sentiment_summary,
            output.info_docs,
        );
        let view = RecentSearchView::from(&search);

        user.recent_searches.push(search);
        while user.recent_searches.len() > self.config.max_recent_searches {
            user.recent_searches.remove(0);
        }
        self.store
            .update_recent_searches(username, &user.recent_searches)
            .await?;
        info!(product_id = %view.product_id, "search stored");
        Ok(view)
    }

    /// All of a user's recent searches, oldest first.
    pub async fn recent_searches(&self, username: &str) -> Result<Vec<RecentSearchView>> {
        let user = self
            .store
            .find_user(username)
            .await?
            .ok_or_else(|| InsightError::not_found(format!("user: {username}")))?;
        Ok(user.recent_searches.iter().map(RecentSearchView::from).collect())
    }

    /// One cached search by product id.
    pub async fn get_search(&self, username: &str, product_id: &str) -> Result<RecentSearchView> {
        let search = self
            .store
            .find_recent_search(username, product_id)
            .await?
            .ok_or_else(|| InsightError::not_found(format!("search: {product_id}")))?;
        Ok(RecentSearchView::from(&search))
    }

    /// Delete one cached search by product id.
    pub async fn delete_search(&self, username: &str, product_id: &str) -> Result<()> {
        let mut user = self
            .store
            .find_user(username)
            .await?
            .ok_or_else(|| InsightError::not_found(format!("user: {username}")))?;

        let before = user.recent_searches.len();
        user.recent_searches.retain(|s| s.product_id != product_id);
        if user.recent_searches.len() == before {
            return Err(InsightError::not_found(format!("search: {product_id}")));
        }
        self.store
            .update_recent_searches(username, &user.recent_searches)
            .await
    }

    /// Answer a question about a previously searched product, grounded in
    /// its embedded documents.
    #[instrument(skip(self, question), fields(username = %username, product_id = %product_id))]
    pub async fn answer(
        &self,
        username: &str,
        product_id: &str,
        question: &str,
    ) -> Result<String> {
        if question.trim().is_empty() {
            return Err(InsightError::validation("question is required"));
        }

        let search = self
            .store
            .find_recent_search(username, product_id)
            .await?
            .ok_or_else(|| InsightError::not_found(format!("search: {product_id}")))?;

        if search.info_docs.is_empty() {
            return Err(InsightError::not_found(format!(
                "indexed content for product: {product_id}"
            )));
        }

        answer_question(&self.ai, &self.config, question, &search.info_docs).await
    }
}
