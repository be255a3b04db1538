//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::db::DataStore;
use crate::llm::{ChatModel, LlmError, OpenRouterClient};
use crate::services::auth::IdentityProvider;
use crate::services::sentiment::{SentimentScorer, VaderScorer};
use crate::supabase::{SupabaseClient, SupabaseClientError};

/// Error building the production state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("hosted store client: {0}")]
    Supabase(#[from] SupabaseClientError),
    #[error("chat model client: {0}")]
    Llm(#[from] LlmError),
    #[error("content: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every external collaborator sits behind a
/// trait object so tests can substitute in-memory stubs.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DataStore>,
    identity: Arc<dyn IdentityProvider>,
    chat_model: Arc<dyn ChatModel>,
    scorer: Arc<dyn SentimentScorer>,
    content: ContentStore,
}

impl AppState {
    /// Create a state from explicit collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn DataStore>,
        identity: Arc<dyn IdentityProvider>,
        chat_model: Arc<dyn ChatModel>,
        scorer: Arc<dyn SentimentScorer>,
        content: ContentStore,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                identity,
                chat_model,
                scorer,
                content,
            }),
        }
    }

    /// Build the production state: one Supabase client serving as both data
    /// store and identity provider, the OpenRouter client, the VADER scorer
    /// and the markdown pages under `content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the content directory
    /// cannot be read.
    pub fn from_config(config: &SiteConfig) -> Result<Self, StateError> {
        let supabase = Arc::new(SupabaseClient::new(&config.supabase)?);
        let chat_model = Arc::new(OpenRouterClient::new(&config.openrouter)?);
        let content = ContentStore::load(&config.content_dir)?;

        Ok(Self::new(
            supabase.clone(),
            supabase,
            chat_model,
            Arc::new(VaderScorer::new()),
            content,
        ))
    }

    /// Hosted data store.
    #[must_use]
    pub fn store(&self) -> &dyn DataStore {
        self.inner.store.as_ref()
    }

    /// External identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    /// Chat-completion model.
    #[must_use]
    pub fn chat_model(&self) -> &dyn ChatModel {
        self.inner.chat_model.as_ref()
    }

    /// Feedback sentiment scorer.
    #[must_use]
    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.inner.scorer.as_ref()
    }

    /// Markdown content pages.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }
}
