//! Place-name resolution on top of [`WikiClient`].

use placefind_core::{AppConfig, Query, ResolutionResult};

use crate::client::WikiClient;
use crate::error::WikiError;

/// Number of sentences requested for the summary.
pub const SUMMARY_SENTENCES: u32 = 3;

/// Resolves a place name to a summary and canonical article link.
///
/// Holds no state between calls other than the client's request pacing.
pub struct Resolver {
    client: WikiClient,
}

impl Resolver {
    #[must_use]
    pub fn new(client: WikiClient) -> Self {
        Self { client }
    }

    /// Builds a resolver from the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, WikiError> {
        let client = WikiClient::new(
            &config.wiki_api_url,
            config.http_timeout_secs,
            &config.user_agent,
            config.wiki_rate_limit(),
        )?;
        Ok(Self::new(client))
    }

    /// Looks `query` up.
    ///
    /// The query text first goes through title search so that informal
    /// spellings land on the canonical article ("NYC" → "New York City").
    /// The article URL always comes from the resolved page, never from the
    /// query text.
    ///
    /// # Errors
    ///
    /// Any [`WikiError`]; failures are never turned into `NotFound`.
    pub async fn resolve(&self, query: &Query) -> Result<ResolutionResult, WikiError> {
        let Some(title) = self.client.suggest_title(query.as_str()).await? else {
            tracing::info!(query = %query, "no search hits");
            return Ok(ResolutionResult::NotFound);
        };

        let page = match self.client.page_info(&title).await? {
            Some(page) if page.exists() => page,
            _ => {
                tracing::info!(query = %query, %title, "page does not exist");
                return Ok(ResolutionResult::NotFound);
            }
        };

        if page.is_disambiguation() {
            let candidates = self.client.disambiguation_candidates(&page.title).await?;
            tracing::info!(
                query = %query,
                title = %page.title,
                candidates = candidates.len(),
                "query is ambiguous"
            );
            return Ok(ResolutionResult::Ambiguous { candidates });
        }

        let article_url = page.fullurl.ok_or_else(|| WikiError::UnexpectedResponse {
            context: format!("info(titles={})", page.title),
            reason: "page has no fullurl".to_owned(),
        })?;
        let summary = self.client.summary(&page.title, SUMMARY_SENTENCES).await?;

        tracing::info!(query = %query, title = %page.title, "resolved place");
        Ok(ResolutionResult::Found {
            title: page.title,
            summary,
            article_url,
        })
    }
}
