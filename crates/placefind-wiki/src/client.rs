//! HTTP client for the `MediaWiki` Action API.
//!
//! Wraps `reqwest` with request pacing, `formatversion=2` query building,
//! error-envelope detection and typed response deserialization. The
//! language is fixed when the client is built: one client talks to one
//! wiki.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::disambiguation::extract_candidates;
use crate::error::WikiError;
use crate::pacing::RequestPacer;
use crate::types::{Page, PagesQuery, ParseResponse, QueryResponse, SearchQuery};

/// Client for one language edition of the encyclopedia.
///
/// Use [`WikiClient::new`] for production or point `api_url` at a mock
/// server in tests.
pub struct WikiClient {
    client: Client,
    api_url: Url,
    pacer: RequestPacer,
}

impl WikiClient {
    /// Creates a client with the given endpoint, timeout, `User-Agent` and
    /// minimum request spacing (`None` disables pacing).
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WikiError::InvalidApiUrl`] if `api_url`
    /// does not parse.
    pub fn new(
        api_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        min_request_interval: Option<Duration>,
    ) -> Result<Self, WikiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let api_url = Url::parse(api_url).map_err(|e| WikiError::InvalidApiUrl {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_url,
            pacer: RequestPacer::new(min_request_interval),
        })
    }

    /// Returns the best-matching article title for free text, preferring
    /// the search backend's spelling suggestion over the top hit.
    ///
    /// Returns `Ok(None)` when search finds nothing at all.
    ///
    /// # Errors
    ///
    /// - [`WikiError::Api`] if the API returns an error envelope.
    /// - [`WikiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WikiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn suggest_title(&self, text: &str) -> Result<Option<String>, WikiError> {
        let url = self.build_url(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", text),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ]);
        let envelope: QueryResponse<SearchQuery> = self
            .get_json(&url, &format!("search(srsearch={text})"))
            .await?;

        let SearchQuery { searchinfo, search } = envelope.query;
        let suggestion = searchinfo
            .and_then(|info| info.suggestion)
            .filter(|s| !s.trim().is_empty());
        Ok(suggestion.or_else(|| search.into_iter().next().map(|hit| hit.title)))
    }

    /// Fetches page metadata (existence, canonical URL, disambiguation
    /// flag) for a title, following redirects.
    ///
    /// Returns `Ok(None)` if the API returned no page entry at all.
    ///
    /// # Errors
    ///
    /// - [`WikiError::Api`] if the API returns an error envelope.
    /// - [`WikiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WikiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn page_info(&self, title: &str) -> Result<Option<Page>, WikiError> {
        let url = self.build_url(&[
            ("action", "query"),
            ("prop", "info|pageprops"),
            ("inprop", "url"),
            ("ppprop", "disambiguation"),
            ("redirects", "1"),
            ("titles", title),
        ]);
        let envelope: QueryResponse<PagesQuery> = self
            .get_json(&url, &format!("info(titles={title})"))
            .await?;
        Ok(envelope.query.pages.into_iter().next())
    }

    /// Lists the topics a disambiguation page points to, in page order.
    ///
    /// # Errors
    ///
    /// - [`WikiError::Api`] if the API returns an error envelope.
    /// - [`WikiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WikiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn disambiguation_candidates(&self, title: &str) -> Result<Vec<String>, WikiError> {
        let url = self.build_url(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "text"),
            ("redirects", "1"),
        ]);
        let envelope: ParseResponse = self
            .get_json(&url, &format!("parse(page={title})"))
            .await?;
        let candidates = extract_candidates(&envelope.parse.text);
        tracing::debug!(
            title = %envelope.parse.title,
            count = candidates.len(),
            "parsed disambiguation candidates"
        );
        Ok(candidates)
    }

    /// Fetches the plain-text introduction of a page, cut to its first
    /// `sentences` sentences by the service.
    ///
    /// # Errors
    ///
    /// - [`WikiError::Api`] if the API returns an error envelope.
    /// - [`WikiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`WikiError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`WikiError::UnexpectedResponse`] if the page has no extract.
    pub async fn summary(&self, title: &str, sentences: u32) -> Result<String, WikiError> {
        let sentences = sentences.to_string();
        let url = self.build_url(&[
            ("action", "query"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("exsentences", &sentences),
            ("redirects", "1"),
            ("titles", title),
        ]);
        let context = format!("extracts(titles={title})");
        let envelope: QueryResponse<PagesQuery> = self.get_json(&url, &context).await?;

        envelope
            .query
            .pages
            .into_iter()
            .next()
            .and_then(|page| page.extract)
            .map(|extract| extract.trim().to_owned())
            .filter(|extract| !extract.is_empty())
            .ok_or_else(|| WikiError::UnexpectedResponse {
                context,
                reason: "page has no extract".to_owned(),
            })
    }

    /// Builds the request URL with `format=json&formatversion=2` and the
    /// given parameters, percent-encoded by [`Url::query_pairs_mut`].
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("formatversion", "2");
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Waits for the pacer, sends a GET request, asserts a 2xx status,
    /// checks for an error envelope and deserializes the body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url, context: &str) -> Result<T, WikiError> {
        self.pacer.wait_turn().await;
        tracing::debug!(%url, "wiki request");

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| WikiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Self::check_api_error(&value)?;

        serde_json::from_value(value).map_err(|e| WikiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Returns an error if the body carries a top-level `"error"` object.
    fn check_api_error(body: &serde_json::Value) -> Result<(), WikiError> {
        let Some(error) = body.get("error") else {
            return Ok(());
        };
        let field = |name: &str| {
            error
                .get(name)
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
                .to_owned()
        };
        Err(WikiError::Api {
            code: field("code"),
            info: field("info"),
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
