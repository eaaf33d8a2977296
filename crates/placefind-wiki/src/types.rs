//! `MediaWiki` Action API response types.
//!
//! All requests ask for `formatversion=2`, so `pages` is a JSON array and
//! boolean flags such as `missing` are real booleans rather than empty
//! strings.

use serde::Deserialize;

/// Envelope for `action=query` responses.
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub query: T,
}

// ---------------------------------------------------------------------------
// list=search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub searchinfo: Option<SearchInfo>,
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchInfo {
    /// Spelling suggestion offered by the search backend ("did you mean").
    #[serde(default)]
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

// ---------------------------------------------------------------------------
// titles=... (prop=info|pageprops / prop=extracts)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One entry of a `pages` array. Which fields are present depends on the
/// `prop` values requested.
#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    /// Canonical article URL (`inprop=url`).
    #[serde(default)]
    pub fullurl: Option<String>,
    /// Page properties; kept loose because the API has been known to send
    /// `[]` instead of `{}` when a page has none.
    #[serde(default)]
    pub pageprops: Option<serde_json::Value>,
    /// Plain-text intro (`prop=extracts`).
    #[serde(default)]
    pub extract: Option<String>,
}

impl Page {
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }

    #[must_use]
    pub fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .and_then(|props| props.get("disambiguation"))
            .is_some()
    }
}

// ---------------------------------------------------------------------------
// action=parse
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ParseResponse {
    pub parse: ParsedPage,
}

#[derive(Debug, Deserialize)]
pub struct ParsedPage {
    pub title: String,
    /// Rendered HTML of the page body.
    pub text: String,
}
