use serde::Serialize;

/// Outcome of looking a place up in the encyclopedia.
///
/// `NotFound` and `Ambiguous` are ordinary results shown to the user as
/// content; transport and service failures are reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionResult {
    Found {
        /// Canonical title of the resolved article; may differ from the query.
        title: String,
        /// At most three sentences, segmented by the encyclopedia service.
        summary: String,
        article_url: String,
    },
    Ambiguous {
        /// Candidate titles in the order the service listed them.
        candidates: Vec<String>,
    },
    NotFound,
}

impl ResolutionResult {
    /// Article link to offer the user, if the lookup found one.
    #[must_use]
    pub fn article_url(&self) -> Option<&str> {
        match self {
            Self::Found { article_url, .. } => Some(article_url),
            Self::Ambiguous { .. } | Self::NotFound => None,
        }
    }
}
