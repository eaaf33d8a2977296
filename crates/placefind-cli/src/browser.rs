//! `--open`: hands the result links to the desktop's web browser.

use placefind_core::ResolutionResult;
use placefind_orchestrator::Resolution;

/// Links worth opening for `resolution`: the article when one was found,
/// then the map search.
pub(crate) fn links_to_open(resolution: &Resolution) -> Vec<&str> {
    let mut links = Vec::with_capacity(2);
    if let ResolutionResult::Found { article_url, .. } = &resolution.resolution {
        links.push(article_url.as_str());
    }
    links.push(resolution.map_query.as_str());
    links
}

/// Opens every link from [`links_to_open`]. A browser that cannot be
/// launched is reported but does not fail the request.
pub(crate) fn open_links(resolution: &Resolution) {
    for url in links_to_open(resolution) {
        match webbrowser::open(url) {
            Ok(()) => tracing::debug!(%url, "opened in browser"),
            Err(e) => {
                tracing::warn!(%url, error = %e, "failed to open browser");
                eprintln!("Could not open {url} in a browser: {e}");
            }
        }
    }
}
