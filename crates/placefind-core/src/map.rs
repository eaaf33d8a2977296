//! Map-search links derived from a query.

use std::fmt;

use serde::Serialize;

use crate::query::Query;

/// Search endpoint the query text is appended to.
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A map-search URL for a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MapQuery(String);

impl MapQuery {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the map-search URL for `query`.
///
/// Spaces become `+` and nothing else is escaped; the map service's query
/// parser expects exactly this form.
#[must_use]
pub fn derive_map_query(query: &Query) -> MapQuery {
    MapQuery(format!(
        "{MAP_SEARCH_URL}{}",
        query.as_str().replace(' ', "+")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: &str) -> Query {
        Query::parse(raw).expect("test query should be non-empty")
    }

    #[test]
    fn replaces_spaces_with_plus() {
        let map = derive_map_query(&query("New York City"));
        assert_eq!(
            map.as_str(),
            "https://www.google.com/maps/search/?api=1&query=New+York+City"
        );
    }

    #[test]
    fn is_deterministic() {
        let q = query("Rio de Janeiro");
        assert_eq!(derive_map_query(&q), derive_map_query(&q));
    }

    #[test]
    fn leaves_other_characters_unescaped() {
        let map = derive_map_query(&query("Saint-Étienne & Co"));
        assert!(map.as_str().ends_with("query=Saint-Étienne+&+Co"), "{map}");
    }

    #[test]
    fn uses_trimmed_query_text() {
        let map = derive_map_query(&query("  Lima  "));
        assert!(map.as_str().ends_with("query=Lima"), "{map}");
    }
}
