//! Candidate extraction from a rendered disambiguation page.
//!
//! Each list item contributes the text of its first link, in document
//! order. Table-of-contents entries are skipped. Duplicates are kept.

use regex::Regex;

pub(crate) fn extract_candidates(html: &str) -> Vec<String> {
    let li_open = Regex::new(r"(?is)<li\b([^>]*)>").expect("valid li regex");
    let li_close = Regex::new(r"(?i)</li\s*>").expect("valid li close regex");
    let anchor = Regex::new(r"(?is)<a\b[^>]*>(.*?)</a\s*>").expect("valid anchor regex");
    let tag = Regex::new(r"<[^>]+>").expect("valid tag regex");

    let mut candidates = Vec::new();
    for open in li_open.captures_iter(html) {
        let Some(whole) = open.get(0) else {
            continue;
        };
        let attrs = open.get(1).map_or("", |m| m.as_str());
        if attrs.contains("tocsection") {
            continue;
        }

        // An item's first link may sit inside a nested list, so the item
        // runs until the first closing tag rather than its own.
        let rest = &html[whole.end()..];
        let item = li_close.find(rest).map_or(rest, |close| &rest[..close.start()]);

        if let Some(text) = anchor
            .captures(item)
            .and_then(|cap| cap.get(1))
            .map(|m| strip_html(&tag, m.as_str()))
            .filter(|t| !t.is_empty())
        {
            candidates.push(text);
        }
    }
    candidates
}

fn strip_html(tag: &Regex, value: &str) -> String {
    decode_html(tag.replace_all(value, "").trim())
}

fn decode_html(value: &str) -> String {
    value
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_of_first_links() {
        let html = r#"
            <div class="mw-parser-output">
            <p><b>Springfield</b> may refer to:</p>
            <ul>
              <li><a href="/wiki/Springfield,_Missouri" title="Springfield, Missouri">Springfield, Missouri</a>, third-largest city</li>
              <li><a href="/wiki/Springfield,_Illinois">Springfield, Illinois</a>, state capital</li>
              <li><a href="/wiki/Springfield,_Massachusetts">Springfield, Massachusetts</a></li>
            </ul></div>"#;
        assert_eq!(
            extract_candidates(html),
            vec![
                "Springfield, Missouri",
                "Springfield, Illinois",
                "Springfield, Massachusetts"
            ]
        );
    }

    #[test]
    fn skips_table_of_contents_items() {
        let html = r##"
            <ul><li class="toclevel-1 tocsection-1"><a href="#Places"><span>Places</span></a></li></ul>
            <ul><li><a href="/wiki/Mercury_(planet)">Mercury (planet)</a></li></ul>"##;
        assert_eq!(extract_candidates(html), vec!["Mercury (planet)"]);
    }

    #[test]
    fn items_without_links_are_ignored() {
        let html = "<ul><li>Plain text entry</li><li><a href=\"/wiki/X\">X</a></li></ul>";
        assert_eq!(extract_candidates(html), vec!["X"]);
    }

    #[test]
    fn decodes_entities_and_inner_markup() {
        let html = r#"<ul><li><a href="/wiki/A"><i>Tom &amp; Jerry</i>&nbsp;Town</a></li></ul>"#;
        assert_eq!(extract_candidates(html), vec!["Tom & Jerry Town"]);
    }

    #[test]
    fn duplicates_are_not_removed() {
        let html = r#"<ul><li><a href="/wiki/Paris">Paris</a></li><li><a href="/wiki/Paris">Paris</a></li></ul>"#;
        assert_eq!(extract_candidates(html), vec!["Paris", "Paris"]);
    }

    #[test]
    fn outer_item_without_link_takes_first_nested_link() {
        let html = r#"<ul><li>In the United States:<ul><li><a href="/wiki/Paris,_Texas">Paris, Texas</a></li><li><a href="/wiki/Paris,_Maine">Paris, Maine</a></li></ul></li></ul>"#;
        assert_eq!(
            extract_candidates(html),
            vec!["Paris, Texas", "Paris, Texas", "Paris, Maine"]
        );
    }

    #[test]
    fn strip_html_shares_one_tag_pattern() {
        let tag = Regex::new(r"<[^>]+>").expect("valid tag regex");
        assert_eq!(strip_html(&tag, "<b>Lima</b>, <i>Peru</i>"), "Lima, Peru");
        assert_eq!(strip_html(&tag, " <span>Lima,&nbsp;Ohio</span> "), "Lima, Ohio");
    }

    #[test]
    fn markup_is_stripped_in_every_item() {
        let html = r#"<ul><li><a href="/a"><b>Lima</b></a></li><li><a href="/b"><i>Lima</i>, Ohio</a></li></ul>"#;
        assert_eq!(extract_candidates(html), vec!["Lima", "Lima, Ohio"]);
    }

    #[test]
    fn empty_html_yields_no_candidates() {
        assert!(extract_candidates("").is_empty());
    }
}
