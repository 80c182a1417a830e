//! HTML extraction for search result pages and result pages

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Hrefs of the first `limit` result anchors; anchors without href are skipped
pub(crate) fn result_links(page: &str, limit: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse("a.result__a") else {
        return Vec::new();
    };

    Html::parse_document(page)
        .select(&selector)
        .take(limit)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Text of the first `limit` paragraphs, one per line, empty ones dropped
pub(crate) fn paragraph_brief(page: &str, limit: usize) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    Html::parse_document(page)
        .select(&selector)
        .take(limit)
        .map(|p| element_text(&p))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn a result href into the URL to fetch
///
/// Protocol-relative links get `https:`. Redirect links carrying a `uddg`
/// parameter resolve to its decoded target. Relative links resolve against
/// the search page.
pub(crate) fn resolve_result_url(href: &str, search_page: &Url) -> Option<String> {
    let href = match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href.to_string(),
    };

    let url = Url::parse(&href).or_else(|_| search_page.join(&href)).ok()?;

    if href.contains("/l/?uddg=") {
        if let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg") {
            return Some(target.into_owned());
        }
    }

    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
            <div class="result"><a class="result__a" href="https://one.example/a">One</a></div>
            <div class="result"><a class="result__a">No href</a></div>
            <div class="result"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ftwo.example%2Fb%3Fx%3D1&amp;rut=abc">Two</a></div>
            <div class="result"><a class="other" href="https://ignored.example">Ad</a></div>
            <div class="result"><a class="result__a" href="https://three.example">Three</a></div>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://html.duckduckgo.com/html/?q=test").unwrap()
    }

    #[test]
    fn test_result_links() {
        let links = result_links(SEARCH_PAGE, 5);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0], "https://one.example/a");
        assert!(links[1].starts_with("//duckduckgo.com/l/?uddg="));
    }

    #[test]
    fn test_result_links_limit_counts_anchors() {
        // The anchor without href still uses up a slot
        let links = result_links(SEARCH_PAGE, 2);
        assert_eq!(links, vec!["https://one.example/a"]);
    }

    #[test]
    fn test_no_result_links() {
        assert!(result_links("<html><body><p>nothing</p></body></html>", 5).is_empty());
    }

    #[test]
    fn test_resolve_redirect_link() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Ftwo.example%2Fb%3Fx%3D1&rut=abc";
        assert_eq!(
            resolve_result_url(href, &base()).as_deref(),
            Some("https://two.example/b?x=1")
        );
    }

    #[test]
    fn test_resolve_relative_redirect_link() {
        let href = "/l/?uddg=https%3A%2F%2Fthree.example%2F";
        assert_eq!(
            resolve_result_url(href, &base()).as_deref(),
            Some("https://three.example/")
        );
    }

    #[test]
    fn test_resolve_protocol_relative_link() {
        assert_eq!(
            resolve_result_url("//example.com/page", &base()).as_deref(),
            Some("https://example.com/page")
        );
    }

    #[test]
    fn test_resolve_plain_link() {
        assert_eq!(
            resolve_result_url("http://example.com/page", &base()).as_deref(),
            Some("http://example.com/page")
        );
    }

    #[test]
    fn test_paragraph_brief() {
        let page = r#"
            <html><body>
                <p>  First <b>bold</b> paragraph. </p>
                <p></p>
                <p>Second</p>
                <p>Third</p>
            </body></html>
        "#;

        assert_eq!(paragraph_brief(page, 5), "First bold paragraph.\nSecond\nThird");
        assert_eq!(paragraph_brief(page, 2), "First bold paragraph.");
    }

    #[test]
    fn test_paragraph_brief_without_paragraphs() {
        assert_eq!(paragraph_brief("<html><body><div>text</div></body></html>", 5), "");
    }
}
