//! HTML extraction: title, text fragments, and outbound links
//!
//! Extraction turns a fetched HTML body into the raw material for a
//! [`crate::artifact::PageRecord`]: the page title, an ordered sequence of
//! text fragments, and the outbound links to feed back to the frontier.

use scraper::{Html, Selector};
use url::Url;

/// Elements whose text becomes record fragments, in document order
const TEXT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, li, blockquote, pre";

/// Everything extracted from one fetched page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title (from the <title> tag), if any
    pub title: Option<String>,

    /// Ordered, whitespace-collapsed text fragments
    pub texts: Vec<String>,

    /// Outbound links as absolute URL strings
    pub links: Vec<String>,
}

/// Parses HTML content and extracts title, texts, and links
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags, resolved against the base URL.
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - fragment-only links (same-page anchors)
/// - anything that resolves to a non-HTTP(S) URL
pub fn extract_page(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        texts: extract_texts(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the text of content-bearing elements in document order
fn extract_texts(document: &Html) -> Vec<String> {
    let mut texts = Vec::new();

    if let Ok(selector) = Selector::parse(TEXT_SELECTOR) {
        for element in document.select(&selector) {
            let fragment = element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            if !fragment.is_empty() {
                texts.push(fragment);
            }
        }
    }

    texts
}

/// Extracts all valid outbound links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.title, None);
    }

    #[test]
    fn test_extract_texts_in_document_order() {
        let html = r#"
            <html><body>
                <h1>Heading</h1>
                <p>First paragraph.</p>
                <p>Second paragraph.</p>
            </body></html>
        "#;
        let page = extract_page(html, &base_url());
        assert_eq!(
            page.texts,
            vec![
                "Heading".to_string(),
                "First paragraph.".to_string(),
                "Second paragraph.".to_string(),
            ]
        );
    }

    #[test]
    fn test_texts_collapse_whitespace() {
        let html = "<html><body><p>spaced \n\t   out</p></body></html>";
        let page = extract_page(html, &base_url());
        assert_eq!(page.texts, vec!["spaced out".to_string()]);
    }

    #[test]
    fn test_empty_elements_are_skipped() {
        let html = "<html><body><p>   </p><p>real</p></body></html>";
        let page = extract_page(html, &base_url());
        assert_eq!(page.texts, vec!["real".to_string()]);
    }

    #[test]
    fn test_script_and_style_text_is_not_extracted() {
        let html = r#"
            <html><head><style>body { color: red; }</style></head>
            <body><script>var x = 1;</script><p>visible</p></body></html>
        "#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.texts, vec!["visible".to_string()]);
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_skip_special_scheme_links() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:test@example.com">Mail</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,<h1>x</h1>">Data</a>
            </body></html>
        "#;
        let page = extract_page(html, &base_url());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<html><body><a href="/file.pdf" download>Download</a></body></html>"#;
        let page = extract_page(html, &base_url());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let page = extract_page(html, &base_url());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html><body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="/another-valid">Valid</a>
            </body></html>
        "#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.links.len(), 2);
    }
}
