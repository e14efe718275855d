//! URL admission filtering and normalization
//!
//! The admission filter decides whether a URL looks like a crawlable page or
//! a file resource to skip, based on the path's file extension. It is
//! consulted for seed URLs and for every discovered link before the link may
//! enter the frontier.

use url::Url;

/// Path extensions accepted as crawlable pages
///
/// The empty extension covers bare paths and directory-style URLs ending in
/// a slash. Anything outside this list (pdf, docx, images, archives) is
/// treated as a file resource and skipped.
const PAGE_EXTENSIONS: &[&str] = &["", "html", "htm", "php", "asp", "aspx", "jsp"];

/// Returns true if the URL points at a non-page resource
///
/// The extension check is case-insensitive and ignores query string and
/// fragment; a trailing slash counts as "no extension".
pub fn is_blacklisted(url: &Url) -> bool {
    let extension = path_extension(url.path());
    !PAGE_EXTENSIONS.contains(&extension.as_str())
}

/// Extracts the lowercased file extension from a URL path
///
/// Returns the empty string for directory-style paths (trailing slash) and
/// for final segments without a dot.
fn path_extension(path: &str) -> String {
    if path.ends_with('/') {
        return String::new();
    }

    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rfind('.') {
        Some(idx) => segment[idx + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Normalizes a URL string into the canonical form used for frontier
/// identity
///
/// Accepts only absolute HTTP(S) URLs with a host; the fragment is dropped
/// (two URLs differing only in fragment are the same page). The `url` crate
/// already lowercases the host during parsing.
///
/// Returns `None` for anything that cannot be crawled: relative references,
/// other schemes, hostless URLs.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.host_str()?;

    url.set_fragment(None);

    Some(url)
}
