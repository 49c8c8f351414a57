//! URL helpers shared by every store.

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://www.boardgamebliss.com/collections/all"`, returns
/// `"https://www.boardgamebliss.com"`.
#[must_use]
pub fn extract_store_origin(base_url: &str) -> String {
    reqwest::Url::parse(base_url).map_or_else(
        |e| {
            tracing::warn!(
                base_url,
                error = %e,
                "could not parse store base URL; falling back to string split for origin"
            );
            base_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Appends a configured path template to the base URL without doubling the
/// slash between them.
#[must_use]
pub fn join_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Makes a product link absolute.
///
/// Absolute links are kept, protocol-relative links get `https:`, and
/// root-relative links are joined to the store origin. Anything else is
/// returned verbatim.
#[must_use]
pub fn resolve_product_url(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{}{href}", extract_store_origin(base_url))
    } else {
        href.to_owned()
    }
}
