//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in a URL path; `/` is kept, non-ASCII is always encoded
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// URL path for a collection entry (`/blog/my-post`)
pub fn entry_path(collection: &str, slug: &str) -> String {
    format!("/{}/{}", collection.trim_matches('/'), slug)
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://example.com/blog"
/// full_url_for(&config, "")      // -> "https://example.com"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.base_url();
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

/// Make an image reference absolute
///
/// Site-relative paths get the base URL; absolute URLs pass through.
pub fn absolute_url(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        path.to_string()
    } else {
        full_url_for(config, path)
    }
}

/// Percent-encode a URL path, keeping `/` separators
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}
