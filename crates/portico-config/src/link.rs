//! Link targets declared in the configuration.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme pattern is valid")
});

/// Check whether a link target points outside the site.
///
/// Anything with a URL scheme (`https:`, `irc:`, `mailto:`) or a
/// protocol-relative `//host` prefix is external.
pub fn is_external(target: &str) -> bool {
    target.starts_with("//") || SCHEME.is_match(target)
}

/// Where a navbar or footer entry points.
///
/// `to` is a site path that gets the base URL prepended and is link-checked,
/// unless it is itself an absolute URL. `href` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    To(String),
    Href(String),
}

impl LinkTarget {
    /// The raw target as declared.
    pub fn as_str(&self) -> &str {
        match self {
            Self::To(s) | Self::Href(s) => s,
        }
    }

    /// The target if it must resolve to a page of this site.
    pub fn internal_path(&self) -> Option<&str> {
        match self {
            Self::To(s) if !is_external(s) => Some(s),
            _ => None,
        }
    }
}

/// Prefix an internal path with the site's base URL.
///
/// Paths that already carry the base URL are returned unchanged, so
/// resolving twice is harmless.
pub fn with_base_url(base_url: &str, path: &str) -> String {
    if path.starts_with(base_url) {
        return path.to_string();
    }
    if path == base_url.trim_end_matches('/') {
        return base_url.to_string();
    }
    format!("{}{}", base_url, path.trim_start_matches('/'))
}
