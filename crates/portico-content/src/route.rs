//! Route computation for content files.

use std::collections::BTreeSet;
use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::Frontmatter;
use crate::links::strip_suffixes;

/// Ordering prefix such as `01-`, `2_` or `3.` on a file or directory name.
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s*[-_.]+\s*([^-_.\s].*)$").expect("number prefix pattern is valid")
});

static ROOT: LazyLock<url::Url> =
    LazyLock::new(|| url::Url::parse("http://x").expect("root URL is valid"));

/// Drop an ordering prefix from a path segment.
pub fn strip_number_prefix(segment: &str) -> &str {
    NUMBER_PREFIX
        .captures(segment)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(segment)
}

/// Canonical form of a site path used for route lookups.
///
/// Drops `?query` and `#fragment`, resolves `.`/`..`, applies URL percent
/// encoding and removes the trailing slash (except on the root).
pub fn normalize_route(path: &str) -> String {
    let path = strip_suffixes(path);
    let resolved = match ROOT.join(path) {
        Ok(url) => url.path().to_string(),
        Err(_) => path.to_string(),
    };

    if resolved.len() > 1 {
        resolved.trim_end_matches('/').to_string()
    } else {
        resolved
    }
}

/// Resolve a link written on the page at `from` the way a browser would.
///
/// `from` is the page's own route; relative targets resolve against its
/// parent segment.
pub fn resolve_relative(from: &str, target: &str) -> String {
    let resolved = ROOT
        .join(from)
        .and_then(|page| page.join(strip_suffixes(target)));
    match resolved {
        Ok(url) => normalize_route(url.path()),
        Err(_) => normalize_route(target),
    }
}

/// Path segments of `relative` as strings, ordering prefixes removed.
fn segments(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .map(|s| strip_number_prefix(s).to_string())
        .collect()
}

fn join_route(base_url: &str, prefix: &str, path: &str) -> String {
    let mut route = base_url.to_string();
    if !prefix.is_empty() {
        route.push_str(prefix.trim_matches('/'));
        route.push('/');
    }
    route.push_str(path.trim_start_matches('/'));
    normalize_route(&route)
}

/// Route of a documentation page.
///
/// `relative` is the file's path inside the docs directory.
pub fn doc_route(
    base_url: &str,
    route_base_path: &str,
    relative: &Path,
    frontmatter: Option<&Frontmatter>,
) -> String {
    let mut dirs = segments(relative.parent().unwrap_or(Path::new("")));
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .map(strip_number_prefix)
        .unwrap_or("index");

    if let Some(slug) = frontmatter.and_then(|f| f.slug.as_deref()) {
        let path = if slug.starts_with('/') {
            slug.to_string()
        } else {
            dirs.push(slug.to_string());
            dirs.join("/")
        };
        return join_route(base_url, route_base_path, &path);
    }

    match frontmatter.and_then(|f| f.id.as_deref()) {
        Some(id) => dirs.push(id.to_string()),
        None if is_index(stem) || stem.eq_ignore_ascii_case("readme") => {}
        None => dirs.push(stem.to_string()),
    }

    join_route(base_url, route_base_path, &dirs.join("/"))
}

/// Route of a standalone page.
pub fn page_route(base_url: &str, relative: &Path, frontmatter: Option<&Frontmatter>) -> String {
    if let Some(slug) = frontmatter.and_then(|f| f.slug.as_deref()) {
        return join_route(base_url, "", slug);
    }

    let mut parts: Vec<String> = relative
        .parent()
        .unwrap_or(Path::new(""))
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect();
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    if !is_index(stem) {
        parts.push(stem.to_string());
    }

    join_route(base_url, "", &parts.join("/"))
}

/// Route of a static file: served as is, extension included.
pub fn static_route(base_url: &str, relative: &Path) -> String {
    let path: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    join_route(base_url, "", &path.join("/"))
}

fn is_index(stem: &str) -> bool {
    stem.eq_ignore_ascii_case("index")
}

/// Set of every route the site will serve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: BTreeSet<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Returns `false` if it was already present.
    pub fn insert(&mut self, route: &str) -> bool {
        self.routes.insert(normalize_route(route))
    }

    /// Check whether `path` resolves to a route.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains(&normalize_route(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }
}
