//! The validated site configuration.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::link::{is_external, with_base_url, LinkTarget};
use crate::policy::LinkPolicy;

/// Validated, read-only site configuration.
///
/// Built once by [`SiteConfig::load`](crate::SiteConfig::load) and never
/// mutated afterwards. Navbar items, footer groups and head tags keep the
/// order in which they were declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub(crate) title: String,
    pub(crate) tagline: Option<String>,
    pub(crate) url: String,
    pub(crate) base_url: String,
    pub(crate) favicon: Option<String>,
    pub(crate) on_broken_links: LinkPolicy,
    pub(crate) on_broken_markdown_links: LinkPolicy,
    pub(crate) trailing_slash: Option<bool>,
    pub(crate) organization_name: Option<String>,
    pub(crate) project_name: Option<String>,
    pub(crate) deployment_branch: Option<String>,
    pub(crate) head_tags: Vec<HeadTag>,
    pub(crate) docs: DocsOptions,
    pub(crate) pages: PagesOptions,
    pub(crate) static_directories: Vec<String>,
    pub(crate) theme: ThemeOptions,
    pub(crate) theme_config: ThemeConfig,
}

/// Navbar and footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeConfig {
    pub navbar: Navbar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

/// Top navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Navbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

/// A single navbar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavbarItem {
    pub label: String,
    #[serde(flatten)]
    pub target: LinkTarget,
    pub position: NavbarPosition,
}

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// Site footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Footer {
    pub style: FooterStyle,
    pub links: Vec<FooterLinkGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Footer color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Dark,
    #[default]
    Light,
}

/// A titled column of footer links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterLinkGroup {
    pub title: String,
    pub items: Vec<FooterLink>,
}

/// A single footer link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterLink {
    pub label: String,
    #[serde(flatten)]
    pub target: LinkTarget,
}

/// Navbar or footer logo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// An extra element injected into every page's `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadTag {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
}

/// Where documentation pages live and where they are served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsOptions {
    /// Source directory, relative to the site directory
    pub path: String,
    /// URL segment docs are served under (empty for the site root)
    pub route_base_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            path: "docs".to_string(),
            route_base_path: "docs".to_string(),
            sidebar_path: None,
            edit_url: None,
        }
    }
}

/// Where standalone pages live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagesOptions {
    pub path: String,
}

impl Default for PagesOptions {
    fn default() -> Self {
        Self {
            path: "src/pages".to_string(),
        }
    }
}

/// Theme hooks passed through to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

/// An internal link declared in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLink<'a> {
    /// Human-readable location, e.g. `navbar item "Docs"`
    pub origin: String,
    /// The target as declared
    pub target: &'a str,
}

impl SiteConfig {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    /// Canonical URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Base path, always starting and ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    pub fn on_broken_links(&self) -> LinkPolicy {
        self.on_broken_links
    }

    pub fn on_broken_markdown_links(&self) -> LinkPolicy {
        self.on_broken_markdown_links
    }

    /// `None` leaves URLs exactly as authored.
    pub fn trailing_slash(&self) -> Option<bool> {
        self.trailing_slash
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn deployment_branch(&self) -> Option<&str> {
        self.deployment_branch.as_deref()
    }

    pub fn head_tags(&self) -> &[HeadTag] {
        &self.head_tags
    }

    pub fn docs(&self) -> &DocsOptions {
        &self.docs
    }

    pub fn pages(&self) -> &PagesOptions {
        &self.pages
    }

    pub fn static_directories(&self) -> &[String] {
        &self.static_directories
    }

    pub fn theme(&self) -> &ThemeOptions {
        &self.theme
    }

    pub fn navbar(&self) -> &Navbar {
        &self.theme_config.navbar
    }

    pub fn footer(&self) -> Option<&Footer> {
        self.theme_config.footer.as_ref()
    }

    /// Prefix an internal site path with the base URL.
    pub fn resolve_path(&self, path: &str) -> String {
        with_base_url(&self.base_url, path)
    }

    /// Every internal link declared in the navbar and footer, in declaration
    /// order. External targets and `href` entries are left out.
    pub fn internal_links(&self) -> Vec<ConfigLink<'_>> {
        let mut links = Vec::new();
        let navbar = &self.theme_config.navbar;

        if let Some(target) = navbar.logo.as_ref().and_then(Logo::internal_href) {
            links.push(ConfigLink {
                origin: "navbar logo".to_string(),
                target,
            });
        }

        for item in &navbar.items {
            if let Some(target) = item.target.internal_path() {
                links.push(ConfigLink {
                    origin: format!("navbar item \"{}\"", item.label),
                    target,
                });
            }
        }

        if let Some(footer) = &self.theme_config.footer {
            for group in &footer.links {
                for item in &group.items {
                    if let Some(target) = item.target.internal_path() {
                        links.push(ConfigLink {
                            origin: format!(
                                "footer group \"{}\" item \"{}\"",
                                group.title, item.label
                            ),
                            target,
                        });
                    }
                }
            }

            if let Some(target) = footer.logo.as_ref().and_then(Logo::internal_href) {
                links.push(ConfigLink {
                    origin: "footer logo".to_string(),
                    target,
                });
            }
        }

        links
    }
}

impl Logo {
    fn internal_href(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !is_external(href))
    }
}

impl Navbar {
    /// Items on one side of the navbar, in declaration order.
    pub fn items_at(&self, position: NavbarPosition) -> impl Iterator<Item = &NavbarItem> {
        self.items.iter().filter(move |item| item.position == position)
    }
}
