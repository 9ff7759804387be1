//! On-disk shape of the configuration file.
//!
//! Every field is optional here so that a missing key surfaces as a named
//! validation error instead of a serde message.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub favicon: Option<String>,
    pub on_broken_links: Option<String>,
    pub on_broken_markdown_links: Option<String>,
    pub trailing_slash: Option<bool>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    pub deployment_branch: Option<String>,
    #[serde(default)]
    pub head_tags: Vec<RawHeadTag>,
    #[serde(default)]
    pub docs: RawDocs,
    #[serde(default)]
    pub pages: RawPages,
    pub static_directories: Option<Vec<String>>,
    #[serde(default)]
    pub theme: RawTheme,
    #[serde(default)]
    pub theme_config: RawThemeConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawHeadTag {
    pub tag_name: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocs {
    pub path: Option<String>,
    pub route_base_path: Option<String>,
    pub sidebar_path: Option<String>,
    pub edit_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawPages {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTheme {
    pub custom_css: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawThemeConfig {
    #[serde(default)]
    pub navbar: RawNavbar,
    pub footer: Option<RawFooter>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawNavbar {
    pub title: Option<String>,
    pub logo: Option<RawLogo>,
    #[serde(default)]
    pub items: Vec<RawLink>,
}

/// A navbar item or footer link before validation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawLink {
    pub label: Option<String>,
    pub to: Option<String>,
    pub href: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFooter {
    pub style: Option<String>,
    #[serde(default)]
    pub links: Vec<RawFooterGroup>,
    pub logo: Option<RawLogo>,
    pub copyright: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFooterGroup {
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLink>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawLogo {
    pub alt: Option<String>,
    pub src: Option<String>,
    pub href: Option<String>,
}
