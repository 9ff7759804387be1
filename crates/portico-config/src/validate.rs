//! Turns a parsed [`RawConfig`] into a validated [`SiteConfig`].
//!
//! Validation is fail-fast: the first problem, in declaration order, is
//! returned.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::link::{is_external, LinkTarget};
use crate::model::{
    DocsOptions, Footer, FooterLink, FooterLinkGroup, FooterStyle, HeadTag, Logo, Navbar,
    NavbarItem, NavbarPosition, PagesOptions, SiteConfig, ThemeConfig, ThemeOptions,
};
use crate::policy::LinkPolicy;
use crate::raw::{RawConfig, RawFooter, RawLink, RawLogo, RawNavbar};

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9\-]*$").expect("tag name pattern is valid"));

pub(crate) fn validate(raw: RawConfig) -> Result<SiteConfig, ConfigError> {
    let title = required("title", raw.title)?;
    let url = required("url", raw.url)?;
    let base_url = required("baseUrl", raw.base_url)?;

    let url = validate_url(&url)?;
    let base_url = validate_base_url(&base_url)?;

    let on_broken_links = LinkPolicy::from_field(
        "onBrokenLinks",
        raw.on_broken_links.as_deref(),
        LinkPolicy::Throw,
    )?;
    let on_broken_markdown_links = LinkPolicy::from_field(
        "onBrokenMarkdownLinks",
        raw.on_broken_markdown_links.as_deref(),
        LinkPolicy::Warn,
    )?;

    let head_tags = raw
        .head_tags
        .into_iter()
        .enumerate()
        .map(|(i, tag)| -> Result<HeadTag, ConfigError> {
            let field = format!("headTags[{}].tagName", i);
            let tag_name = required(&field, tag.tag_name)?;
            if !TAG_NAME.is_match(&tag_name) {
                return Err(ConfigError::invalid(
                    field,
                    format!("'{}' is not a valid element name", tag_name),
                ));
            }
            Ok(HeadTag {
                tag_name,
                attributes: tag.attributes,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let defaults = DocsOptions::default();
    let docs = DocsOptions {
        path: optional(raw.docs.path).unwrap_or(defaults.path),
        route_base_path: raw
            .docs
            .route_base_path
            .map(|p| p.trim_matches('/').to_string())
            .unwrap_or(defaults.route_base_path),
        sidebar_path: optional(raw.docs.sidebar_path),
        edit_url: optional(raw.docs.edit_url),
    };

    let pages = PagesOptions {
        path: optional(raw.pages.path).unwrap_or_else(|| PagesOptions::default().path),
    };

    let navbar = validate_navbar(raw.theme_config.navbar)?;
    let footer = raw.theme_config.footer.map(validate_footer).transpose()?;

    Ok(SiteConfig {
        title,
        tagline: optional(raw.tagline),
        url,
        base_url,
        favicon: optional(raw.favicon),
        on_broken_links,
        on_broken_markdown_links,
        trailing_slash: raw.trailing_slash,
        organization_name: optional(raw.organization_name),
        project_name: optional(raw.project_name),
        deployment_branch: optional(raw.deployment_branch),
        head_tags,
        docs,
        pages,
        static_directories: raw
            .static_directories
            .unwrap_or_else(|| vec!["static".to_string()]),
        theme: ThemeOptions {
            custom_css: optional(raw.theme.custom_css),
        },
        theme_config: ThemeConfig { navbar, footer },
    })
}

/// A present, non-blank string or a `MissingField` error.
fn required(field: &str, value: Option<String>) -> Result<String, ConfigError> {
    optional(value).ok_or_else(|| ConfigError::missing(field))
}

/// Blank strings count as absent.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_url(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::invalid("url", format!("invalid URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "url",
            format!(
                "scheme '{}' not supported, must be http or https",
                parsed.scheme()
            ),
        ));
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::invalid("url", "URL must have a host"));
    }
    if parsed.path() != "/" {
        tracing::warn!(
            "url '{}' contains a path; the path belongs in baseUrl",
            raw
        );
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::invalid(
            "baseUrl",
            format!("'{}' must start with '/'", trimmed),
        ));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}

fn validate_navbar(raw: RawNavbar) -> Result<Navbar, ConfigError> {
    let logo = raw
        .logo
        .map(|logo| validate_logo("themeConfig.navbar.logo", logo))
        .transpose()?;

    let items = raw
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| -> Result<NavbarItem, ConfigError> {
            let field = format!("themeConfig.navbar.items[{}]", i);
            let position = match item.position.as_deref().map(str::trim) {
                None | Some("left") => NavbarPosition::Left,
                Some("right") => NavbarPosition::Right,
                Some(other) => {
                    return Err(ConfigError::invalid(
                        format!("{}.position", field),
                        format!("'{}' is not one of: left, right", other),
                    ))
                }
            };
            let (label, target) = validate_link(&field, item)?;
            Ok(NavbarItem {
                label,
                target,
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Navbar {
        title: optional(raw.title),
        logo,
        items,
    })
}

fn validate_footer(raw: RawFooter) -> Result<Footer, ConfigError> {
    let style = match raw.style.as_deref().map(str::trim) {
        None | Some("light") => FooterStyle::Light,
        Some("dark") => FooterStyle::Dark,
        Some(other) => {
            return Err(ConfigError::invalid(
                "themeConfig.footer.style",
                format!("'{}' is not one of: dark, light", other),
            ))
        }
    };

    let mut links = Vec::with_capacity(raw.links.len());
    for (i, group) in raw.links.into_iter().enumerate() {
        let field = format!("themeConfig.footer.links[{}]", i);
        let title = required(&format!("{}.title", field), group.title)?;
        let items = group
            .items
            .into_iter()
            .enumerate()
            .map(|(j, item)| -> Result<FooterLink, ConfigError> {
                let (label, target) = validate_link(&format!("{}.items[{}]", field, j), item)?;
                Ok(FooterLink { label, target })
            })
            .collect::<Result<Vec<_>, _>>()?;
        links.push(FooterLinkGroup { title, items });
    }

    let logo = raw
        .logo
        .map(|logo| validate_logo("themeConfig.footer.logo", logo))
        .transpose()?;

    Ok(Footer {
        style,
        links,
        logo,
        copyright: optional(raw.copyright),
    })
}

/// Label plus exactly one of `to` / `href`.
fn validate_link(field: &str, raw: RawLink) -> Result<(String, LinkTarget), ConfigError> {
    let label = required(&format!("{}.label", field), raw.label)?;
    let target = match (optional(raw.to), optional(raw.href)) {
        (Some(to), None) => LinkTarget::To(to),
        (None, Some(href)) => {
            if !is_external(&href) {
                tracing::debug!(
                    "{}: href '{}' is not an absolute URL and will not be link-checked",
                    field,
                    href
                );
            }
            LinkTarget::Href(href)
        }
        (Some(_), Some(_)) => {
            return Err(ConfigError::invalid(
                field,
                "set either `to` or `href`, not both",
            ))
        }
        (None, None) => return Err(ConfigError::missing(format!("{}.to", field))),
    };
    Ok((label, target))
}

fn validate_logo(field: &str, raw: RawLogo) -> Result<Logo, ConfigError> {
    Ok(Logo {
        alt: optional(raw.alt),
        src: required(&format!("{}.src", field), raw.src)?,
        href: optional(raw.href),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal() -> RawConfig {
        RawConfig {
            title: Some("X".to_string()),
            url: Some("https://x.org".to_string()),
            base_url: Some("/".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_config_has_empty_navigation() {
        let config = validate(minimal()).unwrap();

        assert_eq!(config.title(), "X");
        assert!(config.navbar().items.is_empty());
        assert!(config.footer().is_none());
        assert!(config.head_tags().is_empty());
        assert_eq!(config.on_broken_links(), LinkPolicy::Throw);
        assert_eq!(config.on_broken_markdown_links(), LinkPolicy::Warn);
        assert_eq!(config.trailing_slash(), None);
        assert_eq!(config.static_directories(), ["static".to_string()]);
    }

    #[test]
    fn reports_first_missing_required_field() {
        for (field, raw) in [
            ("title", RawConfig { title: None, ..minimal() }),
            ("url", RawConfig { url: None, ..minimal() }),
            ("baseUrl", RawConfig { base_url: None, ..minimal() }),
        ] {
            let err = validate(raw).unwrap_err();
            assert_eq!(err.field(), Some(field), "{err}");
            assert!(matches!(err, ConfigError::MissingField { .. }));
        }
    }

    #[test]
    fn blank_required_field_counts_as_missing() {
        let err = validate(RawConfig {
            title: Some("   ".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field } if field == "title"));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = validate(RawConfig {
            url: Some("ftp://x.org".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("url"));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn rejects_relative_url() {
        let err = validate(RawConfig {
            url: Some("x.org".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn strips_trailing_slash_from_url() {
        let config = validate(RawConfig {
            url: Some("https://x.org/".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(config.url(), "https://x.org");
    }

    #[test]
    fn stores_url_without_surrounding_whitespace() {
        let config = validate(RawConfig {
            url: Some("  https://x.org/ ".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(config.url(), "https://x.org");
    }

    #[test]
    fn normalizes_base_url() {
        let config = validate(RawConfig {
            base_url: Some("/oi".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(config.base_url(), "/oi/");

        let err = validate(RawConfig {
            base_url: Some("oi/".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("baseUrl"));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = validate(RawConfig {
            on_broken_links: Some("explode".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPolicy { ref field, ref value }
                if field == "onBrokenLinks" && value == "explode"
        ));
    }

    #[test]
    fn navbar_item_needs_exactly_one_target() {
        let mut raw = minimal();
        raw.theme_config.navbar.items.push(RawLink {
            label: Some("Docs".to_string()),
            to: Some("docs/intro".to_string()),
            href: Some("https://x.org/docs".to_string()),
            position: None,
        });
        let err = validate(raw).unwrap_err();
        assert_eq!(err.field(), Some("themeConfig.navbar.items[0]"));

        let mut raw = minimal();
        raw.theme_config.navbar.items.push(RawLink {
            label: Some("Docs".to_string()),
            ..Default::default()
        });
        let err = validate(raw).unwrap_err();
        assert_eq!(err.field(), Some("themeConfig.navbar.items[0].to"));
    }

    #[test]
    fn rejects_unknown_navbar_position() {
        let mut raw = minimal();
        raw.theme_config.navbar.items.push(RawLink {
            label: Some("Docs".to_string()),
            to: Some("docs/intro".to_string()),
            href: None,
            position: Some("center".to_string()),
        });
        let err = validate(raw).unwrap_err();
        assert_eq!(err.field(), Some("themeConfig.navbar.items[0].position"));
    }

    #[test]
    fn footer_group_needs_title() {
        let mut raw = minimal();
        raw.theme_config.footer = Some(RawFooter {
            links: vec![crate::raw::RawFooterGroup {
                title: None,
                items: vec![],
            }],
            ..Default::default()
        });
        let err = validate(raw).unwrap_err();
        assert_eq!(err.field(), Some("themeConfig.footer.links[0].title"));
    }

    #[test]
    fn rejects_bad_head_tag_name() {
        let mut raw = minimal();
        raw.head_tags.push(crate::raw::RawHeadTag {
            tag_name: Some("<link>".to_string()),
            attributes: Default::default(),
        });
        let err = validate(raw).unwrap_err();
        assert_eq!(err.field(), Some("headTags[0].tagName"));
    }

    #[test]
    fn route_base_path_is_trimmed() {
        let mut raw = minimal();
        raw.docs.route_base_path = Some("/guide/".to_string());
        let config = validate(raw).unwrap();
        assert_eq!(config.docs().route_base_path, "guide");
    }
}
