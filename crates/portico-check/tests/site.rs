//! End-to-end link checking over small sites written to a temp directory.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use portico_check::{CheckError, LinkChecker, LinkReport, LinkSource};
use portico_config::SiteConfig;
use portico_content::ContentTree;

const PORTAL: &str = r#"
title = "Object Introspection"
tagline = "Dynamic C++ Object Profiling"
url = "https://objectintrospection.org"
baseUrl = "/"
onBrokenLinks = "throw"
onBrokenMarkdownLinks = "warn"
trailingSlash = false

[[themeConfig.navbar.items]]
label = "GitHub"
href = "https://github.com/facebookexperimental/object-introspection"
position = "right"

[[themeConfig.footer.links]]
title = "Links"
items = [
  { label = "Getting Started", to = "docs/intro" },
  { label = "CppCon 2023 Presentation", to = "https://youtu.be/6IlTs8YRne0" },
]

[[themeConfig.footer.links]]
title = "Community"
items = [
  { label = "IRC", href = "irc://irc.oftc.net/#object-introspection" },
]
"#;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn check(&self, config: &SiteConfig) -> LinkReport {
        let tree = ContentTree::discover(self.dir.path(), config).unwrap();
        LinkChecker::new(config, &tree).check()
    }
}

fn portal() -> SiteConfig {
    PORTAL.parse().unwrap()
}

fn with_policy(on_broken_links: &str) -> SiteConfig {
    PORTAL
        .replace(
            "onBrokenLinks = \"throw\"",
            &format!("onBrokenLinks = \"{}\"", on_broken_links),
        )
        .parse()
        .unwrap()
}

#[test]
fn complete_portal_is_clean() {
    let site = Site::new();
    site.write(
        "docs/intro.md",
        "---\ntitle: Introduction\n---\n\nStart with [the guide](guide/getting-started.md).\n",
    )
    .write(
        "docs/guide/getting-started.md",
        "# Getting started\n\nBack to the [intro](/docs/intro) or [API](../api#types).\n",
    )
    .write("docs/api.md", "# API\n\n## Types\n")
    .write("src/pages/index.js", "export default function Home() {}");

    let config = portal();
    let report = site.check(&config);

    assert!(report.is_clean(), "{report:?}");
    assert!(report.enforce(&config).is_ok());
}

#[test]
fn missing_page_fails_under_throw() {
    let site = Site::new();
    site.write("docs/other.md", "# Other");

    let config = portal();
    let report = site.check(&config);

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(
        report.broken_links[0].source,
        LinkSource::Config("footer group \"Links\" item \"Getting Started\"".to_string())
    );
    assert_eq!(report.broken_links[0].resolved, "/docs/intro");

    let err = report.enforce(&config).unwrap_err();
    assert!(matches!(err, CheckError::BrokenLinks(ref links) if links.len() == 1));
}

#[test]
fn missing_page_warns_under_warn() {
    let site = Site::new();
    site.write("docs/other.md", "# Other");

    let config = with_policy("warn");
    let outcome = site.check(&config).enforce(&config).unwrap();

    assert_eq!(outcome.warned, 1);
}

#[test]
fn external_to_targets_are_not_checked() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro");

    let report = site.check(&portal());

    // The YouTube link uses `to` but is absolute, so only docs/intro counts.
    assert!(report.is_clean());
}

#[test]
fn broken_markdown_reference_follows_its_own_policy() {
    let site = Site::new();
    site.write(
        "docs/intro.md",
        "# Intro\n\nSee [setup](./setup.md#install) and [faq](https://example.org/faq.md).\n",
    );

    let config = portal();
    let report = site.check(&config);

    assert!(report.broken_links.is_empty());
    assert_eq!(report.broken_markdown_links.len(), 1);
    let broken = &report.broken_markdown_links[0];
    assert_eq!(broken.file, PathBuf::from("docs/intro.md"));
    assert_eq!(broken.line, 3);
    assert_eq!(broken.target, "./setup.md#install");

    // onBrokenMarkdownLinks = "warn" lets the build continue.
    let outcome = report.enforce(&config).unwrap();
    assert_eq!(outcome.warned, 1);
}

#[test]
fn percent_encoded_reference_names_the_decoded_file() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro")
        .write("docs/my page.md", "# My page")
        .write("docs/a.md", "[p](my%20page.md)");

    let report = site.check(&portal());

    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn rooted_reference_resolves_from_docs_directory() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro")
        .write("docs/guide/a.md", "[i](/intro.md)");

    let report = site.check(&portal());

    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn bare_reference_falls_back_to_docs_then_site_directory() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro")
        .write("docs/guide/a.md", "[i](intro.md)\n[p](src/pages/about.md)")
        .write("src/pages/about.md", "# About");

    let report = site.check(&portal());

    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn explicit_relative_reference_skips_site_directory() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro")
        .write("docs/guide/a.md", "[p](./src/pages/about.md)")
        .write("src/pages/about.md", "# About");

    let report = site.check(&portal());

    assert_eq!(report.broken_markdown_links.len(), 1);
    assert_eq!(
        report.broken_markdown_links[0].target,
        "./src/pages/about.md"
    );
}

#[test]
fn broken_route_in_markdown_is_a_broken_link() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro\n\n[Missing](/docs/missing)\n");

    let report = site.check(&portal());

    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(
        report.broken_links[0].source,
        LinkSource::Markdown {
            file: PathBuf::from("docs/intro.md"),
            line: 3
        }
    );
}

#[test]
fn reference_to_draft_is_a_broken_link() {
    let site = Site::new();
    site.write("docs/intro.md", "[Soon](./wip.md)")
        .write("docs/wip.md", "---\ndraft: true\n---\n[nowhere](nowhere.md)");

    let report = site.check(&portal());

    // The draft's own links are never checked.
    assert!(report.broken_markdown_links.is_empty());
    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.broken_links[0].target, "./wip.md");
}

#[test]
fn base_url_is_applied_to_config_and_absolute_links() {
    let site = Site::new();
    site.write("docs/intro.md", "[home](/)\n[self](/docs/intro)")
        .write("src/pages/index.md", "# Home");

    let config: SiteConfig = PORTAL.replace("baseUrl = \"/\"", "baseUrl = \"/oi\"").parse().unwrap();
    assert_eq!(config.base_url(), "/oi/");

    let report = site.check(&config);

    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn trailing_slash_changes_relative_resolution() {
    let site = Site::new();
    site.write("docs/intro.md", "# Intro")
        .write("docs/guide.md", "[sibling](intro)");

    let without = portal();
    assert!(site.check(&without).broken_links.is_empty());

    let with: SiteConfig = PORTAL
        .replace("trailingSlash = false", "trailingSlash = true")
        .parse()
        .unwrap();
    let report = site.check(&with);

    // Served at /docs/guide/, "intro" now means /docs/guide/intro.
    assert_eq!(report.broken_links.len(), 1);
    assert_eq!(report.broken_links[0].resolved, "/docs/guide/intro");
}

#[test]
fn static_files_are_routes() {
    let site = Site::new();
    site.write("docs/intro.md", "[slides](/pdf/oi-cppcon.pdf)")
        .write("static/pdf/oi-cppcon.pdf", "%PDF");

    let report = site.check(&portal());

    assert!(report.is_clean(), "{report:?}");
}
