//! Config validation and link check command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use portico_check::{Enforcement, LinkChecker};
use portico_config::SiteConfig;
use portico_content::ContentTree;

/// Load and validate the site config.
pub(crate) fn load_config(config_path: &Path) -> Result<SiteConfig> {
    SiteConfig::load(config_path)
        .with_context(|| format!("Invalid site config {}", config_path.display()))
}

/// The directory content paths are relative to.
pub(crate) fn resolve_site_dir(config_path: &Path, site_dir: Option<PathBuf>) -> PathBuf {
    site_dir.unwrap_or_else(|| match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    })
}

/// Discover content and enforce the broken-link policies.
pub(crate) fn check_links(config: &SiteConfig, site_dir: &Path) -> Result<Enforcement> {
    let tree = ContentTree::discover(site_dir, config)
        .with_context(|| format!("Failed to read content in {}", site_dir.display()))?;

    let report = LinkChecker::new(config, &tree).check();
    let outcome = report.enforce(config)?;

    Ok(outcome)
}

/// Run the check command.
pub async fn run(config_path: &Path, site_dir: Option<PathBuf>) -> Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let site_dir = resolve_site_dir(config_path, site_dir);

    tracing::info!("Checking links for '{}'...", config.title());

    let outcome = check_links(&config, &site_dir)?;

    tracing::info!(
        "Check passed in {}ms ({} warned, {} logged, {} ignored)",
        start.elapsed().as_millis(),
        outcome.warned,
        outcome.logged,
        outcome.ignored
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
title = "Object Introspection"
url = "https://objectintrospection.org"
baseUrl = "/"

[[themeConfig.navbar.items]]
label = "Docs"
to = "docs/intro"
"#;

    #[test]
    fn site_dir_defaults_to_config_parent() {
        assert_eq!(
            resolve_site_dir(Path::new("website/portico.toml"), None),
            PathBuf::from("website")
        );
        assert_eq!(
            resolve_site_dir(Path::new("portico.toml"), None),
            PathBuf::from(".")
        );
        assert_eq!(
            resolve_site_dir(Path::new("portico.toml"), Some(PathBuf::from("site"))),
            PathBuf::from("site")
        );
    }

    #[tokio::test]
    async fn passes_when_links_resolve() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("portico.toml");
        fs::write(&config_path, CONFIG).unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/intro.md"), "# Intro").unwrap();

        run(&config_path, None).await.unwrap();
    }

    #[tokio::test]
    async fn fails_on_broken_navbar_link() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("portico.toml");
        fs::write(&config_path, CONFIG).unwrap();

        let err = run(&config_path, None).await.unwrap_err();

        assert!(err.to_string().contains("broken link"), "{err:#}");
    }

    #[tokio::test]
    async fn fails_on_invalid_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("portico.toml");
        fs::write(&config_path, "title = \"X\"\nbaseUrl = \"/\"").unwrap();

        let err = run(&config_path, None).await.unwrap_err();

        assert!(format!("{err:#}").contains("Missing required field `url`"));
    }
}
