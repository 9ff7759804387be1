//! Export the validated site config as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portico_config::SiteConfig;

use super::check::{check_links, load_config, resolve_site_dir};

/// Serialize the config the way the site generator consumes it.
pub(crate) fn to_json(config: &SiteConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize site config")
}

/// Run the export command.
pub async fn run(
    config_path: &Path,
    site_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    skip_links: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    if skip_links {
        tracing::info!("Skipping link check");
    } else {
        let site_dir = resolve_site_dir(config_path, site_dir);
        check_links(&config, &site_dir)?;
    }

    let json = to_json(&config)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported config to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
