//! Scaffold a portico site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing portico...");

    let site_dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let docs_dir = site_dir.join("docs");
    fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let intro_path = docs_dir.join("intro.md");
    if !intro_path.exists() || yes {
        fs::write(&intro_path, DEFAULT_INTRO).context("Failed to write intro.md")?;
        tracing::info!("Created docs/intro.md");
    }

    let getting_started_path = docs_dir.join("getting-started.md");
    if !getting_started_path.exists() || yes {
        fs::write(&getting_started_path, DEFAULT_GETTING_STARTED)
            .context("Failed to write getting-started.md")?;
        tracing::info!("Created docs/getting-started.md");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'portico check' to validate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Portico site configuration

title = "My Project"
tagline = "Documentation for My Project"
url = "https://example.com"
baseUrl = "/"

# throw | warn | log | ignore
onBrokenLinks = "throw"
onBrokenMarkdownLinks = "warn"

[docs]
path = "docs"
routeBasePath = "docs"

[themeConfig.navbar]
title = "My Project"

[[themeConfig.navbar.items]]
label = "Docs"
to = "docs/intro"
position = "left"

[themeConfig.footer]
style = "dark"
copyright = "Copyright © My Project."

[[themeConfig.footer.links]]
title = "Docs"
items = [
  { label = "Getting Started", to = "docs/getting-started" },
]
"#;

const DEFAULT_INTRO: &str = r#"---
title: Introduction
---

# Introduction

Welcome! Head over to [Getting Started](getting-started.md) to set things up.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
---

# Getting Started

Edit `portico.toml` to describe your site, then run:

```bash
portico check
```

Every navbar and footer link is checked against the pages in `docs/`,
and so are the links between Markdown files. Back to the [introduction](intro.md).
"#;
