//! Broken-link findings and policy enforcement.

use std::fmt;
use std::path::PathBuf;

use portico_config::{LinkPolicy, SiteConfig};

/// Where a link was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    /// Navbar, footer or logo entry in the site configuration
    Config(String),
    /// Markdown page, with the path relative to the site directory
    Markdown { file: PathBuf, line: usize },
}

impl fmt::Display for LinkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(origin) => write!(f, "site config {}", origin),
            Self::Markdown { file, line } => write!(f, "{}:{}", file.display(), line),
        }
    }
}

/// A link whose target is not a route of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub source: LinkSource,
    /// Target as written
    pub target: String,
    /// Site path the target resolved to
    pub resolved: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target == self.resolved {
            write!(f, "{} (in {})", self.target, self.source)
        } else {
            write!(
                f,
                "{} resolved to {} (in {})",
                self.target, self.resolved, self.source
            )
        }
    }
}

/// A Markdown file reference (`[x](other.md)`) that names no content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenMarkdownLink {
    /// Page containing the link, relative to the site directory
    pub file: PathBuf,
    pub line: usize,
    pub target: String,
}

impl fmt::Display for BrokenMarkdownLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in {}:{})", self.target, self.file.display(), self.line)
    }
}

/// Errors raised when a broken-link policy is `throw`.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Found {} broken link(s):{}", .0.len(), bullet_list(.0))]
    BrokenLinks(Vec<BrokenLink>),

    #[error("Found {} broken Markdown link(s):{}", .0.len(), bullet_list(.0))]
    BrokenMarkdownLinks(Vec<BrokenMarkdownLink>),
}

fn bullet_list<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|i| format!("\n  - {}", i)).collect()
}

/// How many offenders each non-fatal policy handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enforcement {
    pub warned: usize,
    pub logged: usize,
    pub ignored: usize,
}

/// Everything the link checker found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub broken_links: Vec<BrokenLink>,
    pub broken_markdown_links: Vec<BrokenMarkdownLink>,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.broken_links.is_empty() && self.broken_markdown_links.is_empty()
    }

    /// Apply the configured policies.
    ///
    /// Markdown file references are handled first under
    /// `onBrokenMarkdownLinks`, then routes under `onBrokenLinks`. A `throw`
    /// policy with offenders returns an error carrying all of them.
    pub fn enforce(&self, config: &SiteConfig) -> Result<Enforcement, CheckError> {
        let mut outcome = Enforcement::default();

        if apply(
            config.on_broken_markdown_links(),
            "Broken Markdown link",
            &self.broken_markdown_links,
            &mut outcome,
        ) {
            return Err(CheckError::BrokenMarkdownLinks(
                self.broken_markdown_links.clone(),
            ));
        }

        if apply(
            config.on_broken_links(),
            "Broken link",
            &self.broken_links,
            &mut outcome,
        ) {
            return Err(CheckError::BrokenLinks(self.broken_links.clone()));
        }

        Ok(outcome)
    }
}

/// Report `items` under `policy`. Returns `true` if the build must fail.
fn apply<T: fmt::Display>(
    policy: LinkPolicy,
    kind: &str,
    items: &[T],
    outcome: &mut Enforcement,
) -> bool {
    if items.is_empty() {
        return false;
    }

    match policy {
        LinkPolicy::Throw => return true,
        LinkPolicy::Warn => {
            for item in items {
                tracing::warn!("{}: {}", kind, item);
            }
            outcome.warned += items.len();
        }
        LinkPolicy::Log => {
            for item in items {
                tracing::info!("{}: {}", kind, item);
            }
            outcome.logged += items.len();
        }
        LinkPolicy::Ignore => outcome.ignored += items.len(),
    }

    false
}
