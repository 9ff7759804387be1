//! Resolves configured and authored links against the site's routes.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use portico_config::{is_external, SiteConfig};
use portico_content::{resolve_relative, ContentFile, ContentTree, MarkdownLink};

use crate::report::{BrokenLink, BrokenMarkdownLink, LinkReport, LinkSource};

/// Checks every internal link of a site.
pub struct LinkChecker<'a> {
    config: &'a SiteConfig,
    tree: &'a ContentTree,
}

impl<'a> LinkChecker<'a> {
    pub fn new(config: &'a SiteConfig, tree: &'a ContentTree) -> Self {
        Self { config, tree }
    }

    /// Collect every broken link. Policies are applied separately by
    /// [`LinkReport::enforce`].
    pub fn check(&self) -> LinkReport {
        let mut report = LinkReport::default();

        self.check_config_links(&mut report);

        for file in self.tree.markdown_files() {
            // Drafts are not published, so their links never render.
            let Some(route) = &file.route else {
                continue;
            };
            for link in &file.links {
                self.check_markdown_link(file, route, link, &mut report);
            }
        }

        tracing::debug!(
            "Checked links against {} routes: {} broken, {} broken Markdown references",
            self.tree.routes().len(),
            report.broken_links.len(),
            report.broken_markdown_links.len()
        );

        report
    }

    fn check_config_links(&self, report: &mut LinkReport) {
        for link in self.config.internal_links() {
            let resolved = self.config.resolve_path(link.target);
            if !self.tree.routes().contains(&resolved) {
                report.broken_links.push(BrokenLink {
                    source: LinkSource::Config(link.origin),
                    target: link.target.to_string(),
                    resolved,
                });
            }
        }
    }

    fn check_markdown_link(
        &self,
        file: &ContentFile,
        route: &str,
        link: &MarkdownLink,
        report: &mut LinkReport,
    ) {
        let path = link.path();
        if path.is_empty() || link.is_fragment_only() || is_external(&link.target) {
            return;
        }

        let source = LinkSource::Markdown {
            file: file.site_path.clone(),
            line: link.line,
        };

        if link.is_file_reference() {
            let decoded = decode(path);
            match self.referenced_source(file, &decoded) {
                None => report.broken_markdown_links.push(BrokenMarkdownLink {
                    file: file.site_path.clone(),
                    line: link.line,
                    target: link.target.clone(),
                }),
                // The file exists but will not be published.
                Some(target) if target.route.is_none() => report.broken_links.push(BrokenLink {
                    source,
                    target: link.target.clone(),
                    resolved: target.site_path.display().to_string(),
                }),
                Some(_) => {}
            }
            return;
        }

        let resolved = if path.starts_with('/') {
            self.config.resolve_path(path)
        } else if self.config.trailing_slash() == Some(true) {
            resolve_relative(&format!("{}/", route.trim_end_matches('/')), path)
        } else {
            resolve_relative(route, path)
        };

        if !self.tree.routes().contains(&resolved) {
            report.broken_links.push(BrokenLink {
                source,
                target: link.target.clone(),
                resolved,
            });
        }
    }

    /// Find the content file a Markdown reference names.
    ///
    /// Candidates are tried in order: the referencing file's directory
    /// (skipped for `/`-rooted paths), the docs directory, then the site
    /// directory (skipped for `./` and `../` paths).
    fn referenced_source(&self, file: &ContentFile, path: &str) -> Option<&'a ContentFile> {
        let rooted = path.starts_with('/');
        let explicit = path.starts_with("./") || path.starts_with("../");
        let relative = path.trim_start_matches('/');

        let mut candidates = Vec::with_capacity(3);
        if !rooted {
            candidates.push(
                file.site_path
                    .parent()
                    .unwrap_or(Path::new(""))
                    .join(relative),
            );
        }
        candidates.push(Path::new(&self.config.docs().path).join(relative));
        if !explicit {
            candidates.push(PathBuf::from(relative));
        }

        candidates
            .iter()
            .find_map(|candidate| self.tree.source(candidate))
    }
}

/// Percent-decode a file reference, keeping it as written if it is not UTF-8.
fn decode(path: &str) -> String {
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
