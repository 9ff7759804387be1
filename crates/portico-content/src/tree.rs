//! Content discovery.
//!
//! Walks the docs, pages and static directories of a site and records every
//! file together with the route it will be served at.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use portico_config::SiteConfig;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::ContentError;
use crate::frontmatter::{extract_frontmatter, Frontmatter};
use crate::links::{extract_links, MarkdownLink};
use crate::route::{doc_route, page_route, static_route, RouteTable};

const PAGE_EXTENSIONS: &[&str] = &["md", "mdx", "js", "jsx", "ts", "tsx", "html"];

/// What part of the site a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Documentation page under the docs directory
    Doc,
    /// Standalone page under the pages directory
    Page,
    /// File copied verbatim from a static directory
    Static,
}

impl ContentKind {
    /// Whether a file at `relative` (inside this kind's directory) is content.
    fn accepts(&self, relative: &Path) -> bool {
        let ext = relative.extension().and_then(|e| e.to_str()).unwrap_or("");
        match self {
            Self::Static => true,
            Self::Doc => is_markdown_ext(ext) && !is_private(relative),
            Self::Page => {
                let name = relative.file_name().and_then(|n| n.to_str()).unwrap_or("");
                PAGE_EXTENSIONS.contains(&ext) && !is_private(relative) && !name.contains(".test.")
            }
        }
    }
}

fn is_markdown_ext(ext: &str) -> bool {
    ext == "md" || ext == "mdx"
}

/// Files and directories starting with `_` are partials, not pages.
fn is_private(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(s) => s.to_str().is_some_and(|s| s.starts_with('_')),
        _ => false,
    })
}

/// A discovered content file.
#[derive(Debug, Clone)]
pub struct ContentFile {
    pub kind: ContentKind,

    /// Path on disk
    pub source_path: PathBuf,

    /// Path relative to the site directory
    pub site_path: PathBuf,

    /// Route the file is served at; `None` for drafts
    pub route: Option<String>,

    /// Parsed frontmatter (Markdown only)
    pub frontmatter: Option<Frontmatter>,

    /// Links found in the body (Markdown only)
    pub links: Vec<MarkdownLink>,
}

impl ContentFile {
    /// Whether the file is Markdown and was scanned for links.
    pub fn is_markdown(&self) -> bool {
        self.kind != ContentKind::Static
            && is_markdown_ext(
                self.site_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or(""),
            )
    }
}

/// A file found by the directory walk, not yet read.
#[derive(Debug)]
struct Candidate {
    kind: ContentKind,
    source_path: PathBuf,
    site_path: PathBuf,
    relative: PathBuf,
}

/// Every content file of a site and the routes they produce.
#[derive(Debug)]
pub struct ContentTree {
    files: Vec<ContentFile>,
    routes: RouteTable,
    by_source: HashMap<PathBuf, usize>,
}

impl ContentTree {
    /// Discover all content below `site_dir` using the directories named in
    /// `config`. Directories that do not exist are skipped.
    pub fn discover(site_dir: &Path, config: &SiteConfig) -> Result<Self, ContentError> {
        let mut candidates = Vec::new();

        collect(site_dir, &config.docs().path, ContentKind::Doc, &mut candidates);
        collect(site_dir, &config.pages().path, ContentKind::Page, &mut candidates);
        for dir in config.static_directories() {
            collect(site_dir, dir, ContentKind::Static, &mut candidates);
        }

        let files: Vec<ContentFile> = candidates
            .into_par_iter()
            .map(|candidate| load(candidate, config))
            .collect::<Result<_, _>>()?;

        let mut routes = RouteTable::new();
        let mut by_source = HashMap::with_capacity(files.len());

        for (i, file) in files.iter().enumerate() {
            by_source.insert(file.site_path.clone(), i);

            let Some(route) = &file.route else {
                tracing::debug!("Skipping draft {}", file.site_path.display());
                continue;
            };
            if !routes.insert(route) {
                tracing::warn!(
                    "Duplicate route {} (also produced by {})",
                    route,
                    file.site_path.display()
                );
            }
        }

        tracing::info!(
            "Discovered {} content files serving {} routes",
            files.len(),
            routes.len()
        );

        Ok(Self {
            files,
            routes,
            by_source,
        })
    }

    /// All files, docs first, then pages, then static files, each in path order.
    pub fn files(&self) -> &[ContentFile] {
        &self.files
    }

    /// Files that were scanned for links.
    pub fn markdown_files(&self) -> impl Iterator<Item = &ContentFile> {
        self.files.iter().filter(|f| f.is_markdown())
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Look up a file by its path relative to the site directory.
    pub fn source(&self, site_path: &Path) -> Option<&ContentFile> {
        self.by_source
            .get(&normalize_path(site_path))
            .map(|&i| &self.files[i])
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(s) => out.push(s),
        }
    }
    out
}

fn collect(site_dir: &Path, dir: &str, kind: ContentKind, out: &mut Vec<Candidate>) {
    let root = site_dir.join(dir);
    if !root.is_dir() {
        tracing::debug!("No {:?} directory at {}", kind, root.display());
        return;
    }

    for entry in WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
        if !kind.accepts(&relative) {
            continue;
        }

        out.push(Candidate {
            kind,
            source_path: path.to_path_buf(),
            site_path: normalize_path(&Path::new(dir).join(&relative)),
            relative,
        });
    }
}

fn load(candidate: Candidate, config: &SiteConfig) -> Result<ContentFile, ContentError> {
    let base_url = config.base_url();
    let ext = candidate
        .relative
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let mut file = ContentFile {
        kind: candidate.kind,
        source_path: candidate.source_path,
        site_path: candidate.site_path,
        route: None,
        frontmatter: None,
        links: Vec::new(),
    };

    if candidate.kind == ContentKind::Static {
        file.route = Some(static_route(base_url, &candidate.relative));
        return Ok(file);
    }

    if !is_markdown_ext(ext) {
        file.route = Some(page_route(base_url, &candidate.relative, None));
        return Ok(file);
    }

    let source = fs::read_to_string(&file.source_path).map_err(|source| ContentError::Read {
        path: file.source_path.clone(),
        source,
    })?;

    let (frontmatter, body) =
        extract_frontmatter(&source).map_err(|source| ContentError::Frontmatter {
            path: file.source_path.clone(),
            source,
        })?;

    let line_offset = source[..source.len() - body.len()].matches('\n').count();
    file.links = extract_links(body, line_offset);

    let draft = frontmatter.as_ref().is_some_and(|f| f.draft);
    if !draft {
        file.route = Some(match candidate.kind {
            ContentKind::Doc => doc_route(
                base_url,
                &config.docs().route_base_path,
                &candidate.relative,
                frontmatter.as_ref(),
            ),
            _ => page_route(base_url, &candidate.relative, frontmatter.as_ref()),
        });
    }
    file.frontmatter = frontmatter;

    Ok(file)
}
