//! Content model for portico sites.
//!
//! Discovers the pages a site will serve, parses their frontmatter, computes
//! routes and extracts the links written in Markdown pages.

pub mod error;
pub mod frontmatter;
pub mod links;
pub mod route;
pub mod tree;

pub use error::ContentError;
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use links::{extract_links, MarkdownLink};
pub use route::{normalize_route, resolve_relative, RouteTable};
pub use tree::{normalize_path, ContentFile, ContentKind, ContentTree};
