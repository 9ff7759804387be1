//! Broken-link checking for portico sites.
//!
//! Resolves the internal links declared in the site configuration and written
//! in Markdown content against the routes the site will serve, then applies the
//! configured `onBrokenLinks` / `onBrokenMarkdownLinks` policies.

pub mod checker;
pub mod report;

pub use checker::LinkChecker;
pub use report::{
    BrokenLink, BrokenMarkdownLink, CheckError, Enforcement, LinkReport, LinkSource,
};
