//! Site configuration model for portico documentation portals.
//!
//! Loads a declarative configuration (TOML, JSON or YAML), validates it
//! eagerly, and exposes an immutable [`SiteConfig`] to the rest of the build.

pub mod error;
pub mod link;
pub mod loader;
pub mod model;
pub mod policy;

mod raw;
mod validate;

pub use error::ConfigError;
pub use link::{is_external, with_base_url, LinkTarget};
pub use loader::ConfigFormat;
pub use model::{
    ConfigLink, DocsOptions, Footer, FooterLink, FooterLinkGroup, FooterStyle, HeadTag, Logo,
    Navbar, NavbarItem, NavbarPosition, PagesOptions, SiteConfig, ThemeConfig, ThemeOptions,
};
pub use policy::{LinkPolicy, UnknownPolicy};
