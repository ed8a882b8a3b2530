//! KDL configuration parsing for orghome.
//!
//! This crate handles parsing of the site configuration (orghome.kdl):
//! - Server bind address
//! - UI paging sizes and search behaviour
//! - Mirror feature switches

pub mod error;
pub mod site;

pub use error::{ConfigError, ConfigResult};
pub use site::{
    DatabaseConfig, MirrorConfig, ServerConfig, SiteConfig, UiConfig, load_site_config,
    parse_site_config,
};
