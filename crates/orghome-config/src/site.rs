//! Site configuration parsing.

use std::path::Path;

use crate::{ConfigError, ConfigResult};
use kdl::{KdlDocument, KdlNode};
use serde::{Deserialize, Serialize};

/// Site-wide configuration, read once at startup and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ui: UiConfig,
    pub mirror: MirrorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Upper bound on pooled PostgreSQL connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Repositories per page on owner home pages.
    pub repo_paging_num: i64,
    /// Members shown in the roster sidebar.
    pub members_paging_num: i64,
    /// Number of page links shown around the current page.
    pub pagination_window: i64,
    /// Match the search keyword against repository descriptions too.
    pub search_repo_description: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            repo_paging_num: 20,
            members_paging_num: 25,
            pagination_window: 5,
            search_repo_description: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Hide the "new pull mirror" action everywhere.
    pub disable_new_pull: bool,
}

/// Read the configuration at `path`. A missing file yields the defaults.
pub fn load_site_config(path: impl AsRef<Path>) -> ConfigResult<SiteConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_site_config(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SiteConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parse site configuration from KDL text.
pub fn parse_site_config(kdl: &str) -> ConfigResult<SiteConfig> {
    let doc: KdlDocument = kdl.parse()?;
    let mut config = SiteConfig::default();

    for node in doc.nodes() {
        match node.name().value() {
            "server" => {
                for child in child_nodes(node) {
                    if child.name().value() == "bind" {
                        config.server.bind = get_first_string_arg(child).ok_or_else(|| {
                            invalid("server.bind", "expected a string address")
                        })?;
                    }
                }
            }
            "database" => {
                for child in child_nodes(node) {
                    if child.name().value() == "max-connections" {
                        let n = get_positive_int(child, "database.max-connections")?;
                        config.database.max_connections = u32::try_from(n)
                            .map_err(|_| invalid("database.max-connections", "too large"))?;
                    }
                }
            }
            "ui" => {
                for child in child_nodes(node) {
                    match child.name().value() {
                        "repo-paging-num" => {
                            config.ui.repo_paging_num = get_positive_int(child, "ui.repo-paging-num")?;
                        }
                        "members-paging-num" => {
                            config.ui.members_paging_num =
                                get_positive_int(child, "ui.members-paging-num")?;
                        }
                        "pagination-window" => {
                            config.ui.pagination_window =
                                get_positive_int(child, "ui.pagination-window")?;
                        }
                        "search-repo-description" => {
                            config.ui.search_repo_description =
                                get_bool(child, "ui.search-repo-description")?;
                        }
                        _ => {}
                    }
                }
            }
            "mirror" => {
                for child in child_nodes(node) {
                    if child.name().value() == "disable-new-pull" {
                        config.mirror.disable_new_pull = get_bool(child, "mirror.disable-new-pull")?;
                    }
                }
            }
            _ => {} // Ignore unknown nodes
        }
    }

    Ok(config)
}

// Helper functions for extracting values from KDL nodes

fn child_nodes(node: &KdlNode) -> &[KdlNode] {
    node.children().map(|c| c.nodes()).unwrap_or(&[])
}

fn first_arg(node: &KdlNode) -> Option<&kdl::KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn get_first_string_arg(node: &KdlNode) -> Option<String> {
    first_arg(node)
        .and_then(|v| v.as_string())
        .map(|s| s.to_string())
}

fn get_positive_int(node: &KdlNode, field: &str) -> ConfigResult<i64> {
    first_arg(node)
        .and_then(|v| v.as_integer())
        .and_then(|n| i64::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid(field, "expected a positive integer"))
}

fn get_bool(node: &KdlNode, field: &str) -> ConfigResult<bool> {
    first_arg(node)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| invalid(field, "expected a boolean"))
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
