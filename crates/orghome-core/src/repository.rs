//! Repository summaries and search options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;
use crate::organization::Viewer;
use crate::pagination::ListOptions;
use crate::sort::SearchOrder;

/// A repository as listed on an owner's home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: ResourceId,
    pub owner_id: ResourceId,
    pub name: String,
    pub description: String,
    pub language: Option<String>,
    pub is_private: bool,
    pub is_mirror: bool,
    pub num_stars: i64,
    pub num_forks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryPage {
    pub repositories: Vec<RepositorySummary>,
    pub total: i64,
    pub page: i64,
}

impl RepositoryPage {
    /// Identifiers of the repositories on this page, in page order.
    pub fn ids(&self) -> Vec<ResourceId> {
        self.repositories.iter().map(|r| r.id).collect()
    }
}

/// Criteria for a repository search.
#[derive(Debug, Clone)]
pub struct SearchRepoOptions {
    pub list: ListOptions,
    pub owner_id: ResourceId,
    /// Matched against names, and descriptions when `include_description` is set.
    pub keyword: String,
    pub language: String,
    pub order: SearchOrder,
    /// Whether private repositories may be returned to `actor`.
    pub include_private: bool,
    pub actor: Option<Viewer>,
    pub include_description: bool,
}
