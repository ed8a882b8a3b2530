//! Per-viewer relationships to repositories.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ResourceId;

/// A relationship a user can have with a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Watch,
    Star,
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipKind::Watch => write!(f, "watch"),
            RelationshipKind::Star => write!(f, "star"),
        }
    }
}

/// Repositories the viewer has a given relationship with.
///
/// There is no separate "unset" state: a viewer without a relationship, an
/// anonymous viewer and a failed lookup all produce the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipSet(HashSet<ResourceId>);

impl RelationshipSet {
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceId> {
        self.0.iter()
    }
}

impl FromIterator<ResourceId> for RelationshipSet {
    fn from_iter<I: IntoIterator<Item = ResourceId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
