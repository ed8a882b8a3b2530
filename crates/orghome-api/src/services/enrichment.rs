//! Per-viewer watch/star marks for a page of repositories.
//!
//! Both lookups run concurrently and are joined before returning. A failed
//! lookup is logged and leaves its set empty; it never fails the page or
//! cancels the other lookup.

use orghome_core::ResourceId;
use orghome_core::relationship::{RelationshipKind, RelationshipSet};
use orghome_db::RelationshipRepo;
use tracing::warn;

/// Repositories on the current page the viewer watches and has starred.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub watched: RelationshipSet,
    pub starred: RelationshipSet,
}

/// Look up which of `repo_ids` `viewer_id` watches and has starred.
pub async fn enrich(
    relationships: &dyn RelationshipRepo,
    viewer_id: ResourceId,
    repo_ids: &[ResourceId],
) -> Enrichment {
    if repo_ids.is_empty() {
        return Enrichment::default();
    }

    // join!, not try_join!: each lookup owns its slot and fails on its own.
    let (watched, starred) = tokio::join!(
        lookup(relationships, RelationshipKind::Watch, viewer_id, repo_ids),
        lookup(relationships, RelationshipKind::Star, viewer_id, repo_ids),
    );

    Enrichment { watched, starred }
}

async fn lookup(
    relationships: &dyn RelationshipRepo,
    kind: RelationshipKind,
    viewer_id: ResourceId,
    repo_ids: &[ResourceId],
) -> RelationshipSet {
    match relationships
        .filter_by_relationship(kind, viewer_id, repo_ids)
        .await
    {
        Ok(ids) => ids.into_iter().filter(|id| repo_ids.contains(id)).collect(),
        Err(e) => {
            warn!(
                viewer = %viewer_id,
                kind = %kind,
                error = %e,
                "Failed getting related repository ids"
            );
            RelationshipSet::default()
        }
    }
}
