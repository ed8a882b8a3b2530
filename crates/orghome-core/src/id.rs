//! Identifiers shared by organizations, users, teams and repositories.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time-ordered (UUIDv7) identifier of any stored record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
pub struct ResourceId(Uuid);

impl ResourceId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap a key read back from the database.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The key as bound into queries.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_v7_and_distinct() {
        let first = ResourceId::new();
        let second = ResourceId::new();
        assert_ne!(first, second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
        assert_eq!(first.to_string(), first.as_uuid().to_string());
    }
}
