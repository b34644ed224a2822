//! Error taxonomy for the multiverse core.

use thiserror::Error;

/// What kind of entity a `NotFound` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Reality,
    Snapshot,
    Template,
    Skill,
    RoadmapItem,
    Scenario,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Reality => "reality",
            EntityKind::Snapshot => "snapshot",
            EntityKind::Template => "template",
            EntityKind::Skill => "skill",
            EntityKind::RoadmapItem => "roadmap item",
            EntityKind::Scenario => "scenario",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum MultiverseError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MultiverseError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        MultiverseError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MultiverseError::NotFound { .. })
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, MultiverseError::InvalidOperation(_))
    }
}

pub type Result<T> = std::result::Result<T, MultiverseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = MultiverseError::not_found(EntityKind::Snapshot, "snap-1");
        assert_eq!(err.to_string(), "snapshot not found: snap-1");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_operation());
    }
}
