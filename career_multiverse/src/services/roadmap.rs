//! Roadmap Service
//!
//! Fabricates a starter learning roadmap for a reality and stores it through
//! the normal update path, so the previous roadmap stays in history.

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::multiverse::history::RealityUpdate;
use crate::multiverse::manager::CareerManager;
use crate::multiverse::types::{CareerReality, LearningResource, ResourceStatus, ResourceType};

pub const ROADMAP_DESCRIPTION: &str = "AI Generated Smart Roadmap";

pub struct RoadmapService {
    manager: CareerManager,
    config: ServiceConfig,
}

/// The fixed three-item plan, tailored only by the first target role
pub fn draft_roadmap(reality: &CareerReality) -> Vec<LearningResource> {
    let focus = reality
        .target_roles
        .first()
        .map(String::as_str)
        .unwrap_or("Modern Engineering");

    vec![
        LearningResource {
            estimated_time: Some("40 hours".to_string()),
            skills_targeted: reality.target_roles.clone(),
            ..LearningResource::new(&format!("Complete Guide to {}", focus), ResourceType::Course)
        },
        LearningResource {
            estimated_time: Some("3 weeks".to_string()),
            skills_targeted: vec!["Software Engineering".to_string()],
            ..LearningResource::new(
                "Clean Code: A Handbook of Agile Software Craftsmanship",
                ResourceType::Book,
            )
        },
        LearningResource {
            status: ResourceStatus::InProgress,
            estimated_time: Some("20 hours".to_string()),
            skills_targeted: vec!["React".to_string(), "Node.js".to_string()],
            ..LearningResource::new("Build a Full Stack App with Next.js", ResourceType::Project)
        },
    ]
}

impl RoadmapService {
    pub fn new(manager: CareerManager, config: ServiceConfig) -> Self {
        Self { manager, config }
    }

    /// Replaces the reality's roadmap and returns the new items
    pub async fn generate_roadmap(&self, reality_id: &str) -> Result<Vec<LearningResource>> {
        let reality = self.manager.reality(reality_id)?;
        tokio::time::sleep(self.config.roadmap_delay).await;

        let roadmap = draft_roadmap(&reality);
        self.manager.update_reality(
            reality_id,
            vec![RealityUpdate::Roadmap(roadmap.clone())],
            ROADMAP_DESCRIPTION,
        )?;
        log::info!(
            "[roadmap] Generated {} items for '{}'",
            roadmap.len(),
            reality.name
        );
        Ok(roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiverse::store::RealityStore;
    use std::sync::Arc;

    #[test]
    fn test_draft_uses_first_target_role() {
        let mut reality = CareerReality::new_root("R", "");
        assert_eq!(
            draft_roadmap(&reality)[0].title,
            "Complete Guide to Modern Engineering"
        );

        reality.target_roles = vec!["Data Scientist".to_string(), "ML Engineer".to_string()];
        let roadmap = draft_roadmap(&reality);
        assert_eq!(roadmap.len(), 3);
        assert_eq!(roadmap[0].title, "Complete Guide to Data Scientist");
        assert_eq!(roadmap[0].skills_targeted, reality.target_roles);
        assert_eq!(roadmap[2].status, ResourceStatus::InProgress);
    }

    #[tokio::test]
    async fn test_generate_roadmap_persists_through_history() {
        let manager = CareerManager::new(Arc::new(RealityStore::in_memory()));
        let service = RoadmapService::new(manager.clone(), ServiceConfig::immediate());

        let roadmap = service.generate_roadmap("root").await.unwrap();
        let reality = manager.reality("root").unwrap();
        assert_eq!(reality.roadmap, roadmap);
        assert_eq!(reality.history.len(), 1);
        assert_eq!(reality.history[0].description, ROADMAP_DESCRIPTION);
        assert!(reality.history[0].state.roadmap.is_empty());

        assert!(service.generate_roadmap("ghost").await.unwrap_err().is_not_found());
    }
}
