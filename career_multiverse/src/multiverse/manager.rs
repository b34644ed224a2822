//! Career Manager
//!
//! The entry point UI code calls into. Every operation reads the whole
//! profile from the injected store, runs a pure operation on it, and writes
//! the whole profile back. Operations validate before mutating, so a failed
//! call never reaches `write` and the persisted state stays as it was.

use super::branch;
use super::compare::{self, RealityComparison};
use super::history::{self, RealityUpdate};
use super::merge;
use super::store::RealityStore;
use super::templates::{self, RealityTemplate, ScenarioKind};
use super::types::{
    CareerReality, GpaRecord, ResourceStatus, Skill, SkillId, StudentProfile,
};
use crate::config::ComparisonConfig;
use crate::error::{EntityKind, MultiverseError, Result};
use std::sync::Arc;

pub const MAX_GPA: f64 = 10.0;

#[derive(Clone)]
pub struct CareerManager {
    store: Arc<RealityStore>,
    comparison: ComparisonConfig,
}

impl CareerManager {
    pub fn new(store: Arc<RealityStore>) -> Self {
        Self {
            store,
            comparison: ComparisonConfig::default(),
        }
    }

    pub fn with_comparison_config(mut self, config: ComparisonConfig) -> Self {
        self.comparison = config;
        self
    }

    pub fn store(&self) -> &Arc<RealityStore> {
        &self.store
    }

    fn history_limit(&self) -> usize {
        self.store.config().history_limit
    }

    /// Read-modify-write; nothing is written when `op` fails
    fn mutate<T>(&self, op: impl FnOnce(&mut StudentProfile) -> Result<T>) -> Result<T> {
        let mut profile = self.store.read()?;
        let value = op(&mut profile)?;
        self.store.write(&profile)?;
        Ok(value)
    }

    // ============================================================
    // QUERIES
    // ============================================================

    pub fn profile(&self) -> Result<StudentProfile> {
        self.store.read()
    }

    pub fn active_reality(&self) -> Result<CareerReality> {
        let profile = self.store.read()?;
        profile
            .active_reality()
            .cloned()
            .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, &profile.active_reality_id))
    }

    pub fn reality(&self, reality_id: &str) -> Result<CareerReality> {
        self.store
            .read()?
            .reality(reality_id)
            .cloned()
            .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))
    }

    pub fn templates(&self) -> &'static [RealityTemplate] {
        templates::templates()
    }

    pub fn children(&self, reality_id: &str) -> Result<Vec<CareerReality>> {
        let profile = self.store.read()?;
        if !profile.contains(reality_id) {
            return Err(MultiverseError::not_found(EntityKind::Reality, reality_id));
        }
        Ok(branch::children(&profile, reality_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn lineage(&self, reality_id: &str) -> Result<Vec<CareerReality>> {
        let profile = self.store.read()?;
        Ok(branch::lineage(&profile, reality_id)?
            .into_iter()
            .cloned()
            .collect())
    }

    // ============================================================
    // BRANCH OPERATIONS
    // ============================================================

    pub fn fork_reality(&self, source_id: &str, new_name: &str) -> Result<CareerReality> {
        self.mutate(|profile| branch::fork(profile, source_id, new_name))
    }

    pub fn switch_reality(&self, reality_id: &str) -> Result<()> {
        self.mutate(|profile| branch::switch_active(profile, reality_id))
    }

    pub fn delete_reality(&self, reality_id: &str) -> Result<()> {
        self.mutate(|profile| branch::delete(profile, reality_id))
    }

    pub fn add_template(&self, template_id: &str) -> Result<CareerReality> {
        self.mutate(|profile| branch::add_from_template(profile, template_id))
    }

    // ============================================================
    // MUTATIONS & HISTORY
    // ============================================================

    pub fn update_reality(
        &self,
        reality_id: &str,
        updates: Vec<RealityUpdate>,
        description: &str,
    ) -> Result<()> {
        let limit = self.history_limit();
        self.mutate(|profile| {
            history::update_reality(profile, reality_id, updates, description, limit)
        })
    }

    pub fn rollback_reality(&self, reality_id: &str, snapshot_id: &str) -> Result<()> {
        let limit = self.history_limit();
        self.mutate(|profile| history::rollback(profile, reality_id, snapshot_id, limit))
    }

    /// Replaces the skill with the same id, or appends it
    pub fn upsert_skill(&self, reality_id: &str, skill: Skill) -> Result<()> {
        let limit = self.history_limit();
        self.mutate(|profile| {
            let current = profile
                .reality(reality_id)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;
            let mut skills = current.skills.clone();
            let description = match skills.iter_mut().find(|s| s.id == skill.id) {
                Some(existing) => {
                    *existing = skill.clone();
                    format!("Updated skill: {}", skill.name)
                }
                None => {
                    skills.push(skill.clone());
                    format!("Added skill: {}", skill.name)
                }
            };
            history::update_reality(
                profile,
                reality_id,
                vec![RealityUpdate::Skills(skills)],
                &description,
                limit,
            )
        })
    }

    pub fn remove_skill(&self, reality_id: &str, skill_id: &SkillId) -> Result<()> {
        let limit = self.history_limit();
        self.mutate(|profile| {
            let current = profile
                .reality(reality_id)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;
            let removed = current
                .skills
                .iter()
                .find(|s| &s.id == skill_id)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Skill, skill_id.as_str()))?;
            let description = format!("Removed skill: {}", removed.name);
            let skills = current
                .skills
                .iter()
                .filter(|s| &s.id != skill_id)
                .cloned()
                .collect();
            history::update_reality(
                profile,
                reality_id,
                vec![RealityUpdate::Skills(skills)],
                &description,
                limit,
            )
        })
    }

    pub fn set_roadmap_status(
        &self,
        reality_id: &str,
        item_id: &str,
        status: ResourceStatus,
    ) -> Result<()> {
        let limit = self.history_limit();
        self.mutate(|profile| {
            let current = profile
                .reality(reality_id)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;
            let mut roadmap = current.roadmap.clone();
            let item = roadmap
                .iter_mut()
                .find(|r| r.id == item_id)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::RoadmapItem, item_id))?;
            item.status = status;
            let description = format!("Marked '{}' as {}", item.title, status.as_str());
            history::update_reality(
                profile,
                reality_id,
                vec![RealityUpdate::Roadmap(roadmap)],
                &description,
                limit,
            )
        })
    }

    /// Completed items go back to todo; anything else becomes completed
    pub fn toggle_roadmap_item(&self, reality_id: &str, item_id: &str) -> Result<ResourceStatus> {
        let reality = self.reality(reality_id)?;
        let item = reality
            .roadmap
            .iter()
            .find(|r| r.id == item_id)
            .ok_or_else(|| MultiverseError::not_found(EntityKind::RoadmapItem, item_id))?;
        let next = match item.status {
            ResourceStatus::Completed => ResourceStatus::Todo,
            _ => ResourceStatus::Completed,
        };
        self.set_roadmap_status(reality_id, item_id, next)?;
        Ok(next)
    }

    /// Overwrites roles, skills, metrics and attributes with a preset
    pub fn apply_scenario(&self, reality_id: &str, kind: ScenarioKind) -> Result<()> {
        let scenario = templates::scenario(kind);
        self.update_reality(
            reality_id,
            vec![
                RealityUpdate::TargetRoles(scenario.target_roles),
                RealityUpdate::Skills(scenario.skills),
                RealityUpdate::Metrics(scenario.metrics),
                RealityUpdate::Attributes(scenario.attributes),
            ],
            &format!("Simulated {} scenario", kind.code()),
        )
    }

    pub fn add_gpa_record(&self, term: &str, gpa: f64) -> Result<()> {
        if term.trim().is_empty() {
            return Err(MultiverseError::Validation("term is required".to_string()));
        }
        if !gpa.is_finite() || !(0.0..=MAX_GPA).contains(&gpa) {
            return Err(MultiverseError::Validation(format!(
                "GPA must be between 0 and {}, got {}",
                MAX_GPA, gpa
            )));
        }
        self.mutate(|profile| {
            profile.gpa_history.push(GpaRecord {
                term: term.to_string(),
                gpa,
            });
            log::debug!("[manager] Added GPA {} for {}", gpa, term);
            Ok(())
        })
    }

    // ============================================================
    // COMPARE & MERGE
    // ============================================================

    pub fn compare_realities(&self, id_a: &str, id_b: &str) -> Result<RealityComparison> {
        let profile = self.store.read()?;
        let a = profile
            .reality(id_a)
            .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, id_a))?;
        let b = profile
            .reality(id_b)
            .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, id_b))?;
        Ok(compare::compare(a, b, &self.comparison))
    }

    /// Adds the hybrid of A and B to the profile; the active reality is unchanged
    pub fn merge_realities(&self, id_a: &str, id_b: &str, new_name: &str) -> Result<CareerReality> {
        if new_name.trim().is_empty() {
            return Err(MultiverseError::Validation(
                "reality name is required".to_string(),
            ));
        }
        self.mutate(|profile| {
            let a = profile
                .reality(id_a)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, id_a))?;
            let b = profile
                .reality(id_b)
                .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, id_b))?;
            let merged = merge::merge(a, b, new_name);
            log::info!(
                "[manager] Merged '{}' and '{}' into '{}' ({})",
                a.name,
                b.name,
                merged.name,
                merged.id
            );
            profile.realities.push(merged.clone());
            Ok(merged)
        })
    }
}
