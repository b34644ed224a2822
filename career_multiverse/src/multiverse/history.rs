//! Mutation & History Engine
//!
//! Every change to a reality goes through `update_reality`, which captures a
//! deep copy of the pre-mutation state at the front of the reality's history
//! (newest first) before applying a set of typed field updates. `rollback`
//! restores a captured state without discarding the chain that led away
//! from it.
//!
//! The history cap is enforced after every history-extending operation,
//! rollback included.

use super::types::{
    CareerReality, LearningResource, Milestone, RealityAttributes, RealitySnapshot, ResultMetrics,
    ResumeData, Skill, StudentProfile,
};
use crate::error::{EntityKind, MultiverseError, Result};
use serde::{Deserialize, Serialize};

// ============================================================
// UPDATE COMMANDS
// ============================================================

/// A replacement for one group of reality fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum RealityUpdate {
    Rename(String),
    Describe(String),
    Skills(Vec<Skill>),
    Milestones(Vec<Milestone>),
    TargetRoles(Vec<String>),
    LearningResources(Vec<String>),
    Roadmap(Vec<LearningResource>),
    Metrics(ResultMetrics),
    Attributes(RealityAttributes),
    Resume(ResumeData),
}

fn check_skill(skill: &Skill, context: &str) -> Result<()> {
    if skill.name.trim().is_empty() {
        return Err(MultiverseError::Validation(format!(
            "{}: skill name is required",
            context
        )));
    }
    if skill.proficiency > 100 || skill.target_proficiency.map_or(false, |t| t > 100) {
        return Err(MultiverseError::Validation(format!(
            "{}: proficiency for '{}' must be within 0-100",
            context, skill.name
        )));
    }
    Ok(())
}

impl RealityUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            RealityUpdate::Rename(_) => "name",
            RealityUpdate::Describe(_) => "description",
            RealityUpdate::Skills(_) => "skills",
            RealityUpdate::Milestones(_) => "milestones",
            RealityUpdate::TargetRoles(_) => "target_roles",
            RealityUpdate::LearningResources(_) => "learning_resources",
            RealityUpdate::Roadmap(_) => "roadmap",
            RealityUpdate::Metrics(_) => "metrics",
            RealityUpdate::Attributes(_) => "attributes",
            RealityUpdate::Resume(_) => "resume_data",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            RealityUpdate::Rename(name) if name.trim().is_empty() => Err(
                MultiverseError::Validation("reality name is required".to_string()),
            ),
            RealityUpdate::Skills(skills) => {
                skills.iter().try_for_each(|s| check_skill(s, "skills"))
            }
            RealityUpdate::Milestones(milestones) => {
                for milestone in milestones {
                    if milestone.title.trim().is_empty() {
                        return Err(MultiverseError::Validation(
                            "milestone title is required".to_string(),
                        ));
                    }
                    let context = format!("milestone '{}'", milestone.title);
                    for skill in milestone.requirements.iter().chain(&milestone.skills_gained) {
                        check_skill(skill, &context)?;
                    }
                }
                Ok(())
            }
            RealityUpdate::Roadmap(items) => {
                if items.iter().any(|i| i.title.trim().is_empty()) {
                    return Err(MultiverseError::Validation(
                        "roadmap item title is required".to_string(),
                    ));
                }
                Ok(())
            }
            RealityUpdate::Metrics(metrics) => {
                // Metrics carry no hard bounds; an inverted range is only suspicious.
                let (min, max) = metrics.salary_range;
                if min > max {
                    log::warn!(
                        "[history] Salary range minimum {} exceeds maximum {}",
                        min,
                        max
                    );
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn apply(self, reality: &mut CareerReality) {
        match self {
            RealityUpdate::Rename(name) => reality.name = name,
            RealityUpdate::Describe(description) => reality.description = description,
            RealityUpdate::Skills(skills) => reality.skills = skills,
            RealityUpdate::Milestones(milestones) => reality.milestones = milestones,
            RealityUpdate::TargetRoles(roles) => reality.target_roles = roles,
            RealityUpdate::LearningResources(resources) => reality.learning_resources = resources,
            RealityUpdate::Roadmap(roadmap) => reality.roadmap = roadmap,
            RealityUpdate::Metrics(metrics) => reality.metrics = metrics,
            RealityUpdate::Attributes(mut attributes) => {
                dedup_in_place(&mut attributes.interview_focus);
                dedup_in_place(&mut attributes.company_type);
                reality.attributes = attributes;
            }
            RealityUpdate::Resume(resume) => reality.resume_data = resume,
        }
    }
}

/// Drops repeated entries, keeping first occurrences in order
pub(crate) fn dedup_in_place<T: PartialEq>(items: &mut Vec<T>) {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
}

// ============================================================
// HISTORY OPERATIONS
// ============================================================

/// Snapshots the reality, then applies `updates` in order.
///
/// All updates are validated before anything changes, so a rejected batch
/// leaves the profile untouched.
pub fn update_reality(
    profile: &mut StudentProfile,
    reality_id: &str,
    updates: Vec<RealityUpdate>,
    description: &str,
    history_limit: usize,
) -> Result<()> {
    for update in &updates {
        update.validate()?;
    }

    let reality = profile
        .reality_mut(reality_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;

    let snapshot = RealitySnapshot::capture(reality, description);
    reality.history.insert(0, snapshot);
    reality.history.truncate(history_limit);

    let fields: Vec<&str> = updates.iter().map(|u| u.field()).collect();
    for update in updates {
        update.apply(reality);
    }
    reality.touch();

    log::debug!(
        "[history] Updated reality {} ({}): {}",
        reality_id,
        fields.join(", "),
        description
    );
    Ok(())
}

/// Restores a reality to a snapshot from its own history.
///
/// The state just before the rollback is recorded as a new newest entry, and
/// the rest of the chain is kept, so the rollback itself can be undone.
pub fn rollback(
    profile: &mut StudentProfile,
    reality_id: &str,
    snapshot_id: &str,
    history_limit: usize,
) -> Result<()> {
    let parent_exists = |id: &str| profile.contains(id);
    let current = profile
        .reality(reality_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Reality, reality_id))?;
    let snapshot = current
        .snapshot(snapshot_id)
        .ok_or_else(|| MultiverseError::not_found(EntityKind::Snapshot, snapshot_id))?;

    let marker = RealitySnapshot::capture(
        current,
        &format!(
            "Rolled back to {}",
            snapshot.timestamp.format("%H:%M:%S")
        ),
    );

    let mut restored = snapshot.state.clone();
    restored.id = current.id.clone();
    // A parent deleted since the snapshot was taken stays orphaned.
    if let Some(parent) = restored.parent_id.clone() {
        if !parent_exists(&parent) {
            restored.parent_id = None;
        }
    }
    restored.history = std::iter::once(marker)
        .chain(current.history.iter().cloned())
        .collect();
    restored.history.truncate(history_limit);
    restored.touch();

    log::info!(
        "[history] Rolled back reality {} to snapshot {}",
        reality_id,
        snapshot_id
    );

    if let Some(slot) = profile.reality_mut(reality_id) {
        *slot = restored;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiverse::templates::default_profile;
    use crate::multiverse::types::SkillCategory;

    const LIMIT: usize = 50;

    fn add_skill(profile: &mut StudentProfile, name: &str, proficiency: u8) {
        let mut skills = profile.reality("root").unwrap().skills.clone();
        skills.push(Skill::new(name, SkillCategory::Technical, proficiency));
        update_reality(
            profile,
            "root",
            vec![RealityUpdate::Skills(skills)],
            &format!("Added skill: {}", name),
            LIMIT,
        )
        .unwrap();
    }

    #[test]
    fn test_update_records_previous_state_newest_first() {
        let mut profile = default_profile();
        let before = profile.reality("root").unwrap().clone();

        add_skill(&mut profile, "Python", 50);
        add_skill(&mut profile, "Rust", 30);

        let reality = profile.reality("root").unwrap();
        assert_eq!(reality.history.len(), 2);
        assert_eq!(reality.history[0].description, "Added skill: Rust");
        assert_eq!(reality.history[1].description, "Added skill: Python");
        assert_eq!(reality.history[1].state, before);
        assert_eq!(reality.history[0].state.skills.len(), 3);
        assert_eq!(reality.skills.len(), 4);
        assert!(reality.history[0].state.history.is_empty());
    }

    #[test]
    fn test_history_is_capped() {
        let mut profile = default_profile();
        for i in 0..60 {
            update_reality(
                &mut profile,
                "root",
                vec![RealityUpdate::Describe(format!("rev {}", i))],
                &format!("edit {}", i),
                LIMIT,
            )
            .unwrap();
        }
        let reality = profile.reality("root").unwrap();
        assert_eq!(reality.history.len(), LIMIT);
        assert_eq!(reality.history[0].description, "edit 59");
        assert_eq!(reality.description, "rev 59");
    }

    #[test]
    fn test_invalid_batch_changes_nothing() {
        let mut profile = default_profile();
        let original = profile.clone();

        let err = update_reality(
            &mut profile,
            "root",
            vec![
                RealityUpdate::Describe("ok".to_string()),
                RealityUpdate::Rename("   ".to_string()),
            ],
            "bad",
            LIMIT,
        )
        .unwrap_err();

        assert!(matches!(err, MultiverseError::Validation(_)));
        assert_eq!(profile, original);
    }

    #[test]
    fn test_update_unknown_reality() {
        let mut profile = default_profile();
        let err = update_reality(&mut profile, "nope", vec![], "noop", LIMIT).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_inverted_salary_range_is_accepted() {
        let mut profile = default_profile();
        let metrics = ResultMetrics {
            salary_range: (150_000, 120_000),
            ..Default::default()
        };
        update_reality(
            &mut profile,
            "root",
            vec![RealityUpdate::Metrics(metrics)],
            "salary",
            LIMIT,
        )
        .unwrap();
        assert_eq!(
            profile.reality("root").unwrap().metrics.salary_range,
            (150_000, 120_000)
        );
    }

    #[test]
    fn test_attributes_are_deduplicated() {
        use crate::multiverse::types::InterviewFocus;
        let mut profile = default_profile();
        update_reality(
            &mut profile,
            "root",
            vec![RealityUpdate::Attributes(RealityAttributes {
                interview_focus: vec![
                    InterviewFocus::Dsa,
                    InterviewFocus::Portfolio,
                    InterviewFocus::Dsa,
                ],
                ..Default::default()
            })],
            "focus",
            LIMIT,
        )
        .unwrap();
        assert_eq!(
            profile.reality("root").unwrap().attributes.interview_focus,
            vec![InterviewFocus::Dsa, InterviewFocus::Portfolio]
        );
    }

    #[test]
    fn test_rollback_restores_and_keeps_chain() {
        let mut profile = default_profile();
        add_skill(&mut profile, "Python", 50);
        add_skill(&mut profile, "Rust", 30);

        let target = profile.reality("root").unwrap().history[1].clone();
        let before_rollback = profile.reality("root").unwrap().clone();

        rollback(&mut profile, "root", &target.id, LIMIT).unwrap();

        let reality = profile.reality("root").unwrap();
        assert_eq!(reality.skills, target.state.skills);
        assert_eq!(reality.name, target.state.name);
        assert_eq!(reality.history.len(), 3);
        assert!(reality.history[0].description.starts_with("Rolled back to"));
        assert_ne!(reality.history[0].id, target.id);
        assert_eq!(reality.history[0].state.skills, before_rollback.skills);
        assert_eq!(reality.history[1..], before_rollback.history[..]);
    }

    #[test]
    fn test_rollback_respects_cap() {
        let mut profile = default_profile();
        for i in 0..LIMIT {
            update_reality(
                &mut profile,
                "root",
                vec![RealityUpdate::Describe(format!("rev {}", i))],
                "edit",
                LIMIT,
            )
            .unwrap();
        }
        let oldest = profile.reality("root").unwrap().history[LIMIT - 1].id.clone();
        rollback(&mut profile, "root", &oldest, LIMIT).unwrap();
        rollback(&mut profile, "root", &oldest, LIMIT)
            .expect_err("oldest entry was evicted by the first rollback");
        assert_eq!(profile.reality("root").unwrap().history.len(), LIMIT);
    }

    #[test]
    fn test_rollback_unknown_snapshot() {
        let mut profile = default_profile();
        let original = profile.clone();
        let err = rollback(&mut profile, "root", "missing", LIMIT).unwrap_err();
        assert!(matches!(
            err,
            MultiverseError::NotFound {
                kind: EntityKind::Snapshot,
                ..
            }
        ));
        assert_eq!(profile, original);
    }
}
