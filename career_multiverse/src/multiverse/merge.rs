//! Merge Engine
//!
//! Combines two realities into a new hybrid with fixed per-field rules. A is
//! the primary parent: the merged reality points back to it and inherits its
//! resume verbatim. B's resume is not carried over.

use super::history::dedup_in_place;
use super::types::{
    new_id, CareerReality, LearningStyle, Milestone, RealityAttributes, ResultMetrics, Skill,
};
use chrono::Utc;

/// Order-preserving set union
fn union<T: Clone + PartialEq>(a: &[T], b: &[T]) -> Vec<T> {
    let mut merged: Vec<T> = a.iter().chain(b).cloned().collect();
    dedup_in_place(&mut merged);
    merged
}

/// Integer average rounded half up
fn rounded_mean(a: u32, b: u32) -> u32 {
    ((u64::from(a) + u64::from(b) + 1) / 2) as u32
}

/// Union by name; on a clash the higher proficiency wins, the first seen on a tie
pub fn merge_skills(a: &[Skill], b: &[Skill]) -> Vec<Skill> {
    let mut merged: Vec<Skill> = Vec::new();
    for skill in a.iter().chain(b) {
        match merged.iter_mut().find(|s| s.name == skill.name) {
            Some(existing) if existing.proficiency < skill.proficiency => *existing = skill.clone(),
            Some(_) => {}
            None => merged.push(skill.clone()),
        }
    }
    merged
}

/// Union by id; a later duplicate replaces the earlier one in place
pub fn merge_milestones(a: &[Milestone], b: &[Milestone]) -> Vec<Milestone> {
    let mut merged: Vec<Milestone> = Vec::new();
    for milestone in a.iter().chain(b) {
        match merged.iter_mut().find(|m| m.id == milestone.id) {
            Some(existing) => *existing = milestone.clone(),
            None => merged.push(milestone.clone()),
        }
    }
    merged
}

pub fn merge_metrics(a: &ResultMetrics, b: &ResultMetrics) -> ResultMetrics {
    ResultMetrics {
        weekly_hours: a.weekly_hours.saturating_add(b.weekly_hours),
        projected_months: a.projected_months.max(b.projected_months),
        employability_score: rounded_mean(a.employability_score, b.employability_score),
        salary_range: (
            rounded_mean(a.salary_range.0, b.salary_range.0),
            rounded_mean(a.salary_range.1, b.salary_range.1),
        ),
    }
}

pub fn merge_attributes(a: &RealityAttributes, b: &RealityAttributes) -> RealityAttributes {
    RealityAttributes {
        learning_style: LearningStyle::Mixed,
        interview_focus: union(&a.interview_focus, &b.interview_focus),
        company_type: union(&a.company_type, &b.company_type),
    }
}

/// Builds the hybrid of `a` and `b`. The result is not yet part of any profile.
pub fn merge(a: &CareerReality, b: &CareerReality, new_name: &str) -> CareerReality {
    let now = Utc::now();
    CareerReality {
        id: new_id(),
        parent_id: Some(a.id.clone()),
        name: new_name.to_string(),
        description: format!("Merged from {} and {}", a.name, b.name),
        created_at: now,
        last_modified_at: now,
        milestones: merge_milestones(&a.milestones, &b.milestones),
        target_roles: union(&a.target_roles, &b.target_roles),
        learning_resources: union(&a.learning_resources, &b.learning_resources),
        roadmap: Vec::new(),
        skills: merge_skills(&a.skills, &b.skills),
        metrics: merge_metrics(&a.metrics, &b.metrics),
        attributes: merge_attributes(&a.attributes, &b.attributes),
        resume_data: a.resume_data.clone(),
        history: Vec::new(),
    }
}
