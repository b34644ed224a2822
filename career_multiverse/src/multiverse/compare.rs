//! Comparison Engine
//!
//! Computes what two realities have in common and where they diverge, and
//! runs the glitch rules that flag plans which cannot coexist.
//!
//! Skills are matched by exact name because forks drift apart in skill ids;
//! milestones are matched by id because a forked milestone keeps its id.

use super::types::{CareerReality, CompanyType, InterviewFocus, Milestone, Skill};
use crate::config::ComparisonConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GlitchKind {
    TimeParadox,
    CognitiveDissonance,
    GoalMisalignment,
    MissingPrerequisite,
}

impl GlitchKind {
    pub fn label(&self) -> &'static str {
        match self {
            GlitchKind::TimeParadox => "Time Paradox",
            GlitchKind::CognitiveDissonance => "Cognitive Dissonance",
            GlitchKind::GoalMisalignment => "Goal Misalignment",
            GlitchKind::MissingPrerequisite => "Missing Prerequisite",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            GlitchKind::TimeParadox | GlitchKind::MissingPrerequisite => Severity::High,
            GlitchKind::CognitiveDissonance | GlitchKind::GoalMisalignment => Severity::Medium,
        }
    }
}

/// A detected conflict between (or inside) two realities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Glitch {
    pub kind: GlitchKind,
    pub severity: Severity,
    pub message: String,
}

impl Glitch {
    fn new(kind: GlitchKind, message: String) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UniqueItems {
    pub skills: Vec<Skill>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedSkill {
    pub name: String,
    pub proficiency_a: u8,
    pub proficiency_b: u8,
    /// proficiency_a - proficiency_b
    pub diff: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealityComparison {
    pub reality_a: CareerReality,
    pub reality_b: CareerReality,
    pub unique_to_a: UniqueItems,
    pub unique_to_b: UniqueItems,
    pub shared_skills: Vec<SharedSkill>,
    pub glitches: Vec<Glitch>,
}

impl RealityComparison {
    pub fn has_glitch(&self, kind: GlitchKind) -> bool {
        self.glitches.iter().any(|g| g.kind == kind)
    }

    pub fn glitches_of(&self, kind: GlitchKind) -> impl Iterator<Item = &Glitch> {
        self.glitches.iter().filter(move |g| g.kind == kind)
    }
}

fn unique_items(own: &CareerReality, other: &CareerReality) -> UniqueItems {
    let other_skills: HashSet<&str> = other.skills.iter().map(|s| s.name.as_str()).collect();
    let other_milestones: HashSet<&str> = other.milestones.iter().map(|m| m.id.as_str()).collect();

    UniqueItems {
        skills: own
            .skills
            .iter()
            .filter(|s| !other_skills.contains(s.name.as_str()))
            .cloned()
            .collect(),
        milestones: own
            .milestones
            .iter()
            .filter(|m| !other_milestones.contains(m.id.as_str()))
            .cloned()
            .collect(),
    }
}

/// Skills of A that B also has, in A's order
pub fn shared_skills(a: &CareerReality, b: &CareerReality) -> Vec<SharedSkill> {
    a.skills
        .iter()
        .filter_map(|sa| {
            b.skill_named(&sa.name).map(|sb| SharedSkill {
                name: sa.name.clone(),
                proficiency_a: sa.proficiency,
                proficiency_b: sb.proficiency,
                diff: i16::from(sa.proficiency) - i16::from(sb.proficiency),
            })
        })
        .collect()
}

pub fn compare(a: &CareerReality, b: &CareerReality, config: &ComparisonConfig) -> RealityComparison {
    RealityComparison {
        reality_a: a.clone(),
        reality_b: b.clone(),
        unique_to_a: unique_items(a, b),
        unique_to_b: unique_items(b, a),
        shared_skills: shared_skills(a, b),
        glitches: detect_glitches(a, b, config),
    }
}

// ============================================================
// GLITCH RULES
// ============================================================

fn prep_style_conflict(first: &CareerReality, second: &CareerReality) -> Option<Glitch> {
    let grinding = first.attributes.interview_focus.contains(&InterviewFocus::Dsa);
    let portfolio = second
        .attributes
        .interview_focus
        .contains(&InterviewFocus::Portfolio);
    (grinding && portfolio).then(|| {
        Glitch::new(
            GlitchKind::CognitiveDissonance,
            format!(
                "Conflicting prep styles: '{}' requires DSA grinding, while '{}' needs creative Portfolio work. Hard to switch context.",
                first.name, second.name
            ),
        )
    })
}

fn goal_conflict(first: &CareerReality, second: &CareerReality) -> Option<Glitch> {
    let research = first.attributes.company_type.contains(&CompanyType::Research);
    let startup = second.attributes.company_type.contains(&CompanyType::Startup);
    (research && startup).then(|| {
        Glitch::new(
            GlitchKind::GoalMisalignment,
            format!(
                "Target mismatch: '{}' aims at Research roles that require publications, while '{}' targets Startups that value shipping speed.",
                first.name, second.name
            ),
        )
    })
}

/// Milestone requirements a reality does not meet with its own skills
pub fn missing_prerequisites(reality: &CareerReality) -> Vec<Glitch> {
    let mut glitches = Vec::new();
    for milestone in &reality.milestones {
        for required in &milestone.requirements {
            let held = reality.skill_named(&required.name);
            if held.map_or(true, |s| s.proficiency < required.proficiency) {
                let have = held
                    .map(|s| format!("{}%", s.proficiency))
                    .unwrap_or_else(|| "none".to_string());
                glitches.push(Glitch::new(
                    GlitchKind::MissingPrerequisite,
                    format!(
                        "In '{}', milestone '{}' requires {} (> {}%), but you have {}.",
                        reality.name, milestone.title, required.name, required.proficiency, have
                    ),
                ));
            }
        }
    }
    glitches
}

/// Runs every rule; all matches are reported.
///
/// The prep-style and goal rules look from A to B only, unless
/// `symmetric_conflicts` is set.
pub fn detect_glitches(a: &CareerReality, b: &CareerReality, config: &ComparisonConfig) -> Vec<Glitch> {
    let mut glitches = Vec::new();

    let combined = u64::from(a.metrics.weekly_hours) + u64::from(b.metrics.weekly_hours);
    if combined > u64::from(config.weekly_hours_limit) {
        glitches.push(Glitch::new(
            GlitchKind::TimeParadox,
            format!(
                "Combined time commitment ({} hrs/week) exceeds physical limits. High burnout risk.",
                combined
            ),
        ));
    }

    let mut directional: Vec<Option<Glitch>> = vec![prep_style_conflict(a, b)];
    if config.symmetric_conflicts {
        directional.push(prep_style_conflict(b, a));
    }
    directional.push(goal_conflict(a, b));
    if config.symmetric_conflicts {
        directional.push(goal_conflict(b, a));
    }
    glitches.extend(directional.into_iter().flatten());

    glitches.extend(missing_prerequisites(a));
    glitches.extend(missing_prerequisites(b));

    glitches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiverse::types::{MilestoneType, SkillCategory};

    fn reality(name: &str, skills: &[(&str, u8)], hours: u32) -> CareerReality {
        let mut r = CareerReality::new_root(name, "");
        r.skills = skills
            .iter()
            .map(|(n, p)| Skill::new(n, SkillCategory::Technical, *p))
            .collect();
        r.metrics.weekly_hours = hours;
        r
    }

    #[test]
    fn test_unique_and_shared_skills() {
        let a = reality("A", &[("Python", 70), ("SQL", 40)], 10);
        let b = reality("B", &[("Python", 90), ("React", 50)], 10);

        let result = compare(&a, &b, &ComparisonConfig::default());
        assert_eq!(result.unique_to_a.skills.len(), 1);
        assert_eq!(result.unique_to_a.skills[0].name, "SQL");
        assert_eq!(result.unique_to_b.skills[0].name, "React");
        assert_eq!(
            result.shared_skills,
            vec![SharedSkill {
                name: "Python".to_string(),
                proficiency_a: 70,
                proficiency_b: 90,
                diff: -20,
            }]
        );
        assert!(result.glitches.is_empty());
    }

    #[test]
    fn test_skill_names_are_case_sensitive() {
        let a = reality("A", &[("python", 70)], 0);
        let b = reality("B", &[("Python", 70)], 0);
        let result = compare(&a, &b, &ComparisonConfig::default());
        assert!(result.shared_skills.is_empty());
        assert_eq!(result.unique_to_a.skills.len(), 1);
    }

    #[test]
    fn test_milestones_match_by_id_not_title() {
        let mut a = reality("A", &[], 0);
        let mut b = reality("B", &[], 0);
        a.milestones.push(Milestone::new("Internship", MilestoneType::Internship).with_id("m1"));
        b.milestones.push(Milestone::new("Internship", MilestoneType::Internship).with_id("m2"));
        b.milestones.push(Milestone::new("Renamed", MilestoneType::Job).with_id("m1"));

        let result = compare(&a, &b, &ComparisonConfig::default());
        assert!(result.unique_to_a.milestones.is_empty());
        assert_eq!(result.unique_to_b.milestones.len(), 1);
        assert_eq!(result.unique_to_b.milestones[0].id, "m2");
    }

    #[test]
    fn test_time_paradox_threshold() {
        let config = ComparisonConfig::default();
        let a = reality("A", &[], 45);
        let b = reality("B", &[], 55);
        let glitches = detect_glitches(&a, &b, &config);
        assert_eq!(glitches.len(), 1);
        assert_eq!(glitches[0].kind, GlitchKind::TimeParadox);
        assert_eq!(glitches[0].severity, Severity::High);

        let at_limit = reality("C", &[], 15);
        assert!(detect_glitches(&a, &at_limit, &config).is_empty());
    }

    #[test]
    fn test_directional_conflicts() {
        let mut a = reality("A", &[], 0);
        let mut b = reality("B", &[], 0);
        a.attributes.interview_focus = vec![InterviewFocus::Dsa];
        a.attributes.company_type = vec![CompanyType::Research];
        b.attributes.interview_focus = vec![InterviewFocus::Portfolio];
        b.attributes.company_type = vec![CompanyType::Startup];

        let config = ComparisonConfig::default();
        let forward = detect_glitches(&a, &b, &config);
        let kinds: Vec<GlitchKind> = forward.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![GlitchKind::CognitiveDissonance, GlitchKind::GoalMisalignment]
        );
        assert!(forward.iter().all(|g| g.severity == Severity::Medium));

        assert!(detect_glitches(&b, &a, &config).is_empty());

        let symmetric = ComparisonConfig {
            symmetric_conflicts: true,
            ..Default::default()
        };
        assert_eq!(detect_glitches(&b, &a, &symmetric).len(), 2);
        assert_eq!(detect_glitches(&a, &b, &symmetric).len(), 2);
    }

    #[test]
    fn test_missing_prerequisites_per_reality() {
        let mut a = reality("A", &[("Python", 40)], 0);
        a.milestones.push(
            Milestone::new("ML Internship", MilestoneType::Internship)
                .requiring(Skill::new("Python", SkillCategory::Technical, 60))
                .requiring(Skill::new("Statistics", SkillCategory::Technical, 50)),
        );
        // B holding the skills does not satisfy A's milestone
        let b = reality("B", &[("Python", 95), ("Statistics", 95)], 0);

        let glitches = detect_glitches(&a, &b, &ComparisonConfig::default());
        assert_eq!(glitches.len(), 2);
        assert!(glitches.iter().all(|g| g.kind == GlitchKind::MissingPrerequisite));
        assert!(glitches[0].message.contains("you have 40%"));
        assert!(glitches[1].message.contains("you have none"));
    }

    #[test]
    fn test_missing_prerequisite_in_second_reality() {
        let a = reality("A", &[("Python", 95)], 0);
        let mut b = reality("B", &[("Python", 30)], 0);
        b.milestones.push(
            Milestone::new("Data Internship", MilestoneType::Internship)
                .requiring(Skill::new("Python", SkillCategory::Technical, 60)),
        );

        let glitches = detect_glitches(&a, &b, &ComparisonConfig::default());
        assert_eq!(glitches.len(), 1);
        assert_eq!(glitches[0].kind, GlitchKind::MissingPrerequisite);
        assert!(glitches[0].message.starts_with("In 'B', milestone 'Data Internship'"));
        assert!(glitches[0].message.contains("you have 30%"));
    }

    #[test]
    fn test_missing_prerequisites_list_a_before_b() {
        let mut a = reality("A", &[], 0);
        a.milestones.push(
            Milestone::new("Research Role", MilestoneType::Job)
                .requiring(Skill::new("Statistics", SkillCategory::Technical, 70)),
        );
        let mut b = reality("B", &[], 0);
        b.milestones.push(
            Milestone::new("Frontend Role", MilestoneType::Job)
                .requiring(Skill::new("React", SkillCategory::Technical, 50)),
        );

        let glitches = detect_glitches(&a, &b, &ComparisonConfig::default());
        let messages: Vec<&str> = glitches.iter().map(|g| g.message.as_str()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("In 'A'"));
        assert!(messages[1].starts_with("In 'B'"));
    }

    #[test]
    fn test_requirement_met_exactly() {
        let mut a = reality("A", &[("Python", 60)], 0);
        a.milestones.push(
            Milestone::new("Job", MilestoneType::Job)
                .requiring(Skill::new("Python", SkillCategory::Technical, 60)),
        );
        assert!(missing_prerequisites(&a).is_empty());
    }
}
