//! Career Multiverse Types
//!
//! Core data structures for the reality branching layer.
//! A `StudentProfile` owns every `CareerReality`; each reality owns its
//! skills, milestones, resume and snapshot history outright, so cloning a
//! reality always produces an independent deep copy.
//!
//! The serialized form uses camelCase keys and the same string tags as the
//! browser build, so existing records load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RealityId = String;
pub type MilestoneId = String;
pub type SkillId = String;

/// Generates a fresh random identifier
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================
// SKILLS
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Technical,
    Soft,
    Domain,
    Certification,
}

/// A skill held in a reality, or required by a milestone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    /// 0-100
    pub proficiency: u8,
    /// Level required for a specific goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_proficiency: Option<u8>,
}

impl Skill {
    pub fn new(name: &str, category: SkillCategory, proficiency: u8) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            category,
            proficiency: proficiency.min(100),
            target_proficiency: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_target(mut self, target: u8) -> Self {
        self.target_proficiency = Some(target.min(100));
        self
    }
}

// ============================================================
// MILESTONES
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Education,
    Project,
    Internship,
    Certification,
    Job,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Planned,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    pub status: MilestoneStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub skills_gained: Vec<Skill>,
    /// Skills (and minimum proficiency) needed to start this milestone
    #[serde(default)]
    pub requirements: Vec<Skill>,
}

impl Milestone {
    pub fn new(title: &str, milestone_type: MilestoneType) -> Self {
        Self {
            id: new_id(),
            title: title.to_string(),
            description: String::new(),
            milestone_type,
            status: MilestoneStatus::Planned,
            start_date: None,
            end_date: None,
            skills_gained: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn requiring(mut self, skill: Skill) -> Self {
        self.requirements.push(skill);
        self
    }
}

// ============================================================
// RESUME DATA
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResumeLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<ResumeLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeItem {
    pub id: String,
    /// Role or degree
    pub title: String,
    /// Company or university
    pub subtitle: String,
    pub date_range: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSectionType {
    Experience,
    Education,
    Project,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeSection {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: ResumeSectionType,
    #[serde(default)]
    pub items: Vec<ResumeItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<ResumeSection>,
}

// ============================================================
// METRICS & ATTRIBUTES
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetrics {
    pub weekly_hours: u32,
    pub projected_months: u32,
    pub employability_score: u32,
    /// (min, max)
    pub salary_range: (u32, u32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LearningStyle {
    Theory,
    Practical,
    #[default]
    Mixed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InterviewFocus {
    #[serde(rename = "DSA")]
    Dsa,
    #[serde(rename = "System Design")]
    SystemDesign,
    Behavioral,
    Portfolio,
    #[serde(rename = "Take-home")]
    TakeHome,
}

impl InterviewFocus {
    pub fn label(&self) -> &'static str {
        match self {
            InterviewFocus::Dsa => "DSA",
            InterviewFocus::SystemDesign => "System Design",
            InterviewFocus::Behavioral => "Behavioral",
            InterviewFocus::Portfolio => "Portfolio",
            InterviewFocus::TakeHome => "Take-home",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CompanyType {
    Product,
    Service,
    Startup,
    Research,
    Freelance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RealityAttributes {
    pub learning_style: LearningStyle,
    /// Ordered by first insertion, no duplicates
    #[serde(default)]
    pub interview_focus: Vec<InterviewFocus>,
    #[serde(default)]
    pub company_type: Vec<CompanyType>,
}

// ============================================================
// ROADMAP
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Course,
    Book,
    Project,
    Article,
    Video,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceStatus {
    Todo,
    InProgress,
    Completed,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Todo => "todo",
            ResourceStatus::InProgress => "in-progress",
            ResourceStatus::Completed => "completed",
        }
    }
}

/// A structured entry in a reality's learning roadmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: ResourceStatus,
    /// e.g. "4 weeks", "10 hours"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub skills_targeted: Vec<String>,
}

impl LearningResource {
    pub fn new(title: &str, resource_type: ResourceType) -> Self {
        Self {
            id: new_id(),
            title: title.to_string(),
            resource_type,
            url: None,
            status: ResourceStatus::Todo,
            estimated_time: None,
            skills_targeted: Vec::new(),
        }
    }
}

// ============================================================
// REALITIES & SNAPSHOTS
// ============================================================

/// A point-in-time copy of a reality, taken before a mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealitySnapshot {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// e.g. "Added skill: Python"
    pub description: String,
    /// Always has an empty `history`; the chain lives on the reality itself.
    pub state: CareerReality,
}

impl RealitySnapshot {
    pub fn capture(reality: &CareerReality, description: &str) -> Self {
        let state = CareerReality {
            history: Vec::new(),
            ..reality.clone()
        };
        Self {
            id: new_id(),
            timestamp: Utc::now(),
            description: description.to_string(),
            state,
        }
    }
}

/// One branch of the multiverse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CareerReality {
    pub id: RealityId,
    /// None for root realities
    pub parent_id: Option<RealityId>,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,

    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub target_roles: Vec<String>,
    /// Legacy flat list of resource names
    #[serde(default)]
    pub learning_resources: Vec<String>,
    #[serde(default)]
    pub roadmap: Vec<LearningResource>,
    #[serde(default)]
    pub skills: Vec<Skill>,

    #[serde(default)]
    pub metrics: ResultMetrics,
    #[serde(default)]
    pub attributes: RealityAttributes,

    #[serde(default)]
    pub resume_data: ResumeData,

    /// Newest first
    #[serde(default)]
    pub history: Vec<RealitySnapshot>,
}

impl CareerReality {
    /// Creates an empty root reality
    pub fn new_root(name: &str, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            parent_id: None,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            last_modified_at: now,
            milestones: Vec::new(),
            target_roles: Vec::new(),
            learning_resources: Vec::new(),
            roadmap: Vec::new(),
            skills: Vec::new(),
            metrics: ResultMetrics::default(),
            attributes: RealityAttributes::default(),
            resume_data: ResumeData::default(),
            history: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// First skill with exactly this name
    pub fn skill_named(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn snapshot(&self, snapshot_id: &str) -> Option<&RealitySnapshot> {
        self.history.iter().find(|s| s.id == snapshot_id)
    }

    pub fn touch(&mut self) {
        self.last_modified_at = Utc::now();
    }
}

// ============================================================
// STUDENT PROFILE
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpaRecord {
    /// e.g. "Fall 2023"
    pub term: String,
    pub gpa: f64,
}

/// The aggregate root: every reality belongs to exactly one profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Demo credential only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// e.g. "Sophomore"
    pub year: String,
    #[serde(default)]
    pub gpa_history: Vec<GpaRecord>,

    pub realities: Vec<CareerReality>,
    pub active_reality_id: RealityId,
}

impl StudentProfile {
    pub fn reality(&self, id: &str) -> Option<&CareerReality> {
        self.realities.iter().find(|r| r.id == id)
    }

    pub fn reality_mut(&mut self, id: &str) -> Option<&mut CareerReality> {
        self.realities.iter_mut().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.realities.iter().any(|r| r.id == id)
    }

    pub fn active_reality(&self) -> Option<&CareerReality> {
        self.reality(&self.active_reality_id)
    }

    /// Average GPA across all recorded terms, 0.0 when empty
    pub fn average_gpa(&self) -> f64 {
        if self.gpa_history.is_empty() {
            return 0.0;
        }
        let total: f64 = self.gpa_history.iter().map(|r| r.gpa).sum();
        total / self.gpa_history.len() as f64
    }

    /// Checks the aggregate invariants: at least one reality, and the
    /// active id resolves.
    pub fn is_consistent(&self) -> bool {
        !self.realities.is_empty() && self.contains(&self.active_reality_id)
    }
}
