//! Seed Data
//!
//! Fixed catalogs the core instantiates realities from: role templates,
//! the demo profile materialized on first read, the origin reality created
//! at signup, and the preset scenarios offered by the reality simulator.

use super::types::{
    new_id, CareerReality, CompanyType, GpaRecord, InterviewFocus, LearningStyle, Milestone,
    MilestoneStatus, MilestoneType, PersonalInfo, RealityAttributes, ResultMetrics, ResumeData,
    ResumeItem, ResumeLink, ResumeSection, ResumeSectionType, Skill, SkillCategory,
    StudentProfile,
};
use chrono::Utc;

// ============================================================
// ROLE TEMPLATES
// ============================================================

/// A skill seeded by a template, before it receives an id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSkill {
    pub name: &'static str,
    pub category: SkillCategory,
    pub proficiency: u8,
}

const fn seed(name: &'static str, category: SkillCategory, proficiency: u8) -> SeedSkill {
    SeedSkill {
        name,
        category,
        proficiency,
    }
}

/// A named starting point for a new root reality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealityTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub role: &'static str,
    pub skills: &'static [SeedSkill],
}

const TEMPLATES: &[RealityTemplate] = &[
    RealityTemplate {
        id: "fullstack",
        name: "Full Stack Developer",
        description: "Master frontend and backend technologies to build complete web applications.",
        role: "Full Stack Developer",
        skills: &[
            seed("JavaScript", SkillCategory::Technical, 60),
            seed("React", SkillCategory::Technical, 50),
            seed("Node.js", SkillCategory::Technical, 40),
            seed("SQL", SkillCategory::Technical, 30),
        ],
    },
    RealityTemplate {
        id: "datascience",
        name: "Data Scientist",
        description: "Analyze complex data to drive business decisions using ML and statistics.",
        role: "Data Scientist",
        skills: &[
            seed("Python", SkillCategory::Technical, 60),
            seed("Statistics", SkillCategory::Technical, 50),
            seed("Machine Learning", SkillCategory::Technical, 30),
            seed("SQL", SkillCategory::Technical, 40),
        ],
    },
    RealityTemplate {
        id: "productmanager",
        name: "Product Manager",
        description: "Lead product vision, strategy, and execution.",
        role: "Product Manager",
        skills: &[
            seed("Communication", SkillCategory::Soft, 70),
            seed("User Research", SkillCategory::Domain, 50),
            seed("Agile", SkillCategory::Domain, 60),
            seed("Analytics", SkillCategory::Technical, 30),
        ],
    },
];

pub fn templates() -> &'static [RealityTemplate] {
    TEMPLATES
}

pub fn find_template(template_id: &str) -> Option<&'static RealityTemplate> {
    TEMPLATES.iter().find(|t| t.id == template_id)
}

impl RealityTemplate {
    /// Builds a fresh root reality; every seeded skill gets its own id.
    pub fn instantiate(&self, owner_name: &str, owner_email: &str) -> CareerReality {
        let mut reality = CareerReality::new_root(self.name, self.description);
        reality.target_roles = vec![self.role.to_string()];
        reality.skills = self
            .skills
            .iter()
            .map(|s| Skill::new(s.name, s.category, s.proficiency))
            .collect();
        reality.resume_data = ResumeData {
            personal_info: PersonalInfo {
                full_name: owner_name.to_string(),
                email: owner_email.to_string(),
                summary: format!("Aspiring {}", self.role),
                ..Default::default()
            },
            sections: Vec::new(),
        };
        reality
    }
}

// ============================================================
// DEFAULT PROFILES
// ============================================================

pub const DEMO_PROFILE_ID: &str = "student-1";
pub const DEMO_ROOT_REALITY_ID: &str = "root";
pub const DEMO_EMAIL: &str = "alex@example.com";

/// The demo profile materialized the first time an empty store is read
pub fn default_profile() -> StudentProfile {
    let now = Utc::now();
    let root = CareerReality {
        id: DEMO_ROOT_REALITY_ID.to_string(),
        parent_id: None,
        name: "General Explorer".to_string(),
        description: "The starting point of your journey".to_string(),
        created_at: now,
        last_modified_at: now,
        milestones: vec![Milestone {
            description: "Bachelor of Technology in Computer Science".to_string(),
            status: MilestoneStatus::InProgress,
            ..Milestone::new("Complete CS Degree", MilestoneType::Education).with_id("m1")
        }],
        target_roles: vec!["Software Engineer".to_string()],
        learning_resources: vec!["MDN Web Docs".to_string(), "CS50".to_string()],
        roadmap: Vec::new(),
        skills: vec![
            Skill::new("Communication", SkillCategory::Soft, 60).with_id("1"),
            Skill::new("Java", SkillCategory::Technical, 40).with_id("2"),
        ],
        metrics: ResultMetrics {
            weekly_hours: 15,
            projected_months: 12,
            employability_score: 65,
            salary_range: (80_000, 100_000),
        },
        attributes: RealityAttributes {
            learning_style: LearningStyle::Mixed,
            interview_focus: vec![InterviewFocus::Dsa, InterviewFocus::Behavioral],
            company_type: vec![CompanyType::Product, CompanyType::Startup],
        },
        resume_data: ResumeData {
            personal_info: PersonalInfo {
                full_name: "Alex Explorer".to_string(),
                email: DEMO_EMAIL.to_string(),
                phone: "+1 234 567 890".to_string(),
                summary: "Aspiring technology professional with a passion for building scalable systems."
                    .to_string(),
                location: "San Francisco, CA".to_string(),
                links: vec![ResumeLink {
                    label: "LinkedIn".to_string(),
                    url: "https://linkedin.com".to_string(),
                }],
            },
            sections: vec![
                ResumeSection {
                    id: "edu".to_string(),
                    title: "Education".to_string(),
                    section_type: ResumeSectionType::Education,
                    items: vec![ResumeItem {
                        id: "e1".to_string(),
                        title: "B.Tech Computer Science".to_string(),
                        subtitle: "Christ University".to_string(),
                        date_range: "2023 - 2027".to_string(),
                        description: "Focus on Data Structures, Algorithms, and Web Development."
                            .to_string(),
                        location: Some("Bangalore".to_string()),
                    }],
                },
                ResumeSection {
                    id: "exp".to_string(),
                    title: "Experience".to_string(),
                    section_type: ResumeSectionType::Experience,
                    items: Vec::new(),
                },
            ],
        },
        history: Vec::new(),
    };

    StudentProfile {
        id: DEMO_PROFILE_ID.to_string(),
        name: "Alex Explorer".to_string(),
        email: DEMO_EMAIL.to_string(),
        password_hash: None,
        year: "Junior".to_string(),
        gpa_history: vec![
            GpaRecord {
                term: "Fall 2023".to_string(),
                gpa: 3.6,
            },
            GpaRecord {
                term: "Spring 2024".to_string(),
                gpa: 3.8,
            },
        ],
        realities: vec![root],
        active_reality_id: DEMO_ROOT_REALITY_ID.to_string(),
    }
}

/// A brand-new profile with a single "Origin Reality", created at signup
pub fn origin_profile(name: &str, email: &str, credential: &str) -> StudentProfile {
    let mut origin = CareerReality::new_root(
        "Origin Reality",
        "My current timeline based on actual choices.",
    );
    origin.target_roles = vec!["Software Engineer".to_string()];
    origin.metrics = ResultMetrics {
        weekly_hours: 40,
        projected_months: 48,
        employability_score: 50,
        salary_range: (60_000, 90_000),
    };
    origin.attributes = RealityAttributes {
        learning_style: LearningStyle::Mixed,
        interview_focus: vec![InterviewFocus::Dsa, InterviewFocus::Behavioral],
        company_type: vec![CompanyType::Product],
    };
    origin.resume_data.personal_info = PersonalInfo {
        full_name: name.to_string(),
        email: email.to_string(),
        summary: "Aspiring software engineer...".to_string(),
        ..Default::default()
    };

    StudentProfile {
        id: new_id(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: Some(credential.to_string()),
        year: "Freshman".to_string(),
        gpa_history: Vec::new(),
        active_reality_id: origin.id.clone(),
        realities: vec![origin],
    }
}

// ============================================================
// SIMULATOR SCENARIOS
// ============================================================

/// Preset payloads the reality simulator injects into a reality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    SoftwareEngineer,
    DataScientist,
    ProductManager,
}

impl ScenarioKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SDE" => Some(ScenarioKind::SoftwareEngineer),
            "DS" => Some(ScenarioKind::DataScientist),
            "PM" => Some(ScenarioKind::ProductManager),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ScenarioKind::SoftwareEngineer => "SDE",
            ScenarioKind::DataScientist => "DS",
            ScenarioKind::ProductManager => "PM",
        }
    }
}

/// The fields a scenario overwrites
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub target_roles: Vec<String>,
    pub skills: Vec<Skill>,
    pub metrics: ResultMetrics,
    pub attributes: RealityAttributes,
}

fn roles(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn scenario(kind: ScenarioKind) -> Scenario {
    match kind {
        ScenarioKind::SoftwareEngineer => Scenario {
            target_roles: roles(&["Full Stack Developer", "Backend Engineer"]),
            skills: vec![
                Skill::new("React", SkillCategory::Technical, 85),
                Skill::new("Node.js", SkillCategory::Technical, 80),
                Skill::new("System Design", SkillCategory::Technical, 60),
            ],
            metrics: ResultMetrics {
                weekly_hours: 45,
                projected_months: 6,
                employability_score: 92,
                salary_range: (120_000, 160_000),
            },
            attributes: RealityAttributes {
                learning_style: LearningStyle::Practical,
                interview_focus: vec![InterviewFocus::Dsa, InterviewFocus::SystemDesign],
                company_type: vec![CompanyType::Product, CompanyType::Startup],
            },
        },
        ScenarioKind::DataScientist => Scenario {
            target_roles: roles(&["Data Scientist", "ML Engineer"]),
            skills: vec![
                Skill::new("Python", SkillCategory::Technical, 90),
                Skill::new("TensorFlow", SkillCategory::Technical, 75),
                Skill::new("Statistics", SkillCategory::Technical, 85),
            ],
            metrics: ResultMetrics {
                weekly_hours: 55,
                projected_months: 12,
                employability_score: 88,
                salary_range: (130_000, 180_000),
            },
            attributes: RealityAttributes {
                learning_style: LearningStyle::Theory,
                interview_focus: vec![
                    InterviewFocus::Dsa,
                    InterviewFocus::TakeHome,
                    InterviewFocus::Portfolio,
                ],
                company_type: vec![CompanyType::Research, CompanyType::Product],
            },
        },
        ScenarioKind::ProductManager => Scenario {
            target_roles: roles(&["Product Manager", "Product Owner"]),
            skills: vec![
                Skill::new("User Research", SkillCategory::Domain, 80),
                Skill::new("Agile", SkillCategory::Domain, 90),
                Skill::new("Wireframing", SkillCategory::Technical, 70),
            ],
            metrics: ResultMetrics {
                weekly_hours: 40,
                projected_months: 8,
                employability_score: 85,
                salary_range: (110_000, 150_000),
            },
            attributes: RealityAttributes {
                learning_style: LearningStyle::Mixed,
                interview_focus: vec![InterviewFocus::Behavioral, InterviewFocus::Portfolio],
                company_type: vec![
                    CompanyType::Product,
                    CompanyType::Startup,
                    CompanyType::Service,
                ],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_catalog() {
        let ids: Vec<&str> = templates().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["fullstack", "datascience", "productmanager"]);
        assert!(find_template("astronaut").is_none());
    }

    #[test]
    fn test_instantiate_assigns_fresh_skill_ids() {
        let template = find_template("datascience").unwrap();
        let a = template.instantiate("Sam", "sam@example.com");
        let b = template.instantiate("Sam", "sam@example.com");

        assert!(a.is_root());
        assert_eq!(a.target_roles, vec!["Data Scientist".to_string()]);
        assert_eq!(a.resume_data.personal_info.summary, "Aspiring Data Scientist");

        let ids: HashSet<&str> = a
            .skills
            .iter()
            .chain(b.skills.iter())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_default_profile_is_consistent() {
        let profile = default_profile();
        assert!(profile.is_consistent());
        assert_eq!(profile.active_reality_id, DEMO_ROOT_REALITY_ID);
    }

    #[test]
    fn test_origin_profile() {
        let profile = origin_profile("Sam", "sam@example.com", "hunter2");
        assert!(profile.is_consistent());
        assert_eq!(profile.realities.len(), 1);
        assert_eq!(profile.realities[0].name, "Origin Reality");
        assert_eq!(profile.password_hash.as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_scenario_codes() {
        for kind in [
            ScenarioKind::SoftwareEngineer,
            ScenarioKind::DataScientist,
            ScenarioKind::ProductManager,
        ] {
            assert_eq!(ScenarioKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(scenario(ScenarioKind::DataScientist).metrics.weekly_hours, 55);
    }

    #[test]
    fn test_software_engineer_scenario() {
        let sde = scenario(ScenarioKind::SoftwareEngineer);
        assert_eq!(sde.target_roles, vec!["Full Stack Developer", "Backend Engineer"]);
        let skills: Vec<(&str, u8)> = sde
            .skills
            .iter()
            .map(|s| (s.name.as_str(), s.proficiency))
            .collect();
        assert_eq!(
            skills,
            vec![("React", 85), ("Node.js", 80), ("System Design", 60)]
        );
        assert_eq!(sde.metrics.weekly_hours, 45);
        assert_eq!(
            sde.attributes.interview_focus,
            vec![InterviewFocus::Dsa, InterviewFocus::SystemDesign]
        );
    }
}
