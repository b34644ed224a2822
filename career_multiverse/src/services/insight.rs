//! AI Insight Service
//!
//! Produces a compatibility narrative for two realities. The score is a
//! heuristic over the same data the comparison engine uses (skill overlap,
//! weekly hours, interview focus); the delay only imitates a remote model.

use crate::config::{ComparisonConfig, ServiceConfig};
use crate::error::Result;
use crate::multiverse::manager::CareerManager;
use crate::multiverse::types::{CareerReality, InterviewFocus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const TIME_CONFLICT_PENALTY: i64 = 30;
const FOCUS_MISMATCH_PENALTY: i64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0-100
    pub compatibility_score: u8,
    pub summary: String,
    pub recommendation: String,
    pub key_differentiator: String,
}

pub struct InsightService {
    config: ServiceConfig,
    comparison: ComparisonConfig,
}

impl InsightService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            comparison: ComparisonConfig::default(),
        }
    }

    pub fn with_comparison_config(mut self, comparison: ComparisonConfig) -> Self {
        self.comparison = comparison;
        self
    }

    pub async fn analyze_comparison(&self, a: &CareerReality, b: &CareerReality) -> AnalysisResult {
        tokio::time::sleep(self.config.analysis_delay).await;
        let result = analyze(a, b, &self.comparison);
        log::debug!(
            "[insight] '{}' vs '{}' scored {}",
            a.name,
            b.name,
            result.compatibility_score
        );
        result
    }

    /// Looks both realities up through the manager first
    pub async fn analyze_realities(
        &self,
        manager: &CareerManager,
        id_a: &str,
        id_b: &str,
    ) -> Result<AnalysisResult> {
        let a = manager.reality(id_a)?;
        let b = manager.reality(id_b)?;
        Ok(self.analyze_comparison(&a, &b).await)
    }
}

fn alignment_band(score: u8) -> &'static str {
    if score > 70 {
        "high"
    } else if score > 40 {
        "moderate"
    } else {
        "low"
    }
}

/// The scoring itself, without the simulated latency
pub fn analyze(a: &CareerReality, b: &CareerReality, config: &ComparisonConfig) -> AnalysisResult {
    let skills_a: HashSet<&str> = a.skills.iter().map(|s| s.name.as_str()).collect();
    let skills_b: HashSet<&str> = b.skills.iter().map(|s| s.name.as_str()).collect();
    let shared = skills_a.intersection(&skills_b).count();
    let union = skills_a.len() + skills_b.len() - shared;
    let unique = skills_a.len() + skills_b.len() - 2 * shared;
    let jaccard = shared as f64 / union.max(1) as f64;

    let hours_a = a.metrics.weekly_hours;
    let hours_b = b.metrics.weekly_hours;
    let time_gap = hours_a.abs_diff(hours_b);
    let time_conflict =
        u64::from(hours_a) + u64::from(hours_b) > u64::from(config.weekly_hours_limit);

    let focus_a = &a.attributes.interview_focus;
    let focus_b = &b.attributes.interview_focus;
    let different_focus =
        focus_a.iter().any(|f| !focus_b.contains(f)) || focus_b.iter().any(|f| !focus_a.contains(f));

    let mut score = (jaccard * 100.0).round() as i64;
    if time_conflict {
        score -= TIME_CONFLICT_PENALTY;
    }
    if different_focus {
        score -= FOCUS_MISMATCH_PENALTY;
    }
    let score = score.clamp(0, 100) as u8;

    let mut summary = format!(
        "Comparing \"{}\" and \"{}\" shows a {} degree of alignment. ",
        a.name,
        b.name,
        alignment_band(score)
    );
    if unique > 4 {
        summary.push_str(&format!(
            "The technical requirements are vastly different, with {} unique skills between them. ",
            unique
        ));
    } else {
        summary.push_str("The core skill sets are quite similar. ");
    }
    if time_conflict {
        summary.push_str("Warning: The combined time commitment is unsustainable. ");
    }

    let recommendation = if score > 80 {
        "Great synergy! You can easily toggle between these paths or merge them into a strong hybrid profile."
    } else if score > 50 {
        "These paths have some overlap but require distinct preparation methods. Consider sequencing them (one after another) rather than parallel tracking."
    } else {
        "These realities are fundamentally different. It is recommended to fork completely and treat them as separate career modes to avoid context switching fatigue."
    };

    let key_differentiator = if time_gap > 10 {
        format!(
            "Time Commitment: \"{}\" requires {}h vs \"{}\" at {}h.",
            a.name, hours_a, b.name, hours_b
        )
    } else {
        let first = |focus: &[InterviewFocus]| {
            focus.first().map_or("general skills", |f| f.label())
        };
        format!(
            "Focus: \"{}\" prioritizes {} while \"{}\" targets {}.",
            a.name,
            first(focus_a.as_slice()),
            b.name,
            first(focus_b.as_slice())
        )
    };

    AnalysisResult {
        compatibility_score: score,
        summary,
        recommendation: recommendation.to_string(),
        key_differentiator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiverse::types::{Skill, SkillCategory};

    fn reality(name: &str, skills: &[&str], hours: u32, focus: Vec<InterviewFocus>) -> CareerReality {
        let mut r = CareerReality::new_root(name, "");
        r.skills = skills
            .iter()
            .map(|n| Skill::new(n, SkillCategory::Technical, 50))
            .collect();
        r.metrics.weekly_hours = hours;
        r.attributes.interview_focus = focus;
        r
    }

    #[test]
    fn test_identical_realities_score_full() {
        let a = reality("A", &["Rust", "SQL"], 10, vec![InterviewFocus::Dsa]);
        let b = reality("B", &["Rust", "SQL"], 12, vec![InterviewFocus::Dsa]);
        let result = analyze(&a, &b, &ComparisonConfig::default());
        assert_eq!(result.compatibility_score, 100);
        assert!(result.summary.contains("high degree"));
        assert!(result.summary.contains("quite similar"));
        assert!(result.recommendation.starts_with("Great synergy"));
        assert_eq!(
            result.key_differentiator,
            "Focus: \"A\" prioritizes DSA while \"B\" targets DSA."
        );
    }

    #[test]
    fn test_penalties_and_clamp() {
        let a = reality("A", &["Rust", "Go", "C"], 45, vec![InterviewFocus::Dsa]);
        let b = reality("B", &["Figma", "UX", "Writing"], 20, vec![InterviewFocus::Portfolio]);
        let result = analyze(&a, &b, &ComparisonConfig::default());
        assert_eq!(result.compatibility_score, 0);
        assert!(result.summary.contains("low degree"));
        assert!(result.summary.contains("6 unique skills"));
        assert!(result.summary.contains("unsustainable"));
        assert!(result.key_differentiator.starts_with("Time Commitment"));
        assert!(result.recommendation.starts_with("These realities are fundamentally"));
    }

    #[test]
    fn test_moderate_overlap() {
        // 2 shared of 3 total = 67, no penalties
        let a = reality("A", &["Rust", "SQL", "Go"], 10, vec![]);
        let b = reality("B", &["Rust", "SQL"], 10, vec![]);
        let result = analyze(&a, &b, &ComparisonConfig::default());
        assert_eq!(result.compatibility_score, 67);
        assert!(result.summary.contains("moderate degree"));
        assert!(result.recommendation.starts_with("These paths have some overlap"));
        assert!(result.key_differentiator.contains("general skills"));
    }

    #[test]
    fn test_empty_realities() {
        let a = reality("A", &[], 0, vec![]);
        let b = reality("B", &[], 0, vec![]);
        assert_eq!(analyze(&a, &b, &ComparisonConfig::default()).compatibility_score, 0);
    }

    #[tokio::test]
    async fn test_analyze_realities_by_id() {
        use crate::multiverse::store::RealityStore;
        use std::sync::Arc;

        let manager = CareerManager::new(Arc::new(RealityStore::in_memory()));
        let fork = manager.fork_reality("root", "Twin").unwrap();
        let service = InsightService::new(ServiceConfig::immediate());

        let result = service.analyze_realities(&manager, "root", &fork.id).await.unwrap();
        assert_eq!(result.compatibility_score, 100);
        assert!(service.analyze_realities(&manager, "root", "ghost").await.is_err());
    }
}
