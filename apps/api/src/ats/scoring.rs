//! ATS scoring: a fixed-keyword heuristic behind a pluggable trait.
//!
//! Default: `FixedKeywordScorer` (pure, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn AtsScorer>`, so a job-description-aware scorer
//! can be swapped in without touching handlers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Keywords every resume is checked against. The job description does not
/// influence this list.
pub const KEYWORDS: [&str; 12] = [
    "React",
    "Node.js",
    "full stack",
    "MongoDB",
    "Express",
    "RESTful APIs",
    "JavaScript",
    "AWS",
    "frontend",
    "backend",
    "development",
    "web applications",
];

pub const FORMAT_SCORE: u32 = 85;
pub const CONTENT_SCORE: u32 = 78;

const KEYWORD_WEIGHT: f64 = 0.5;
const FORMAT_WEIGHT: f64 = 0.3;
const CONTENT_WEIGHT: f64 = 0.2;

const FORMAT_ADVICE_BELOW: u32 = 90;
const CONTENT_ADVICE_BELOW: u32 = 85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub score: u32,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub overall_score: u32,
    pub keyword_match: KeywordMatch,
    pub format_score: u32,
    pub content_score: u32,
    pub recommendations: Vec<String>,
}

/// Colour band of a 0-100 score in the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        match score {
            80.. => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// Scores `resume_text`. `_job_description` is accepted for the call shape
/// only; matching uses `KEYWORDS`.
pub fn score_resume(resume_text: &str, _job_description: &str) -> ScoringResult {
    let haystack = resume_text.to_lowercase();

    let (matches, missing): (Vec<&str>, Vec<&str>) = KEYWORDS
        .into_iter()
        .partition(|keyword| haystack.contains(&keyword.to_lowercase()));

    let keyword_score =
        (matches.len() as f64 / KEYWORDS.len() as f64 * 100.0).round() as u32;

    let overall_score = (keyword_score as f64 * KEYWORD_WEIGHT
        + FORMAT_SCORE as f64 * FORMAT_WEIGHT
        + CONTENT_SCORE as f64 * CONTENT_WEIGHT)
        .round() as u32;

    let mut recommendations = Vec::new();
    if !missing.is_empty() {
        recommendations.push(format!("Add missing keywords: {}", missing.join(", ")));
    }
    if FORMAT_SCORE < FORMAT_ADVICE_BELOW {
        recommendations.push(
            "Improve resume structure with clear section headings (Experience, Skills, Education, etc.)"
                .to_string(),
        );
    }
    if CONTENT_SCORE < CONTENT_ADVICE_BELOW {
        recommendations.push(
            "Use more quantifiable achievements and specific examples in your experience descriptions"
                .to_string(),
        );
        recommendations.push("Ensure your most relevant skills are prominently displayed".to_string());
    }

    ScoringResult {
        overall_score,
        keyword_match: KeywordMatch {
            score: keyword_score,
            matches: matches.into_iter().map(str::to_string).collect(),
            missing: missing.into_iter().map(str::to_string).collect(),
        },
        format_score: FORMAT_SCORE,
        content_score: CONTENT_SCORE,
        recommendations,
    }
}

/// Implement this to swap the scoring backend without touching callers.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoringResult, AppError>;

    /// Short backend name, logged with each check.
    fn name(&self) -> &'static str;
}

pub struct FixedKeywordScorer;

#[async_trait]
impl AtsScorer for FixedKeywordScorer {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScoringResult, AppError> {
        Ok(score_resume(resume_text, job_description))
    }

    fn name(&self) -> &'static str {
        "fixed-keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::samples::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME_TEXT};

    #[test]
    fn test_partial_match_example() {
        let result = score_resume("Built things with React and Node.js", "any");
        let kw = &result.keyword_match;

        assert!(kw.matches.contains(&"React".to_string()));
        assert!(kw.matches.contains(&"Node.js".to_string()));
        assert!(kw.missing.contains(&"AWS".to_string()));
        assert_eq!(kw.matches.len(), 2);
        assert_eq!(kw.score, 17);

        let expected = (2.0 / 12.0 * 100.0_f64).round() * 0.5 + 85.0 * 0.3 + 78.0 * 0.2;
        assert_eq!(result.overall_score, expected.round() as u32);
        assert_eq!(result.overall_score, 50);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let result = score_resume("FRONTEND and backend DEVELOPMENT at aws", "");
        assert_eq!(
            result.keyword_match.matches,
            vec!["AWS", "frontend", "backend", "development"]
        );
    }

    #[test]
    fn test_keywords_keep_list_order() {
        let result = score_resume("", "");
        assert!(result.keyword_match.matches.is_empty());
        let missing: Vec<&str> = result.keyword_match.missing.iter().map(String::as_str).collect();
        assert_eq!(missing, KEYWORDS.to_vec());
        assert_eq!(result.keyword_match.score, 0);
        assert_eq!(result.overall_score, 41);
    }

    #[test]
    fn test_recommendations() {
        let result = score_resume("react", "");
        assert_eq!(result.recommendations.len(), 4);
        assert!(result.recommendations[0].starts_with("Add missing keywords: Node.js, full stack, "));
        assert!(result.recommendations[1].starts_with("Improve resume structure"));

        let full = score_resume(SAMPLE_RESUME_TEXT, SAMPLE_JOB_DESCRIPTION);
        assert!(full.keyword_match.missing.is_empty());
        assert_eq!(full.keyword_match.score, 100);
        assert_eq!(full.overall_score, 91);
        assert_eq!(full.recommendations.len(), 3);
    }

    #[test]
    fn test_job_description_is_ignored() {
        let a = score_resume("React developer", "Looking for a COBOL expert");
        let b = score_resume("React developer", "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let first = score_resume(SAMPLE_RESUME_TEXT, SAMPLE_JOB_DESCRIPTION);
        let second = score_resume(SAMPLE_RESUME_TEXT, SAMPLE_JOB_DESCRIPTION);
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_band() {
        assert_eq!(ScoreBand::of(100), ScoreBand::Good);
        assert_eq!(ScoreBand::of(80), ScoreBand::Good);
        assert_eq!(ScoreBand::of(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(59), ScoreBand::Poor);
    }

    #[test]
    fn test_result_wire_names() {
        let value = serde_json::to_value(score_resume("React", "")).unwrap();
        assert!(value.get("overallScore").is_some());
        assert!(value["keywordMatch"].get("missing").is_some());
        assert!(value.get("formatScore").is_some());
    }

    #[tokio::test]
    async fn test_fixed_keyword_scorer_delegates() {
        let scorer = FixedKeywordScorer;
        let result = scorer.score("React", "jd").await.unwrap();
        assert_eq!(result, score_resume("React", "jd"));
        assert_eq!(scorer.name(), "fixed-keyword");
    }
}
