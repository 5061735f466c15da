//! Candidate evaluation: keyword, content and blended scores

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::job_processor::JobDescriptionContext;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    HighlyQualified,
    PartiallyQualified,
    NotQualified,
}

impl Verdict {
    /// Classify a 0-100 score against inclusive lower thresholds.
    pub fn from_score(score: f64, config: &ScoringConfig) -> Self {
        if score >= config.highly_qualified_threshold {
            Verdict::HighlyQualified
        } else if score >= config.partially_qualified_threshold {
            Verdict::PartiallyQualified
        } else {
            Verdict::NotQualified
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::HighlyQualified => "Highly Qualified",
            Verdict::PartiallyQualified => "Partially Qualified",
            Verdict::NotQualified => "Not Qualified",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of scoring one resume. All scores are on a 0-100 scale and
/// rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub applicant_id: String,
    pub match_score: f64,
    pub keyword_score: f64,
    pub content_score: f64,
    pub blended_score: f64,
    pub verdict: Verdict,
    pub matched_keywords: Vec<String>,
}

impl CandidateResult {
    /// Zero-score result used when an evaluation could not complete.
    pub fn unscored(applicant_id: impl Into<String>) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            match_score: 0.0,
            keyword_score: 0.0,
            content_score: 0.0,
            blended_score: 0.0,
            verdict: Verdict::NotQualified,
            matched_keywords: Vec::new(),
        }
    }

    pub fn matched_keywords_display(&self) -> String {
        self.matched_keywords.join(", ")
    }
}

pub struct CandidateEvaluator {
    config: ScoringConfig,
    text_processor: TextProcessor,
}

impl Default for CandidateEvaluator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl CandidateEvaluator {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            text_processor: TextProcessor::new(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one resume against the job context. Never fails: numeric
    /// problems degrade the affected sub-score to 0.
    pub fn evaluate(
        &self,
        applicant_id: &str,
        cv_text: &str,
        context: &JobDescriptionContext,
    ) -> CandidateResult {
        let normalized = self.text_processor.normalize(cv_text);

        let matched = context.matched_keywords(&normalized);
        let keyword_score = if context.keywords().is_empty() {
            0.0
        } else {
            100.0 * matched.len() as f64 / context.keywords().len() as f64
        };

        let content_score = match self.content_score(&normalized, context) {
            Ok(score) => score,
            Err(e) => {
                debug!("Content score for {} degraded to 0: {}", applicant_id, e);
                0.0
            }
        };

        let blended_score = (keyword_score * content_score).sqrt();

        // Validated weights sum to 1; an unvalidated config must still stay in range.
        let match_score = (self.config.keyword_weight * keyword_score
            + self.config.content_weight * content_score
            + self.config.blended_weight * blended_score)
            .clamp(0.0, 100.0);

        let verdict = Verdict::from_score(match_score, &self.config);

        CandidateResult {
            applicant_id: applicant_id.to_string(),
            match_score: round2(match_score),
            keyword_score: round2(keyword_score),
            content_score: round2(content_score),
            blended_score: round2(blended_score),
            verdict,
            matched_keywords: matched
                .into_iter()
                .take(self.config.max_matched_keywords)
                .map(str::to_string)
                .collect(),
        }
    }

    fn content_score(&self, normalized: &str, context: &JobDescriptionContext) -> Result<f64> {
        let space = context.vector_space();
        let projected = space.transform(&self.text_processor, normalized)?;
        let similarity = space.similarity_to_reference(&projected)?;

        // Both vectors are non-negative, so the cosine is already in [0, 1].
        Ok((similarity.score * 100.0).clamp(0.0, 100.0))
    }
}

/// Sort descending by match score. Stable: ties keep input order.
pub fn rank_results(mut results: Vec<CandidateResult>) -> Vec<CandidateResult> {
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    results
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
