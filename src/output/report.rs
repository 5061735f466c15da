//! Screening report structures

use crate::config::ScoringConfig;
use crate::processing::evaluator::{round2, CandidateResult, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything produced by one screening run, ready for formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,
    pub summary: ScreeningSummary,
    /// Ranked, best first.
    pub results: Vec<CandidateResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    /// File name of the job description, or "inline" for `--job-text`.
    pub job_source: String,
    pub job_keyword_count: usize,
    pub candidate_count: usize,
    pub processing_time_ms: u64,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub keyword_weight: f64,
    pub content_weight: f64,
    pub blended_weight: f64,
    pub highly_qualified_threshold: f64,
    pub partially_qualified_threshold: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub highly_qualified: usize,
    pub partially_qualified: usize,
    pub not_qualified: usize,
    pub average_match_score: f64,
    pub top_candidate: Option<TopCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCandidate {
    pub applicant_id: String,
    pub match_score: f64,
    pub verdict: Verdict,
}

impl From<&ScoringConfig> for ScoreWeights {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            keyword_weight: config.keyword_weight,
            content_weight: config.content_weight,
            blended_weight: config.blended_weight,
            highly_qualified_threshold: config.highly_qualified_threshold,
            partially_qualified_threshold: config.partially_qualified_threshold,
        }
    }
}

impl ScreeningSummary {
    /// Summarize ranked results; the first result is taken as the top candidate.
    pub fn from_results(results: &[CandidateResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            match result.verdict {
                Verdict::HighlyQualified => summary.highly_qualified += 1,
                Verdict::PartiallyQualified => summary.partially_qualified += 1,
                Verdict::NotQualified => summary.not_qualified += 1,
            }
        }

        if !results.is_empty() {
            let total: f64 = results.iter().map(|r| r.match_score).sum();
            summary.average_match_score = round2(total / results.len() as f64);
        }

        summary.top_candidate = results.first().map(|r| TopCandidate {
            applicant_id: r.applicant_id.clone(),
            match_score: r.match_score,
            verdict: r.verdict,
        });

        summary
    }
}

impl ScreeningReport {
    pub fn new(
        results: Vec<CandidateResult>,
        job_source: impl Into<String>,
        job_keyword_count: usize,
        scoring: &ScoringConfig,
        processing_time_ms: u64,
    ) -> Self {
        let summary = ScreeningSummary::from_results(&results);
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            screener_version: env!("CARGO_PKG_VERSION").to_string(),
            job_source: job_source.into(),
            job_keyword_count,
            candidate_count: results.len(),
            processing_time_ms,
            weights: ScoreWeights::from(scoring),
        };

        Self {
            metadata,
            summary,
            results,
        }
    }

    /// Keep only the best `n` results. The summary still covers every candidate.
    pub fn truncate(&mut self, n: usize) {
        self.results.truncate(n);
    }
}
