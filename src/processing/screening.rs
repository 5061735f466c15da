//! Batch screening: evaluate many resumes against one job context

use crate::config::{ProcessingConfig, ScoringConfig};
use crate::processing::evaluator::{rank_results, CandidateEvaluator, CandidateResult};
use crate::processing::job_processor::JobDescriptionContext;
use indicatif::ProgressBar;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// One resume waiting to be scored.
#[derive(Debug, Clone)]
pub struct CandidateInput {
    pub applicant_id: String,
    pub text: String,
}

impl CandidateInput {
    pub fn new(applicant_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            applicant_id: applicant_id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    /// Ranked by match score, best first.
    pub results: Vec<CandidateResult>,
    pub failed_evaluations: usize,
    pub processing_time_ms: u64,
}

/// Runs evaluations on the blocking pool with bounded concurrency.
pub struct Screener {
    evaluator: Arc<CandidateEvaluator>,
    max_concurrency: usize,
    progress: Option<ProgressBar>,
}

impl Screener {
    pub fn new(scoring: ScoringConfig, processing: &ProcessingConfig) -> Self {
        Self {
            evaluator: Arc::new(CandidateEvaluator::new(scoring)),
            max_concurrency: processing.max_concurrency.max(1),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn evaluator(&self) -> &CandidateEvaluator {
        &self.evaluator
    }

    /// Score every candidate. Always yields exactly one result per input; a
    /// panicking evaluation is logged and replaced by an unscored result.
    pub async fn screen(
        &self,
        context: Arc<JobDescriptionContext>,
        candidates: Vec<CandidateInput>,
    ) -> ScreeningOutcome {
        self.screen_with(context, candidates, |evaluator, candidate, context| {
            evaluator.evaluate(&candidate.applicant_id, &candidate.text, context)
        })
        .await
    }

    /// Like [`Screener::screen`], with the per-candidate evaluation supplied by
    /// the caller.
    pub async fn screen_with<F>(
        &self,
        context: Arc<JobDescriptionContext>,
        candidates: Vec<CandidateInput>,
        evaluate: F,
    ) -> ScreeningOutcome
    where
        F: Fn(&CandidateEvaluator, &CandidateInput, &JobDescriptionContext) -> CandidateResult
            + Send
            + Sync
            + 'static,
    {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let evaluate = Arc::new(evaluate);

        info!(
            "Screening {} candidates with up to {} concurrent evaluations",
            candidates.len(),
            self.max_concurrency
        );

        let mut handles = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let semaphore = Arc::clone(&semaphore);
            let evaluator = Arc::clone(&self.evaluator);
            let evaluate = Arc::clone(&evaluate);
            let context = Arc::clone(&context);
            let applicant_id = candidate.applicant_id.clone();

            let handle = tokio::spawn(async move {
                // Never closed, so acquiring cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                tokio::task::spawn_blocking(move || evaluate(&evaluator, &candidate, &context))
                    .await
            });
            handles.push((applicant_id, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut failed_evaluations = 0;
        for (applicant_id, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) | Err(e) => {
                    warn!("Evaluation of {} failed, scoring it as 0: {}", applicant_id, e);
                    failed_evaluations += 1;
                    CandidateResult::unscored(applicant_id)
                }
            };
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
            results.push(result);
        }

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        let processing_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Screening finished in {}ms ({} failed evaluations)",
            processing_time_ms, failed_evaluations
        );

        ScreeningOutcome {
            results: rank_results(results),
            failed_evaluations,
            processing_time_ms,
        }
    }
}
