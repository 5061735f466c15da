//! Resume screening library
//!
//! Scores resumes against a job description with keyword overlap, TF-IDF
//! content similarity and a blended geometric mean, then ranks them.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::{Config, ScoringConfig};
pub use error::{Result, ScreenerError};
pub use processing::evaluator::{rank_results, CandidateEvaluator, CandidateResult, Verdict};
pub use processing::job_processor::{JobDescriptionContext, JobDescriptionProcessor};
pub use processing::screening::{CandidateInput, Screener, ScreeningOutcome};
