//! Integration tests for the screener

use ats_screener::config::{OutputFormat, ProcessingConfig, ScoringConfig};
use ats_screener::input::manager::{applicant_id, InputManager};
use ats_screener::output::{ReportGenerator, ScreeningReport};
use ats_screener::{CandidateInput, JobDescriptionProcessor, Screener, Verdict};
use std::path::Path;
use std::sync::Arc;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.docx"))
        .await
        .unwrap();

    let plain = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    assert_eq!(text, plain.lines().collect::<Vec<_>>().join("\n"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    assert!(manager.extract_text(path).await.is_err());
    assert_eq!(manager.extract_text_or_empty(path).await, "");
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    assert!(manager.extract_text(path).await.is_err());
}

async fn screen_fixtures(resumes: &[&str]) -> (ScreeningReport, usize) {
    let mut manager = InputManager::new();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();
    let context = Arc::new(JobDescriptionProcessor::new().process(&job_text));

    let mut candidates = Vec::new();
    for resume in resumes {
        let path = Path::new(resume);
        let text = manager.extract_text_or_empty(path).await;
        candidates.push(CandidateInput::new(applicant_id(path), text));
    }

    let scoring = ScoringConfig::default();
    let processing = ProcessingConfig {
        max_concurrency: 2,
        enable_cache: true,
    };
    let outcome = Screener::new(scoring.clone(), &processing)
        .screen(Arc::clone(&context), candidates)
        .await;

    let report = ScreeningReport::new(
        outcome.results,
        "job_description.txt",
        context.keywords().len(),
        &scoring,
        outcome.processing_time_ms,
    );
    (report, outcome.failed_evaluations)
}

#[tokio::test]
async fn test_screening_ranks_relevant_resume_first() {
    let (report, failed) = screen_fixtures(&[
        "tests/fixtures/designer_resume.txt",
        "tests/fixtures/sample_resume.txt",
        "tests/fixtures/sample_resume.md",
    ])
    .await;

    assert_eq!(failed, 0);
    assert_eq!(report.results.len(), 3);
    assert!(report.results[0].applicant_id.starts_with("sample_resume"));
    assert_eq!(report.results[2].applicant_id, "designer_resume.txt");
    assert_eq!(report.results[2].verdict, Verdict::NotQualified);
    assert!(report.results[0].matched_keywords.contains(&"postgresql".to_string()));
    assert_eq!(
        report.summary.top_candidate.as_ref().unwrap().applicant_id,
        report.results[0].applicant_id
    );
}

#[tokio::test]
async fn test_docx_resume_scores_like_its_plain_text() {
    let (report, failed) = screen_fixtures(&[
        "tests/fixtures/sample_resume.docx",
        "tests/fixtures/sample_resume.txt",
    ])
    .await;

    assert_eq!(failed, 0);
    assert_eq!(report.results[0].applicant_id, "sample_resume.docx");
    assert_eq!(report.results[0].match_score, report.results[1].match_score);
    assert_eq!(report.results[0].matched_keywords, report.results[1].matched_keywords);
    assert!(report.results[0].match_score > 0.0);
}

#[tokio::test]
async fn test_unreadable_resume_still_gets_a_result() {
    let (report, failed) = screen_fixtures(&[
        "tests/fixtures/unsupported.xyz",
        "tests/fixtures/nonexistent.pdf",
        "tests/fixtures/sample_resume.txt",
    ])
    .await;

    assert_eq!(failed, 0);
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].applicant_id, "sample_resume.txt");
    for result in &report.results[1..] {
        assert_eq!(result.match_score, 0.0);
        assert_eq!(result.verdict, Verdict::NotQualified);
    }
    // Ties keep input order.
    assert_eq!(report.results[1].applicant_id, "unsupported.xyz");
    assert_eq!(report.results[2].applicant_id, "nonexistent.pdf");
}

#[tokio::test]
async fn test_report_renders_in_every_format() {
    let (report, _) = screen_fixtures(&[
        "tests/fixtures/sample_resume.txt",
        "tests/fixtures/designer_resume.txt",
    ])
    .await;
    let generator = ReportGenerator::with_options(false, true, true, true, true);

    for format in [
        OutputFormat::Console,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Html,
    ] {
        let rendered = generator.generate_report(&report, format).unwrap();
        assert!(rendered.contains("sample_resume.txt"));
        assert!(rendered.contains("designer_resume.txt"));
    }
}
