//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScreeningReport;
use crate::processing::evaluator::{CandidateResult, Verdict};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Ranked table for the terminal
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Candidate Screening Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .summary {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .summary-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 8px; border-bottom: 1px solid #e9ecef; text-align: left; }
        th { color: #007acc; }
        .verdict { padding: 4px 10px; border-radius: 12px; font-weight: bold; color: white; }
        .verdict-high { background: #28a745; }
        .verdict-partial { background: #ffc107; color: #000; }
        .verdict-not { background: #dc3545; }
        .keywords { font-size: 0.85em; color: #6c757d; }
        .metadata { margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Candidate Screening Report</h1>
            <p>Job: {{ job_source }} | Generated: {{ generated_at }}</p>
        </div>

        <div class="summary">
            <div class="summary-item"><strong>Candidates</strong><br>{{ candidate_count }}</div>
            <div class="summary-item"><strong>Highly Qualified</strong><br>{{ highly_qualified }}</div>
            <div class="summary-item"><strong>Partially Qualified</strong><br>{{ partially_qualified }}</div>
            <div class="summary-item"><strong>Not Qualified</strong><br>{{ not_qualified }}</div>
            <div class="summary-item"><strong>Average Match</strong><br>{{ average_match_score }}%</div>
        </div>

        <table>
            <thead>
                <tr>
                    <th>#</th><th>Applicant</th><th>Match</th><th>Keyword</th>
                    <th>Content</th><th>Blended</th><th>Verdict</th><th>Matched Keywords</th>
                </tr>
            </thead>
            <tbody>
            {% for row in rows %}
                <tr>
                    <td>{{ row.rank }}</td>
                    <td>{{ row.applicant_id }}</td>
                    <td><strong>{{ row.match_score }}%</strong></td>
                    <td>{{ row.keyword_score }}%</td>
                    <td>{{ row.content_score }}%</td>
                    <td>{{ row.blended_score }}%</td>
                    <td><span class="verdict {{ row.verdict_class }}">{{ row.verdict }}</span></td>
                    <td class="keywords">{{ row.matched_keywords }}</td>
                </tr>
            {% endfor %}
            </tbody>
        </table>

        <div class="metadata">
            <p>Weights: keyword {{ keyword_weight }}, content {{ content_weight }}, blended {{ blended_weight }}</p>
            <p>Generated by ats-screener v{{ version }} in {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    job_source: String,
    generated_at: String,
    candidate_count: usize,
    highly_qualified: usize,
    partially_qualified: usize,
    not_qualified: usize,
    average_match_score: String,
    rows: Vec<HtmlRow>,
    keyword_weight: String,
    content_weight: String,
    blended_weight: String,
    version: String,
    processing_time: u64,
}

struct HtmlRow {
    rank: usize,
    applicant_id: String,
    match_score: String,
    keyword_score: String,
    content_score: String,
    blended_score: String,
    verdict: String,
    verdict_class: &'static str,
    matched_keywords: String,
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::HighlyQualified => Color::Green,
        Verdict::PartiallyQualified => Color::Yellow,
        Verdict::NotQualified => Color::Red,
    }
}

fn format_timestamp(report: &ScreeningReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict(&self, verdict: Verdict) -> String {
        let label = verdict.to_string();
        if self.use_colors {
            label.color(verdict_color(verdict)).bold().to_string()
        } else {
            label
        }
    }

    fn format_candidate(&self, rank: usize, result: &CandidateResult) -> String {
        // Pad before coloring so escape codes don't break alignment.
        let verdict = self.format_verdict(result.verdict);
        let mut line = format!(
            "{:>3}. {:<32} {:>6.2}%  {}\n",
            rank,
            truncate_id(&result.applicant_id, 32),
            result.match_score,
            verdict
        );

        if self.detailed {
            line.push_str(&format!(
                "     keyword {:.2}% | content {:.2}% | blended {:.2}%\n",
                result.keyword_score, result.content_score, result.blended_score
            ));
            if !result.matched_keywords.is_empty() {
                line.push_str(&format!(
                    "     matched: {}\n",
                    self.colorize(&result.matched_keywords_display(), Color::Cyan)
                ));
            }
        }

        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CANDIDATE SCREENING RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Job: {} ({} keywords)\n",
            report.metadata.job_source, report.metadata.job_keyword_count
        ));

        output.push_str(&self.format_header("Summary", 2));
        let summary = &report.summary;
        output.push_str(&format!("Candidates: {}\n", report.metadata.candidate_count));
        output.push_str(&format!(
            "{}: {} | {}: {} | {}: {}\n",
            self.colorize("Highly Qualified", Color::Green),
            summary.highly_qualified,
            self.colorize("Partially Qualified", Color::Yellow),
            summary.partially_qualified,
            self.colorize("Not Qualified", Color::Red),
            summary.not_qualified
        ));
        output.push_str(&format!("Average match score: {:.2}%\n", summary.average_match_score));
        if let Some(top) = &summary.top_candidate {
            output.push_str(&format!(
                "Top candidate: {} ({:.2}%)\n",
                self.colorize(&top.applicant_id, Color::Cyan),
                top.match_score
            ));
        }

        output.push_str(&self.format_header("Ranking", 2));
        if report.results.is_empty() {
            output.push_str("No candidates were screened.\n");
        }
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&self.format_candidate(index + 1, result));
        }

        if self.detailed {
            let weights = &report.metadata.weights;
            output.push_str(&self.format_header("Scoring", 3));
            output.push_str(&format!(
                "Weights: keyword {:.2} | content {:.2} | blended {:.2}\n",
                weights.keyword_weight, weights.content_weight, weights.blended_weight
            ));
            output.push_str(&format!(
                "Thresholds: highly >= {:.1} | partially >= {:.1}\n",
                weights.highly_qualified_threshold, weights.partially_qualified_threshold
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        let rows = report
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| HtmlRow {
                rank: index + 1,
                applicant_id: result.applicant_id.clone(),
                match_score: format!("{:.2}", result.match_score),
                keyword_score: format!("{:.2}", result.keyword_score),
                content_score: format!("{:.2}", result.content_score),
                blended_score: format!("{:.2}", result.blended_score),
                verdict: result.verdict.to_string(),
                verdict_class: match result.verdict {
                    Verdict::HighlyQualified => "verdict-high",
                    Verdict::PartiallyQualified => "verdict-partial",
                    Verdict::NotQualified => "verdict-not",
                },
                matched_keywords: result.matched_keywords_display(),
            })
            .collect();

        let weights = &report.metadata.weights;
        HtmlTemplate {
            include_styles: self.include_styles,
            job_source: report.metadata.job_source.clone(),
            generated_at: format_timestamp(report),
            candidate_count: report.metadata.candidate_count,
            highly_qualified: report.summary.highly_qualified,
            partially_qualified: report.summary.partially_qualified,
            not_qualified: report.summary.not_qualified,
            average_match_score: format!("{:.2}", report.summary.average_match_score),
            rows,
            keyword_weight: format!("{:.2}", weights.keyword_weight),
            content_weight: format!("{:.2}", weights.content_weight),
            blended_weight: format!("{:.2}", weights.blended_weight),
            version: report.metadata.screener_version.clone(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Candidate Screening Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                format_timestamp(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Job:** `{}` | **Candidates:** {}\n\n",
                report.metadata.job_source, report.metadata.candidate_count
            ));
        }

        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str(&format!("- ✅ Highly Qualified: {}\n", summary.highly_qualified));
        output.push_str(&format!("- ⚠️ Partially Qualified: {}\n", summary.partially_qualified));
        output.push_str(&format!("- ❌ Not Qualified: {}\n", summary.not_qualified));
        output.push_str(&format!("- Average match score: {:.2}%\n", summary.average_match_score));
        if let Some(top) = &summary.top_candidate {
            output.push_str(&format!(
                "- Top candidate: **{}** ({:.2}%)\n",
                top.applicant_id, top.match_score
            ));
        }
        output.push('\n');

        output.push_str("## Ranking\n\n");
        output.push_str("| # | Applicant | Match | Keyword | Content | Blended | Verdict | Matched Keywords |\n");
        output.push_str("|---|-----------|-------|---------|---------|---------|---------|------------------|\n");
        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.2}% | {:.2}% | {:.2}% | {:.2}% | {} | {} |\n",
                index + 1,
                Self::escape_cell(&result.applicant_id),
                result.match_score,
                result.keyword_score,
                result.content_score,
                result.blended_score,
                result.verdict,
                Self::escape_cell(&result.matched_keywords_display())
            ));
        }
        output.push('\n');

        let weights = &report.metadata.weights;
        output.push_str("## Score Legend\n\n");
        output.push_str("| Score | Meaning | Weight |\n");
        output.push_str("|-------|---------|--------|\n");
        output.push_str(&format!(
            "| Keyword | Share of job keywords found in the resume | {:.2} |\n",
            weights.keyword_weight
        ));
        output.push_str(&format!(
            "| Content | TF-IDF cosine similarity to the job description | {:.2} |\n",
            weights.content_weight
        ));
        output.push_str(&format!(
            "| Blended | Geometric mean of keyword and content scores | {:.2} |\n",
            weights.blended_weight
        ));
        output.push_str(&format!(
            "\nVerdicts: Highly Qualified >= {:.1}, Partially Qualified >= {:.1}, otherwise Not Qualified.\n",
            weights.highly_qualified_threshold, weights.partially_qualified_threshold
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_id(id: &str, max_chars: usize) -> String {
    if id.chars().count() <= max_chars {
        id.to_string()
    } else {
        let kept: String = id.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_screening{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn sample_report() -> ScreeningReport {
        let results = vec![
            CandidateResult {
                match_score: 82.5,
                keyword_score: 80.0,
                content_score: 85.0,
                blended_score: 82.46,
                verdict: Verdict::HighlyQualified,
                matched_keywords: vec!["rust".to_string(), "tokio".to_string()],
                ..CandidateResult::unscored("alice.pdf")
            },
            CandidateResult::unscored("bob|<b>.txt"),
        ];
        ScreeningReport::new(results, "backend.md", 14, &ScoringConfig::default(), 42)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("CANDIDATE SCREENING RESULTS"));
        assert!(output.contains("alice.pdf"));
        assert!(output.contains("82.50%"));
        assert!(output.contains("Highly Qualified"));
        assert!(output.contains("matched: rust, tokio"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_roundtrip() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let parsed: ScreeningReport = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].verdict, Verdict::HighlyQualified);
        assert_eq!(parsed.summary.not_qualified, 1);
    }

    #[test]
    fn test_markdown_table_escapes_pipes() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.contains("| 1 | alice.pdf | 82.50% |"));
        assert!(output.contains("bob\\|<b>.txt"));
        assert!(output.contains("## Score Legend"));
        assert!(output.contains("**Job:** `backend.md`"));
    }

    #[test]
    fn test_html_escapes_applicant_ids() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("<td>alice.pdf</td>"));
        assert!(output.contains("verdict-high"));
        assert!(!output.contains("<b>.txt"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, true, true);
        let report = sample_report();

        assert!(generator
            .generate_report(&report, OutputFormat::Json)
            .unwrap()
            .starts_with('{'));
        assert!(generator
            .generate_report(&report, OutputFormat::Html)
            .unwrap()
            .contains("<style>"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "jobs/backend.txt", false),
            "backend_screening.md"
        );
        assert!(suggest_filename(OutputFormat::Html, "job.md", true).ends_with(".html"));
    }

    #[test]
    fn test_truncate_id() {
        assert_eq!(truncate_id("short.pdf", 32), "short.pdf");
        assert_eq!(truncate_id("abcdefghij", 8), "abcde...");
    }
}
