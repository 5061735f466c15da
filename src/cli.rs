//! CLI interface for the screener

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ats-screener")]
#[command(version)]
#[command(about = "Score and rank resumes against a job description")]
#[command(long_about = "Rank resumes against a job description using keyword overlap, TF-IDF content similarity and a blended score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen and rank resumes against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    Screen {
        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Resume files or directories containing resumes
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file (a directory gets a generated file name)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Only show the best N candidates
        #[arg(short, long)]
        top: Option<usize>,

        /// Show sub-scores and matched keywords
        #[arg(short, long)]
        detailed: bool,

        /// Maximum concurrent evaluations
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// Score a single resume with a detailed breakdown
    Score {
        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,

        /// Path to resume file
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Extensions the input layer can extract text from.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown", "docx"];

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_screen_requires_a_job() {
        let result = Cli::try_parse_from(["ats-screener", "screen", "cv.pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_screen_parses_inline_job() {
        let cli = Cli::try_parse_from([
            "ats-screener", "screen", "--job-text", "Rust developer", "a.pdf", "b.txt", "--top", "1",
        ])
        .unwrap();

        match cli.command {
            Commands::Screen { job, job_text, resumes, top, .. } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust developer"));
                assert_eq!(resumes.len(), 2);
                assert_eq!(top, Some(1));
            }
            _ => panic!("expected screen command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("html"), Ok(OutputFormat::Html));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("job.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["txt"]).is_err());

        assert!(validate_file_extension(Path::new("job.docx"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("job.Markdown"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("job.doc"), SUPPORTED_EXTENSIONS).is_err());
    }
}
