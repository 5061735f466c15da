//! ats-screener: rank resumes against a job description

use anyhow::{bail, Context};
use ats_screener::cli::{self, Cli, Commands, ConfigAction};
use ats_screener::config::{Config, OutputFormat};
use ats_screener::input::manager::{applicant_id, collect_resume_paths, InputManager};
use ats_screener::output::{save_report_to_file, suggest_filename, ReportGenerator, ScreeningReport};
use ats_screener::processing::evaluator::CandidateEvaluator;
use ats_screener::processing::job_processor::JobDescriptionProcessor;
use ats_screener::processing::screening::{CandidateInput, Screener};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Config::load().context("loading default config"),
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Screen {
            job,
            job_text,
            resumes,
            output,
            save,
            top,
            detailed,
            jobs,
        } => {
            let mut config = config;
            if let Some(jobs) = jobs {
                if jobs == 0 {
                    bail!("--jobs must be at least 1");
                }
                config.processing.max_concurrency = jobs;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new().with_cache(config.processing.enable_cache);

            let (job_text, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, cli::SUPPORTED_EXTENSIONS)
                        .map_err(anyhow::Error::msg)
                        .with_context(|| format!("checking job description {}", path.display()))?;
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("reading job description {}", path.display()))?;
                    (text, applicant_id(&path))
                }
                (None, Some(text)) => (text, "inline".to_string()),
                (None, None) => bail!("a job description is required (--job or --job-text)"),
            };

            if job_text.trim().is_empty() {
                bail!(ats_screener::ScreenerError::InvalidInput(
                    "job description is empty".to_string()
                ));
            }

            let paths = collect_resume_paths(&resumes).context("collecting resume paths")?;
            if paths.is_empty() {
                bail!(ats_screener::ScreenerError::InvalidInput(
                    "no supported resume files found".to_string()
                ));
            }

            info!("Extracting text from {} resumes", paths.len());
            let mut candidates = Vec::with_capacity(paths.len());
            for path in &paths {
                let text = input_manager.extract_text_or_empty(path).await;
                candidates.push(CandidateInput::new(applicant_id(path), text));
            }

            let context = Arc::new(JobDescriptionProcessor::new().process(&job_text));
            if context.is_empty() {
                bail!(ats_screener::ScreenerError::InvalidInput(
                    "job description contains no usable terms".to_string()
                ));
            }
            info!(
                "Job description processed: {} keywords, {} vocabulary terms",
                context.keywords().len(),
                context.vector_space().vocabulary_size()
            );

            let progress = ProgressBar::new(candidates.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                    .context("building progress bar style")?,
            );
            progress.set_message("evaluating");

            let screener = Screener::new(config.scoring.clone(), &config.processing)
                .with_progress(progress);
            let outcome = screener.screen(Arc::clone(&context), candidates).await;

            let mut report = ScreeningReport::new(
                outcome.results,
                job_source,
                context.keywords().len(),
                &config.scoring,
                outcome.processing_time_ms,
            );
            if let Some(top) = top {
                report.truncate(top);
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let rendered = generator
                .generate_report(&report, output_format)
                .context("rendering report")?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &report.metadata.job_source, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("saving report to {}", path.display()))?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Score { job, resume } => {
            cli::validate_file_extension(&job, cli::SUPPORTED_EXTENSIONS)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("checking job description {}", job.display()))?;
            let mut input_manager = InputManager::new();
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("reading job description {}", job.display()))?;
            if job_text.trim().is_empty() {
                bail!(ats_screener::ScreenerError::InvalidInput(
                    "job description is empty".to_string()
                ));
            }
            let cv_text = input_manager.extract_text_or_empty(&resume).await;

            let context = JobDescriptionProcessor::new().process(&job_text);
            let result = CandidateEvaluator::new(config.scoring.clone()).evaluate(
                &applicant_id(&resume),
                &cv_text,
                &context,
            );

            let report = ScreeningReport::new(
                vec![result],
                applicant_id(&job),
                context.keywords().len(),
                &config.scoring,
                0,
            );
            let generator =
                ReportGenerator::with_options(config.output.color_output, true, true, true, true);
            println!("{}", generator.generate_report(&report, OutputFormat::Console)?);
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("{}", "⚙️  Current Configuration".bold());
                    println!("File: {}\n", path.display());
                    println!("Scoring Weights:");
                    println!("  Keyword: {:.2}", config.scoring.keyword_weight);
                    println!("  Content: {:.2}", config.scoring.content_weight);
                    println!("  Blended: {:.2}", config.scoring.blended_weight);
                    println!("\nVerdict Thresholds:");
                    println!("  Highly Qualified: >= {:.1}", config.scoring.highly_qualified_threshold);
                    println!("  Partially Qualified: >= {:.1}", config.scoring.partially_qualified_threshold);
                    println!("\nMatched keywords shown: {}", config.scoring.max_matched_keywords);
                    println!("Max concurrency: {}", config.processing.max_concurrency);
                    println!("Extraction cache: {}", config.processing.enable_cache);
                    println!("Default output: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
