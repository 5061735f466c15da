//! Error handling for the screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Vector space error: {0}")]
    VectorSpace(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Screening task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl From<tokio::task::JoinError> for ScreenerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ScreenerError::Task(err.to_string())
    }
}

impl From<askama::Error> for ScreenerError {
    fn from(err: askama::Error) -> Self {
        ScreenerError::OutputFormatting(err.to_string())
    }
}
