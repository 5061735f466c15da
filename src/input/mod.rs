//! Input processing module
//! Turns resume and job description files into plain text

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::{collect_resume_paths, InputManager};
