//! Matching engine
//! Job description processing, candidate evaluation and batch screening

pub mod text_processor;
pub mod vector_space;
pub mod job_processor;
pub mod evaluator;
pub mod screening;
