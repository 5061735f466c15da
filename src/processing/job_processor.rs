//! Job description processing: keywords and the fitted vector space

use crate::processing::text_processor::TextProcessor;
use crate::processing::vector_space::VectorSpace;
use aho_corasick::{AhoCorasick, MatchKind};
use log::{debug, warn};
use std::collections::HashSet;

/// Everything a candidate evaluation needs to know about one job description.
///
/// Built once per screening run and never mutated afterwards; share it by
/// reference or `Arc` across evaluations.
#[derive(Debug, Clone)]
pub struct JobDescriptionContext {
    keywords: Vec<String>,
    keyword_matcher: Option<AhoCorasick>,
    vector_space: VectorSpace,
}

impl JobDescriptionContext {
    /// Deduplicated keywords in first-occurrence order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn vector_space(&self) -> &VectorSpace {
        &self.vector_space
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.vector_space.vocabulary_size() == 0
    }

    /// Keywords occurring anywhere in `normalized` as substrings, in keyword order.
    pub fn matched_keywords(&self, normalized: &str) -> Vec<&str> {
        let hits: HashSet<usize> = match &self.keyword_matcher {
            Some(matcher) => matcher
                .find_overlapping_iter(normalized)
                .map(|m| m.pattern().as_usize())
                .collect(),
            None => self
                .keywords
                .iter()
                .enumerate()
                .filter(|(_, keyword)| normalized.contains(keyword.as_str()))
                .map(|(index, _)| index)
                .collect(),
        };

        self.keywords
            .iter()
            .enumerate()
            .filter(|(index, _)| hits.contains(index))
            .map(|(_, keyword)| keyword.as_str())
            .collect()
    }
}

pub struct JobDescriptionProcessor {
    text_processor: TextProcessor,
}

impl Default for JobDescriptionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl JobDescriptionProcessor {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
        }
    }

    pub fn text_processor(&self) -> &TextProcessor {
        &self.text_processor
    }

    /// Build the immutable context for `job_text`. Never fails; empty input
    /// gives an empty keyword set and an empty vocabulary.
    pub fn process(&self, job_text: &str) -> JobDescriptionContext {
        let normalized = self.text_processor.normalize(job_text);
        let keywords = self.text_processor.extract_keywords(&normalized);
        let vector_space = VectorSpace::fit(&self.text_processor, &normalized);

        // Overlapping search needs standard match semantics.
        let keyword_matcher = match AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&keywords)
        {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!("Falling back to plain substring search for keywords: {}", e);
                None
            }
        };

        debug!(
            "Processed job description: {} keywords, {} vocabulary terms",
            keywords.len(),
            vector_space.vocabulary_size()
        );

        JobDescriptionContext {
            keywords,
            keyword_matcher,
            vector_space,
        }
    }
}
