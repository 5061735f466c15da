//! TF-IDF vector space fitted on a single job description

use crate::error::{Result, ScreenerError};
use crate::processing::text_processor::TextProcessor;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A fitted term-weighting model plus the vector of the document it was fit on.
///
/// Vocabulary indices follow sorted term order. IDF is smoothed
/// (`ln((1 + n) / (1 + df)) + 1`), and every vector is L2-normalized.
#[derive(Debug, Clone, Serialize)]
pub struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    reference_vector: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityScore {
    pub score: f64,
    pub dimension: usize,
}

impl VectorSpace {
    /// Fit on exactly one already-normalized document.
    pub fn fit(processor: &TextProcessor, document: &str) -> Self {
        let tokens = processor.tokenize(document);
        let terms: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();

        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        // One document: every term has df = 1 and n = 1.
        let n_documents = 1.0_f64;
        let idf = vec![((1.0 + n_documents) / (1.0 + 1.0)).ln() + 1.0; vocabulary.len()];

        let mut space = Self {
            vocabulary,
            idf,
            reference_vector: Vec::new(),
        };
        space.reference_vector = space.weigh(&tokens);
        space
    }

    /// Project a normalized document into the fitted vocabulary.
    ///
    /// Out-of-vocabulary terms are ignored. Fails when the vocabulary is empty.
    pub fn transform(&self, processor: &TextProcessor, document: &str) -> Result<Vec<f64>> {
        if self.vocabulary.is_empty() {
            return Err(ScreenerError::VectorSpace(
                "vocabulary is empty; nothing to project onto".to_string(),
            ));
        }

        Ok(self.weigh(&processor.tokenize(document)))
    }

    /// Cosine similarity of `vector` against the fitted document's own vector.
    pub fn similarity_to_reference(&self, vector: &[f64]) -> Result<SimilarityScore> {
        cosine_similarity(&self.reference_vector, vector)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn reference_vector(&self) -> &[f64] {
        &self.reference_vector
    }

    fn weigh(&self, tokens: &[String]) -> Vec<f64> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = vec![0.0; self.vocabulary.len()];
        for (index, count) in counts {
            vector[index] = count * self.idf[index];
        }

        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

/// Cosine similarity between two vectors of equal dimension.
///
/// Zero vectors have similarity 0. Mismatched dimensions and non-finite
/// results are errors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<SimilarityScore> {
    if a.len() != b.len() {
        return Err(ScreenerError::VectorSpace(format!(
            "Vector dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let score = if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    };

    if !score.is_finite() {
        return Err(ScreenerError::VectorSpace(format!(
            "similarity is not finite: {}",
            score
        )));
    }

    Ok(SimilarityScore {
        score,
        dimension: a.len(),
    })
}
