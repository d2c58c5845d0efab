//! # Classifier Module
//!
//! Evaluation of a pre-trained TF-IDF + logistic regression text model.
//!
//! The model is trained elsewhere and shipped as an artifact (see
//! [`crate::formats`]). This module only scores text:
//!
//! 1. lowercase, tokenize into runs of two or more word characters
//! 2. build unigrams (and bigrams when `ngram_max == 2`)
//! 3. term counts x idf, L2-normalized
//! 4. `z = w . x + b`, `p = sigmoid(z)`; positive label iff `z > 0`
//!
//! The reported confidence is the winning-class probability in percent and
//! therefore lies in `[50, 100]`.

// The only module allowed to do floating-point math.
#![allow(clippy::float_arithmetic)]

use crate::{ClassifierResult, Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Display name of the statistical method.
pub const METHOD_NAME: &str = "ML Pattern Recognition";

/// Artifact format version understood by this build.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Anything that maps text to a label and confidence.
///
/// Implementations must be read-only after construction so one instance can
/// serve concurrent requests.
pub trait Classifier: Send + Sync {
    /// Classify `text`.
    fn predict(&self, text: &str) -> ClassifierResult;
}

/// Errors detected while validating a model artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unsupported model format version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("ngram_max must be 1 or 2, got {0}")]
    NgramRange(u8),

    #[error("negative and positive labels must differ")]
    SameLabels,

    #[error("model has an empty vocabulary")]
    EmptyVocabulary,

    #[error("idf has {idf} entries but coefficients has {coefficients}")]
    LengthMismatch { idf: usize, coefficients: usize },

    #[error("vocabulary term '{term}' maps to index {index}, outside 0..{len}")]
    IndexOutOfRange { term: String, index: u32, len: usize },

    #[error("model contains a non-finite weight")]
    NonFinite,
}

/// A linear model over TF-IDF features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTextModel {
    pub format_version: u32,
    /// Label of class 0.
    pub negative_label: Label,
    /// Label of class 1.
    pub positive_label: Label,
    /// Largest n-gram size (1 or 2).
    pub ngram_max: u8,
    /// Term -> feature index.
    pub vocabulary: BTreeMap<String, u32>,
    /// Inverse document frequency per feature.
    pub idf: Vec<f64>,
    /// Weight per feature.
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearTextModel {
    /// Check internal consistency. Called by every loader.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::Version {
                found: self.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }
        if !(1..=2).contains(&self.ngram_max) {
            return Err(ModelError::NgramRange(self.ngram_max));
        }
        if self.negative_label == self.positive_label {
            return Err(ModelError::SameLabels);
        }
        if self.vocabulary.is_empty() {
            return Err(ModelError::EmptyVocabulary);
        }
        if self.idf.len() != self.coefficients.len() {
            return Err(ModelError::LengthMismatch {
                idf: self.idf.len(),
                coefficients: self.coefficients.len(),
            });
        }
        if let Some((term, &index)) = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx as usize >= self.idf.len())
        {
            return Err(ModelError::IndexOutOfRange {
                term: term.clone(),
                index,
                len: self.idf.len(),
            });
        }
        let all_finite = self
            .idf
            .iter()
            .chain(self.coefficients.iter())
            .chain(std::iter::once(&self.intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::NonFinite);
        }
        Ok(())
    }

    /// Number of features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.idf.len()
    }

    /// Sparse L2-normalized TF-IDF vector for `text`, keyed by feature index.
    #[must_use]
    pub fn vectorize(&self, text: &str) -> BTreeMap<usize, f64> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in ngrams(&tokenize(text), self.ngram_max) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index as usize).or_insert(0.0) += 1.0;
            }
        }

        for (index, value) in &mut counts {
            *value *= self.idf.get(*index).copied().unwrap_or(0.0);
        }

        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }
        counts
    }

    /// Raw decision value `w . x + b`.
    #[must_use]
    pub fn decision_function(&self, text: &str) -> f64 {
        self.vectorize(text)
            .iter()
            .map(|(index, value)| self.coefficients.get(*index).copied().unwrap_or(0.0) * value)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the positive class.
    #[must_use]
    pub fn positive_probability(&self, text: &str) -> f64 {
        sigmoid(self.decision_function(text))
    }
}

impl Classifier for LinearTextModel {
    fn predict(&self, text: &str) -> ClassifierResult {
        let z = self.decision_function(text);
        let p = sigmoid(z);
        let (label, probability) = if z > 0.0 {
            (self.positive_label, p)
        } else {
            (self.negative_label, 1.0 - p)
        };
        ClassifierResult::new(label, probability * 100.0)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Lowercased tokens of two or more word characters.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Unigrams followed by space-joined bigrams (when `ngram_max >= 2`).
#[must_use]
pub fn ngrams(tokens: &[String], ngram_max: u8) -> Vec<String> {
    let mut out = tokens.to_vec();
    if ngram_max >= 2 {
        out.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
