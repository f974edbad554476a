//! Classifier loading and invocation
//!
//! The pre-trained model is an opaque collaborator: a serialized artifact
//! loaded once at startup and consumed through a single `predict` call that
//! maps a feature vector to 0 or 1. Label wording lives next to it as plain
//! configuration so it can change without retraining.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::encoding::FeatureVector;

#[derive(Debug)]
pub enum ClassifierError {
    /// The artifact could not be loaded; fatal at startup, no prediction may
    /// be attempted afterwards.
    Unavailable(String),
    /// The submitted vector does not match the shape the model was trained
    /// with. The most common real-world breakage: feature order drifted.
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::Unavailable(msg) => write!(f, "Classifier unavailable: {}", msg),
            ClassifierError::ShapeMismatch { expected, got } => {
                write!(f, "Feature vector has {} values but the model expects {}", got, expected)
            }
        }
    }
}

impl std::error::Error for ClassifierError {}

/// A pre-trained binary classifier deserialized from a JSON artifact.
///
/// Read-only after load; concurrent reads are safe because nothing mutates
/// the weights. The decision function is a weighted sum against a threshold,
/// but callers should depend only on `predict` returning 0 or 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    pub model_name: String,
    weights: Vec<f64>,
    bias: f64,
    threshold: f64,
}

impl Classifier {
    /// Load the artifact from its fixed path. Any I/O or parse failure is
    /// `Unavailable` — the caller must not fall back to a default model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        let classifier: Classifier = serde_json::from_str(&raw).map_err(|e| {
            ClassifierError::Unavailable(format!("failed to parse {}: {}", path.display(), e))
        })?;

        if classifier.weights.is_empty() {
            return Err(ClassifierError::Unavailable(format!(
                "{} declares no weights",
                path.display()
            )));
        }

        Ok(classifier)
    }

    /// Number of features the model was trained with.
    pub fn feature_len(&self) -> usize {
        self.weights.len()
    }

    /// Classify a vector as 0 or 1. Deterministic for a given vector.
    pub fn predict(&self, vector: &FeatureVector) -> Result<u8, ClassifierError> {
        if vector.len() != self.weights.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.weights.len(),
                got: vector.len(),
            });
        }

        let score: f64 = self
            .weights
            .iter()
            .zip(vector.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;

        Ok(if score >= self.threshold { 1 } else { 0 })
    }
}

/// Translates the classifier's integer output into display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    pub positive: String,
    pub negative: String,
}

impl Default for LabelMapping {
    fn default() -> Self {
        LabelMapping {
            positive: "Malaria".to_string(),
            negative: "No Malaria".to_string(),
        }
    }
}

impl LabelMapping {
    /// Pure total lookup on {0, 1}.
    pub fn label(&self, class: u8) -> &str {
        if class == 1 {
            &self.positive
        } else {
            &self.negative
        }
    }
}

/// The classifier's answer for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: u8,
    pub label: String,
}

impl Prediction {
    pub fn new(class: u8, labels: &LabelMapping) -> Self {
        Prediction {
            class,
            label: labels.label(class).to_string(),
        }
    }
}
