use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::encoder::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Shape(String),

    #[error("classifier returned unknown severity class {0}")]
    UnknownClass(i64),
}

/// A pre-trained severity model. Implementations must be stateless so one
/// instance can serve every request.
pub trait SeverityClassifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError>;
}

/// One-vs-rest linear model exported from the training notebook as JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let model: LinearClassifier = serde_json::from_str(raw)?;
        model.validate()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    fn validate(self) -> Result<Self, ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::Shape("no classes".into()));
        }
        if self.weights.len() != self.classes.len() || self.intercepts.len() != self.classes.len() {
            return Err(ClassifierError::Shape(format!(
                "{} classes, {} weight rows, {} intercepts",
                self.classes.len(),
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        if let Some(row) = self.weights.iter().find(|row| row.len() != FEATURE_COUNT) {
            return Err(ClassifierError::Shape(format!(
                "weight row has {} entries, expected {FEATURE_COUNT}",
                row.len()
            )));
        }
        Ok(self)
    }
}

impl SeverityClassifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, (row, bias)) in self.weights.iter().zip(&self.intercepts).enumerate() {
            let score = row
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + bias;
            // strict comparison keeps the earlier class on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| self.classes[idx])
            .ok_or_else(|| ClassifierError::Shape("no classes".into()))
    }
}
