//! Severity assessment: validate the form, short-circuit on the threshold
//! rules, otherwise hand an encoded feature vector to the classifier.

pub mod classifier;
pub mod encoder;
pub mod recommend;
pub mod rules;

use crate::models::{Severity, SymptomReport};
use classifier::{ClassifierError, SeverityClassifier};

/// Which stage settled the severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    NoSymptoms,
    Rule,
    Classifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub severity: Severity,
    pub source: Source,
}

impl Assessment {
    pub fn recommendation(&self) -> &'static str {
        recommend::recommend(i64::from(self.severity.code()))
    }
}

pub fn assess(
    report: &SymptomReport,
    classifier: &dyn SeverityClassifier,
) -> Result<Assessment, ClassifierError> {
    if !report.any_symptom() {
        return Ok(Assessment { severity: Severity::None, source: Source::NoSymptoms });
    }

    if let Some(severity) = rules::classify_by_rule(&report.symptoms, report.age, &report.gender) {
        return Ok(Assessment { severity, source: Source::Rule });
    }

    let features = encoder::encode(report);
    let class = classifier.predict(&features)?;
    let severity = Severity::try_from(class).map_err(ClassifierError::UnknownClass)?;

    Ok(Assessment { severity, source: Source::Classifier })
}
