use crate::models::{Gender, Severity};

/// Threshold rules checked before the classifier. `Some` ends
/// classification; `None` defers to the model.
///
/// The three all-symptom branches overlap on purpose: they mirror the
/// clinical policy as written and are kept separate until it is revised.
/// The no-symptom/male/25+ branch reports "not severe" without settling the
/// outcome, so it also yields `None`.
#[allow(clippy::if_same_then_else)]
pub fn classify_by_rule(symptoms: &[bool; 6], age: u32, gender: &Gender) -> Option<Severity> {
    let all = symptoms.iter().all(|s| *s);
    let none = !symptoms.iter().any(|s| *s);

    if all && age >= 60 {
        Some(Severity::Severe)
    } else if all && age < 11 {
        Some(Severity::Severe)
    } else if all {
        Some(Severity::Severe)
    } else if none && *gender == Gender::Male && age >= 25 {
        None
    } else {
        None
    }
}
