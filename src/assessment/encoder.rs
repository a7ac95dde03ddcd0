use thiserror::Error;

use crate::models::{Gender, PredictForm, SymptomReport, SYMPTOM_FIELDS};

pub const FEATURE_COUNT: usize = 16;

const NONE_EXPERIENCING: usize = 6;
const AGE_BUCKETS: std::ops::Range<usize> = 7..12;
const GENDER_FEMALE: usize = 12;
const GENDER_MALE: usize = 13;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid answer for {field}: expected yes or no, got {value:?}")]
    SymptomToken { field: &'static str, value: String },

    #[error("invalid age: {0:?}")]
    Age(String),

    #[error("age must be non-negative, got {0}")]
    NegativeAge(i64),
}

/// Classifier input. Layout:
/// `[6 symptoms, none_experiencing, 5 age buckets, female, male, 0, 0]`.
/// The last two slots stand in for the severity columns the model was
/// trained with and are always zero at inference time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
impl FeatureVector {
    pub fn age_buckets(&self) -> &[f64] {
        &self.0[AGE_BUCKETS]
    }

    pub fn gender_flags(&self) -> (f64, f64) {
        (self.0[GENDER_FEMALE], self.0[GENDER_MALE])
    }

    pub fn none_experiencing(&self) -> f64 {
        self.0[NONE_EXPERIENCING]
    }
}

fn flag(set: bool) -> f64 {
    if set { 1.0 } else { 0.0 }
}

fn age_bucket(age: u32) -> usize {
    match age {
        0..=9 => 0,
        10..=19 => 1,
        20..=24 => 2,
        25..=59 => 3,
        _ => 4,
    }
}

pub fn encode(report: &SymptomReport) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];

    for (slot, present) in features.iter_mut().zip(report.symptoms) {
        *slot = flag(present);
    }
    features[NONE_EXPERIENCING] = flag(!report.any_symptom());
    features[AGE_BUCKETS.start + age_bucket(report.age)] = 1.0;
    features[GENDER_FEMALE] = flag(report.gender == Gender::Female);
    features[GENDER_MALE] = flag(report.gender == Gender::Male);

    FeatureVector(features)
}

fn parse_answer(field: &'static str, raw: &str) -> Result<bool, InvalidInput> {
    let token = raw.trim();
    if token.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(InvalidInput::SymptomToken { field, value: raw.to_string() })
    }
}

fn parse_age(raw: &str) -> Result<u32, InvalidInput> {
    let age: i64 = raw
        .trim()
        .parse()
        .map_err(|_| InvalidInput::Age(raw.to_string()))?;
    if age < 0 {
        return Err(InvalidInput::NegativeAge(age));
    }
    u32::try_from(age).map_err(|_| InvalidInput::Age(raw.to_string()))
}

/// Validates a raw form into a `SymptomReport`.
pub fn parse_report(form: &PredictForm) -> Result<SymptomReport, InvalidInput> {
    let name = form.name.clone().ok_or(InvalidInput::MissingField("name"))?;

    let mut symptoms = [false; 6];
    for ((slot, field), answer) in symptoms
        .iter_mut()
        .zip(SYMPTOM_FIELDS)
        .zip(form.symptom_answers())
    {
        let raw = answer.ok_or(InvalidInput::MissingField(field))?;
        *slot = parse_answer(field, raw)?;
    }

    let age = parse_age(form.age.as_deref().ok_or(InvalidInput::MissingField("age"))?)?;
    let gender = Gender::parse(form.gender.as_deref().ok_or(InvalidInput::MissingField("gender"))?);

    Ok(SymptomReport { name, symptoms, age, gender })
}
