use serde::{ Serialize, Deserialize };
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Form field names of the six symptom questions, in feature order.
pub const SYMPTOM_FIELDS: [&str; 6] = [
    "tiredness",
    "dry_cough",
    "difficulty_breathing",
    "sore_throat",
    "nasal_congestion",
    "runny_nose",
];

/// Submitted gender. Only the exact tokens `male` and `female` select a
/// one-hot flag; anything else is kept verbatim for display and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "male" => Gender::Male,
            "female" => Gender::Female,
            other => Gender::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other(raw) => raw,
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Severity {
    None = 0,
    Mild = 1,
    Moderate = 2,
    Severe = 3,
}

impl Severity {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl TryFrom<i64> for Severity {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Severity::None),
            1 => Ok(Severity::Mild),
            2 => Ok(Severity::Moderate),
            3 => Ok(Severity::Severe),
            other => Err(other),
        }
    }
}

/// One submitted symptom form, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomReport {
    pub name: String,
    pub symptoms: [bool; 6],
    pub age: u32,
    pub gender: Gender,
}

impl SymptomReport {
    pub fn any_symptom(&self) -> bool {
        self.symptoms.iter().any(|s| *s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub name: String,
    pub symptoms: [bool; 6],
    pub age: u32,
    pub gender: Gender,
    pub severity: Severity,
    pub recommendation: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Raw `/predict` form. Fields are optional so a missing one surfaces as an
/// input error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    pub name: Option<String>,
    pub tiredness: Option<String>,
    pub dry_cough: Option<String>,
    pub difficulty_breathing: Option<String>,
    pub sore_throat: Option<String>,
    pub nasal_congestion: Option<String>,
    pub runny_nose: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl PredictForm {
    /// Symptom answers in `SYMPTOM_FIELDS` order.
    pub fn symptom_answers(&self) -> [Option<&str>; 6] {
        [
            self.tiredness.as_deref(),
            self.dry_cough.as_deref(),
            self.difficulty_breathing.as_deref(),
            self.sore_throat.as_deref(),
            self.nasal_congestion.as_deref(),
            self.runny_nose.as_deref(),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
