//! Input-to-feature encoding
//!
//! Turns raw form answers into the fixed-order numeric vector the
//! classifier expects:
//! - Yes/No symptom answers become 0/1 flags
//! - Blood pressure is parsed and validated from its raw "SYS/DIA" form
//! - Temperature is range-checked but never part of the vector

use serde::{Serialize, Deserialize};
use std::fmt;

/// The eight symptoms the classifier was trained on, in training order.
///
/// `Symptom::ALL` is the single source of truth for feature order. Changing
/// it without retraining the model silently breaks every prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symptom {
    Fever,
    Cold,
    Rigor,
    Fatigue,
    Headache,
    BitterTongue,
    Vomiting,
    Diarrhea,
}

impl Symptom {
    pub const ALL: [Symptom; 8] = [
        Symptom::Fever,
        Symptom::Cold,
        Symptom::Rigor,
        Symptom::Fatigue,
        Symptom::Headache,
        Symptom::BitterTongue,
        Symptom::Vomiting,
        Symptom::Diarrhea,
    ];

    /// Display name as it appears on the form and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Symptom::Fever => "Fever",
            Symptom::Cold => "Cold",
            Symptom::Rigor => "Rigor",
            Symptom::Fatigue => "Fatigue",
            Symptom::Headache => "Headache",
            Symptom::BitterTongue => "Bitter Tongue",
            Symptom::Vomiting => "Vomiting",
            Symptom::Diarrhea => "Diarrhea",
        }
    }

    // Declaration order matches `ALL`, so the discriminant is the slot
    fn index(&self) -> usize {
        *self as usize
    }
}

/// One submission's worth of Yes/No answers, immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSet {
    answers: [bool; 8],
}

impl SymptomSet {
    /// All answers "No".
    pub fn none() -> Self {
        SymptomSet { answers: [false; 8] }
    }

    /// Answers in `Symptom::ALL` order.
    pub fn from_answers(answers: [bool; 8]) -> Self {
        SymptomSet { answers }
    }

    /// Builder-style answer, consumed and returned so a set is never
    /// half-filled in place.
    pub fn with(mut self, symptom: Symptom, present: bool) -> Self {
        self.answers[symptom.index()] = present;
        self
    }

    pub fn is_present(&self, symptom: Symptom) -> bool {
        self.answers[symptom.index()]
    }
}

/// A parsed, structurally valid blood-pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} mmHg", self.systolic, self.diastolic)
    }
}

/// Vital-sign readings attached to a submission. Temperature always has a
/// value (the form widget has a default); blood pressure is `None` when the
/// raw field was absent or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub blood_pressure: Option<BloodPressure>,
    pub temperature_c: f64,
}

/// Temperature bounds enforced at encoding time. The form widget clamps to
/// the same range, so anything outside it here is a caller bug.
pub const TEMPERATURE_MIN_C: f64 = 30.0;
pub const TEMPERATURE_MAX_C: f64 = 45.0;

/// Which vector shape the loaded model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// 8 features: symptom flags only.
    SymptomsOnly,
    /// 10 features: symptom flags, then systolic, then diastolic.
    SymptomsWithVitals,
}

impl FeatureLayout {
    pub fn len(&self) -> usize {
        match self {
            FeatureLayout::SymptomsOnly => 8,
            FeatureLayout::SymptomsWithVitals => 10,
        }
    }
}

/// The fixed-order numeric vector handed to the classifier. Only `encode`
/// builds one, so a value of this type always has a layout-consistent shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// The raw blood-pressure field could not be parsed as "SYS/DIA".
    InvalidBloodPressure(String),
    /// Temperature outside [30.0, 45.0] °C; the capture surface should have
    /// prevented this.
    TemperatureOutOfRange(f64),
    /// The layout needs blood pressure but none was provided.
    MissingBloodPressure,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidBloodPressure(raw) => {
                write!(f, "Invalid blood pressure {:?}: expected Systolic/Diastolic, e.g. 120/80", raw)
            }
            EncodingError::TemperatureOutOfRange(t) => {
                write!(f, "Temperature {}°C outside the accepted range {}..{}", t, TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)
            }
            EncodingError::MissingBloodPressure => {
                write!(f, "Blood pressure is required but was not provided")
            }
        }
    }
}

impl std::error::Error for EncodingError {}

/// Parse a raw blood-pressure string into a reading.
///
/// Exactly one "/" separator, both halves positive integers. Any failure
/// yields `InvalidBloodPressure` — never a partial result.
pub fn parse_blood_pressure(raw: &str) -> Result<BloodPressure, EncodingError> {
    let invalid = || EncodingError::InvalidBloodPressure(raw.to_string());

    let mut halves = raw.trim().split('/');
    let systolic = halves.next().ok_or_else(invalid)?;
    let diastolic = halves.next().ok_or_else(invalid)?;
    if halves.next().is_some() {
        return Err(invalid());
    }

    let systolic: u32 = systolic.trim().parse().map_err(|_| invalid())?;
    let diastolic: u32 = diastolic.trim().parse().map_err(|_| invalid())?;

    // A zero value means the field was never filled in, not a reading
    if systolic == 0 || diastolic == 0 {
        return Err(invalid());
    }

    Ok(BloodPressure { systolic, diastolic })
}

/// Encode a submission into the vector shape the classifier expects.
///
/// Pure function of its inputs: same answers in, same vector out. Symptom
/// flags are emitted in `Symptom::ALL` order; with `SymptomsWithVitals` the
/// systolic and diastolic values are appended in that order. Temperature is
/// validated here but belongs to the report, not the vector.
pub fn encode(
    symptoms: &SymptomSet,
    vitals: &VitalSigns,
    layout: FeatureLayout,
) -> Result<FeatureVector, EncodingError> {
    if !(TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&vitals.temperature_c) {
        return Err(EncodingError::TemperatureOutOfRange(vitals.temperature_c));
    }

    let mut values = Vec::with_capacity(layout.len());
    for symptom in Symptom::ALL {
        values.push(if symptoms.is_present(symptom) { 1.0 } else { 0.0 });
    }

    if layout == FeatureLayout::SymptomsWithVitals {
        match vitals.blood_pressure {
            Some(bp) => {
                values.push(f64::from(bp.systolic));
                values.push(f64::from(bp.diastolic));
            }
            None => return Err(EncodingError::MissingBloodPressure),
        }
    }

    Ok(FeatureVector(values))
}
