//! Report formatting
//!
//! Turns a prediction plus the answers that produced it into a
//! human-readable rendering: labeled lines for on-screen display, and an
//! optional exported document (see `document`).

pub mod document;
pub use document::{export_report, ExportError};

use serde::{Serialize, Deserialize};

use crate::encoding::{Symptom, SymptomSet, VitalSigns};
use crate::model::Prediction;

/// Text rendered in place of a blood-pressure reading that was absent or
/// failed to parse. Formatting must never fail on a bad BP field.
pub const BP_PLACEHOLDER: &str = "invalid or not provided";

/// Read-only view combining one submission's prediction and inputs.
/// Built once per request, rendered, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub prediction: Prediction,
    pub symptoms: SymptomSet,
    pub vitals: VitalSigns,
}

impl Report {
    pub fn new(prediction: Prediction, symptoms: SymptomSet, vitals: VitalSigns) -> Self {
        Report { prediction, symptoms, vitals }
    }

    /// Display-ready lines, in fixed order: prediction, one line per
    /// symptom, blood pressure, temperature.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(Symptom::ALL.len() + 3);
        lines.push(format!("Prediction: {}", self.prediction.label));

        for symptom in Symptom::ALL {
            let answer = if self.symptoms.is_present(symptom) { "Yes" } else { "No" };
            lines.push(format!("{}: {}", symptom.name(), answer));
        }

        lines.push(format!("Blood Pressure: {}", self.blood_pressure_text()));
        lines.push(format!("Temperature: {:.1}°C", self.vitals.temperature_c));
        lines
    }

    /// "120/80 mmHg" or the fixed placeholder.
    pub fn blood_pressure_text(&self) -> String {
        match self.vitals.blood_pressure {
            Some(bp) => bp.to_string(),
            None => BP_PLACEHOLDER.to_string(),
        }
    }
}
