//! Malpred: a symptom-based malaria screening engine
//!
//! Malpred encodes eight Yes/No symptom answers plus vital signs into the
//! fixed-order feature vector a pre-trained binary classifier expects,
//! invokes the classifier, and renders the labeled result as display lines
//! and an optional exported report document.

pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod report;

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::encoding::{encode, parse_blood_pressure, BloodPressure, FeatureLayout, SymptomSet, VitalSigns};
use crate::error::MalpredError;
use crate::model::{Classifier, LabelMapping, Prediction};
use crate::report::Report;

/// What to do when the blood-pressure field is absent or malformed.
///
/// An explicit, configurable choice applied at exactly one call site, so
/// every deployment behaves consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpPolicy {
    /// Refuse to predict until a valid reading is entered.
    BlockOnInvalid,
    /// Predict anyway; the report renders the placeholder text. With the
    /// 10-feature layout the missing reading encodes as 0/0.
    #[default]
    ProceedWithPlaceholder,
}

/// One form submission: the answers exactly as captured, before encoding.
/// Built fresh per request and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub symptoms: SymptomSet,
    /// Raw blood-pressure field, e.g. "120/80". May be empty or malformed.
    pub blood_pressure: String,
    pub temperature_c: f64,
}

/// The long-lived screening pipeline: classifier handle plus the label and
/// policy configuration. Read-only after construction, so shared references
/// across requests are safe.
#[derive(Debug)]
pub struct ScreeningEngine {
    classifier: Classifier,
    labels: LabelMapping,
    policy: BpPolicy,
    layout: FeatureLayout,
}

impl ScreeningEngine {
    pub fn new(
        classifier: Classifier,
        labels: LabelMapping,
        policy: BpPolicy,
        layout: FeatureLayout,
    ) -> Self {
        ScreeningEngine { classifier, labels, policy, layout }
    }

    /// Build the engine from loaded configuration. Loads the classifier
    /// artifact; failure here is fatal and must prevent any prediction.
    pub fn from_config(config: &Config) -> Result<Self, MalpredError> {
        let classifier = Classifier::load(&config.model.path)?;
        Ok(ScreeningEngine::new(
            classifier,
            config.labels.clone(),
            config.policy,
            config.model.layout,
        ))
    }

    pub fn model_name(&self) -> &str {
        &self.classifier.model_name
    }

    pub fn policy(&self) -> BpPolicy {
        self.policy
    }

    /// Evaluate one submission: parse the BP field per policy, encode,
    /// predict, and assemble the report.
    pub fn screen(&self, submission: &Submission) -> Result<Report, MalpredError> {
        let blood_pressure = match parse_blood_pressure(&submission.blood_pressure) {
            Ok(bp) => Some(bp),
            Err(e) => match self.policy {
                BpPolicy::BlockOnInvalid => return Err(e.into()),
                BpPolicy::ProceedWithPlaceholder => None,
            },
        };

        let vitals = VitalSigns {
            blood_pressure,
            temperature_c: submission.temperature_c,
        };

        let vector = match (self.layout, blood_pressure) {
            // Placeholder policy with a vitals-shaped model: encode the
            // missing reading as 0/0 so the vector shape never varies.
            (FeatureLayout::SymptomsWithVitals, None) => {
                let zero_filled = VitalSigns {
                    blood_pressure: Some(BloodPressure { systolic: 0, diastolic: 0 }),
                    temperature_c: submission.temperature_c,
                };
                encode(&submission.symptoms, &zero_filled, self.layout)?
            }
            _ => encode(&submission.symptoms, &vitals, self.layout)?,
        };

        let class = self.classifier.predict(&vector)?;
        let prediction = Prediction::new(class, &self.labels);

        Ok(Report::new(prediction, submission.symptoms, vitals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Symptom;
    use pretty_assertions::assert_eq;

    fn fever_weighted_classifier() -> Classifier {
        let json = r#"{"model_name":"test","weights":[1,0,0,0,0,0,0,0],"bias":0.0,"threshold":0.5}"#;
        serde_json::from_str(json).unwrap()
    }

    fn engine(policy: BpPolicy) -> ScreeningEngine {
        ScreeningEngine::new(
            fever_weighted_classifier(),
            LabelMapping::default(),
            policy,
            FeatureLayout::SymptomsOnly,
        )
    }

    fn submission(bp: &str) -> Submission {
        Submission {
            symptoms: SymptomSet::none().with(Symptom::Fever, true),
            blood_pressure: bp.to_string(),
            temperature_c: 38.5,
        }
    }

    #[test]
    fn screening_produces_labeled_report() {
        let report = engine(BpPolicy::ProceedWithPlaceholder)
            .screen(&submission("120/80"))
            .unwrap();
        assert_eq!(report.prediction.label, "Malaria");
        assert_eq!(report.prediction.class, 1);
    }

    #[test]
    fn block_policy_rejects_invalid_bp_before_prediction() {
        let result = engine(BpPolicy::BlockOnInvalid).screen(&submission("garbage"));
        assert!(matches!(result, Err(MalpredError::Encoding(_))));
    }

    #[test]
    fn placeholder_policy_predicts_despite_invalid_bp() {
        let report = engine(BpPolicy::ProceedWithPlaceholder)
            .screen(&submission(""))
            .unwrap();
        assert_eq!(report.prediction.label, "Malaria");
        assert_eq!(report.vitals.blood_pressure, None);
        assert!(report
            .lines()
            .contains(&format!("Blood Pressure: {}", report::BP_PLACEHOLDER)));
    }

    #[test]
    fn vitals_layout_zero_fills_missing_bp_under_placeholder_policy() {
        let json = r#"{"model_name":"test","weights":[1,0,0,0,0,0,0,0,0,0],"bias":0.0,"threshold":0.5}"#;
        let classifier: Classifier = serde_json::from_str(json).unwrap();
        let engine = ScreeningEngine::new(
            classifier,
            LabelMapping::default(),
            BpPolicy::ProceedWithPlaceholder,
            FeatureLayout::SymptomsWithVitals,
        );

        let report = engine.screen(&submission("not-a-reading")).unwrap();
        // Prediction went through on the zero-filled vector
        assert_eq!(report.prediction.class, 1);
        // But the report still says the reading was not provided
        assert_eq!(report.vitals.blood_pressure, None);
    }
}
