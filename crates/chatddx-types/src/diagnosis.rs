//! Differential-diagnosis report returned by the backend's diagnostic API.

use serde::{Deserialize, Serialize};

/// Form body of the diagnose action and JSON body posted to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomsForm {
    #[serde(default)]
    pub symptoms: String,
}

/// A single candidate diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub diagnosis: String,
    #[serde(default)]
    pub clinical_rationale: String,
    #[serde(default)]
    pub key_negatives: Option<String>,
    /// e.g. "Immediate Life Threat", "Emergent", "Urgent", "Stable", "Routine".
    #[serde(default)]
    pub urgency: String,
    /// e.g. "High", "Moderate", "Low", "Remote".
    #[serde(default)]
    pub likelyhood: String,
}

/// A recommended diagnostic step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkupStep {
    pub test_name: String,
    /// "STAT", "Expedited" or "Routine".
    #[serde(default)]
    pub priority: String,
}

/// Prioritized differential diagnoses plus the suggested workup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosisReport {
    #[serde(default)]
    pub possible_diagnoses: Vec<DiagnosisCandidate>,
    #[serde(default)]
    pub workup: Vec<WorkupStep>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserialize() {
        let json = serde_json::json!({
            "possible_diagnoses": [{
                "diagnosis": "Pulmonary embolism",
                "clinical_rationale": "Pleuritic chest pain, tachycardia",
                "key_negatives": null,
                "urgency": "Emergent",
                "likelyhood": "Moderate"
            }],
            "workup": [{ "test_name": "CT pulmonary angiography", "priority": "STAT" }],
            "disposition": "admit"
        });

        let report: DiagnosisReport = serde_json::from_value(json).unwrap();
        assert_eq!(report.possible_diagnoses[0].diagnosis, "Pulmonary embolism");
        assert!(report.possible_diagnoses[0].key_negatives.is_none());
        assert_eq!(report.workup[0].priority, "STAT");
        assert_eq!(report.extra["disposition"], "admit");
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report: DiagnosisReport = serde_json::from_str("{}").unwrap();
        assert!(report.possible_diagnoses.is_empty());
        assert!(report.workup.is_empty());
    }
}
