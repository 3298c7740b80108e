use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub condition: String,
    /// 0–100, as produced by the model.
    pub confidence: f64,
    pub reasoning: String,
}

/// Arguments of the forced `provide_medical_analysis` tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub diagnoses: Vec<Diagnosis>,
    pub suggested_tests: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub query: String,
    pub confidence: i64,
    pub diagnoses: Vec<Diagnosis>,
    pub suggested_tests: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn from_payload(query: impl Into<String>, payload: AnalysisPayload) -> Self {
        Self {
            query: query.into(),
            confidence: overall_confidence(&payload.diagnoses),
            diagnoses: payload.diagnoses,
            suggested_tests: payload.suggested_tests,
            recommendations: payload.recommendations,
        }
    }
}

/// Overall score is the rounded confidence of the first diagnosis, 0 when
/// there are none. Not an aggregate.
pub fn overall_confidence(diagnoses: &[Diagnosis]) -> i64 {
    diagnoses
        .first()
        .map(|d| d.confidence.round() as i64)
        .unwrap_or(0)
}
