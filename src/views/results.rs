use std::fmt::Write as _;

use crate::models::AnalysisResult;

pub const DISCLAIMER: &str = "Medical Disclaimer: This AI analysis is for educational and research purposes only. Always consult with qualified healthcare professionals for clinical decisions. Do not use as a substitute for professional medical judgment.";

/// Diagnoses above this confidence get the emphasized badge.
const HIGHLIGHT_ABOVE: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisRow {
    pub condition: String,
    pub confidence_label: String,
    /// Progress-bar value, passed through unchanged.
    pub bar_value: f64,
    pub highlighted: bool,
    pub reasoning: String,
}

/// Display projection of an `AnalysisResult`. No computation beyond
/// formatting, no validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub query: String,
    pub confidence_badge: String,
    pub diagnoses: Vec<DiagnosisRow>,
    pub suggested_tests: Vec<String>,
    pub recommendations: Vec<String>,
    pub disclaimer: &'static str,
}

impl From<&AnalysisResult> for ResultsView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            query: result.query.clone(),
            confidence_badge: format!("{}% confidence", result.confidence),
            diagnoses: result
                .diagnoses
                .iter()
                .map(|d| DiagnosisRow {
                    condition: d.condition.clone(),
                    confidence_label: format!("{}%", d.confidence),
                    bar_value: d.confidence,
                    highlighted: d.confidence > HIGHLIGHT_ABOVE,
                    reasoning: d.reasoning.clone(),
                })
                .collect(),
            suggested_tests: result.suggested_tests.clone(),
            recommendations: result
                .recommendations
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{}. {r}", i + 1))
                .collect(),
            disclaimer: DISCLAIMER,
        }
    }
}

impl ResultsView {
    /// Plain-text layout for terminals and logs.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Analysis Query: {}  [{}]", self.query, self.confidence_badge);

        let _ = writeln!(out, "\nPossible Diagnoses");
        for row in &self.diagnoses {
            let _ = writeln!(out, "  - {} ({})", row.condition, row.confidence_label);
            let _ = writeln!(out, "    {}", row.reasoning);
        }

        let _ = writeln!(out, "\nRecommended Tests");
        for test in &self.suggested_tests {
            let _ = writeln!(out, "  - {test}");
        }

        let _ = writeln!(out, "\nClinical Recommendations");
        for rec in &self.recommendations {
            let _ = writeln!(out, "  {rec}");
        }

        let _ = write!(out, "\n{}", self.disclaimer);
        out
    }
}
