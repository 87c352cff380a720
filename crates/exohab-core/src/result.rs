use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Which backend produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    /// Remote inference service answered.
    Real,
    /// Local heuristic answered in its place.
    Mock,
}

impl ModelSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Mock => "mock",
        }
    }
}

/// A scored request, ready to serialize back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub habitability_score: f64,
    pub model_source: ModelSource,
    pub timestamp: String,
}

impl PredictionResult {
    /// Stamps a raw score with its origin and the current UTC instant.
    /// The score is rounded to two decimals, half away from zero.
    pub fn new(score: f64, model_source: ModelSource) -> Self {
        Self {
            habitability_score: round2(score),
            model_source,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
